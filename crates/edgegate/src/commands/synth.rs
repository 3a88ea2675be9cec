use crate::Stack;
use colored::Colorize;
use edgegate_core::{
    AWS_SG_STACK_ID, CLOUDFLARE_REQUIRED_KEYS, CLOUDFLARE_STACK_ID, ConfigError,
    GOOGLE_REQUIRED_KEYS, GOOGLE_STACK_ID,
};
use edgegate_synth::AwsSgEnforceInputs;

pub(crate) fn stack_id(stack: Stack) -> &'static str {
    match stack {
        Stack::Cloudflare => CLOUDFLARE_STACK_ID,
        Stack::Google => GOOGLE_STACK_ID,
        Stack::AwsSgEnforce => AWS_SG_STACK_ID,
    }
}

pub fn handle(stack: Stack, environment: &str) -> anyhow::Result<()> {
    let base_dir = std::env::current_dir()?;

    let doc = match stack {
        Stack::Cloudflare => {
            edgegate_core::validate_required_keys(&base_dir, environment, CLOUDFLARE_REQUIRED_KEYS)?;
            edgegate_synth::cloudflare::synthesize(environment)
        }
        Stack::Google => {
            edgegate_core::validate_required_keys(&base_dir, environment, GOOGLE_REQUIRED_KEYS)?;
            edgegate_synth::google::synthesize(environment)
        }
        Stack::AwsSgEnforce => {
            let inputs = aws_inputs()?;
            edgegate_synth::aws::synthesize(environment, &inputs)
        }
    };

    let path = edgegate_synth::stack_document_path(&base_dir, stack_id(stack));
    doc.write_to(&path)?;
    println!("{} {}", "✓ 合成完了:".green().bold(), path.display());

    // Google スタックは実リソースを持たず、成果物は手動設定用の
    // チェックリスト。合成と同時に生成する。
    if stack == Stack::Google {
        let written = super::checklist::write_offline(&base_dir, environment)?;
        println!(
            "  チェックリスト: {}",
            written.display().to_string().cyan()
        );
    }

    Ok(())
}

fn aws_inputs() -> anyhow::Result<AwsSgEnforceInputs> {
    // import はトークン参照不可のため、対象 SG は環境変数で指定する
    let security_group_id = non_empty_env("SG_ID").ok_or(ConfigError::MissingEnvVar("SG_ID"))?;
    ensure_aws_auth()?;
    let region = non_empty_env("AWS_REGION").unwrap_or_else(|| "ap-northeast-1".to_string());
    Ok(AwsSgEnforceInputs {
        security_group_id,
        region,
    })
}

fn ensure_aws_auth() -> Result<(), ConfigError> {
    let has_profile = non_empty_env("AWS_PROFILE").is_some();
    let has_keys =
        non_empty_env("AWS_ACCESS_KEY_ID").is_some() && non_empty_env("AWS_SECRET_ACCESS_KEY").is_some();
    if !has_profile && !has_keys {
        return Err(ConfigError::MissingAwsAuth);
    }
    Ok(())
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
