use crate::Stack;
use colored::Colorize;
use edgegate_core::{CLOUDFLARE_REQUIRED_KEYS, GOOGLE_REQUIRED_KEYS};

pub fn handle(stack: Stack, environment: &str) -> anyhow::Result<()> {
    println!("{}", "設定を検証中...".blue());

    let required: &[&str] = match stack {
        Stack::Cloudflare => CLOUDFLARE_REQUIRED_KEYS,
        Stack::Google => GOOGLE_REQUIRED_KEYS,
        Stack::AwsSgEnforce => {
            // このスタックは tfvars を使わない
            println!(
                "aws-sg-enforce は tfvars を使いません（SG_ID と AWS 認証情報を環境変数で指定してください）"
            );
            return Ok(());
        }
    };

    let base_dir = std::env::current_dir()?;
    match edgegate_core::validate_required_keys(&base_dir, environment, required) {
        Ok(()) => {
            println!("{}", "✓ 設定ファイルは正常です！".green().bold());
            println!("  検証したキー: {}個", required.len());
            Ok(())
        }
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ 設定エラー".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
