//! スタック別の設定構造体
//!
//! tfvars から一度だけ読み込み、以降は構造体を引数で引き回す。
//! 深い場所から環境変数を直接読むことはしない（例外はトークンの
//! `CLOUDFLARE_API_TOKEN` 上書きで、読み込み時に一度だけ解決する）。

use crate::error::{ConfigError, Result};
use crate::tfvars::{parse_simple_tfvars, pick_tfvars_path, read_file_safe};
use std::collections::HashMap;
use std::path::Path;

pub const CLOUDFLARE_STACK_ID: &str = "cloudflare";
pub const GOOGLE_STACK_ID: &str = "google";
pub const AWS_SG_STACK_ID: &str = "aws-sg-enforce";

/// Cloudflare スタックが要求する tfvars キー
pub const CLOUDFLARE_REQUIRED_KEYS: &[&str] = &[
    "cloudflare_api_token",
    "cloudflare_account_id",
    "domain_name",
    "subdomain_name",
    "target_ip_address",
    "google_client_id",
    "google_client_secret",
    "allowed_email_domain",
];

/// Google スタックが要求する tfvars キー
pub const GOOGLE_REQUIRED_KEYS: &[&str] = &[
    "google_project_id",
    "cloudflare_team_domain",
    "domain_name",
    "subdomain_name",
    "google_client_id",
    "google_client_secret",
];

/// Cloudflare スタック設定
///
/// すべて Option で保持する。どのキーが必須かはコマンド側の
/// 検証（[`validate_required_keys`]）が決める。
#[derive(Debug, Clone, Default)]
pub struct CloudflareConfig {
    pub account_id: Option<String>,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub api_token: Option<String>,
    pub target_ip_address: Option<String>,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub allowed_email_domain: Option<String>,
}

impl CloudflareConfig {
    /// tfvars とトークン上書き環境変数から設定を構築する
    pub fn load(base_dir: &Path, environment: &str) -> Self {
        let vars = load_vars(base_dir, environment);
        let mut cfg = Self::from_vars(&vars);
        // 環境変数によるトークン上書き（CI でファイルに書かない運用向け）
        if let Ok(token) = std::env::var("CLOUDFLARE_API_TOKEN")
            && !token.trim().is_empty()
        {
            cfg.api_token = Some(token);
        }
        cfg
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        Self {
            account_id: vars.get("cloudflare_account_id").cloned(),
            domain: vars.get("domain_name").cloned(),
            subdomain: vars.get("subdomain_name").cloned(),
            api_token: vars.get("cloudflare_api_token").cloned(),
            target_ip_address: vars.get("target_ip_address").cloned(),
            google_client_id: vars.get("google_client_id").cloned(),
            google_client_secret: vars.get("google_client_secret").cloned(),
            allowed_email_domain: vars.get("allowed_email_domain").cloned(),
        }
    }

    /// tofu 子プロセスに渡す TF_VAR_* 環境変数を組み立てる
    ///
    /// 値が無いキーは含めない。呼び出し側で一度だけ構築し、
    /// すべてのサブプロセス呼び出しで使い回す。
    pub fn tf_var_env(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        let mut put = |key: &str, value: &Option<String>| {
            if let Some(v) = value {
                env.insert(format!("TF_VAR_{key}"), v.clone());
            }
        };
        put("cloudflare_api_token", &self.api_token);
        put("cloudflare_account_id", &self.account_id);
        put("domain_name", &self.domain);
        put("subdomain_name", &self.subdomain);
        put("target_ip_address", &self.target_ip_address);
        put("google_client_id", &self.google_client_id);
        put("google_client_secret", &self.google_client_secret);
        put("allowed_email_domain", &self.allowed_email_domain);
        env
    }
}

/// Google スタック設定
#[derive(Debug, Clone, Default)]
pub struct GoogleConfig {
    pub project_id: Option<String>,
    pub project_number: Option<String>,
    pub cloudflare_team_domain: Option<String>,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub support_email: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl GoogleConfig {
    pub fn load(base_dir: &Path, environment: &str) -> Self {
        let vars = load_vars(base_dir, environment);
        Self::from_vars(&vars)
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        Self {
            project_id: vars.get("google_project_id").cloned(),
            project_number: vars.get("google_project_number").cloned(),
            cloudflare_team_domain: vars.get("cloudflare_team_domain").cloned(),
            domain: vars.get("domain_name").cloned(),
            subdomain: vars.get("subdomain_name").cloned(),
            support_email: vars.get("support_email").cloned(),
            client_id: vars.get("google_client_id").cloned(),
            client_secret: vars.get("google_client_secret").cloned(),
        }
    }
}

fn load_vars(base_dir: &Path, environment: &str) -> HashMap<String, String> {
    match pick_tfvars_path(base_dir, environment) {
        Some(path) => read_file_safe(&path)
            .map(|content| parse_simple_tfvars(&content))
            .unwrap_or_default(),
        None => {
            tracing::debug!(environment, "tfvars ファイルが無いため空の設定で続行");
            HashMap::new()
        }
    }
}

/// tfvars の必須キー検証
///
/// 不足キーと空文字のキーを分けて報告する。どちらかがあれば失敗。
pub fn validate_required_keys(
    base_dir: &Path,
    environment: &str,
    required: &[&str],
) -> Result<()> {
    let Some(path) = pick_tfvars_path(base_dir, environment) else {
        return Err(ConfigError::TfvarsNotFound {
            environment: environment.to_string(),
        });
    };
    let content = std::fs::read_to_string(&path)?;
    let vars = parse_simple_tfvars(&content);

    let mut missing = Vec::new();
    let mut empty = Vec::new();
    for key in required {
        match vars.get(*key) {
            None => missing.push((*key).to_string()),
            Some(v) if v.trim().is_empty() => empty.push((*key).to_string()),
            Some(_) => {}
        }
    }

    if missing.is_empty() && empty.is_empty() {
        return Ok(());
    }

    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("不足キー: {}", missing.join(", ")));
    }
    if !empty.is_empty() {
        parts.push(format!("空文字のキー: {}", empty.join(", ")));
    }
    Err(ConfigError::TfvarsValidation {
        path,
        missing,
        empty,
        summary: parts.join(" / "),
    })
}
