//! リモートリソースの命名テンプレート
//!
//! 自然キー検索は名前の完全一致で行うため、ここのテンプレートを変更すると
//! 既存リソースの検出に失敗する。

/// サブドメインとベースドメインから FQDN を組み立てる
pub fn full_domain(subdomain: &str, domain: &str) -> String {
    format!("{subdomain}.{domain}")
}

/// Access アプリケーション名
pub fn access_app_name(subdomain: &str, domain: &str, environment: &str) -> String {
    format!("{} Access ({environment})", full_domain(subdomain, domain))
}

/// Google ID プロバイダー名
pub fn identity_provider_name(subdomain: &str, domain: &str) -> String {
    format!("Google IDP for {}", full_domain(subdomain, domain))
}

/// Access ポリシー名
pub fn access_policy_name(allowed_email_domain: &str) -> String {
    format!("Allow {allowed_email_domain} domain")
}
