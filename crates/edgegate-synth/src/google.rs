//! Google stack
//!
//! OAuth 同意画面やクライアントの作成は意図的に自動化しない（組織の
//! ブランディング要件と Google 審査プロセスを尊重するため）。この
//! スタックは変数定義のみを持ち、実作業はチェックリスト生成
//! （edgegate-google）が担う。

use crate::document::{TfDocument, TfVariable};
use edgegate_core::GOOGLE_STACK_ID;
use serde_json::json;

/// Synthesize the Google stack document (variables only).
pub fn synthesize(environment: &str) -> TfDocument {
    let mut doc = TfDocument::new(GOOGLE_STACK_ID, environment);

    doc.add_variable(
        "google_project_id",
        TfVariable::string("Google Cloud Project ID").with_default(json!("my-google-oauth-project")),
    );
    doc.add_variable(
        "cloudflare_team_domain",
        TfVariable::string("Cloudflare Zero Trust チームドメイン（リダイレクトURIで使用）")
            .with_default(json!("my-team")),
    );
    doc.add_variable("domain_name", TfVariable::string("ベースドメイン名（例: example.com）"));
    doc.add_variable("subdomain_name", TfVariable::string("サブドメイン名（例: app）"));
    doc.add_variable(
        "support_email",
        TfVariable::string("OAuth同意画面用のサポートメールアドレス（必須）"),
    );
    doc.add_variable(
        "google_client_id",
        TfVariable::string("Google OAuth Client ID（設定検証用）"),
    );
    doc.add_variable(
        "google_client_secret",
        TfVariable::string("Google OAuth Client Secret（設定検証用）").sensitive(),
    );

    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables_only() {
        let value = synthesize("prod").to_value().unwrap();
        assert!(value.get("resource").is_none());
        assert_eq!(value["variable"].as_object().unwrap().len(), 7);
        assert_eq!(value["variable"]["google_project_id"]["default"], "my-google-oauth-project");
        // 原典どおり client_id は sensitive にしない
        assert!(value["variable"]["google_client_id"].get("sensitive").is_none());
        assert_eq!(value["variable"]["google_client_secret"]["sensitive"], true);
    }

    #[test]
    fn test_backend_is_environment_scoped() {
        let value = synthesize("dev").to_value().unwrap();
        assert_eq!(
            value["terraform"]["backend"]["local"]["path"],
            "./terraform-state/google/dev/terraform.tfstate"
        );
    }
}
