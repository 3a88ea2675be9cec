//! Cloudflare stack
//!
//! DNS + Zero Trust Access for one protected subdomain: proxied A record,
//! SSL mode, Google identity provider, reusable allow-by-email-domain
//! policy and the self-hosted Access application tying them together.
//! All concrete values come from tfvars; the document only carries
//! variable references.

use crate::document::{TfDocument, TfVariable};
use edgegate_core::{CLOUDFLARE_STACK_ID, naming};
use serde_json::json;

const IDP_ADDRESS: &str = "cloudflare_zero_trust_access_identity_provider.hp_access_google_idp";
const POLICY_ADDRESS: &str = "cloudflare_zero_trust_access_policy.hp_access_policy";

/// Synthesize the Cloudflare stack document.
pub fn synthesize(environment: &str) -> TfDocument {
    let mut doc = TfDocument::new(CLOUDFLARE_STACK_ID, environment);
    doc.require_provider("cloudflare", "cloudflare/cloudflare", "~> 5");

    doc.add_variable(
        "cloudflare_api_token",
        TfVariable::string("Cloudflare API トークン（Zone:Edit と Access:Edit 権限を付与）").sensitive(),
    );
    doc.add_variable(
        "cloudflare_account_id",
        TfVariable::string("Cloudflare アカウントID"),
    );
    doc.add_variable("domain_name", TfVariable::string("ベースドメイン名（例: a5g.io）"));
    doc.add_variable("subdomain_name", TfVariable::string("サブドメイン名（例: hp）"));
    doc.add_variable(
        "target_ip_address",
        TfVariable::string("プロキシ先のターゲットIPv4アドレス"),
    );
    doc.add_variable(
        "google_client_id",
        TfVariable::string("Google OAuth クライアントID").sensitive(),
    );
    doc.add_variable(
        "google_client_secret",
        TfVariable::string("Google OAuth クライアントシークレット").sensitive(),
    );
    doc.add_variable(
        "allowed_email_domain",
        TfVariable::string("アクセス許可するメールドメイン（例: yourcompany.com）"),
    );

    doc.add_provider("cloudflare", json!({"api_token": "${var.cloudflare_api_token}"}));

    doc.add_data("cloudflare_zones", "zone", json!({"name": "${var.domain_name}"}));
    let zone_id = "${data.cloudflare_zones.zone.result[0].id}";

    // オリジンが HTTP のため SSL/TLS は Flexible に固定
    doc.add_resource(
        "cloudflare_zone_setting",
        "ssl_tls_setting",
        json!({
            "zone_id": zone_id,
            "setting_id": "ssl",
            "value": "flexible"
        }),
        "cloudflare/ssl_tls_setting",
    );

    // 命名テンプレートに変数参照を通すと、synthesized JSON には
    // "${var.subdomain_name}.${var.domain_name} Access (prod)" の形で入る
    let sub = "${var.subdomain_name}";
    let domain = "${var.domain_name}";
    let full_domain = naming::full_domain(sub, domain);

    doc.add_resource(
        "cloudflare_dns_record",
        "hp_subdomain_record",
        json!({
            "zone_id": zone_id,
            "ttl": 1,
            "name": sub,
            "type": "A",
            "content": "${var.target_ip_address}",
            "proxied": true,
            "comment": format!("edgegate により作成（環境: {environment}）")
        }),
        "cloudflare/hp_subdomain/record",
    );

    doc.add_resource(
        "cloudflare_zero_trust_access_identity_provider",
        "hp_access_google_idp",
        json!({
            "account_id": "${var.cloudflare_account_id}",
            "name": naming::identity_provider_name(sub, domain),
            "type": "google",
            "config": {
                "client_id": "${var.google_client_id}",
                "client_secret": "${var.google_client_secret}"
            }
        }),
        "cloudflare/hp_access/google_idp",
    );

    doc.add_resource(
        "cloudflare_zero_trust_access_policy",
        "hp_access_policy",
        json!({
            "account_id": "${var.cloudflare_account_id}",
            "name": naming::access_policy_name("${var.allowed_email_domain}"),
            "decision": "allow",
            "include": [
                {"email_domain": {"domain": "${var.allowed_email_domain}"}}
            ],
            "require": [
                {"login_method": {"id": format!("${{{IDP_ADDRESS}.id}}")}}
            ]
        }),
        "cloudflare/hp_access/policy",
    );

    doc.add_resource(
        "cloudflare_zero_trust_access_application",
        "hp_access_application",
        json!({
            "account_id": "${var.cloudflare_account_id}",
            "name": naming::access_app_name(sub, domain, environment),
            "domain": full_domain,
            "type": "self_hosted",
            "session_duration": "24h",
            "auto_redirect_to_identity": false,
            "enable_binding_cookie": false,
            "app_launcher_visible": true,
            "allowed_idps": [format!("${{{IDP_ADDRESS}.id}}")],
            "policies": [
                {"id": format!("${{{POLICY_ADDRESS}.id}}"), "precedence": 1}
            ],
            "depends_on": [IDP_ADDRESS]
        }),
        "cloudflare/hp_access/application",
    );

    doc.add_output(
        "application_id",
        json!("${cloudflare_zero_trust_access_application.hp_access_application.id}"),
        "Cloudflare Access アプリケーションID",
    );
    doc.add_output(
        "application_domain",
        json!("${cloudflare_zero_trust_access_application.hp_access_application.domain}"),
        "保護対象ドメイン",
    );
    doc.add_output(
        "policy_id",
        json!(format!("${{{POLICY_ADDRESS}.id}}")),
        "Access ポリシーID",
    );
    doc.add_output(
        "identity_provider_id",
        json!(format!("${{{IDP_ADDRESS}.id}}")),
        "Google ID プロバイダーID",
    );
    doc.add_output(
        "subdomain_url",
        json!(format!("https://{full_domain}")),
        "作成されたサブドメインのURL",
    );
    doc.add_output(
        "record_id",
        json!("${cloudflare_dns_record.hp_subdomain_record.id}"),
        "Cloudflare レコードID",
    );
    doc.add_output(
        "cloudflare_ip_ranges_info",
        json!("Cloudflare IP レンジは aws-sg-enforce スタックが自動取得します。手動確認: https://www.cloudflare.com/ips/ 参照"),
        "ファイアウォール設定向けの Cloudflare IP レンジに関する補足情報",
    );

    doc
}
