//! AWS security-group enforcement stack
//!
//! 既存のセキュリティグループを import で管理下に置き、Cloudflare の
//! 公開 IP レンジのみを許可する Ingress を厳格適用する。SG 自体は
//! 削除しない（ルールのみを管理する）。

use crate::document::{TfDocument, TfVariable};
use edgegate_core::AWS_SG_STACK_ID;
use serde_json::json;

const SG_ADDRESS: &str = "aws_security_group.managed_sg";

/// Inputs resolved by the caller before synthesis.
#[derive(Debug, Clone)]
pub struct AwsSgEnforceInputs {
    /// Existing security group to adopt
    pub security_group_id: String,
    pub region: String,
}

/// Synthesize the SG-enforcement stack document.
pub fn synthesize(environment: &str, inputs: &AwsSgEnforceInputs) -> TfDocument {
    let mut doc = TfDocument::new(AWS_SG_STACK_ID, environment);
    doc.require_provider("aws", "hashicorp/aws", "~> 5");
    doc.require_provider("http", "hashicorp/http", "~> 3");

    doc.add_variable(
        "cf_ipv4_cidrs",
        TfVariable::string_list("Cloudflare IPv4 CIDR リスト（未設定なら自動取得）")
            .with_default(json!([])),
    );
    doc.add_variable(
        "cf_ipv6_cidrs",
        TfVariable::string_list("Cloudflare IPv6 CIDR リスト（未設定なら自動取得）")
            .with_default(json!([])),
    );

    doc.add_provider("aws", json!({"region": inputs.region}));
    doc.add_provider("http", json!({}));

    doc.add_data("http", "cf_ips_v4", json!({"url": "https://www.cloudflare.com/ips-v4"}));
    doc.add_data("http", "cf_ips_v6", json!({"url": "https://www.cloudflare.com/ips-v6"}));

    // 正規化: trimspace -> split("\n") -> compact -> distinct -> sort
    // var が非空ならそちらを優先する
    let ipv4 = cidr_expression("cf_ipv4_cidrs", "cf_ips_v4");
    let ipv6 = cidr_expression("cf_ipv6_cidrs", "cf_ips_v6");

    doc.add_resource(
        "aws_security_group",
        "managed_sg",
        json!({
            "revoke_rules_on_delete": true,
            "ingress": [
                {
                    "protocol": "tcp",
                    "from_port": 80,
                    "to_port": 80,
                    "cidr_blocks": ipv4,
                    "ipv6_cidr_blocks": ipv6,
                    "description": "Allow Cloudflare 80"
                }
            ],
            // Egress はここでは管理しない（広い許可を避ける）
            "egress": [],
            "lifecycle": {
                "prevent_destroy": true,
                "ignore_changes": ["name", "name_prefix", "description", "tags_all"]
            }
        }),
        "aws-sg-enforce/managed_sg",
    );

    // 既存 SG を import で管理下に置く
    doc.add_import(SG_ADDRESS, &inputs.security_group_id);

    doc.add_output(
        "managed_sg_id",
        json!(inputs.security_group_id),
        "管理対象のセキュリティグループID",
    );
    doc.add_output("ingress_rule_count", json!("1"), "適用した Ingress ルール数");

    doc
}

fn cidr_expression(var_name: &str, data_name: &str) -> String {
    format!(
        "${{coalescelist(var.{var_name}, sort(distinct(compact(split(\"\\n\", trimspace(data.http.{data_name}.response_body))))))}}"
    )
}
