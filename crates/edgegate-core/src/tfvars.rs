//! terraform.tfvars の読み込み
//!
//! HCL パーサは使わず、`key = "value"` 形式の単純な行だけを対象にする。
//! 環境別ファイル `terraform.{env}.tfvars` を優先し、無ければ
//! `terraform.tfvars` にフォールバックする。

use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 環境に対応する tfvars ファイルのパスを返す
///
/// 優先順位:
/// 1. `terraform.{environment}.tfvars`
/// 2. `terraform.tfvars`
pub fn pick_tfvars_path(base_dir: &Path, environment: &str) -> Option<PathBuf> {
    let primary = base_dir.join(format!("terraform.{environment}.tfvars"));
    if primary.exists() {
        return Some(primary);
    }
    let fallback = base_dir.join("terraform.tfvars");
    if fallback.exists() {
        return Some(fallback);
    }
    None
}

/// `key = value` 行を抽出する。ダブルクォートは除去される。
///
/// マッチしない行（コメント、ブロック、空行）は黙って無視する。
pub fn parse_simple_tfvars(content: &str) -> HashMap<String, String> {
    let line_re = Regex::new(r#"^\s*([A-Za-z0-9_]+)\s*=\s*(.+?)\s*$"#).expect("valid regex");
    let mut map = HashMap::new();
    for line in content.lines() {
        let Some(caps) = line_re.captures(line) else {
            continue;
        };
        let key = caps[1].to_string();
        let mut val = caps[2].to_string();
        if val.len() >= 2 && val.starts_with('"') && val.ends_with('"') {
            val = val[1..val.len() - 1].to_string();
        }
        map.insert(key, val);
    }
    map
}

/// ファイルを読み、失敗したら None を返す
pub fn read_file_safe(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quoted_values() {
        let vars = parse_simple_tfvars(
            r#"
cloudflare_account_id = "acc-123"
domain_name = "a5g.io"
subdomain_name = hp
"#,
        );
        assert_eq!(vars.get("cloudflare_account_id").unwrap(), "acc-123");
        assert_eq!(vars.get("domain_name").unwrap(), "a5g.io");
        // クォート無しの値もそのまま拾う
        assert_eq!(vars.get("subdomain_name").unwrap(), "hp");
    }

    #[test]
    fn test_parse_skips_non_assignment_lines() {
        let vars = parse_simple_tfvars("# comment\n\nallowed_email_domain = \"example.com\"\n");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("allowed_email_domain").unwrap(), "example.com");
    }

    #[test]
    fn test_parse_crlf() {
        let vars = parse_simple_tfvars("domain_name = \"a5g.io\"\r\nsubdomain_name = \"hp\"\r\n");
        assert_eq!(vars.get("domain_name").unwrap(), "a5g.io");
        assert_eq!(vars.get("subdomain_name").unwrap(), "hp");
    }

    #[test]
    fn test_pick_tfvars_prefers_environment_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("terraform.tfvars"), "a = \"1\"").unwrap();
        std::fs::write(dir.path().join("terraform.prod.tfvars"), "a = \"2\"").unwrap();

        let picked = pick_tfvars_path(dir.path(), "prod").unwrap();
        assert!(picked.ends_with("terraform.prod.tfvars"));

        let picked = pick_tfvars_path(dir.path(), "dev").unwrap();
        assert!(picked.ends_with("terraform.tfvars"));
    }

    #[test]
    fn test_pick_tfvars_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(pick_tfvars_path(dir.path(), "prod").is_none());
    }
}
