//! Offline OAuth credential format checks
//!
//! ネットワーク無しで出来る範囲の検証。Client ID の先頭数値は
//! Project Number なので、設定値との突き合わせもここで行う。

use regex::Regex;

#[derive(Debug, Clone, Default)]
pub struct OAuthValidation {
    pub client_id_valid: bool,
    pub client_secret_valid: bool,
    /// `None` when no project number was available to compare against
    pub project_number_matches: Option<bool>,
    /// Leading digits of the client id
    pub extracted_project_number: Option<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl OAuthValidation {
    pub fn skipped(&self) -> bool {
        !self.client_id_valid && self.errors.iter().any(|e| e.contains("設定されていません"))
    }
}

/// Validate client id/secret shapes and project-number consistency.
pub fn validate_oauth_format(
    client_id: Option<&str>,
    client_secret: Option<&str>,
    project_number: Option<&str>,
) -> OAuthValidation {
    let mut result = OAuthValidation::default();

    let Some(client_id) = client_id.filter(|v| !v.is_empty()) else {
        result.errors.push("Client ID が設定されていません".to_string());
        return result;
    };

    let client_id_re =
        Regex::new(r"^[0-9]+-[a-zA-Z0-9]+\.apps\.googleusercontent\.com$").expect("valid regex");
    if !client_id_re.is_match(client_id) {
        result.errors.push("Client ID の形式が正しくありません".to_string());
        return result;
    }
    result.client_id_valid = true;

    // Client ID フォーマット: "<project-number>-<random>.apps.googleusercontent.com"
    let extracted = client_id.split('-').next().unwrap_or_default().to_string();
    if let Some(expected) = project_number.filter(|v| !v.is_empty()) {
        if extracted == expected {
            result.project_number_matches = Some(true);
        } else {
            result.project_number_matches = Some(false);
            result.warnings.push(format!(
                "Project Number ({expected}) と Client ID の先頭数値 ({extracted}) が一致しません"
            ));
        }
    }
    result.extracted_project_number = Some(extracted);

    if let Some(secret) = client_secret.filter(|v| !v.is_empty()) {
        let secret_re = Regex::new(r"^GOCSPX-[a-zA-Z0-9_-]+$").expect("valid regex");
        if secret_re.is_match(secret) {
            result.client_secret_valid = true;
        } else {
            result
                .errors
                .push("Client Secret の形式が正しくありません".to_string());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_ID: &str = "123456789-abcDEF123.apps.googleusercontent.com";
    const GOOD_SECRET: &str = "GOCSPX-abc_DEF-123";

    #[test]
    fn test_valid_pair() {
        let v = validate_oauth_format(Some(GOOD_ID), Some(GOOD_SECRET), None);
        assert!(v.client_id_valid);
        assert!(v.client_secret_valid);
        assert!(v.errors.is_empty());
        assert_eq!(v.extracted_project_number.as_deref(), Some("123456789"));
    }

    #[test]
    fn test_malformed_client_id() {
        let v = validate_oauth_format(Some("not-a-client-id"), Some(GOOD_SECRET), None);
        assert!(!v.client_id_valid);
        assert!(v.errors.iter().any(|e| e.contains("Client ID の形式")));
    }

    #[test]
    fn test_malformed_secret() {
        let v = validate_oauth_format(Some(GOOD_ID), Some("hunter2"), None);
        assert!(v.client_id_valid);
        assert!(!v.client_secret_valid);
        assert!(v.errors.iter().any(|e| e.contains("Client Secret の形式")));
    }

    #[test]
    fn test_project_number_mismatch_is_a_warning() {
        let v = validate_oauth_format(Some(GOOD_ID), Some(GOOD_SECRET), Some("999"));
        assert_eq!(v.project_number_matches, Some(false));
        assert!(!v.warnings.is_empty());
        assert!(v.errors.is_empty());
    }

    #[test]
    fn test_project_number_match() {
        let v = validate_oauth_format(Some(GOOD_ID), Some(GOOD_SECRET), Some("123456789"));
        assert_eq!(v.project_number_matches, Some(true));
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn test_missing_credentials() {
        let v = validate_oauth_format(None, None, None);
        assert!(!v.client_id_valid);
        assert!(v.errors.iter().any(|e| e.contains("設定されていません")));
    }
}
