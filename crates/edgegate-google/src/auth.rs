//! Service account loading and gcloud token retrieval
//!
//! トークンの自前署名はせず、gcloud CLI に委ねる。サービスアカウント
//! JSON はメールアドレスの表示と「自動検証を試みるか」の判定にのみ使う。

use crate::error::{GoogleError, Result};
use serde::Deserialize;
use std::process::Stdio;
use tokio::process::Command;

/// Service account identity, parsed from the credentials JSON.
/// Extra fields (private key material) are deliberately not retained.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    pub client_email: String,
}

impl ServiceAccount {
    /// Load from `GOOGLE_CREDENTIALS` (inline JSON) or
    /// `GOOGLE_APPLICATION_CREDENTIALS` (file path). `None` when neither
    /// is set or parseable.
    pub fn load() -> Option<Self> {
        if let Ok(raw) = std::env::var("GOOGLE_CREDENTIALS")
            && let Ok(sa) = serde_json::from_str::<Self>(&raw)
        {
            return Some(sa);
        }
        if let Ok(path) = std::env::var("GOOGLE_APPLICATION_CREDENTIALS")
            && let Ok(raw) = std::fs::read_to_string(&path)
            && let Ok(sa) = serde_json::from_str::<Self>(&raw)
        {
            return Some(sa);
        }
        None
    }
}

/// gcloud CLI wrapper
pub struct Gcloud;

impl Gcloud {
    /// Check if gcloud is installed
    pub async fn is_available() -> bool {
        Command::new("which")
            .arg("gcloud")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Obtain an access token for the active gcloud credentials
    pub async fn access_token() -> Result<String> {
        if !Self::is_available().await {
            return Err(GoogleError::GcloudNotFound);
        }

        tracing::debug!("Running: gcloud auth print-access-token");
        let output = Command::new("gcloud")
            .args(["auth", "print-access-token"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GoogleError::CommandFailed(stderr.to_string()));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(GoogleError::CommandFailed("empty access token".to_string()));
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_inline_json() {
        let sa = temp_env::with_vars(
            [
                (
                    "GOOGLE_CREDENTIALS",
                    Some(r#"{"client_email": "robot@proj.iam.gserviceaccount.com", "private_key": "---"}"#),
                ),
                ("GOOGLE_APPLICATION_CREDENTIALS", None),
            ],
            ServiceAccount::load,
        )
        .unwrap();
        assert_eq!(sa.client_email, "robot@proj.iam.gserviceaccount.com");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sa.json");
        std::fs::write(&path, r#"{"client_email": "file@proj.iam.gserviceaccount.com"}"#).unwrap();

        let sa = temp_env::with_vars(
            [
                ("GOOGLE_CREDENTIALS", None),
                ("GOOGLE_APPLICATION_CREDENTIALS", path.to_str()),
            ],
            ServiceAccount::load,
        )
        .unwrap();
        assert_eq!(sa.client_email, "file@proj.iam.gserviceaccount.com");
    }

    #[test]
    fn test_load_absent() {
        let sa = temp_env::with_vars(
            [
                ("GOOGLE_CREDENTIALS", None::<&str>),
                ("GOOGLE_APPLICATION_CREDENTIALS", None),
            ],
            ServiceAccount::load,
        );
        assert!(sa.is_none());
    }

    #[test]
    fn test_load_ignores_invalid_json() {
        let sa = temp_env::with_vars(
            [
                ("GOOGLE_CREDENTIALS", Some("not json")),
                ("GOOGLE_APPLICATION_CREDENTIALS", None),
            ],
            ServiceAccount::load,
        );
        assert!(sa.is_none());
    }
}
