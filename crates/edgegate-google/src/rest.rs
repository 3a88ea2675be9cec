//! Google REST checks
//!
//! Read-only probes used by the checklist: project-number lookup,
//! service-account permission test and a light OAuth client credential
//! probe against the token endpoint.

use crate::error::Result;
use serde::Deserialize;
use serde_json::json;

const RESOURCE_MANAGER_BASE: &str = "https://cloudresourcemanager.googleapis.com/v1";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Permissions the checklist verifies for the service account
pub const DEFAULT_CHECKED_PERMISSIONS: &[&str] = &["resourcemanager.projects.get"];

/// Outcome of the project-number lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupStatus {
    Ok,
    AuthError,
    PermissionDenied,
    NotFound,
    Error,
}

#[derive(Debug, Clone)]
pub struct ProjectNumberLookup {
    pub status: LookupStatus,
    pub project_number: Option<String>,
    pub detail: Option<String>,
}

/// Outcome of the service-account permission probe
#[derive(Debug, Clone)]
pub struct PermissionCheck {
    pub checked: Vec<String>,
    pub granted: Vec<String>,
    pub missing: Vec<String>,
}

impl PermissionCheck {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Outcome of the OAuth client credential probe.
///
/// トークンエンドポイントに無効な refresh_token を投げ、応答コードで
/// client_id/secret の有効性を判定する（invalid_grant=受理、
/// invalid_client=無効）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialProbe {
    Accepted,
    Invalid,
    Unexpected(u16),
}

/// Google REST client for the checklist probes
pub struct GoogleRest {
    client: reqwest::Client,
}

impl Default for GoogleRest {
    fn default() -> Self {
        Self::new()
    }
}

impl GoogleRest {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Resolve a project's number from its id
    pub async fn lookup_project_number(&self, token: &str, project_id: &str) -> Result<ProjectNumberLookup> {
        let url = format!("{RESOURCE_MANAGER_BASE}/projects/{project_id}");
        tracing::debug!(url, "GET project");
        let response = self.client.get(&url).bearer_auth(token).send().await?;
        let status = response.status();

        if status.is_success() {
            let body: ProjectBody = response.json().await?;
            return Ok(match body.project_number {
                Some(number) if !number.is_empty() => ProjectNumberLookup {
                    status: LookupStatus::Ok,
                    project_number: Some(number),
                    detail: None,
                },
                _ => ProjectNumberLookup {
                    status: LookupStatus::Error,
                    project_number: None,
                    detail: Some("missing projectNumber".to_string()),
                },
            });
        }

        let detail = error_detail(response).await;
        Ok(ProjectNumberLookup {
            status: match status.as_u16() {
                401 => LookupStatus::AuthError,
                403 => LookupStatus::PermissionDenied,
                404 => LookupStatus::NotFound,
                _ => LookupStatus::Error,
            },
            project_number: None,
            detail,
        })
    }

    /// Probe which of `permissions` the caller holds on the project
    pub async fn check_permissions(
        &self,
        token: &str,
        project_id: &str,
        permissions: &[&str],
    ) -> Result<PermissionCheck> {
        let url = format!("{RESOURCE_MANAGER_BASE}/projects/{project_id}:testIamPermissions");
        tracing::debug!(url, "POST testIamPermissions");
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({"permissions": permissions}))
            .send()
            .await?
            .error_for_status()?;

        let body: PermissionsBody = response.json().await?;
        let granted = body.permissions.unwrap_or_default();
        let missing = permissions
            .iter()
            .filter(|p| !granted.iter().any(|g| g == *p))
            .map(|p| p.to_string())
            .collect();
        Ok(PermissionCheck {
            checked: permissions.iter().map(|p| p.to_string()).collect(),
            granted,
            missing,
        })
    }

    /// Light validity probe for an OAuth client id/secret pair
    pub async fn check_oauth_client(&self, client_id: &str, client_secret: &str) -> Result<CredentialProbe> {
        tracing::debug!("POST token endpoint (credential probe)");
        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .basic_auth(client_id, Some(client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", "invalid-refresh-token"),
            ])
            .send()
            .await?;

        Ok(match response.status().as_u16() {
            400 => CredentialProbe::Accepted,
            401 => CredentialProbe::Invalid,
            code => CredentialProbe::Unexpected(code),
        })
    }
}

async fn error_detail(response: reqwest::Response) -> Option<String> {
    let body: ErrorBody = response.json().await.ok()?;
    let error = body.error?;
    error.status.or(error.message)
}

#[derive(Debug, Deserialize)]
struct ProjectBody {
    #[serde(rename = "projectNumber")]
    project_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PermissionsBody {
    permissions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    status: Option<String>,
    message: Option<String>,
}
