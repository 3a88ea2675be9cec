//! Cloudflare API client
//!
//! Read-only lookups against the v4 REST API with Bearer token
//! authentication. One outbound request per call, no retries; failures
//! propagate to the reconciliation engine which treats them as "remote
//! state unknown" for the current resource kind.

use crate::error::{CloudflareError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;

const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_token: String,
    pub account_id: String,
}

/// Cloudflare API client
pub struct CloudflareClient {
    client: reqwest::Client,
    api_token: String,
    account_id: String,
}

impl CloudflareClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_token: config.api_token,
            account_id: config.account_id,
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// List Access applications, server-side filtered by domain
    pub async fn list_access_apps(&self, domain: &str) -> Result<Vec<AccessAppInfo>> {
        let url = format!(
            "{}/accounts/{}/access/apps",
            CLOUDFLARE_API_BASE, self.account_id
        );
        self.get_list(&url, &[("domain", domain)]).await
    }

    /// Fetch one Access application by id; `None` when it no longer exists
    pub async fn get_access_app(&self, app_id: &str) -> Result<Option<AccessAppInfo>> {
        let url = format!(
            "{}/accounts/{}/access/apps/{}",
            CLOUDFLARE_API_BASE, self.account_id, app_id
        );
        self.get_one(&url).await
    }

    /// Resolve the active zone id for a base domain
    pub async fn active_zone_id(&self, domain: &str) -> Result<Option<String>> {
        let url = format!("{}/zones", CLOUDFLARE_API_BASE);
        let zones: Vec<ZoneInfo> = self
            .get_list(&url, &[("name", domain), ("status", "active")])
            .await?;
        Ok(zones.into_iter().next().map(|z| z.id))
    }

    /// List DNS records in a zone, server-side filtered by type and name
    pub async fn list_dns_records(
        &self,
        zone_id: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Vec<DnsRecordInfo>> {
        let url = format!("{}/zones/{}/dns_records", CLOUDFLARE_API_BASE, zone_id);
        self.get_list(&url, &[("type", record_type), ("name", name)])
            .await
    }

    /// Fetch one DNS record by id; `None` when it no longer exists
    pub async fn get_dns_record(&self, zone_id: &str, record_id: &str) -> Result<Option<DnsRecordInfo>> {
        let url = format!(
            "{}/zones/{}/dns_records/{}",
            CLOUDFLARE_API_BASE, zone_id, record_id
        );
        self.get_one(&url).await
    }

    /// List all Access identity providers in the account
    pub async fn list_identity_providers(&self) -> Result<Vec<IdentityProviderInfo>> {
        let url = format!(
            "{}/accounts/{}/access/identity_providers",
            CLOUDFLARE_API_BASE, self.account_id
        );
        self.get_list(&url, &[]).await
    }

    /// Fetch one identity provider by id; `None` when it no longer exists
    pub async fn get_identity_provider(&self, idp_id: &str) -> Result<Option<IdentityProviderInfo>> {
        let url = format!(
            "{}/accounts/{}/access/identity_providers/{}",
            CLOUDFLARE_API_BASE, self.account_id, idp_id
        );
        self.get_one(&url).await
    }

    /// List all reusable Access policies in the account
    pub async fn list_access_policies(&self) -> Result<Vec<AccessPolicyInfo>> {
        let url = format!(
            "{}/accounts/{}/access/policies",
            CLOUDFLARE_API_BASE, self.account_id
        );
        self.get_list(&url, &[]).await
    }

    /// Fetch one reusable Access policy by id; `None` when it no longer exists
    pub async fn get_access_policy(&self, policy_id: &str) -> Result<Option<AccessPolicyInfo>> {
        let url = format!(
            "{}/accounts/{}/access/policies/{}",
            CLOUDFLARE_API_BASE, self.account_id, policy_id
        );
        self.get_one(&url).await
    }

    async fn get_list<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<T>> {
        tracing::debug!(url, "GET (list)");
        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        let api_response: ApiResponse<Vec<T>> = response.json().await?;
        if !api_response.success {
            return Err(CloudflareError::Api(api_response.error_message()));
        }
        Ok(api_response.result.unwrap_or_default())
    }

    async fn get_one<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        tracing::debug!(url, "GET (targeted)");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        // 不在は正常系。エラー扱いにしない。
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let api_response: ApiResponse<T> = response.json().await?;
        if !api_response.success {
            return Err(CloudflareError::Api(api_response.error_message()));
        }
        Ok(api_response.result)
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

impl<T> ApiResponse<T> {
    fn error_message(&self) -> String {
        self.errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    #[allow(dead_code)]
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccessAppInfo {
    pub id: String,
    pub name: Option<String>,
    pub domain: Option<String>,
    #[serde(rename = "type")]
    pub app_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneInfo {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DnsRecordInfo {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub content: Option<String>,
    pub proxied: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityProviderInfo {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub idp_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccessPolicyInfo {
    pub id: String,
    pub name: Option<String>,
}
