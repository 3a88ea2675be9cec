//! Ports toward the remote API and the state backend
//!
//! The engine only talks to these two traits. Production wiring uses the
//! Cloudflare API client and the tofu CLI; tests use in-memory fakes.

use crate::address::ResourceAddress;
use crate::error::Result;
use async_trait::async_trait;

/// A live remote object as reported by the provider API.
///
/// Fetched fresh on every reconciliation pass, never cached across passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteCandidate {
    /// Provider-assigned identifier
    pub id: String,
    /// Display name, when the API reports one
    pub name: Option<String>,
    /// Application/record domain, when the API reports one
    pub domain: Option<String>,
    /// Provider-side type attribute (e.g. `google` for identity providers)
    pub kind: Option<String>,
}

/// Read-only lookup surface against the provider API.
///
/// List calls return unfiltered-or-server-filtered candidate sets; exact
/// natural-key matching happens in the resolver. Targeted `get_*` calls
/// return `None` when the object does not exist remotely, which is a
/// normal outcome, not an error.
#[async_trait]
pub trait RemoteDirectory: Send + Sync {
    async fn list_access_apps(&self, domain: &str) -> Result<Vec<RemoteCandidate>>;
    async fn get_access_app(&self, id: &str) -> Result<Option<RemoteCandidate>>;

    /// Resolve the active zone id for a base domain
    async fn active_zone_id(&self, domain: &str) -> Result<Option<String>>;
    async fn list_dns_records(
        &self,
        zone_id: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Vec<RemoteCandidate>>;
    async fn get_dns_record(&self, zone_id: &str, id: &str) -> Result<Option<RemoteCandidate>>;

    async fn list_identity_providers(&self) -> Result<Vec<RemoteCandidate>>;
    async fn get_identity_provider(&self, id: &str) -> Result<Option<RemoteCandidate>>;

    async fn list_access_policies(&self) -> Result<Vec<RemoteCandidate>>;
    async fn get_access_policy(&self, id: &str) -> Result<Option<RemoteCandidate>>;
}

/// The IaC engine's state store, manipulated only through its own
/// command surface.
///
/// `init` is idempotent and is attempted before every query and every
/// mutation. A failing operation surfaces as an `Err`; callers decide
/// whether to fail open (queries) or give up on the sub-step (mutations).
#[async_trait]
pub trait StateBackend: Send + Sync {
    async fn init(&self) -> Result<()>;

    /// All addresses currently tracked in state
    async fn list_addresses(&self) -> Result<Vec<String>>;

    /// Full state snapshot as JSON
    async fn pull_snapshot(&self) -> Result<serde_json::Value>;

    /// Bind `address` to the remote object named by `id`
    async fn import(&self, address: &ResourceAddress, id: &str) -> Result<()>;

    /// Drop the binding for `address` without touching the remote object
    async fn remove(&self, address: &ResourceAddress) -> Result<()>;
}
