//! State inspector
//!
//! Answers "is this address tracked?" and "what remote id does state
//! record for it?" through the state-backend port. Backend failures fail
//! open toward "unbound": the engine then behaves as if nothing were
//! tracked, which at worst re-imports instead of corrupting state.

use crate::address::ResourceAddress;
use crate::ports::StateBackend;
use serde_json::Value;

pub struct StateInspector<'a> {
    backend: &'a dyn StateBackend,
}

impl<'a> StateInspector<'a> {
    pub fn new(backend: &'a dyn StateBackend) -> Self {
        Self { backend }
    }

    /// Whether `address` is tracked in persisted state.
    pub async fn is_bound(&self, address: &ResourceAddress) -> bool {
        if let Err(e) = self.backend.init().await {
            tracing::warn!(%address, error = %e, "backend init failed; treating as unbound");
            return false;
        }
        match self.backend.list_addresses().await {
            Ok(addresses) => {
                let target = address.to_string();
                addresses.iter().any(|a| a.trim() == target)
            }
            Err(e) => {
                tracing::warn!(%address, error = %e, "state list failed; treating as unbound");
                false
            }
        }
    }

    /// Remote identifier recorded in state for `address`, if any.
    pub async fn resolve_bound_id(&self, address: &ResourceAddress) -> Option<String> {
        if let Err(e) = self.backend.init().await {
            tracing::warn!(%address, error = %e, "backend init failed; no bound id");
            return None;
        }
        match self.backend.pull_snapshot().await {
            Ok(snapshot) => extract_remote_id(&snapshot, address),
            Err(e) => {
                tracing::warn!(%address, error = %e, "state pull failed; no bound id");
                None
            }
        }
    }
}

/// Locate the instance matching (type, name) in a state snapshot and read
/// its recorded id, checking `attributes.id` then `attributes_flat.id`.
pub(crate) fn extract_remote_id(snapshot: &Value, address: &ResourceAddress) -> Option<String> {
    let resource = snapshot.get("resources")?.as_array()?.iter().find(|r| {
        r.get("type").and_then(Value::as_str) == Some(address.resource_type())
            && r.get("name").and_then(Value::as_str) == Some(address.local_key())
    })?;
    let instance = resource.get("instances")?.as_array()?.first()?;
    let id = instance
        .get("attributes")
        .and_then(|a| a.get("id"))
        .or_else(|| instance.get("attributes_flat").and_then(|a| a.get("id")))?
        .as_str()?;
    if id.is_empty() {
        return None;
    }
    Some(id.to_string())
}
