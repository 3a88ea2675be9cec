//! State-backend port implementation
//!
//! Adapts the tofu CLI wrapper to the engine's `StateBackend` trait.
//! Subprocess failures map onto `ReconcileError::StateBackend`; the
//! engine decides whether to fail open (queries) or give up on the
//! sub-step (mutations).

use crate::cli::TofuCli;
use crate::error::TofuError;
use async_trait::async_trait;
use edgegate_reconcile::{ReconcileError, ResourceAddress, StateBackend};

fn backend_error(e: TofuError) -> ReconcileError {
    ReconcileError::StateBackend(e.to_string())
}

#[async_trait]
impl StateBackend for TofuCli {
    async fn init(&self) -> edgegate_reconcile::Result<()> {
        TofuCli::init(self).await.map_err(backend_error)
    }

    async fn list_addresses(&self) -> edgegate_reconcile::Result<Vec<String>> {
        self.state_list().await.map_err(backend_error)
    }

    async fn pull_snapshot(&self) -> edgegate_reconcile::Result<serde_json::Value> {
        self.state_pull().await.map_err(backend_error)
    }

    async fn import(&self, address: &ResourceAddress, id: &str) -> edgegate_reconcile::Result<()> {
        TofuCli::import(self, &address.to_string(), id)
            .await
            .map_err(backend_error)
    }

    async fn remove(&self, address: &ResourceAddress) -> edgegate_reconcile::Result<()> {
        self.state_rm(&address.to_string()).await.map_err(backend_error)
    }
}
