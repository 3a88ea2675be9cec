//! edgegate state reconciliation
//!
//! Terraform/Tofu cannot adopt out-of-band Cloudflare Access resources by
//! itself, so before every apply this crate walks the four declared
//! resource kinds and brings persisted state in line with remote reality:
//! import what exists but is untracked, evict bindings whose remote object
//! is gone, and leave everything else untouched.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                 edgegate CLI                   │
//! │               (edgegate reconcile)             │
//! └──────────────────────┬─────────────────────────┘
//!                        │
//! ┌──────────────────────▼─────────────────────────┐
//! │              edgegate-reconcile                │
//! │  graph lookup → resolver → inspector → decide  │
//! │  ┌──────────────────┐  ┌────────────────────┐  │
//! │  │ RemoteDirectory  │  │   StateBackend     │  │
//! │  └────────┬─────────┘  └─────────┬──────────┘  │
//! └───────────┼──────────────────────┼─────────────┘
//!             │                      │
//! ┌───────────▼──────────┐ ┌─────────▼──────────┐
//! │ edgegate-cloudflare  │ │   edgegate-tofu    │
//! │     (REST API)       │ │    (tofu CLI)      │
//! └──────────────────────┘ └────────────────────┘
//! ```

pub mod address;
pub mod decision;
pub mod engine;
pub mod error;
pub mod graph;
pub mod inspector;
pub mod ports;
pub mod resolver;

// Re-exports
pub use address::{ResourceAddress, ResourceKind};
pub use decision::{BindingStatus, Decision, decide};
pub use engine::{AutoImport, KindReport, ReconcileInputs, RunReport, run_auto_import};
pub use error::{ReconcileError, Result};
pub use graph::ResourceGraph;
pub use inspector::StateInspector;
pub use ports::{RemoteCandidate, RemoteDirectory, StateBackend};
pub use resolver::ResolvedCandidate;
