//! Cloudflare provider for edgegate
//!
//! Read-only REST API client plus the `RemoteDirectory` port
//! implementation used by the reconciliation engine.

pub mod client;
pub mod directory;
pub mod error;

pub use client::{
    AccessAppInfo, AccessPolicyInfo, ClientConfig, CloudflareClient, DnsRecordInfo,
    IdentityProviderInfo, ZoneInfo,
};
pub use error::{CloudflareError, Result};
