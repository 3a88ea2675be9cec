//! Reconciliation error types

use thiserror::Error;

/// Errors raised inside one resource kind's reconciliation pass.
///
/// Any of these aborts only the current kind; the engine catches them
/// at the top of the kind's block and continues with the next kind.
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("remote API error: {0}")]
    Api(String),

    #[error("state backend error: {0}")]
    StateBackend(String),

    #[error("active zone not found for domain: {0}")]
    ZoneNotFound(String),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
