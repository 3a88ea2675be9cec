//! tofu CLI error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TofuError {
    #[error("failed to spawn tofu: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("tofu {command} exited with {status}")]
    CommandFailed { command: String, status: String },

    #[error("invalid state JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TofuError>;
