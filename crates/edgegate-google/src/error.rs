//! Google check error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoogleError {
    #[error("gcloud not found. Please install the Google Cloud CLI")]
    GcloudNotFound,

    #[error("gcloud command failed: {0}")]
    CommandFailed(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GoogleError>;
