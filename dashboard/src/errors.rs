use thiserror::Error;

/// Message surfaced to dashboard consumers when a poll fails.
pub const FETCH_FAILED: &str = "Failed to fetch device data";

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telemetry source returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
