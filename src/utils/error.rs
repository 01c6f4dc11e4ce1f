//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while validating profile input
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid ES profile JSON structure. Missing '{0}'.")]
    MissingField(String),

    #[error("Invalid profile format: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur during the AI advisory call
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Failed to analyze profile with AI: {0}")]
    AnalysisFailed(String),

    #[error("Missing API key (set --api-key or {0})")]
    MissingApiKey(&'static str),

    #[error("Failed to serialize prompt payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that can occur during file input and output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
