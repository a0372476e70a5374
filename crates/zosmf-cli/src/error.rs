//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific errors.
#[derive(Error, Debug)]
pub enum CliError {
    /// TSO client error (validation, service, or transport)
    #[error("{0}")]
    Tso(#[from] zosmf_client::TsoError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
