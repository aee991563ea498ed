//! CLI error types

use bitcash_sdk::SdkError;
use thiserror::Error;

/// Errors that abort the CLI with exit status 1
///
/// Failures reported by the node are printed by the command itself and do
/// not end up here.
#[derive(Debug, Error)]
pub enum CliError {
    /// SDK error
    #[error("SDK error: {0}")]
    Sdk(#[from] SdkError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}
