//! Error types for the taxo CLI
//!
//! Messages are user-facing and say how to recover where possible.

use std::path::PathBuf;

use taxo_common::TaxoError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// The resource directory has no manifest
    #[error("No taxonomy tables in '{}'. Run 'taxo build <taxdump>' first or point --resource-dir at an existing build.", .0.display())]
    ResourcesMissing(PathBuf),

    /// Loading or querying the taxonomy failed
    #[error("{0}")]
    Taxonomy(#[from] TaxoError),

    /// An argument was syntactically valid but unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check TAXO_RESOURCE_DIR and TAXO_VERIFY_CHECKSUMS.")]
    Config(String),

    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// A blocking worker panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
