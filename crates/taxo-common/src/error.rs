//! Error types for TaxoTree

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for TaxoTree operations
pub type Result<T> = std::result::Result<T, TaxoError>;

/// Main error type for TaxoTree
#[derive(Error, Debug)]
pub enum TaxoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Checksum mismatch for {file}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },

    #[error("Resource not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
}

impl TaxoError {
    /// Create a parse error for a given 1-based line number
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = TaxoError::parse(7, "invalid digit found in string");
        assert_eq!(err.to_string(), "Parse error at line 7: invalid digit found in string");
    }

    #[test]
    fn test_resource_not_found_display() {
        let err = TaxoError::ResourceNotFound(PathBuf::from("/data/taxo/names.json.gz"));
        assert_eq!(err.to_string(), "Resource not found: /data/taxo/names.json.gz");
    }
}
