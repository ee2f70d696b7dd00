//! Configuration management for the taxo CLI
//!
//! Resolution order for every setting: command-line flag, environment
//! variable (also read from `.env`), built-in default.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name used under the platform data directory
pub const DEFAULT_DATA_SUBDIR: &str = "taxo";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Resource directory holding the built tables
    pub resource_dir: PathBuf,

    /// Verify artifact checksums when loading tables
    pub verify_checksums: bool,

    /// Print JSON instead of text
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Create a config with default values
    pub fn new() -> Result<Self> {
        let resource_dir = dirs::data_dir()
            .ok_or_else(|| CliError::config("Could not determine data directory"))?
            .join(DEFAULT_DATA_SUBDIR);

        Ok(Self {
            resource_dir,
            verify_checksums: true,
            json: false,
        })
    }

    /// Load config from environment variables
    ///
    /// - `TAXO_RESOURCE_DIR`: resource directory
    /// - `TAXO_VERIFY_CHECKSUMS`: `true`/`false`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new()?;

        if let Ok(dir) = std::env::var("TAXO_RESOURCE_DIR") {
            config.resource_dir = PathBuf::from(dir);
        }

        if let Ok(verify) = std::env::var("TAXO_VERIFY_CHECKSUMS") {
            config.verify_checksums = verify.trim().parse().map_err(|_| {
                CliError::config(format!(
                    "TAXO_VERIFY_CHECKSUMS must be true or false, got '{verify}'"
                ))
            })?;
        }

        Ok(config)
    }

    /// Apply command-line flags on top of the environment
    pub fn from_cli(cli: &crate::Cli) -> Result<Self> {
        let mut config = Self::from_env()?;

        if let Some(ref dir) = cli.resource_dir {
            config.resource_dir = dir.clone();
        }
        if cli.no_verify {
            config.verify_checksums = false;
        }
        config.json = cli.json;

        Ok(config)
    }

    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }
}
