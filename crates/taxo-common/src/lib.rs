//! TaxoTree Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the TaxoTree workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`TaxoError`] and the [`Result`] alias
//! - **Checksums**: integrity verification for table artifacts
//! - **Logging**: `tracing` subscriber setup shared by every binary
//! - **Types**: taxon identifiers, name classes and rank helpers
//!
//! # Example
//!
//! ```no_run
//! use taxo_common::checksum::compute_file_checksum;
//! use taxo_common::Result;
//!
//! fn fingerprint(path: &str) -> Result<()> {
//!     let checksum = compute_file_checksum(path)?;
//!     println!("{path}: {checksum}");
//!     Ok(())
//! }
//! ```

pub mod checksum;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, TaxoError};
pub use types::{NameClass, TaxId, TaxonName, ROOT_TAXID};
