//! TaxoTree Core Library
//!
//! In-memory lookup and traversal over a precomputed NCBI Taxonomy tree.
//!
//! # Overview
//!
//! - **Tables**: parent, children, rank, name and merged-id maps ([`tables`])
//! - **Store**: gzip JSON artifacts plus a checksum manifest ([`store`])
//! - **Queries**: names, ranks, root paths, descendants, LCA ([`taxonomy`])
//! - **Lineage**: rank summaries and lineage strings ([`lineage`])
//! - **Subset**: reduced parent tables for a list of taxids ([`subset`])
//! - **Ingest**: building tables from an NCBI taxdump ([`ingest`])
//!
//! # Example
//!
//! ```no_run
//! use taxo_core::Taxonomy;
//!
//! fn main() -> taxo_common::Result<()> {
//!     let taxonomy = Taxonomy::load("/data/taxo")?;
//!
//!     let path = taxonomy.get_path(9606);
//!     println!("{:?}", path);
//!     println!("{:?}", taxonomy.get_lca(9606, 10090));
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod ingest;
pub mod lineage;
pub mod store;
pub mod subset;
pub mod tables;
pub mod taxonomy;

// Re-export commonly used types
pub use lineage::{LineageLists, LineageSummary, LineageTaxon};
pub use store::{Manifest, TableStore};
pub use subset::SubsetReport;
pub use tables::{TaxonomyTables, ValidationReport, DEFAULT_CANONICAL_RANKS};
pub use taxonomy::Taxonomy;
