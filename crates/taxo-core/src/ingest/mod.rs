//! NCBI Taxonomy ingestion
//!
//! Turns an NCBI taxdump into the resource directory read by
//! [`Taxonomy::load`](crate::Taxonomy::load).
//!
//! # Example
//! ```no_run
//! use taxo_core::ingest::{IngestOptions, build_resources};
//!
//! # fn example() -> anyhow::Result<()> {
//! let options = IngestOptions::new("/downloads/new_taxdump.tar.gz", "/data/taxo");
//! let result = build_resources(&options)?;
//! println!("{} nodes", result.manifest.node_count);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod models;
pub mod parser;
pub mod source;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

pub use builder::TableBuilder;
pub use models::{DeletedTaxon, MergedTaxon, NameRecord, NodeRecord, TaxdumpData, TaxdumpStats};
pub use parser::TaxdumpParser;
pub use source::{TaxdumpFiles, TaxdumpSource};

use crate::store::{Manifest, TableStore};
use crate::tables::{ValidationReport, DEFAULT_CANONICAL_RANKS};

/// Inputs of a table build
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Taxdump directory or archive
    pub source: PathBuf,
    /// Resource directory to write
    pub output_dir: PathBuf,
    pub canonical_taxa: Vec<String>,
    /// Maximum number of nodes to parse (None for unlimited)
    pub parse_limit: Option<usize>,
}

impl IngestOptions {
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            canonical_taxa: DEFAULT_CANONICAL_RANKS.iter().map(|r| r.to_string()).collect(),
            parse_limit: None,
        }
    }

    pub fn with_canonical_taxa<R: Into<String>>(
        mut self,
        ranks: impl IntoIterator<Item = R>,
    ) -> Self {
        self.canonical_taxa = ranks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parse_limit(mut self, limit: usize) -> Self {
        self.parse_limit = Some(limit);
        self
    }
}

/// Outcome of [`build_resources`]
#[derive(Debug, Clone)]
pub struct IngestResult {
    pub stats: TaxdumpStats,
    pub validation: ValidationReport,
    pub manifest: Manifest,
}

/// Read, parse, build, validate and save
pub fn build_resources(options: &IngestOptions) -> Result<IngestResult> {
    let source = TaxdumpSource::detect(&options.source)?;
    info!(source = %source, "Reading taxdump");
    let files = source.read_files().context("Failed to read taxdump")?;

    let parser = match options.parse_limit {
        Some(limit) => {
            warn!(limit, "Parse limit is set, the tree will be incomplete");
            TaxdumpParser::with_limit(limit)
        }
        None => TaxdumpParser::new(),
    };
    let data = parser.parse(&files).context("Failed to parse taxdump")?;
    let stats = data.stats();
    info!(
        nodes = stats.nodes,
        names = stats.names,
        merged = stats.merged,
        deleted = stats.deleted,
        "Parsed taxdump"
    );

    let tables = TableBuilder::new()
        .with_canonical_taxa(options.canonical_taxa.iter().cloned())
        .build(&data);

    let validation = tables.ensure_valid().context("Built tables failed validation")?;
    if !validation.orphans.is_empty() {
        warn!(count = validation.orphans.len(), "Nodes without a parent");
    }
    if !validation.dangling_aliases.is_empty() {
        warn!(count = validation.dangling_aliases.len(), "Merged ids pointing at unknown nodes");
    }

    let manifest = TableStore::new(&options.output_dir)
        .save(&tables, &source.to_string())
        .context("Failed to save tables")?;

    Ok(IngestResult {
        stats,
        validation,
        manifest,
    })
}
