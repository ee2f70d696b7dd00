//! TaxoTree CLI Library
//!
//! Command-line interface for querying an NCBI Taxonomy snapshot.
//!
//! # Overview
//!
//! - **Building**: convert a taxdump into a resource directory (`taxo build`)
//! - **Lookups**: names, ranks and name lists (`taxo name`, `taxo rank`, `taxo names`)
//! - **Traversal**: root paths, descendants, LCA (`taxo path`, `taxo children`, `taxo lca`)
//! - **Lineage**: rank summaries and species roll-up (`taxo lineage`, `taxo species`)
//! - **Subsets**: reduced parent tables for a taxid list (`taxo subset`)
//! - **Inspection**: manifest and tree validation (`taxo info`)

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, Result};

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use taxo_common::TaxId;

/// taxo - NCBI Taxonomy lookup and traversal
#[derive(Parser, Debug)]
#[command(name = "taxo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Resource directory holding the taxonomy tables
    #[arg(short = 'd', long, env = "TAXO_RESOURCE_DIR", global = true)]
    pub resource_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Skip checksum verification when loading tables
    #[arg(long, global = true)]
    pub no_verify: bool,

    /// Print the CLI reference as Markdown and exit
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the resource directory from an NCBI taxdump
    Build {
        /// Taxdump directory, .tar.gz or .zip archive
        source: PathBuf,

        /// Output directory (defaults to the resource directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Comma-separated ranks reported by canonical lineages
        #[arg(long, value_delimiter = ',')]
        canonical_ranks: Option<Vec<String>>,

        /// Stop after this many nodes (for quick experiments)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Scientific name of each taxid
    Name {
        #[arg(required = true)]
        taxids: Vec<TaxId>,
    },

    /// Rank of each taxid
    Rank {
        #[arg(required = true)]
        taxids: Vec<TaxId>,
    },

    /// Every name recorded for a taxid
    Names { taxid: TaxId },

    /// Path from a taxid to the root
    Path {
        taxid: TaxId,

        /// Leave the root out of the path
        #[arg(long)]
        exclude_root: bool,
    },

    /// Descendants of a taxid
    Children {
        taxid: TaxId,

        /// Only direct children
        #[arg(long)]
        direct: bool,

        /// Print only the number of descendants
        #[arg(short, long)]
        count: bool,
    },

    /// Lowest common ancestor of two or more taxids
    Lca {
        #[arg(required = true, num_args = 2..)]
        taxids: Vec<TaxId>,
    },

    /// Lineage of a taxid
    Lineage {
        taxid: TaxId,

        /// Report only canonical ranks (all of them, found or not)
        #[arg(short, long)]
        canonical: bool,

        /// Output layout
        #[arg(short, long, value_enum, default_value_t = LineageFormat::Ranks)]
        format: LineageFormat,
    },

    /// Species-level ancestor of each taxid
    Species {
        #[arg(required = true)]
        taxids: Vec<TaxId>,

        /// Fall back to the taxid itself when no species is found
        #[arg(long)]
        or_self: bool,
    },

    /// Write the parent table covering the lineages of a taxid list
    Subset {
        /// File with one taxid per line
        input: PathBuf,

        /// Output TSV of taxid and parent
        output: PathBuf,
    },

    /// Show the manifest and validate the loaded tree
    Info,
}

/// Layouts for `taxo lineage`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineageFormat {
    /// Rank -> name and taxid
    Ranks,
    /// `taxid:name;...` from leaf to root
    Compact,
    /// One row per path node with taxid, rank and name
    Lists,
}
