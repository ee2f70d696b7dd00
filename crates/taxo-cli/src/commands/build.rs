//! `taxo build` command implementation
//!
//! Converts an NCBI taxdump into a resource directory.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::print_json;
use crate::progress::create_spinner;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use taxo_common::TaxId;
use taxo_core::ingest::{build_resources, IngestOptions};
use tracing::info;

#[derive(Serialize)]
struct BuildSummary<'a> {
    output: &'a std::path::Path,
    nodes: usize,
    names: usize,
    merged: usize,
    deleted: usize,
    orphans: usize,
    max_taxid: TaxId,
}

/// Build tables from `source`
pub async fn run(
    config: &Config,
    source: PathBuf,
    output: Option<PathBuf>,
    canonical_ranks: Option<Vec<String>>,
    limit: Option<usize>,
) -> Result<()> {
    let output = output.unwrap_or_else(|| config.resource_dir().to_path_buf());

    let mut options = IngestOptions::new(source, &output);
    if let Some(ranks) = canonical_ranks {
        let ranks: Vec<String> = ranks
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        if ranks.is_empty() {
            return Err(CliError::invalid_argument("--canonical-ranks needs at least one rank"));
        }
        options = options.with_canonical_taxa(ranks);
    }
    if let Some(limit) = limit {
        options = options.with_parse_limit(limit);
    }

    info!(
        source = %options.source.display(),
        output = %output.display(),
        "Building taxonomy tables"
    );
    let spinner = create_spinner("Building taxonomy tables");
    let result = tokio::task::spawn_blocking(move || build_resources(&options)).await;
    spinner.finish_and_clear();
    let result = result??;

    let summary = BuildSummary {
        output: &output,
        nodes: result.stats.nodes,
        names: result.stats.names,
        merged: result.stats.merged,
        deleted: result.stats.deleted,
        orphans: result.validation.orphans.len(),
        max_taxid: result.manifest.max_taxid,
    };

    if config.json {
        return print_json(&summary);
    }

    println!("{} Built taxonomy tables in {}", "✓".green(), output.display());
    println!("  Nodes:     {}", summary.nodes);
    println!("  Names:     {}", summary.names);
    println!("  Merged:    {}", summary.merged);
    println!("  Deleted:   {}", summary.deleted);
    println!("  Max taxid: {}", summary.max_taxid);
    if summary.orphans > 0 {
        println!("  {} {} nodes have no parent", "!".yellow(), summary.orphans);
    }

    Ok(())
}
