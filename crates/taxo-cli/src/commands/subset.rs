//! `taxo subset` command implementation

use crate::config::Config;
use crate::error::Result;
use crate::output::print_json;
use colored::Colorize;
use std::path::Path;
use taxo_core::Taxonomy;

/// Write the parent/child closure of the taxids listed in `input` to `output`
pub fn run(config: &Config, taxonomy: &Taxonomy, input: &Path, output: &Path) -> Result<()> {
    let report = taxonomy.create_subset_tri(input, output)?;

    if config.json {
        return print_json(&report);
    }

    println!(
        "{} Wrote {} rows for {} taxids to {}",
        "✓".green(),
        report.rows_written,
        report.requested,
        output.display()
    );
    if !report.reparented.is_empty() {
        println!(
            "  {} {} taxa without a parent were attached to the root",
            "!".yellow(),
            report.reparented.len()
        );
    }
    Ok(())
}
