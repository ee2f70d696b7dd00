//! `taxo info` command implementation

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{print_json, table};
use colored::Colorize;
use serde::Serialize;
use taxo_core::{Manifest, TableStore, Taxonomy, ValidationReport};

#[derive(Serialize)]
struct Info<'a> {
    resource_dir: &'a std::path::Path,
    manifest: &'a Manifest,
    validation: &'a ValidationReport,
}

/// Describe the resource directory and check the loaded tables
pub fn run(config: &Config, taxonomy: &Taxonomy) -> Result<()> {
    let store = TableStore::new(config.resource_dir());
    if !store.exists() {
        return Err(CliError::ResourcesMissing(store.dir().to_path_buf()));
    }
    let manifest = store.read_manifest()?;
    let validation = taxonomy.tables().validate();

    if config.json {
        return print_json(&Info {
            resource_dir: store.dir(),
            manifest: &manifest,
            validation: &validation,
        });
    }

    println!("{}", "Resources".bold());
    println!("  Directory:  {}", store.dir().display());
    println!("  Source:     {}", manifest.source);
    println!("  Created:    {}", manifest.created_at.to_rfc3339());
    println!("  Format:     v{}", manifest.format_version);
    println!("  Nodes:      {}", manifest.node_count);
    println!("  Max taxid:  {}", manifest.max_taxid);
    println!("  Aliases:    {}", taxonomy.tables().merged.len());
    println!(
        "  Canonical:  {}",
        taxonomy.tables().canonical_taxa.join(", ")
    );

    println!();
    println!("{}", "Validation".bold());
    let status = if validation.is_valid() {
        "ok".green()
    } else {
        "issues found".yellow()
    };
    println!("  Status:     {status}");
    if !validation.is_valid() {
        let mut t = table(["Check", "Count"]);
        t.add_row(["orphans".to_string(), validation.orphans.len().to_string()]);
        t.add_row(["cycles".to_string(), validation.cycles.len().to_string()]);
        t.add_row([
            "children mismatches".to_string(),
            validation.children_mismatches.to_string(),
        ]);
        t.add_row([
            "dangling aliases".to_string(),
            validation.dangling_aliases.len().to_string(),
        ]);
        println!("{t}");
    }

    println!();
    println!("{}", "Checksums".bold());
    let mut t = table(["File", "SHA-256"]);
    for (file, sum) in &manifest.checksums {
        t.add_row([file.as_str(), sum.as_str()]);
    }
    println!("{t}");
    Ok(())
}
