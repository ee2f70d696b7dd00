//! `taxo lineage` and `taxo species` command implementations

use crate::config::Config;
use crate::error::Result;
use crate::output::{or_not_found, print_json, print_rows, table};
use crate::LineageFormat;
use serde::Serialize;
use taxo_common::TaxId;
use taxo_core::Taxonomy;

/// Lineage of one taxid in the requested layout
pub fn lineage(
    config: &Config,
    taxonomy: &Taxonomy,
    taxid: TaxId,
    canonical: bool,
    format: LineageFormat,
) -> Result<()> {
    match format {
        LineageFormat::Compact => {
            let line = taxonomy.get_lineage_tx_names_string(taxid);
            if config.json {
                print_json(&line)
            } else {
                print_rows([[line]])
            }
        }
        LineageFormat::Lists => {
            let lists = taxonomy.get_lineage_lists(taxid);
            if config.json {
                return print_json(&lists);
            }
            print_rows(lists.taxids.iter().zip(&lists.ranks).zip(&lists.names).map(
                |((taxid, rank), name)| {
                    [
                        taxid.to_string(),
                        or_not_found(rank.as_deref()).to_string(),
                        or_not_found(name.as_deref()).to_string(),
                    ]
                },
            ))
        }
        LineageFormat::Ranks => {
            let summary = taxonomy.get_lineage_names_ranks(taxid, canonical);
            if config.json {
                return print_json(&summary);
            }

            let mut t = table(["Rank", "Name", "Taxid"]);
            // Canonical ranks keep their configured order, from root to leaf
            let ranks: Vec<&str> = if canonical {
                taxonomy.tables().canonical_taxa.iter().map(String::as_str).collect()
            } else {
                summary.iter().map(|(rank, _)| rank).collect()
            };
            for rank in ranks {
                match summary.taxon(rank) {
                    Some(taxon) => t.add_row([
                        rank.to_string(),
                        or_not_found(taxon.name.as_deref()).to_string(),
                        taxon.taxid.to_string(),
                    ]),
                    None => t.add_row([rank.to_string(), "NONE".to_string(), "-1".to_string()]),
                };
            }
            println!("{t}");
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct SpeciesRow {
    taxid: TaxId,
    species: Option<TaxId>,
}

/// Species-rank ancestor of each taxid
pub fn species(
    config: &Config,
    taxonomy: &Taxonomy,
    taxids: &[TaxId],
    or_self: bool,
) -> Result<()> {
    let rows: Vec<SpeciesRow> = taxids
        .iter()
        .map(|&taxid| SpeciesRow {
            taxid,
            species: if or_self {
                Some(taxonomy.get_species_taxid_if_exists(taxid))
            } else {
                taxonomy.get_species_taxid(taxid)
            },
        })
        .collect();

    if config.json {
        return print_json(&rows);
    }
    print_rows(rows.iter().map(|row| {
        [
            row.taxid.to_string(),
            row.species.map_or_else(|| "not found".to_string(), |s| s.to_string()),
        ]
    }))
}
