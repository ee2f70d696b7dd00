//! `taxo name`, `taxo rank` and `taxo names` command implementations

use crate::config::Config;
use crate::error::Result;
use crate::output::{or_not_found, print_json, print_rows, table};
use serde::Serialize;
use taxo_common::{TaxId, TaxonName};
use taxo_core::Taxonomy;

#[derive(Serialize)]
struct Labelled<'a> {
    taxid: TaxId,
    resolved: TaxId,
    value: Option<&'a str>,
}

fn labelled<'a>(
    taxonomy: &'a Taxonomy,
    taxids: &[TaxId],
    lookup: impl Fn(&'a Taxonomy, TaxId) -> Option<&'a str>,
) -> Vec<Labelled<'a>> {
    taxids
        .iter()
        .map(|&taxid| Labelled {
            taxid,
            resolved: taxonomy.resolve(taxid),
            value: lookup(taxonomy, taxid),
        })
        .collect()
}

fn print_labelled(config: &Config, rows: &[Labelled<'_>]) -> Result<()> {
    if config.json {
        return print_json(rows);
    }
    print_rows(
        rows.iter()
            .map(|row| [row.taxid.to_string(), or_not_found(row.value).to_string()]),
    )
}

/// Scientific names
pub fn name(config: &Config, taxonomy: &Taxonomy, taxids: &[TaxId]) -> Result<()> {
    let rows = labelled(taxonomy, taxids, |t, id| t.get_name(id));
    print_labelled(config, &rows)
}

/// Ranks
pub fn rank(config: &Config, taxonomy: &Taxonomy, taxids: &[TaxId]) -> Result<()> {
    let rows = labelled(taxonomy, taxids, |t, id| t.get_rank(id));
    print_labelled(config, &rows)
}

/// Every name of one taxon
pub fn names(config: &Config, taxonomy: &Taxonomy, taxid: TaxId) -> Result<()> {
    let names: &[TaxonName] = taxonomy.get_all_names(taxid);
    if config.json {
        return print_json(names);
    }

    let mut t = table(["Name", "Class"]);
    for name in names {
        t.add_row([name.name.as_str(), name.class.as_str()]);
    }
    println!("{t}");
    Ok(())
}
