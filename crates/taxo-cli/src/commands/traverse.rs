//! `taxo path`, `taxo children` and `taxo lca` command implementations

use crate::config::Config;
use crate::error::Result;
use crate::output::{or_not_found, print_json, print_rows};
use serde::Serialize;
use taxo_common::TaxId;
use taxo_core::Taxonomy;

#[derive(Serialize)]
struct PathNode<'a> {
    taxid: TaxId,
    name: Option<&'a str>,
    rank: Option<&'a str>,
}

/// Path to the root as `taxid<TAB>rank<TAB>name` rows, leaf first
pub fn path(config: &Config, taxonomy: &Taxonomy, taxid: TaxId, exclude_root: bool) -> Result<()> {
    let path = if exclude_root {
        taxonomy.get_path_without_root(taxid)
    } else {
        taxonomy.get_path(taxid)
    };

    let nodes: Vec<PathNode<'_>> = path
        .iter()
        .map(|&tx| PathNode {
            taxid: tx,
            name: taxonomy.get_name(tx),
            rank: taxonomy.get_rank(tx),
        })
        .collect();

    if config.json {
        return print_json(&nodes);
    }
    print_rows(nodes.iter().map(|node| {
        [
            node.taxid.to_string(),
            or_not_found(node.rank).to_string(),
            or_not_found(node.name).to_string(),
        ]
    }))
}

/// Descendants, direct or transitive
pub fn children(
    config: &Config,
    taxonomy: &Taxonomy,
    taxid: TaxId,
    direct: bool,
    count: bool,
) -> Result<()> {
    let children: Vec<TaxId> = if direct {
        taxonomy.get_direct_children(taxid).to_vec()
    } else {
        taxonomy.get_children(taxid)
    };

    match (count, config.json) {
        (true, true) => print_json(&serde_json::json!({ "taxid": taxid, "count": children.len() })),
        (true, false) => print_rows([[children.len()]]),
        (false, true) => print_json(&children),
        (false, false) => print_rows(children.iter().map(|tx| [tx])),
    }
}

#[derive(Serialize)]
struct LcaResult<'a> {
    taxids: &'a [TaxId],
    lca: Option<TaxId>,
    name: Option<&'a str>,
}

/// Lowest common ancestor of all taxids
pub fn lca(config: &Config, taxonomy: &Taxonomy, taxids: &[TaxId]) -> Result<()> {
    let lca = taxonomy.get_lca_from_list(taxids);
    let result = LcaResult {
        taxids,
        lca,
        name: lca.and_then(|tx| taxonomy.get_name(tx)),
    };

    if config.json {
        return print_json(&result);
    }
    match lca {
        Some(tx) => print_rows([[tx.to_string(), or_not_found(result.name).to_string()]]),
        // No shared ancestor: the tables are disconnected
        None => print_rows([["0".to_string(), "no common ancestor".to_string()]]),
    }
}
