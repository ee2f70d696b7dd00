//! Conversion of parsed taxdump records into lookup tables

use std::collections::HashSet;

use taxo_common::{NameClass, TaxId, TaxonName};
use tracing::{debug, warn};

use super::models::TaxdumpData;
use crate::tables::{TaxonomyTables, DEFAULT_CANONICAL_RANKS};

/// Builds [`TaxonomyTables`] from a parsed taxdump
#[derive(Debug, Clone)]
pub struct TableBuilder {
    canonical_taxa: Vec<String>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            canonical_taxa: DEFAULT_CANONICAL_RANKS.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn with_canonical_taxa<R: Into<String>>(
        mut self,
        ranks: impl IntoIterator<Item = R>,
    ) -> Self {
        self.canonical_taxa = ranks.into_iter().map(Into::into).collect();
        self
    }

    /// Build the tables
    ///
    /// Deleted taxids are dropped from every table. A merged id whose old id
    /// still appears as a node is ignored, since the node wins.
    pub fn build(&self, data: &TaxdumpData) -> TaxonomyTables {
        let deleted: HashSet<TaxId> = data.deleted.iter().map(|d| d.taxid).collect();
        let live = |taxid: &TaxId| !deleted.contains(taxid);

        let nodes: Vec<_> = data.nodes.iter().filter(|n| live(&n.taxid)).collect();
        let node_ids: HashSet<TaxId> = nodes.iter().map(|n| n.taxid).collect();

        let mut tables = TaxonomyTables::from_parents(nodes.iter().map(|n| (n.taxid, n.parent)))
            .with_ranks(nodes.iter().map(|n| (n.taxid, n.rank.clone())))
            .with_canonical_taxa(self.canonical_taxa.iter().cloned());

        for name in data.names.iter().filter(|n| live(&n.taxid)) {
            if name.class == NameClass::ScientificName {
                tables.names.insert(name.taxid, name.name.clone());
            }
            tables
                .all_names
                .entry(name.taxid)
                .or_default()
                .push(TaxonName::new(name.name.clone(), name.class.clone()));
        }

        let mut shadowed = 0usize;
        let merged = data.merged.iter().filter(|m| {
            let keep = !node_ids.contains(&m.old_taxid);
            if !keep {
                shadowed += 1;
            }
            keep
        });
        tables = tables.with_merged(merged.map(|m| (m.old_taxid, m.new_taxid)).collect::<Vec<_>>());
        if shadowed > 0 {
            warn!(count = shadowed, "Merged ids that are still live nodes were ignored");
        }

        let missing_names = node_ids.iter().filter(|id| !tables.names.contains_key(id)).count();
        if missing_names > 0 {
            debug!(count = missing_names, "Nodes without a scientific name");
        }

        tables
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
