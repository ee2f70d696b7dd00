//! Lineage summaries derived from the root path

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use taxo_common::TaxId;

use crate::taxonomy::Taxonomy;

/// Rank key used for path nodes that carry no rank
pub const UNRANKED: &str = "NONE";

/// A taxon found at a given rank on the path to the root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageTaxon {
    pub taxid: TaxId,
    pub name: Option<String>,
}

/// Rank -> taxon mapping for one lineage
///
/// In canonical mode every canonical rank is present; ranks absent from the
/// lineage map to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineageSummary {
    ranks: BTreeMap<String, Option<LineageTaxon>>,
}

impl LineageSummary {
    /// Taxon recorded at `rank`, if the lineage contains one
    pub fn taxon(&self, rank: &str) -> Option<&LineageTaxon> {
        self.ranks.get(rank).and_then(Option::as_ref)
    }

    /// Whether `rank` is a key of the summary, found or not
    pub fn has_rank(&self, rank: &str) -> bool {
        self.ranks.contains_key(rank)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&LineageTaxon>)> {
        self.ranks.iter().map(|(rank, taxon)| (rank.as_str(), taxon.as_ref()))
    }
}

/// Parallel taxid/name/rank vectors along a root path, leaf first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageLists {
    pub taxids: Vec<TaxId>,
    pub names: Vec<Option<String>>,
    pub ranks: Vec<Option<String>>,
}

impl Taxonomy {
    /// Rank summary for the lineage of `taxid`
    ///
    /// With `canonical`, only the configured canonical ranks are reported and
    /// all of them are present. Otherwise every rank on the path is recorded
    /// (nodes without a rank under [`UNRANKED`]), the node closest to the root
    /// winning if a rank repeats.
    pub fn get_lineage_names_ranks(&self, taxid: TaxId, canonical: bool) -> LineageSummary {
        let canonical_taxa = &self.tables().canonical_taxa;
        let mut ranks = BTreeMap::new();

        if canonical {
            for rank in canonical_taxa {
                ranks.insert(rank.clone(), None);
            }
        }

        for tx in self.get_path(taxid) {
            let rank = self.get_rank(tx).unwrap_or(UNRANKED);
            if canonical && !canonical_taxa.iter().any(|r| r == rank) {
                continue;
            }
            let taxon = LineageTaxon {
                taxid: tx,
                name: self.get_name(tx).map(str::to_string),
            };
            ranks.insert(rank.to_string(), Some(taxon));
        }

        LineageSummary { ranks }
    }

    /// Species-rank taxon on the lineage of `taxid`
    pub fn get_species_taxid(&self, taxid: TaxId) -> Option<TaxId> {
        self.get_lineage_names_ranks(taxid, true)
            .taxon("species")
            .map(|taxon| taxon.taxid)
    }

    /// Species-rank taxon on the lineage of `taxid`, or `taxid` itself
    pub fn get_species_taxid_if_exists(&self, taxid: TaxId) -> TaxId {
        self.get_species_taxid(taxid).unwrap_or(taxid)
    }

    /// `"<taxid>:<name>;..."` from leaf to root
    pub fn get_lineage_tx_names_string(&self, taxid: TaxId) -> String {
        self.get_path(taxid)
            .into_iter()
            .map(|tx| format!("{}:{}", tx, self.get_name(tx).unwrap_or("None")))
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn get_lineage_lists(&self, taxid: TaxId) -> LineageLists {
        let mut lists = LineageLists::default();
        for tx in self.get_path(taxid) {
            lists.taxids.push(tx);
            lists.names.push(self.get_name(tx).map(str::to_string));
            lists.ranks.push(self.get_rank(tx).map(str::to_string));
        }
        lists
    }
}
