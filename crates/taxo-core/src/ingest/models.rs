//! NCBI taxdump records

use serde::{Deserialize, Serialize};
use taxo_common::{NameClass, TaxId};

/// One row of nodes.dmp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub taxid: TaxId,
    /// Parent taxid; the root lists itself
    pub parent: TaxId,
    /// Rank label (e.g., "species", "no rank")
    pub rank: String,
}

impl NodeRecord {
    pub fn new(taxid: TaxId, parent: TaxId, rank: impl Into<String>) -> Self {
        Self {
            taxid,
            parent,
            rank: rank.into(),
        }
    }
}

/// One row of names.dmp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub taxid: TaxId,
    pub name: String,
    /// Disambiguated name, when the plain name is shared by several taxa
    pub unique_name: Option<String>,
    pub class: NameClass,
}

/// Represents a merged taxon (old ID merged into new ID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedTaxon {
    pub old_taxid: TaxId,
    pub new_taxid: TaxId,
}

impl MergedTaxon {
    pub fn new(old_taxid: TaxId, new_taxid: TaxId) -> Self {
        Self { old_taxid, new_taxid }
    }
}

/// Represents a deleted taxon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedTaxon {
    pub taxid: TaxId,
}

/// All records parsed from one taxdump
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxdumpData {
    pub nodes: Vec<NodeRecord>,
    pub names: Vec<NameRecord>,
    pub merged: Vec<MergedTaxon>,
    pub deleted: Vec<DeletedTaxon>,
}

impl TaxdumpData {
    pub fn stats(&self) -> TaxdumpStats {
        TaxdumpStats {
            nodes: self.nodes.len(),
            names: self.names.len(),
            merged: self.merged.len(),
            deleted: self.deleted.len(),
        }
    }
}

/// Record counts of a parsed taxdump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxdumpStats {
    pub nodes: usize,
    pub names: usize,
    pub merged: usize,
    pub deleted: usize,
}
