//! Taxonomy lookup tables
//!
//! The tables are parallel maps keyed by taxid. They are produced once by
//! the ingest step, persisted by [`crate::store`], and never mutated after
//! loading.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use taxo_common::{Result, TaxId, TaxoError, TaxonName, ROOT_TAXID};

/// Ranks always reported by canonical lineage summaries
pub const DEFAULT_CANONICAL_RANKS: &[&str] = &[
    "superkingdom",
    "kingdom",
    "phylum",
    "class",
    "order",
    "family",
    "genus",
    "species",
];

/// Immutable snapshot of the taxonomy tree and its annotations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyTables {
    /// Old taxid -> current taxid
    pub merged: HashMap<TaxId, TaxId>,
    /// Taxid -> parent taxid (the root has no entry)
    pub nodes_rel: HashMap<TaxId, TaxId>,
    /// Taxid -> direct children, sorted ascending
    pub children_nodes: HashMap<TaxId, Vec<TaxId>>,
    /// Taxid -> rank label
    pub nodes_rank: HashMap<TaxId, String>,
    /// Taxid -> scientific name
    pub names: HashMap<TaxId, String>,
    /// Taxid -> every name with its class
    pub all_names: HashMap<TaxId, Vec<TaxonName>>,
    /// Largest taxid seen at build time
    pub max_taxid: TaxId,
    /// Ranks reported by canonical lineage summaries
    pub canonical_taxa: Vec<String>,
}

impl TaxonomyTables {
    /// Build the tree from `(taxid, parent)` pairs
    ///
    /// A parent of 0, or a node that is its own parent (the NCBI root), is
    /// treated as "no parent". The children map is derived as the exact
    /// inverse of the parent map.
    pub fn from_parents(parents: impl IntoIterator<Item = (TaxId, TaxId)>) -> Self {
        let mut nodes_rel = HashMap::new();
        let mut max_taxid = 0;

        for (taxid, parent) in parents {
            max_taxid = max_taxid.max(taxid).max(parent);
            if parent != 0 && parent != taxid {
                nodes_rel.insert(taxid, parent);
            }
        }

        let children_nodes = invert_parents(&nodes_rel);

        Self {
            nodes_rel,
            children_nodes,
            max_taxid,
            canonical_taxa: DEFAULT_CANONICAL_RANKS.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_ranks<R: Into<String>>(
        mut self,
        ranks: impl IntoIterator<Item = (TaxId, R)>,
    ) -> Self {
        self.nodes_rank
            .extend(ranks.into_iter().map(|(taxid, rank)| (taxid, rank.into())));
        self
    }

    pub fn with_names<N: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = (TaxId, N)>,
    ) -> Self {
        self.names
            .extend(names.into_iter().map(|(taxid, name)| (taxid, name.into())));
        self
    }

    pub fn with_all_names(mut self, names: impl IntoIterator<Item = (TaxId, TaxonName)>) -> Self {
        for (taxid, name) in names {
            self.all_names.entry(taxid).or_default().push(name);
        }
        self
    }

    pub fn with_merged(mut self, merged: impl IntoIterator<Item = (TaxId, TaxId)>) -> Self {
        for (old, new) in merged {
            self.max_taxid = self.max_taxid.max(old).max(new);
            self.merged.insert(old, new);
        }
        self
    }

    pub fn with_canonical_taxa<R: Into<String>>(
        mut self,
        ranks: impl IntoIterator<Item = R>,
    ) -> Self {
        self.canonical_taxa = ranks.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `taxid` is a node of the tree (not an alias)
    pub fn is_node(&self, taxid: TaxId) -> bool {
        taxid == ROOT_TAXID
            || self.nodes_rel.contains_key(&taxid)
            || self.nodes_rank.contains_key(&taxid)
            || self.names.contains_key(&taxid)
    }

    /// Number of distinct nodes across the parent, rank and name maps
    pub fn node_count(&self) -> usize {
        self.node_ids().len()
    }

    fn node_ids(&self) -> HashSet<TaxId> {
        let mut ids: HashSet<TaxId> = self
            .nodes_rel
            .keys()
            .chain(self.nodes_rank.keys())
            .chain(self.names.keys())
            .copied()
            .collect();
        // The root is implicit once any node exists
        if !ids.is_empty() {
            ids.insert(ROOT_TAXID);
        }
        ids
    }

    /// Check the structural invariants of the tree
    pub fn validate(&self) -> ValidationReport {
        let nodes = self.node_ids();
        let mut report = ValidationReport {
            node_count: nodes.len(),
            ..Default::default()
        };

        for &taxid in &nodes {
            if taxid != ROOT_TAXID && !self.nodes_rel.contains_key(&taxid) {
                report.orphans.push(taxid);
            }
        }

        // Nodes already proven to reach the root (or a dead end) without a cycle
        let mut settled: HashSet<TaxId> = HashSet::new();
        for &start in &nodes {
            let mut trail = Vec::new();
            let mut on_trail = HashSet::new();
            let mut current = start;
            loop {
                if settled.contains(&current) {
                    break;
                }
                if !on_trail.insert(current) {
                    report.cycles.push(current);
                    break;
                }
                trail.push(current);
                match self.nodes_rel.get(&current) {
                    Some(&parent) => current = parent,
                    None => break,
                }
            }
            settled.extend(trail);
        }

        for (&child, &parent) in &self.nodes_rel {
            let listed = self
                .children_nodes
                .get(&parent)
                .is_some_and(|children| children.contains(&child));
            if !listed {
                report.children_mismatches += 1;
            }
        }
        for (&parent, children) in &self.children_nodes {
            for child in children {
                if self.nodes_rel.get(child) != Some(&parent) {
                    report.children_mismatches += 1;
                }
            }
        }

        for (&old, &new) in &self.merged {
            if !self.is_node(new) {
                report.dangling_aliases.push(old);
            }
        }

        report.orphans.sort_unstable();
        report.cycles.sort_unstable();
        report.dangling_aliases.sort_unstable();
        report
    }

    /// Like [`validate`](Self::validate) but fails on cycles or an inconsistent children map
    ///
    /// Orphans and dangling aliases are tolerated: lookups already degrade
    /// gracefully for them.
    pub fn ensure_valid(&self) -> Result<ValidationReport> {
        let report = self.validate();
        if !report.cycles.is_empty() {
            return Err(TaxoError::InvalidTaxonomy(format!(
                "parent map contains cycles through {:?}",
                report.cycles
            )));
        }
        if report.children_mismatches > 0 {
            return Err(TaxoError::InvalidTaxonomy(format!(
                "children map disagrees with parent map in {} places",
                report.children_mismatches
            )));
        }
        Ok(report)
    }
}

fn invert_parents(nodes_rel: &HashMap<TaxId, TaxId>) -> HashMap<TaxId, Vec<TaxId>> {
    let mut children: HashMap<TaxId, Vec<TaxId>> = HashMap::new();
    for (&child, &parent) in nodes_rel {
        children.entry(parent).or_default().push(child);
    }
    for list in children.values_mut() {
        list.sort_unstable();
    }
    children
}

/// Outcome of [`TaxonomyTables::validate`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub node_count: usize,
    /// Non-root nodes without a parent
    pub orphans: Vec<TaxId>,
    /// Nodes at which a parent walk revisited itself
    pub cycles: Vec<TaxId>,
    /// Parent/children entries that are not mirrored in the other map
    pub children_mismatches: usize,
    /// Merged ids whose target is not a node
    pub dangling_aliases: Vec<TaxId>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.orphans.is_empty()
            && self.cycles.is_empty()
            && self.children_mismatches == 0
            && self.dangling_aliases.is_empty()
    }
}
