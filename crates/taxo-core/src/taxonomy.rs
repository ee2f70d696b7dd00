//! Read-only taxonomy query service
//!
//! Every lookup first resolves merged taxids to their current id. Missing
//! taxids never raise: they yield `None`, an empty collection, or a path
//! containing only the queried id.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::path::Path;

use taxo_common::{Result, TaxId, TaxonName, ROOT_TAXID};
use tracing::{debug, warn};

use crate::store::TableStore;
use crate::tables::TaxonomyTables;

/// Query layer over an immutable [`TaxonomyTables`] snapshot
#[derive(Debug, Clone)]
pub struct Taxonomy {
    tables: TaxonomyTables,
    node_count: usize,
}

impl Taxonomy {
    pub fn new(tables: TaxonomyTables) -> Self {
        let node_count = tables.node_count();
        Self { tables, node_count }
    }

    /// Load tables from a resource directory, verifying artifact checksums
    pub fn load(resource_dir: impl AsRef<Path>) -> Result<Self> {
        let tables = TableStore::new(resource_dir.as_ref()).load()?;
        Ok(Self::new(tables))
    }

    pub fn tables(&self) -> &TaxonomyTables {
        &self.tables
    }

    pub fn into_tables(self) -> TaxonomyTables {
        self.tables
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.node_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Whether `taxid` (after alias resolution) is a node of the tree
    pub fn contains(&self, taxid: TaxId) -> bool {
        self.tables.is_node(self.resolve(taxid))
    }

    /// Current taxid for `taxid`, or `taxid` itself when it was never merged
    pub fn resolve(&self, taxid: TaxId) -> TaxId {
        self.tables.merged.get(&taxid).copied().unwrap_or(taxid)
    }

    /// The current taxid if `taxid` was merged into another node
    pub fn is_merged(&self, taxid: TaxId) -> Option<TaxId> {
        self.tables.merged.get(&taxid).copied()
    }

    pub fn get_max_taxid(&self) -> TaxId {
        self.tables.max_taxid
    }

    /// Scientific name
    pub fn get_name(&self, taxid: TaxId) -> Option<&str> {
        self.tables
            .names
            .get(&self.resolve(taxid))
            .map(String::as_str)
    }

    pub fn get_rank(&self, taxid: TaxId) -> Option<&str> {
        self.tables
            .nodes_rank
            .get(&self.resolve(taxid))
            .map(String::as_str)
    }

    /// Every name recorded for the taxon, with its class
    pub fn get_all_names(&self, taxid: TaxId) -> &[TaxonName] {
        self.tables
            .all_names
            .get(&self.resolve(taxid))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Parent of the resolved taxid, if any
    pub fn get_parent(&self, taxid: TaxId) -> Option<TaxId> {
        let taxid = self.resolve(taxid);
        self.parent_of(taxid)
    }

    fn parent_of(&self, taxid: TaxId) -> Option<TaxId> {
        match self.tables.nodes_rel.get(&taxid) {
            Some(&parent) if parent != 0 && parent != taxid => Some(parent),
            _ => None,
        }
    }

    /// Taxids from `taxid` up to and including the root
    ///
    /// Unknown taxids yield `[taxid]`; taxid 0 yields an empty path. A
    /// cycle in the parent map stops the walk at the first repeated node.
    pub fn get_path(&self, taxid: TaxId) -> Vec<TaxId> {
        let mut current = self.resolve(taxid);
        let mut path = Vec::new();
        let mut seen = HashSet::new();

        while current > 0 {
            if !seen.insert(current) {
                warn!(taxid, at = current, "Parent map contains a cycle, truncating path");
                break;
            }
            path.push(current);
            match self.parent_of(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }

        path
    }

    /// Like [`get_path`](Self::get_path) without the trailing root
    pub fn get_path_without_root(&self, taxid: TaxId) -> Vec<TaxId> {
        let mut path = self.get_path(taxid);
        if path.len() > 1 && path.last() == Some(&ROOT_TAXID) {
            path.pop();
        }
        path
    }

    /// Direct children of the resolved taxid
    pub fn get_direct_children(&self, taxid: TaxId) -> &[TaxId] {
        self.tables
            .children_nodes
            .get(&self.resolve(taxid))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every descendant of `taxid`, sorted ascending, never including `taxid`
    pub fn get_children(&self, taxid: TaxId) -> Vec<TaxId> {
        let start = self.resolve(taxid);
        let mut visited = BTreeSet::new();
        let mut to_visit: VecDeque<TaxId> =
            self.get_direct_children(start).iter().copied().collect();

        while let Some(tx) = to_visit.pop_front() {
            if tx == start || !visited.insert(tx) {
                continue;
            }
            if let Some(children) = self.tables.children_nodes.get(&tx) {
                to_visit.extend(children.iter().copied());
            }
        }

        debug!(taxid = start, descendants = visited.len(), "Expanded subtree");
        visited.into_iter().collect()
    }

    /// Lowest common ancestor, or `None` when the paths never meet
    pub fn get_lca(&self, taxid1: TaxId, taxid2: TaxId) -> Option<TaxId> {
        if taxid1 == taxid2 {
            return Some(taxid1);
        }
        let path1: HashSet<TaxId> = self.get_path(taxid1).into_iter().collect();
        self.get_path(taxid2)
            .into_iter()
            .find(|tx| path1.contains(tx))
    }

    /// Left fold of [`get_lca`](Self::get_lca) over `taxids`
    ///
    /// Returns `None` for an empty slice or when any pair has no common ancestor.
    pub fn get_lca_from_list(&self, taxids: &[TaxId]) -> Option<TaxId> {
        let (&first, rest) = taxids.split_first()?;
        rest.iter().try_fold(first, |lca, &tx| self.get_lca(lca, tx))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use taxo_common::NameClass;

    /// 1 -> 2 -> {3, 4}, 1 -> 5; 30 merged into 3
    fn sample() -> Taxonomy {
        let tables = TaxonomyTables::from_parents([(1, 1), (2, 1), (3, 2), (4, 2), (5, 1)])
            .with_ranks([
                (1, "no rank"),
                (2, "genus"),
                (3, "species"),
                (4, "species"),
                (5, "genus"),
            ])
            .with_names([
                (1, "root"),
                (2, "Homo"),
                (3, "Homo sapiens"),
                (4, "Homo erectus"),
                (5, "Mus"),
            ])
            .with_all_names([
                (3, TaxonName::new("Homo sapiens", NameClass::ScientificName)),
                (3, TaxonName::new("human", NameClass::GenbankCommonName)),
            ])
            .with_merged([(30, 3)]);
        Taxonomy::new(tables)
    }

    #[test]
    fn test_resolve() {
        let tax = sample();
        assert_eq!(tax.resolve(30), 3);
        assert_eq!(tax.resolve(4), 4);
        assert_eq!(tax.resolve(999), 999);
        assert_eq!(tax.is_merged(30), Some(3));
        assert_eq!(tax.is_merged(3), None);
    }

    #[test]
    fn test_get_name_and_rank() {
        let tax = sample();
        assert_eq!(tax.get_name(3), Some("Homo sapiens"));
        assert_eq!(tax.get_rank(2), Some("genus"));
        assert_eq!(tax.get_name(999), None);
        assert_eq!(tax.get_rank(999), None);
    }

    #[test]
    fn test_aliased_lookup_matches_target() {
        let tax = sample();
        assert_eq!(tax.get_name(30), tax.get_name(3));
        assert_eq!(tax.get_rank(30), tax.get_rank(3));
        assert_eq!(tax.get_path(30), tax.get_path(3));
        assert_eq!(tax.get_all_names(30), tax.get_all_names(3));
    }

    #[test]
    fn test_get_path() {
        let tax = sample();
        assert_eq!(tax.get_path(3), vec![3, 2, 1]);
        assert_eq!(tax.get_path(1), vec![1]);
        assert_eq!(tax.get_path(999), vec![999]);
        assert!(tax.get_path(0).is_empty());
        assert_eq!(tax.get_path_without_root(3), vec![3, 2]);
        assert_eq!(tax.get_path_without_root(1), vec![1]);
    }

    #[test]
    fn test_get_path_stops_on_cycle() {
        let mut tables = TaxonomyTables::from_parents([(2, 1)]);
        tables.nodes_rel.insert(7, 8);
        tables.nodes_rel.insert(8, 7);
        let tax = Taxonomy::new(tables);

        assert_eq!(tax.get_path(7), vec![7, 8]);
        assert_eq!(tax.get_path(8), vec![8, 7]);
        assert_eq!(tax.get_path_without_root(7), vec![7, 8]);
    }

    #[test]
    fn test_get_path_cycle_beside_large_tree() {
        // A long chain under the root must not inflate a path stuck in a 2-cycle
        let mut tables = TaxonomyTables::from_parents((2..1000).map(|tx| (tx, tx - 1)));
        tables.nodes_rel.insert(5000, 5001);
        tables.nodes_rel.insert(5001, 5000);
        let tax = Taxonomy::new(tables);

        assert_eq!(tax.get_path(5000), vec![5000, 5001]);
        assert_eq!(tax.get_lca(5000, 5001), Some(5001));
        assert_eq!(tax.get_lca(5000, 999), None);
        assert_eq!(tax.get_path(999).len(), 999);
    }

    #[test]
    fn test_len_and_is_empty_agree() {
        let empty = Taxonomy::new(TaxonomyTables::default());
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());

        let tax = sample();
        assert_eq!(tax.len(), 5);
        assert!(!tax.is_empty());
    }

    #[test]
    fn test_get_children() {
        let tax = sample();
        assert_eq!(tax.get_children(1), vec![2, 3, 4, 5]);
        assert_eq!(tax.get_children(2), vec![3, 4]);
        assert!(tax.get_children(3).is_empty());
        assert!(tax.get_children(999).is_empty());
        assert_eq!(tax.get_direct_children(1), &[2, 5]);
    }

    #[test]
    fn test_get_lca() {
        let tax = sample();
        assert_eq!(tax.get_lca(3, 4), Some(2));
        assert_eq!(tax.get_lca(4, 3), Some(2));
        assert_eq!(tax.get_lca(3, 5), Some(1));
        assert_eq!(tax.get_lca(3, 3), Some(3));
        assert_eq!(tax.get_lca(30, 4), Some(2));
        assert_eq!(tax.get_lca(3, 2), Some(2));
    }

    #[test]
    fn test_get_lca_disjoint() {
        // 10 is not connected to the root
        let tables = TaxonomyTables::from_parents([(2, 1), (11, 10)]);
        let tax = Taxonomy::new(tables);
        assert_eq!(tax.get_lca(2, 11), None);
    }

    #[test]
    fn test_get_lca_from_list() {
        let tax = sample();
        assert_eq!(tax.get_lca_from_list(&[3, 4]), Some(2));
        assert_eq!(tax.get_lca_from_list(&[3, 4, 5]), Some(1));
        assert_eq!(tax.get_lca_from_list(&[5, 4, 3]), Some(1));
        assert_eq!(tax.get_lca_from_list(&[4]), Some(4));
        assert_eq!(tax.get_lca_from_list(&[]), None);
    }

    #[test]
    fn test_get_all_names() {
        let tax = sample();
        let names = tax.get_all_names(3);
        assert_eq!(names.len(), 2);
        assert_eq!(names[1].class, NameClass::GenbankCommonName);
        assert!(tax.get_all_names(4).is_empty());
    }

    #[test]
    fn test_contains_and_len() {
        let tax = sample();
        assert!(tax.contains(3));
        assert!(tax.contains(30));
        assert!(!tax.contains(999));
        assert_eq!(tax.len(), 5);
        assert_eq!(tax.get_max_taxid(), 30);
    }
}
