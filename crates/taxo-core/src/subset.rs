//! Reduced parent tables ("tri" files) for a list of taxids
//!
//! The output keeps every ancestor of the requested taxids so that the
//! subset is itself a rooted tree. Rows are `"<taxid>\t<parent>"`, sorted by
//! taxid; the root is written with parent 0.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use taxo_common::{Result, TaxId, TaxoError, ROOT_TAXID};
use tracing::{info, warn};

use crate::taxonomy::Taxonomy;

/// Summary of a subset export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubsetReport {
    /// Taxids read from the input
    pub requested: usize,
    /// Rows written to the output
    pub rows_written: usize,
    /// Non-root taxids without a parent, written with the root as parent
    pub reparented: Vec<TaxId>,
}

/// Read one taxid per line, skipping blank lines
///
/// A line that is not an unsigned integer fails with its 1-based line number.
pub fn read_taxid_list<R: BufRead>(reader: R) -> Result<Vec<TaxId>> {
    let mut taxids = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let taxid = trimmed
            .parse::<TaxId>()
            .map_err(|e| TaxoError::parse(idx + 1, format!("invalid taxid '{trimmed}': {e}")))?;
        taxids.push(taxid);
    }
    Ok(taxids)
}

impl Taxonomy {
    /// Union of the root paths of `taxids`, always including the root
    pub fn subset_closure(&self, taxids: &[TaxId]) -> BTreeSet<TaxId> {
        let mut keep: BTreeSet<TaxId> = taxids
            .iter()
            .flat_map(|&taxid| self.get_path(taxid))
            .collect();
        keep.insert(ROOT_TAXID);
        keep
    }

    /// Write the subset parent table for the taxids listed in `reader`
    pub fn write_subset_tri<R: BufRead, W: Write>(
        &self,
        reader: R,
        mut writer: W,
    ) -> Result<SubsetReport> {
        let taxids = read_taxid_list(reader)?;
        let keep = self.subset_closure(&taxids);
        let mut report = SubsetReport {
            requested: taxids.len(),
            ..Default::default()
        };

        for taxid in keep {
            let parent = match self.tables().nodes_rel.get(&taxid) {
                Some(&parent) if parent != 0 => parent,
                _ if taxid == ROOT_TAXID => 0,
                _ => {
                    warn!(taxid, "Taxid has no parent, assigning root as parent");
                    report.reparented.push(taxid);
                    ROOT_TAXID
                }
            };
            writeln!(writer, "{taxid}\t{parent}")?;
            report.rows_written += 1;
        }

        writer.flush()?;
        Ok(report)
    }

    /// File-based [`write_subset_tri`](Self::write_subset_tri)
    pub fn create_subset_tri(
        &self,
        input_taxids_file: impl AsRef<Path>,
        output_file: impl AsRef<Path>,
    ) -> Result<SubsetReport> {
        let input = input_taxids_file.as_ref();
        if !input.exists() {
            return Err(TaxoError::ResourceNotFound(input.to_path_buf()));
        }

        let reader = BufReader::new(File::open(input)?);
        let writer = BufWriter::new(File::create(output_file.as_ref())?);
        let report = self.write_subset_tri(reader, writer)?;

        info!(
            input = %input.display(),
            output = %output_file.as_ref().display(),
            requested = report.requested,
            rows = report.rows_written,
            reparented = report.reparented.len(),
            "Wrote taxonomy subset"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::tables::TaxonomyTables;
    use std::io::Cursor;

    /// 1 -> 2 -> {3, 4}, 1 -> 5; 8 has a rank but no parent; 30 merged into 3
    fn sample() -> Taxonomy {
        let tables = TaxonomyTables::from_parents([(1, 1), (2, 1), (3, 2), (4, 2), (5, 1)])
            .with_ranks([(8, "species")])
            .with_merged([(30, 3)]);
        Taxonomy::new(tables)
    }

    fn run(tax: &Taxonomy, input: &str) -> (String, SubsetReport) {
        let mut out = Vec::new();
        let report = tax.write_subset_tri(Cursor::new(input), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), report)
    }

    #[test]
    fn test_subset_includes_ancestors() {
        let (out, report) = run(&sample(), "3\n");
        assert_eq!(out, "1\t0\n2\t1\n3\t2\n");
        assert_eq!(report.requested, 1);
        assert_eq!(report.rows_written, 3);
        assert!(report.reparented.is_empty());
    }

    #[test]
    fn test_subset_resolves_merged_ids() {
        let (out, _) = run(&sample(), "30\n5\n");
        assert_eq!(out, "1\t0\n2\t1\n3\t2\n5\t1\n");
    }

    #[test]
    fn test_subset_reparents_orphans() {
        let (out, report) = run(&sample(), "8\n4\n");
        assert_eq!(out, "1\t0\n2\t1\n4\t2\n8\t1\n");
        assert_eq!(report.reparented, vec![8]);
    }

    #[test]
    fn test_subset_of_nothing_is_root() {
        let (out, report) = run(&sample(), "\n\n");
        assert_eq!(out, "1\t0\n");
        assert_eq!(report.requested, 0);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let mut out = Vec::new();
        let err = sample()
            .write_subset_tri(Cursor::new("3\nnine\n"), &mut out)
            .unwrap_err();
        assert!(matches!(err, TaxoError::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_read_taxid_list_trims_whitespace() {
        let taxids = read_taxid_list(Cursor::new(" 9606 \r\n\n10090\n")).unwrap();
        assert_eq!(taxids, vec![9606, 10090]);
    }
}
