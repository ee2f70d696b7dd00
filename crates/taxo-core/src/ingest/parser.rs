//! NCBI Taxonomy taxdump parser
//!
//! Parses the .dmp files of a taxdump:
//! - nodes.dmp: tree structure and ranks
//! - names.dmp: every name of every taxon, with its class
//! - merged.dmp: merged taxonomy IDs (old → new)
//! - delnodes.dmp: deleted taxonomy IDs
//!
//! # File Format
//! Fields are separated by `\t|\t` and lines end with `\t|`.

use anyhow::{Context, Result};
use taxo_common::{NameClass, TaxId};
use tracing::{debug, warn};

use super::models::{DeletedTaxon, MergedTaxon, NameRecord, NodeRecord, TaxdumpData};
use super::source::TaxdumpFiles;

/// Parser for NCBI Taxonomy taxdump files
pub struct TaxdumpParser {
    /// Maximum number of nodes to parse (None for unlimited)
    parse_limit: Option<usize>,
}

impl TaxdumpParser {
    pub fn new() -> Self {
        Self { parse_limit: None }
    }

    /// Create a parser that stops after `limit` nodes
    pub fn with_limit(limit: usize) -> Self {
        Self {
            parse_limit: Some(limit),
        }
    }

    /// Parse every file of a taxdump
    pub fn parse(&self, files: &TaxdumpFiles) -> Result<TaxdumpData> {
        debug!("Parsing nodes.dmp");
        let nodes = self.parse_nodes(&files.nodes)?;
        debug!("Parsed {} nodes", nodes.len());

        debug!("Parsing names.dmp");
        let names = self.parse_names(&files.names)?;
        debug!("Parsed {} names", names.len());

        let merged = match files.merged.as_deref() {
            Some(content) => self.parse_merged(content)?,
            None => Vec::new(),
        };
        debug!("Parsed {} merged taxa", merged.len());

        let deleted = match files.delnodes.as_deref() {
            Some(content) => self.parse_delnodes(content)?,
            None => Vec::new(),
        };
        debug!("Parsed {} deleted taxa", deleted.len());

        Ok(TaxdumpData {
            nodes,
            names,
            merged,
            deleted,
        })
    }

    /// Parse nodes.dmp
    ///
    /// # Format
    /// ```text
    /// tax_id | parent tax_id | rank | embl code | division id | ...
    /// 9606   | 9605          | species | HS   | 5           | ...
    /// ```
    pub fn parse_nodes(&self, content: &str) -> Result<Vec<NodeRecord>> {
        let mut nodes = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match self.parse_nodes_line(line, idx + 1) {
                Ok(node) => {
                    nodes.push(node);
                    if let Some(limit) = self.parse_limit {
                        if nodes.len() >= limit {
                            debug!("Reached parse limit of {} nodes", limit);
                            break;
                        }
                    }
                }
                Err(e) => warn!("Failed to parse nodes line {}: {} - Error: {}", idx + 1, line, e),
            }
        }

        Ok(nodes)
    }

    /// Parse a single line from nodes.dmp
    pub fn parse_nodes_line(&self, line: &str, line_num: usize) -> Result<NodeRecord> {
        let fields = split_fields(line);
        if fields.len() < 3 {
            return Err(anyhow::anyhow!(
                "Line {}: Expected at least 3 fields, got {}",
                line_num,
                fields.len()
            ));
        }

        let taxid = parse_taxid(fields[0], "tax_id", line_num)?;
        let parent = parse_taxid(fields[1], "parent tax_id", line_num)?;
        Ok(NodeRecord::new(taxid, parent, fields[2]))
    }

    /// Parse names.dmp
    ///
    /// # Format
    /// ```text
    /// tax_id | name_txt     | unique name | name class
    /// 9606   | Homo sapiens |             | scientific name
    /// ```
    pub fn parse_names(&self, content: &str) -> Result<Vec<NameRecord>> {
        let mut names = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match self.parse_names_line(line, idx + 1) {
                Ok(name) => names.push(name),
                Err(e) => warn!("Failed to parse names line {}: {} - Error: {}", idx + 1, line, e),
            }
        }

        Ok(names)
    }

    /// Parse a single line from names.dmp
    pub fn parse_names_line(&self, line: &str, line_num: usize) -> Result<NameRecord> {
        let fields = split_fields(line);
        if fields.len() < 4 {
            return Err(anyhow::anyhow!(
                "Line {}: Expected at least 4 fields, got {}",
                line_num,
                fields.len()
            ));
        }

        let taxid = parse_taxid(fields[0], "tax_id", line_num)?;
        anyhow::ensure!(!fields[1].is_empty(), "Line {}: Empty name_txt", line_num);

        Ok(NameRecord {
            taxid,
            name: fields[1].to_string(),
            unique_name: (!fields[2].is_empty()).then(|| fields[2].to_string()),
            class: NameClass::from(fields[3]),
        })
    }

    /// Parse merged.dmp
    ///
    /// # Format
    /// ```text
    /// old_tax_id | new_tax_id |
    /// 123 | 456 |
    /// ```
    pub fn parse_merged(&self, content: &str) -> Result<Vec<MergedTaxon>> {
        let mut merged = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match self.parse_merged_line(line, idx + 1) {
                Ok(taxon) => merged.push(taxon),
                Err(e) => warn!("Failed to parse merged line {}: {} - Error: {}", idx + 1, line, e),
            }
        }

        Ok(merged)
    }

    /// Parse a single line from merged.dmp
    pub fn parse_merged_line(&self, line: &str, line_num: usize) -> Result<MergedTaxon> {
        let fields = split_fields(line);
        if fields.len() < 2 {
            return Err(anyhow::anyhow!(
                "Line {}: Expected at least 2 fields, got {}",
                line_num,
                fields.len()
            ));
        }

        let old_taxid = parse_taxid(fields[0], "old_tax_id", line_num)?;
        let new_taxid = parse_taxid(fields[1], "new_tax_id", line_num)?;
        Ok(MergedTaxon::new(old_taxid, new_taxid))
    }

    /// Parse delnodes.dmp
    ///
    /// # Format
    /// ```text
    /// tax_id |
    /// 789 |
    /// ```
    pub fn parse_delnodes(&self, content: &str) -> Result<Vec<DeletedTaxon>> {
        let mut deleted = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match self.parse_delnodes_line(line, idx + 1) {
                Ok(taxon) => deleted.push(taxon),
                Err(e) => warn!(
                    "Failed to parse delnodes line {}: {} - Error: {}",
                    idx + 1,
                    line,
                    e
                ),
            }
        }

        Ok(deleted)
    }

    /// Parse a single line from delnodes.dmp
    pub fn parse_delnodes_line(&self, line: &str, line_num: usize) -> Result<DeletedTaxon> {
        let field = split_fields(line)
            .into_iter()
            .next()
            .context("Line is empty")?;
        let taxid = parse_taxid(field, "tax_id", line_num)?;
        Ok(DeletedTaxon { taxid })
    }
}

impl Default for TaxdumpParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a .dmp line on `\t|\t`, dropping the trailing `\t|`
fn split_fields(line: &str) -> Vec<&str> {
    let line = line.trim_end_matches(['\r', '\n']);
    let line = line.strip_suffix("\t|").unwrap_or(line);
    line.split("\t|\t")
        .map(|f| f.trim().trim_end_matches('|').trim())
        .collect()
}

fn parse_taxid(field: &str, column: &str, line_num: usize) -> Result<TaxId> {
    field
        .parse()
        .with_context(|| format!("Line {}: Invalid {}: {}", line_num, column, field))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const NODES: &str = "1\t|\t1\t|\tno rank\t|\t\t|\t8\t|\t0\t|\t1\t|\t0\t|\t0\t|\t0\t|\t0\t|\t0\t|\t\t|\n\
                         9605\t|\t9604\t|\tgenus\t|\t\t|\t2\t|\t1\t|\t1\t|\t1\t|\t2\t|\t1\t|\t1\t|\t0\t|\t\t|\n\
                         9606\t|\t9605\t|\tspecies\t|\tHS\t|\t2\t|\t1\t|\t1\t|\t1\t|\t2\t|\t1\t|\t1\t|\t0\t|\t\t|\n";

    #[test]
    fn test_parse_nodes_line() {
        let parser = TaxdumpParser::new();
        let line = "9606\t|\t9605\t|\tspecies\t|\tHS\t|\t2\t|\t1\t|\t1\t|\t1\t|\t2\t|\t1\t|\t1\t|\t0\t|\t\t|";

        let node = parser.parse_nodes_line(line, 1).unwrap();
        assert_eq!(node, NodeRecord::new(9606, 9605, "species"));
    }

    #[test]
    fn test_parse_names_line() {
        let parser = TaxdumpParser::new();

        let name = parser
            .parse_names_line("9606\t|\tHomo sapiens\t|\t\t|\tscientific name\t|", 1)
            .unwrap();
        assert_eq!(name.taxid, 9606);
        assert_eq!(name.name, "Homo sapiens");
        assert_eq!(name.unique_name, None);
        assert_eq!(name.class, NameClass::ScientificName);

        let name = parser
            .parse_names_line("4479\t|\tGramineae\t|\tGramineae <Poaceae>\t|\tsynonym\t|", 2)
            .unwrap();
        assert_eq!(name.unique_name.as_deref(), Some("Gramineae <Poaceae>"));
        assert_eq!(name.class, NameClass::Synonym);
    }

    #[test]
    fn test_parse_merged_line() {
        let parser = TaxdumpParser::new();
        let merged = parser.parse_merged_line("123\t|\t456\t|", 1).unwrap();
        assert_eq!(merged, MergedTaxon::new(123, 456));
    }

    #[test]
    fn test_parse_delnodes_line() {
        let parser = TaxdumpParser::new();
        let deleted = parser.parse_delnodes_line("789\t|", 1).unwrap();
        assert_eq!(deleted.taxid, 789);
    }

    #[test]
    fn test_bad_lines_are_skipped() {
        let parser = TaxdumpParser::new();
        let content = format!("{NODES}abc\t|\t1\t|\tgenus\t|\n");
        let nodes = parser.parse_nodes(&content).unwrap();
        assert_eq!(nodes.len(), 3);
    }

    #[test]
    fn test_parse_with_limit() {
        let parser = TaxdumpParser::with_limit(2);
        let nodes = parser.parse_nodes(NODES).unwrap();
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_parse_full_taxdump() {
        let parser = TaxdumpParser::new();
        let files = TaxdumpFiles {
            nodes: NODES.to_string(),
            names: "9606\t|\tHomo sapiens\t|\t\t|\tscientific name\t|\n".to_string(),
            merged: Some("63221\t|\t9606\t|\n".to_string()),
            delnodes: None,
        };

        let data = parser.parse(&files).unwrap();
        let stats = data.stats();
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.names, 1);
        assert_eq!(stats.merged, 1);
        assert_eq!(stats.deleted, 0);
    }
}
