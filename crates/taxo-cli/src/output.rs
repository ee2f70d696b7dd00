//! Result rendering: plain text for terminals and pipes, JSON with `--json`

use crate::error::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;

/// Placeholder printed for missing names and ranks
pub const NOT_FOUND: &str = "not found";

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Print tab-separated rows on stdout
pub fn print_rows<I, R>(rows: I) -> Result<()>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: std::fmt::Display,
{
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for row in rows {
        let line = row
            .into_iter()
            .map(|cell| cell.to_string())
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Build a compact table with a header row
pub fn table<H: Into<comfy_table::Cell>>(header: impl IntoIterator<Item = H>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Display form of an optional label
pub fn or_not_found(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_not_found() {
        assert_eq!(or_not_found(Some("species")), "species");
        assert_eq!(or_not_found(None), NOT_FOUND);
    }

    #[test]
    fn test_table_renders_header() {
        let mut t = table(["Rank", "Name", "Taxid"]);
        t.add_row(["genus", "Homo", "9605"]);
        let rendered = t.to_string();
        assert!(rendered.contains("Rank"));
        assert!(rendered.contains("Homo"));
    }
}
