//! End-to-end tests for the taxo binary
//!
//! Every test builds a small resource directory from a taxdump fixture and
//! runs the binary against it.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NODES: &str = "\
1\t|\t1\t|\tno rank\t|\n\
2759\t|\t1\t|\tsuperkingdom\t|\n\
40674\t|\t2759\t|\tclass\t|\n\
9443\t|\t40674\t|\torder\t|\n\
9605\t|\t9443\t|\tgenus\t|\n\
9606\t|\t9605\t|\tspecies\t|\n\
63221\t|\t9606\t|\tsubspecies\t|\n\
9989\t|\t40674\t|\torder\t|\n\
10090\t|\t9989\t|\tspecies\t|\n";

const NAMES: &str = "\
1\t|\troot\t|\t\t|\tscientific name\t|\n\
2759\t|\tEukaryota\t|\t\t|\tscientific name\t|\n\
40674\t|\tMammalia\t|\t\t|\tscientific name\t|\n\
9443\t|\tPrimates\t|\t\t|\tscientific name\t|\n\
9605\t|\tHomo\t|\t\t|\tscientific name\t|\n\
9606\t|\tHomo sapiens\t|\t\t|\tscientific name\t|\n\
9606\t|\thuman\t|\t\t|\tgenbank common name\t|\n\
63221\t|\tHomo sapiens neanderthalensis\t|\t\t|\tscientific name\t|\n\
9989\t|\tRodentia\t|\t\t|\tscientific name\t|\n\
10090\t|\tMus musculus\t|\t\t|\tscientific name\t|\n";

const MERGED: &str = "1297\t|\t10090\t|\n";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn resources(&self) -> PathBuf {
        self.dir.path().join("resources")
    }

    fn taxo(&self) -> Command {
        let mut cmd = Command::cargo_bin("taxo").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("TAXO_RESOURCE_DIR")
            .env_remove("TAXO_VERIFY_CHECKSUMS")
            .env_remove("LOG_LEVEL")
            .env_remove("LOG_OUTPUT")
            .arg("--resource-dir")
            .arg(self.resources());
        cmd
    }
}

fn write_taxdump(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join("nodes.dmp"), NODES).unwrap();
    std::fs::write(dir.join("names.dmp"), NAMES).unwrap();
    std::fs::write(dir.join("merged.dmp"), MERGED).unwrap();
}

fn built() -> Fixture {
    let fixture = Fixture {
        dir: tempfile::tempdir().unwrap(),
    };
    let dump = fixture.dir.path().join("taxdump");
    write_taxdump(&dump);

    fixture
        .taxo()
        .arg("build")
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes:     9"));
    fixture
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap()
}

// ============================================================================
// Lookups
// ============================================================================

#[test]
fn test_name_and_rank() {
    let fx = built();

    fx.taxo()
        .args(["name", "9606", "1297", "424242"])
        .assert()
        .success()
        .stdout("9606\tHomo sapiens\n1297\tMus musculus\n424242\tnot found\n");

    fx.taxo()
        .args(["rank", "9605"])
        .assert()
        .success()
        .stdout("9605\tgenus\n");
}

#[test]
fn test_names_lists_every_class() {
    let fx = built();

    fx.taxo()
        .args(["names", "9606"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Homo sapiens"))
        .stdout(predicate::str::contains("genbank common name"));
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn test_path_to_root() {
    let fx = built();

    let out = stdout_of(fx.taxo().args(["path", "9606"]));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.first(), Some(&"9606\tspecies\tHomo sapiens"));
    assert_eq!(lines.last(), Some(&"1\tno rank\troot"));
    assert_eq!(lines.len(), 6);

    let out = stdout_of(fx.taxo().args(["path", "9606", "--exclude-root"]));
    assert!(!out.lines().any(|l| l.starts_with("1\t")));
}

#[test]
fn test_children_json() {
    let fx = built();

    let out = stdout_of(fx.taxo().args(["--json", "children", "9605"]));
    let children: Vec<u32> = serde_json::from_str(&out).unwrap();
    assert_eq!(children, vec![9606, 63221]);

    fx.taxo()
        .args(["children", "40674", "--direct"])
        .assert()
        .success()
        .stdout("9443\n9989\n");

    fx.taxo()
        .args(["children", "1", "--count"])
        .assert()
        .success()
        .stdout("8\n");
}

#[test]
fn test_lca() {
    let fx = built();

    fx.taxo()
        .args(["lca", "63221", "10090"])
        .assert()
        .success()
        .stdout("40674\tMammalia\n");

    // Merged ids resolve before the walk
    fx.taxo()
        .args(["lca", "1297", "10090"])
        .assert()
        .success()
        .stdout("10090\tMus musculus\n");
}

#[test]
fn test_lca_needs_two_taxids() {
    let fx = built();
    fx.taxo().args(["lca", "9606"]).assert().failure();
}

// ============================================================================
// Lineage
// ============================================================================

#[test]
fn test_lineage_formats() {
    let fx = built();

    fx.taxo()
        .args(["lineage", "9605", "--format", "compact"])
        .assert()
        .success()
        .stdout("9605:Homo;9443:Primates;40674:Mammalia;2759:Eukaryota;1:root\n");

    let out = stdout_of(fx.taxo().args(["--json", "lineage", "63221", "--canonical"]));
    let summary: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(summary["species"]["taxid"], 9606);
    assert_eq!(summary["class"]["name"], "Mammalia");
    assert!(summary["family"].is_null());
}

#[test]
fn test_species() {
    let fx = built();

    fx.taxo()
        .args(["species", "63221", "9443"])
        .assert()
        .success()
        .stdout("63221\t9606\n9443\tnot found\n");

    fx.taxo()
        .args(["species", "9443", "--or-self"])
        .assert()
        .success()
        .stdout("9443\t9443\n");
}

// ============================================================================
// Subset
// ============================================================================

#[test]
fn test_subset_writes_closure() {
    let fx = built();
    let input = fx.dir.path().join("taxids.txt");
    let output = fx.dir.path().join("subset.tsv");
    std::fs::write(&input, "63221\n\n10090\n").unwrap();

    fx.taxo()
        .arg("subset")
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    let rows: Vec<&str> = written.lines().collect();
    assert!(rows.contains(&"1\t0"));
    assert!(rows.contains(&"63221\t9606"));
    assert!(rows.contains(&"10090\t9989"));
    // Both lineages together cover every node of the fixture
    assert_eq!(rows.len(), 9);
}

#[test]
fn test_subset_missing_input() {
    let fx = built();

    fx.taxo()
        .arg("subset")
        .arg(fx.dir.path().join("nope.txt"))
        .arg(fx.dir.path().join("out.tsv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Resource not found"));
}

// ============================================================================
// Resource handling
// ============================================================================

#[test]
fn test_missing_resources() {
    let fx = Fixture {
        dir: tempfile::tempdir().unwrap(),
    };

    fx.taxo()
        .args(["path", "9606"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("taxo build"));
}

#[test]
fn test_tampered_resources_rejected() {
    let fx = built();
    std::fs::write(fx.resources().join("names.json.gz"), b"tampered").unwrap();

    fx.taxo()
        .args(["name", "9606"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Checksum mismatch"));
}

#[test]
fn test_info() {
    let fx = built();

    let out = stdout_of(fx.taxo().args(["--json", "info"]));
    let info: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(info["manifest"]["node_count"], 9);
    assert_eq!(info["manifest"]["max_taxid"], 63221);
    assert_eq!(info["validation"]["orphans"], serde_json::json!([]));
}

#[test]
fn test_requires_subcommand() {
    Command::cargo_bin("taxo").unwrap().assert().failure().code(2);
}
