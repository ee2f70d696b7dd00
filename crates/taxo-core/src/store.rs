//! On-disk resource directory for taxonomy tables
//!
//! Each table is written as its own gzip-compressed JSON artifact next to a
//! `manifest.json` that records the SHA-256 of every artifact:
//!
//! ```text
//! resources/
//! ├── manifest.json
//! ├── merged.json.gz
//! ├── nodes_rel.json.gz
//! ├── children_nodes.json.gz
//! ├── nodes_rank.json.gz
//! ├── names.json.gz
//! ├── all_names.json.gz
//! ├── max_taxid.json.gz
//! └── canonical_taxa.json.gz
//! ```

use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use taxo_common::checksum::{compute_file_checksum, verify_file_checksum};
use taxo_common::{Result, TaxId, TaxoError};
use tracing::{debug, info};

use crate::tables::TaxonomyTables;

/// Version of the artifact layout written by this crate
pub const FORMAT_VERSION: u32 = 1;

pub const MANIFEST_FILE: &str = "manifest.json";

/// One persisted table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Merged,
    NodesRel,
    ChildrenNodes,
    NodesRank,
    Names,
    AllNames,
    MaxTaxid,
    CanonicalTaxa,
}

impl Artifact {
    pub const ALL: [Artifact; 8] = [
        Artifact::Merged,
        Artifact::NodesRel,
        Artifact::ChildrenNodes,
        Artifact::NodesRank,
        Artifact::Names,
        Artifact::AllNames,
        Artifact::MaxTaxid,
        Artifact::CanonicalTaxa,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Merged => "merged.json.gz",
            Artifact::NodesRel => "nodes_rel.json.gz",
            Artifact::ChildrenNodes => "children_nodes.json.gz",
            Artifact::NodesRank => "nodes_rank.json.gz",
            Artifact::Names => "names.json.gz",
            Artifact::AllNames => "all_names.json.gz",
            Artifact::MaxTaxid => "max_taxid.json.gz",
            Artifact::CanonicalTaxa => "canonical_taxa.json.gz",
        }
    }
}

/// Build metadata and artifact checksums
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub format_version: u32,
    pub created_at: DateTime<Utc>,
    /// Where the tables came from (taxdump path or archive name)
    pub source: String,
    pub node_count: usize,
    pub max_taxid: TaxId,
    /// Artifact file name -> SHA-256
    pub checksums: BTreeMap<String, String>,
}

/// Reads and writes a resource directory
#[derive(Debug, Clone)]
pub struct TableStore {
    dir: PathBuf,
    verify_checksums: bool,
}

impl TableStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            verify_checksums: true,
        }
    }

    /// Enable or disable checksum verification on load
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }

    pub fn artifact_path(&self, artifact: Artifact) -> PathBuf {
        self.dir.join(artifact.file_name())
    }

    /// Whether a manifest exists in the directory
    pub fn exists(&self) -> bool {
        self.manifest_path().is_file()
    }

    /// Write every table and the manifest
    pub fn save(&self, tables: &TaxonomyTables, source: &str) -> Result<Manifest> {
        std::fs::create_dir_all(&self.dir)?;

        let mut checksums = BTreeMap::new();
        for artifact in Artifact::ALL {
            let path = self.artifact_path(artifact);
            match artifact {
                Artifact::Merged => write_json_gz(&path, &tables.merged)?,
                Artifact::NodesRel => write_json_gz(&path, &tables.nodes_rel)?,
                Artifact::ChildrenNodes => write_json_gz(&path, &tables.children_nodes)?,
                Artifact::NodesRank => write_json_gz(&path, &tables.nodes_rank)?,
                Artifact::Names => write_json_gz(&path, &tables.names)?,
                Artifact::AllNames => write_json_gz(&path, &tables.all_names)?,
                Artifact::MaxTaxid => write_json_gz(&path, &tables.max_taxid)?,
                Artifact::CanonicalTaxa => write_json_gz(&path, &tables.canonical_taxa)?,
            }
            let checksum = compute_file_checksum(&path)?;
            debug!(artifact = artifact.file_name(), %checksum, "Wrote artifact");
            checksums.insert(artifact.file_name().to_string(), checksum);
        }

        let manifest = Manifest {
            format_version: FORMAT_VERSION,
            created_at: Utc::now(),
            source: source.to_string(),
            node_count: tables.node_count(),
            max_taxid: tables.max_taxid,
            checksums,
        };

        let mut writer = BufWriter::new(File::create(self.manifest_path())?);
        serde_json::to_writer_pretty(&mut writer, &manifest)?;
        writer.flush()?;

        info!(
            dir = %self.dir.display(),
            nodes = manifest.node_count,
            max_taxid = manifest.max_taxid,
            "Saved taxonomy tables"
        );
        Ok(manifest)
    }

    pub fn read_manifest(&self) -> Result<Manifest> {
        let path = self.manifest_path();
        if !path.is_file() {
            return Err(TaxoError::ResourceNotFound(path));
        }
        let manifest: Manifest = serde_json::from_reader(BufReader::new(File::open(&path)?))?;
        if manifest.format_version != FORMAT_VERSION {
            return Err(TaxoError::config(format!(
                "unsupported resource format version {} in {} (expected {})",
                manifest.format_version,
                path.display(),
                FORMAT_VERSION
            )));
        }
        Ok(manifest)
    }

    /// Load every table, verifying checksums unless disabled
    pub fn load(&self) -> Result<TaxonomyTables> {
        let manifest = self.read_manifest()?;

        let tables = TaxonomyTables {
            merged: self.read_artifact(Artifact::Merged, &manifest)?,
            nodes_rel: self.read_artifact(Artifact::NodesRel, &manifest)?,
            children_nodes: self.read_artifact(Artifact::ChildrenNodes, &manifest)?,
            nodes_rank: self.read_artifact(Artifact::NodesRank, &manifest)?,
            names: self.read_artifact(Artifact::Names, &manifest)?,
            all_names: self.read_artifact(Artifact::AllNames, &manifest)?,
            max_taxid: self.read_artifact(Artifact::MaxTaxid, &manifest)?,
            canonical_taxa: self.read_artifact(Artifact::CanonicalTaxa, &manifest)?,
        };

        info!(
            dir = %self.dir.display(),
            nodes = manifest.node_count,
            built = %manifest.created_at,
            "Loaded taxonomy tables"
        );
        Ok(tables)
    }

    fn read_artifact<T: DeserializeOwned>(
        &self,
        artifact: Artifact,
        manifest: &Manifest,
    ) -> Result<T> {
        let path = self.artifact_path(artifact);
        if !path.is_file() {
            return Err(TaxoError::ResourceNotFound(path));
        }

        if self.verify_checksums {
            let expected = manifest.checksums.get(artifact.file_name()).ok_or_else(|| {
                TaxoError::config(format!("manifest has no checksum for {}", artifact.file_name()))
            })?;
            verify_file_checksum(&path, expected)?;
        }

        debug!(artifact = artifact.file_name(), "Reading artifact");
        let decoder = GzDecoder::new(BufReader::new(File::open(&path)?));
        Ok(serde_json::from_reader(BufReader::new(decoder))?)
    }
}

fn write_json_gz<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    let mut encoder = GzEncoder::new(file, Compression::default());
    serde_json::to_writer(&mut encoder, value)?;
    encoder.finish()?.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use taxo_common::{NameClass, TaxonName};

    fn sample() -> TaxonomyTables {
        TaxonomyTables::from_parents([(1, 1), (2, 1), (3, 2)])
            .with_ranks([(2, "genus"), (3, "species")])
            .with_names([(2, "Homo"), (3, "Homo sapiens")])
            .with_all_names([(3, TaxonName::new("human", NameClass::CommonName))])
            .with_merged([(33, 3)])
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = TableStore::new(dir.path());
        let tables = sample();

        let manifest = store.save(&tables, "unit-test").unwrap();
        assert_eq!(manifest.checksums.len(), Artifact::ALL.len());
        assert_eq!(manifest.max_taxid, 33);
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, tables);
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = TableStore::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, TaxoError::ResourceNotFound(_)));
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = TableStore::new(dir.path());
        store.save(&sample(), "unit-test").unwrap();
        std::fs::remove_file(store.artifact_path(Artifact::Names)).unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, TaxoError::ResourceNotFound(p) if p.ends_with("names.json.gz")));
    }

    #[test]
    fn test_tampered_artifact_fails_verification() {
        let dir = tempfile::tempdir().unwrap();
        let store = TableStore::new(dir.path());
        store.save(&sample(), "unit-test").unwrap();

        let other = TaxonomyTables::from_parents([(2, 1)]);
        write_json_gz(&store.artifact_path(Artifact::NodesRel), &other.nodes_rel).unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, TaxoError::ChecksumMismatch { .. }));

        let loaded = store.clone().with_verification(false).load().unwrap();
        assert_eq!(loaded.nodes_rel, other.nodes_rel);
    }
}
