//! Taxdump sources: an extracted directory, a `.tar.gz`, or a `.zip` archive

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::debug;
use zip::ZipArchive;

const NODES_FILE: &str = "nodes.dmp";
const NAMES_FILE: &str = "names.dmp";
const MERGED_FILE: &str = "merged.dmp";
const DELNODES_FILE: &str = "delnodes.dmp";

/// Raw contents of the taxdump files needed to build the tables
#[derive(Debug, Clone, Default)]
pub struct TaxdumpFiles {
    pub nodes: String,
    pub names: String,
    pub merged: Option<String>,
    pub delnodes: Option<String>,
}

impl TaxdumpFiles {
    /// Store `content` if `filename` is one of the files we need
    fn accept(&mut self, filename: &str, content: String) -> bool {
        match filename {
            NODES_FILE => self.nodes = content,
            NAMES_FILE => self.names = content,
            MERGED_FILE => self.merged = Some(content),
            DELNODES_FILE => self.delnodes = Some(content),
            _ => return false,
        }
        true
    }

    fn is_complete(&self) -> bool {
        !self.nodes.is_empty()
            && !self.names.is_empty()
            && self.merged.is_some()
            && self.delnodes.is_some()
    }

    fn ensure_required(self, origin: &Path) -> Result<Self> {
        anyhow::ensure!(!self.nodes.is_empty(), "{} not found in {}", NODES_FILE, origin.display());
        anyhow::ensure!(!self.names.is_empty(), "{} not found in {}", NAMES_FILE, origin.display());
        Ok(self)
    }
}

fn wanted(filename: &str) -> bool {
    matches!(filename, NODES_FILE | NAMES_FILE | MERGED_FILE | DELNODES_FILE)
}

/// Location of an NCBI taxdump
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxdumpSource {
    /// Directory holding the extracted .dmp files
    Directory(PathBuf),
    /// `taxdump.tar.gz` / `new_taxdump.tar.gz`
    TarGz(PathBuf),
    /// Archived `new_taxdump_YYYY-MM-DD.zip`
    Zip(PathBuf),
}

impl TaxdumpSource {
    /// Pick the source kind from the path
    pub fn detect(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.is_dir() {
            return Ok(Self::Directory(path));
        }
        anyhow::ensure!(path.is_file(), "Taxdump not found: {}", path.display());

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_lowercase();
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Ok(Self::TarGz(path))
        } else if name.ends_with(".zip") {
            Ok(Self::Zip(path))
        } else {
            Err(anyhow::anyhow!(
                "Unsupported taxdump format: {} (expected a directory, .tar.gz or .zip)",
                path.display()
            ))
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(p) | Self::TarGz(p) | Self::Zip(p) => p,
        }
    }

    /// Read the taxdump files from the source
    pub fn read_files(&self) -> Result<TaxdumpFiles> {
        let files = match self {
            Self::Directory(dir) => read_directory(dir)?,
            Self::TarGz(path) => read_tar_gz(path)?,
            Self::Zip(path) => read_zip(path)?,
        };
        files.ensure_required(self.path())
    }
}

impl std::fmt::Display for TaxdumpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

fn read_directory(dir: &Path) -> Result<TaxdumpFiles> {
    let mut files = TaxdumpFiles::default();
    for filename in [NODES_FILE, NAMES_FILE, MERGED_FILE, DELNODES_FILE] {
        let path = dir.join(filename);
        if !path.is_file() {
            debug!("Skipping missing {}", path.display());
            continue;
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        debug!("Read {} ({} bytes)", filename, content.len());
        files.accept(filename, content);
    }
    Ok(files)
}

fn read_tar_gz(path: &Path) -> Result<TaxdumpFiles> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut archive = Archive::new(GzDecoder::new(BufReader::new(file)));
    let mut files = TaxdumpFiles::default();

    for entry in archive.entries().context("Failed to read tar archive")? {
        let mut entry = entry.context("Failed to read tar entry")?;
        let entry_path = entry.path().context("Failed to get entry path")?;
        let filename = match entry_path.file_name().and_then(|n| n.to_str()) {
            Some(name) if wanted(name) => name.to_string(),
            other => {
                debug!("Skipping file: {:?}", other);
                continue;
            }
        };

        let mut content = String::new();
        entry
            .read_to_string(&mut content)
            .with_context(|| format!("Failed to read {}", filename))?;
        debug!("Extracted {} ({} bytes)", filename, content.len());
        files.accept(&filename, content);

        if files.is_complete() {
            break;
        }
    }

    Ok(files)
}

fn read_zip(path: &Path) -> Result<TaxdumpFiles> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut archive = ZipArchive::new(BufReader::new(file)).context("Failed to open zip archive")?;
    let mut files = TaxdumpFiles::default();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).context("Failed to read zip entry")?;
        let filename = match Path::new(entry.name()).file_name().and_then(|n| n.to_str()) {
            Some(name) if wanted(name) => name.to_string(),
            _ => continue,
        };

        let mut content = String::new();
        entry
            .read_to_string(&mut content)
            .with_context(|| format!("Failed to read {}", filename))?;
        debug!("Extracted {} ({} bytes)", filename, content.len());
        files.accept(&filename, content);
    }

    Ok(files)
}
