//! Shared domain types

use serde::{Deserialize, Serialize};

/// NCBI Taxonomy identifier (e.g., 9606 for Homo sapiens)
pub type TaxId = u32;

/// Identifier of the single root of the tree
pub const ROOT_TAXID: TaxId = 1;

/// Classification of a name attached to a taxon (the `name class` column of names.dmp)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameClass {
    ScientificName,
    CommonName,
    GenbankCommonName,
    Synonym,
    EquivalentName,
    Authority,
    Includes,
    Other(String),
}

impl NameClass {
    /// Label as it appears in names.dmp
    pub fn as_str(&self) -> &str {
        match self {
            NameClass::ScientificName => "scientific name",
            NameClass::CommonName => "common name",
            NameClass::GenbankCommonName => "genbank common name",
            NameClass::Synonym => "synonym",
            NameClass::EquivalentName => "equivalent name",
            NameClass::Authority => "authority",
            NameClass::Includes => "includes",
            NameClass::Other(label) => label,
        }
    }
}

impl From<&str> for NameClass {
    fn from(label: &str) -> Self {
        match label.trim() {
            "scientific name" => NameClass::ScientificName,
            "common name" => NameClass::CommonName,
            "genbank common name" => NameClass::GenbankCommonName,
            "synonym" => NameClass::Synonym,
            "equivalent name" => NameClass::EquivalentName,
            "authority" => NameClass::Authority,
            "includes" => NameClass::Includes,
            other => NameClass::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for NameClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name with its class, one entry of the extended name map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonName {
    pub name: String,
    pub class: NameClass,
}

impl TaxonName {
    pub fn new(name: impl Into<String>, class: NameClass) -> Self {
        Self {
            name: name.into(),
            class,
        }
    }
}
