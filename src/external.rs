//! Snapshots of external registries
//!
//! Each resource may carry a raw record copied from any of the external
//! registries that mention it (Identifiers.org/MIRIAM, the OBO Foundry, OLS,
//! Wikidata, ...). Records are opaque JSON objects keyed the way the source
//! registry keys them; [`external_keys`] translates a canonical [`Field`]
//! into the source-specific keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::resolve::Field;

/// An external registry that the bioregistry aligns against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metaprefix {
    /// Identifiers.org's MIRIAM database
    Miriam,
    /// Name-to-Thing
    N2t,
    /// Prefix Commons
    Prefixcommons,
    /// Wikidata properties
    Wikidata,
    /// The Gene Ontology's registry of database cross-references
    Go,
    /// The OBO Foundry catalog
    Obofoundry,
    /// BioPortal
    Bioportal,
    /// The Ontology Lookup Service
    Ols,
    /// NCBI GenBank's cross-reference registry
    Ncbi,
    /// UniProt's cross-reference registry
    Uniprot,
    /// The Biolink Model prefix registry
    Biolink,
    /// Cellosaurus cross-references
    Cellosaurus,
    /// OntoBee
    Ontobee,
}

impl Metaprefix {
    /// Every external registry, in declaration order
    pub const ALL: [Metaprefix; 13] = [
        Metaprefix::Miriam,
        Metaprefix::N2t,
        Metaprefix::Prefixcommons,
        Metaprefix::Wikidata,
        Metaprefix::Go,
        Metaprefix::Obofoundry,
        Metaprefix::Bioportal,
        Metaprefix::Ols,
        Metaprefix::Ncbi,
        Metaprefix::Uniprot,
        Metaprefix::Biolink,
        Metaprefix::Cellosaurus,
        Metaprefix::Ontobee,
    ];

    /// The metaprefix string (e.g., `miriam`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Metaprefix::Miriam => "miriam",
            Metaprefix::N2t => "n2t",
            Metaprefix::Prefixcommons => "prefixcommons",
            Metaprefix::Wikidata => "wikidata",
            Metaprefix::Go => "go",
            Metaprefix::Obofoundry => "obofoundry",
            Metaprefix::Bioportal => "bioportal",
            Metaprefix::Ols => "ols",
            Metaprefix::Ncbi => "ncbi",
            Metaprefix::Uniprot => "uniprot",
            Metaprefix::Biolink => "biolink",
            Metaprefix::Cellosaurus => "cellosaurus",
            Metaprefix::Ontobee => "ontobee",
        }
    }
}

impl fmt::Display for Metaprefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metaprefix {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metaprefix::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown metaprefix: {s}"))
    }
}

/// Source-specific keys for canonical fields, tried in order.
///
/// Pairs not listed here use the canonical field name.
const FIELD_KEYS: &[(Metaprefix, Field, &[&str])] = &[
    (Metaprefix::Miriam, Field::Example, &["sampleId"]),
    (Metaprefix::Miriam, Field::NamespaceInLui, &["namespaceEmbeddedInLui"]),
    (Metaprefix::Obofoundry, Field::DownloadObo, &["download.obo"]),
    (Metaprefix::Obofoundry, Field::DownloadOwl, &["download.owl"]),
    (Metaprefix::Obofoundry, Field::DownloadObograph, &["download.json"]),
    (Metaprefix::Obofoundry, Field::PreferredPrefix, &["preferredPrefix"]),
    (Metaprefix::Ols, Field::DownloadOwl, &["version.iri", "download"]),
];

/// The keys under which `metaprefix` may store `field`
pub fn external_keys(metaprefix: Metaprefix, field: Field) -> &'static [&'static str] {
    FIELD_KEYS
        .iter()
        .find(|(m, f, _)| *m == metaprefix && *f == field)
        .map(|(_, _, keys)| *keys)
        .unwrap_or_else(|| field.default_keys())
}

/// A raw record from an external registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalRecord(Map<String, Value>);

impl ExternalRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a raw value, treating JSON `null` as missing
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Get a string value
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Get a boolean value
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// The record's own identifier for this resource
    pub fn prefix(&self) -> Option<&str> {
        self.get_str("prefix")
    }

    /// Set a value, returning `self` for chaining
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ExternalRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// The external snapshots held by a single resource.
///
/// Serialized inline with the resource, one top-level key per metaprefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalSnapshots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miriam: Option<ExternalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n2t: Option<ExternalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefixcommons: Option<ExternalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikidata: Option<ExternalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go: Option<ExternalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obofoundry: Option<ExternalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bioportal: Option<ExternalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ols: Option<ExternalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ncbi: Option<ExternalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uniprot: Option<ExternalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biolink: Option<ExternalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cellosaurus: Option<ExternalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ontobee: Option<ExternalRecord>,
}

impl ExternalSnapshots {
    fn slot(&self, metaprefix: Metaprefix) -> &Option<ExternalRecord> {
        match metaprefix {
            Metaprefix::Miriam => &self.miriam,
            Metaprefix::N2t => &self.n2t,
            Metaprefix::Prefixcommons => &self.prefixcommons,
            Metaprefix::Wikidata => &self.wikidata,
            Metaprefix::Go => &self.go,
            Metaprefix::Obofoundry => &self.obofoundry,
            Metaprefix::Bioportal => &self.bioportal,
            Metaprefix::Ols => &self.ols,
            Metaprefix::Ncbi => &self.ncbi,
            Metaprefix::Uniprot => &self.uniprot,
            Metaprefix::Biolink => &self.biolink,
            Metaprefix::Cellosaurus => &self.cellosaurus,
            Metaprefix::Ontobee => &self.ontobee,
        }
    }

    fn slot_mut(&mut self, metaprefix: Metaprefix) -> &mut Option<ExternalRecord> {
        match metaprefix {
            Metaprefix::Miriam => &mut self.miriam,
            Metaprefix::N2t => &mut self.n2t,
            Metaprefix::Prefixcommons => &mut self.prefixcommons,
            Metaprefix::Wikidata => &mut self.wikidata,
            Metaprefix::Go => &mut self.go,
            Metaprefix::Obofoundry => &mut self.obofoundry,
            Metaprefix::Bioportal => &mut self.bioportal,
            Metaprefix::Ols => &mut self.ols,
            Metaprefix::Ncbi => &mut self.ncbi,
            Metaprefix::Uniprot => &mut self.uniprot,
            Metaprefix::Biolink => &mut self.biolink,
            Metaprefix::Cellosaurus => &mut self.cellosaurus,
            Metaprefix::Ontobee => &mut self.ontobee,
        }
    }

    /// Get the snapshot for a registry, if one was aligned
    pub fn get(&self, metaprefix: Metaprefix) -> Option<&ExternalRecord> {
        self.slot(metaprefix).as_ref()
    }

    /// Replace the snapshot for a registry
    pub fn set(&mut self, metaprefix: Metaprefix, record: Option<ExternalRecord>) {
        *self.slot_mut(metaprefix) = record;
    }

    /// Iterate over present snapshots in [`Metaprefix::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Metaprefix, &ExternalRecord)> + '_ {
        Metaprefix::ALL
            .into_iter()
            .filter_map(move |m| self.get(m).map(|record| (m, record)))
    }
}
