use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::Author;
use crate::error::{RegistryError, Result};

static COLLECTION_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{7}$").expect("collection identifier pattern compiles"));

/// A curated collection of resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Seven-digit identifier, e.g. `0000001`
    pub identifier: String,
    pub name: String,
    pub description: String,
    /// Prefixes of the resources in the collection
    pub resources: Vec<String>,
    pub authors: Vec<Author>,
    /// Name of the JSON-LD context generated for this collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Collection {
    /// Check the identifier shape and every author
    pub fn validate(&self) -> Result<()> {
        if !COLLECTION_ID_RE.is_match(&self.identifier) {
            return Err(RegistryError::InvalidCollectionId(self.identifier.clone()));
        }
        self.authors.iter().try_for_each(Author::validate)
    }

    /// Sort and de-duplicate the resource list, as done before writing
    pub fn normalize_resources(&mut self) {
        self.resources.sort();
        self.resources.dedup();
    }
}
