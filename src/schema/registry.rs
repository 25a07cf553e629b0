use serde::{Deserialize, Serialize};

use super::Author;
use crate::error::Result;

/// Metadata about an external registry (a metaresource)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// The metaprefix for the registry itself, e.g. `miriam`
    pub prefix: String,
    pub name: String,
    pub description: String,
    pub homepage: String,
    /// An example prefix inside the registry
    pub example: String,
    /// A download link for the registry's contents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download: Option<String>,
    /// A URL with a `$1` for a prefix in the registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_uri_format: Option<String>,
    /// A URL with `$1` for a prefix and `$2` for an identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolver_uri_format: Option<String>,
    /// Kind of resolver (e.g., redirect or lookup)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolver_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// The prefix for this registry inside the bioregistry, if it has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bioregistry_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor: Option<Author>,
}

impl Registry {
    /// Check the contributor email
    pub fn validate(&self) -> Result<()> {
        self.contributor.iter().try_for_each(Author::validate)
    }

    /// Get the URL for a prefix in this registry.
    ///
    /// `miriam` with prefix `go` gives `https://registry.identifiers.org/registry/go`.
    pub fn get_provider_uri_format(&self, prefix: &str) -> Option<String> {
        self.provider_uri_format
            .as_ref()
            .map(|fmt| fmt.replace("$1", prefix))
    }

    /// Resolve a registry-specific prefix and identifier
    pub fn resolve(&self, prefix: &str, identifier: &str) -> Option<String> {
        self.resolver_uri_format
            .as_ref()
            .map(|fmt| fmt.replace("$1", prefix).replace("$2", identifier))
    }
}
