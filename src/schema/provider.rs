use serde::{Deserialize, Serialize};

use crate::uri_format::IDENTIFIER_PLACEHOLDER;

/// An additional, non-default provider for a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Locally unique code within the resource
    pub code: String,
    pub name: String,
    pub description: String,
    pub homepage: String,
    /// URI format string with at least one `$1`
    pub uri_format: String,
}

impl Provider {
    /// Resolve the identifier into a URI
    pub fn resolve(&self, identifier: &str) -> String {
        self.uri_format.replace(IDENTIFIER_PLACEHOLDER, identifier)
    }

    pub fn has_placeholder(&self) -> bool {
        self.uri_format.contains(IDENTIFIER_PLACEHOLDER)
    }
}
