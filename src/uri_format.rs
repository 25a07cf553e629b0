//! URI format strategies
//!
//! A URI format is a URL template with the placeholder `$1` standing in for
//! a local identifier. A resource can produce formats several ways: its own
//! first-party format, or one built from its prefix in the OBO Foundry,
//! Prefix Commons, Identifiers.org, Name-to-Thing, or OLS. Callers choose a
//! priority over these strategies and the first one that produces a value
//! wins.

use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{RegistryError, Result};
use crate::external::Metaprefix;
use crate::resolve::{self, resolve_text_where, Field};
use crate::schema::Resource;

/// Stands in for the local identifier in URI formats
pub const IDENTIFIER_PLACEHOLDER: &str = "$1";

const OBO_BASE: &str = "http://purl.obolibrary.org/obo/";
const MIRIAM_BASE: &str = "https://identifiers.org/";
const N2T_BASE: &str = "https://n2t.net/";
const OLS_BASE: &str = "https://www.ebi.ac.uk/ols/ontologies/";

/// Whether an external URI format may stand as a resource's own format.
///
/// Formats that go through a generic resolver are rejected.
pub fn allowed_uri_format(uri_format: &str) -> bool {
    !(uri_format.starts_with("https://identifiers.org")
        || uri_format.starts_with("http://identifiers.org")
        || uri_format.contains("n2t.net")
        || uri_format.contains("purl.bioontology.org"))
}

/// Strip the trailing placeholder from a URI format.
///
/// Returns `None` unless the format contains exactly one placeholder and
/// it is at the end.
pub fn uri_prefix_from_format(uri_format: &str) -> Option<&str> {
    match uri_format.matches(IDENTIFIER_PLACEHOLDER).count() {
        0 => {
            warn!(%uri_format, "URI format has no identifier placeholder");
            None
        }
        1 => match uri_format.strip_suffix(IDENTIFIER_PLACEHOLDER) {
            Some(prefix) => Some(prefix),
            None => {
                debug!(%uri_format, "identifier placeholder is not at the end of the URI format");
                None
            }
        },
        _ => {
            warn!(%uri_format, "URI format has multiple identifier placeholders");
            None
        }
    }
}

/// A strategy for producing a URI format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UriFormatter {
    /// The resource's first-party format
    Default,
    Obofoundry,
    Prefixcommons,
    Miriam,
    N2t,
    Ols,
}

impl UriFormatter {
    /// Priority used when the caller gives none
    pub const DEFAULT_PRIORITY: [UriFormatter; 6] = [
        UriFormatter::Default,
        UriFormatter::Obofoundry,
        UriFormatter::Prefixcommons,
        UriFormatter::Miriam,
        UriFormatter::N2t,
        UriFormatter::Ols,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UriFormatter::Default => "default",
            UriFormatter::Obofoundry => "obofoundry",
            UriFormatter::Prefixcommons => "prefixcommons",
            UriFormatter::Miriam => "miriam",
            UriFormatter::N2t => "n2t",
            UriFormatter::Ols => "ols",
        }
    }

    /// Produce the URI format for a resource with this strategy
    pub fn format(&self, resource: &Resource) -> Option<String> {
        match self {
            UriFormatter::Default => resource.get_default_format().map(str::to_string),
            UriFormatter::Obofoundry => resource.get_obofoundry_uri_format(),
            UriFormatter::Prefixcommons => {
                resource.get_prefixcommons_uri_format().map(str::to_string)
            }
            UriFormatter::Miriam => resource.get_miriam_uri_format(),
            UriFormatter::N2t => resource.get_n2t_uri_format(),
            UriFormatter::Ols => resource.get_ols_uri_format(),
        }
    }

    /// Parse a priority list of formatter names.
    ///
    /// `bioregistry` is accepted as another name for `default`. Unknown names
    /// are logged and skipped, or rejected when `strict` is set.
    pub fn parse_priority<I, S>(names: I, strict: bool) -> Result<Vec<UriFormatter>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rv = Vec::new();
        for name in names {
            let name = name.as_ref();
            match name.parse::<UriFormatter>() {
                Ok(formatter) => rv.push(formatter),
                Err(e) if strict => return Err(e),
                Err(_) => warn!(formatter = %name, "skipping unknown URI formatter"),
            }
        }
        Ok(rv)
    }
}

impl fmt::Display for UriFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UriFormatter {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "bioregistry" {
            return Ok(UriFormatter::Default);
        }
        UriFormatter::DEFAULT_PRIORITY
            .into_iter()
            .find(|formatter| formatter.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownFormatter(s.to_string()))
    }
}

impl Resource {
    /// Get the first-party URI format.
    ///
    /// The curated format wins. Otherwise the first external format that
    /// does not point at a generic resolver is used.
    pub fn get_default_format(&self) -> Option<&str> {
        resolve_text_where(
            self,
            Field::UriFormat,
            resolve::DEFAULT_FORMAT_PRIORITY,
            allowed_uri_format,
        )
    }

    /// Expand the first-party URI format for an identifier
    pub fn get_default_uri(&self, identifier: &str) -> Option<String> {
        self.get_default_format()
            .map(|fmt| fmt.replace(IDENTIFIER_PLACEHOLDER, identifier))
    }

    pub fn get_obofoundry_prefix(&self) -> Option<String> {
        self.get_mapped_prefix(Metaprefix::Obofoundry.as_str())
    }

    /// e.g. `http://purl.obolibrary.org/obo/GO_`
    pub fn get_obofoundry_uri_prefix(&self) -> Option<String> {
        self.get_obofoundry_prefix()
            .map(|obo_prefix| format!("{OBO_BASE}{obo_prefix}_"))
    }

    pub fn get_obofoundry_uri_format(&self) -> Option<String> {
        self.get_obofoundry_uri_prefix()
            .map(|uri_prefix| format!("{uri_prefix}{IDENTIFIER_PLACEHOLDER}"))
    }

    /// The format listed by Prefix Commons, taken as-is
    pub fn get_prefixcommons_uri_format(&self) -> Option<&str> {
        self.get_external(Metaprefix::Prefixcommons)?
            .get_str(Field::UriFormat.key())
    }

    pub fn get_identifiers_org_prefix(&self) -> Option<String> {
        self.get_mapped_prefix(Metaprefix::Miriam.as_str())
    }

    /// The Identifiers.org URI prefix.
    ///
    /// Resources whose namespace is embedded in local identifiers are
    /// written with the upper-cased prefix, e.g. `https://identifiers.org/GO:`.
    pub fn get_miriam_uri_prefix(&self) -> Option<String> {
        let miriam_prefix = self.get_identifiers_org_prefix()?;
        if self.get_namespace_in_lui() == Some(true) {
            Some(format!("{MIRIAM_BASE}{}:", miriam_prefix.to_uppercase()))
        } else {
            Some(format!("{MIRIAM_BASE}{miriam_prefix}:"))
        }
    }

    pub fn get_miriam_uri_format(&self) -> Option<String> {
        self.get_miriam_uri_prefix()
            .map(|uri_prefix| format!("{uri_prefix}{IDENTIFIER_PLACEHOLDER}"))
    }

    pub fn get_n2t_uri_prefix(&self) -> Option<String> {
        self.get_mapped_prefix(Metaprefix::N2t.as_str())
            .map(|n2t_prefix| format!("{N2T_BASE}{n2t_prefix}:"))
    }

    pub fn get_n2t_uri_format(&self) -> Option<String> {
        self.get_n2t_uri_prefix()
            .map(|uri_prefix| format!("{uri_prefix}{IDENTIFIER_PLACEHOLDER}"))
    }

    pub fn get_ols_prefix(&self) -> Option<String> {
        self.get_mapped_prefix(Metaprefix::Ols.as_str())
    }

    /// OLS term lookup by IRI; only available for OBO ontologies
    pub fn get_ols_uri_prefix(&self) -> Option<String> {
        let ols_prefix = self.get_ols_prefix()?;
        let obo_uri_prefix = self.get_obofoundry_uri_prefix()?;
        Some(format!("{OLS_BASE}{ols_prefix}/terms?iri={obo_uri_prefix}"))
    }

    pub fn get_ols_uri_format(&self) -> Option<String> {
        self.get_ols_uri_prefix()
            .map(|uri_prefix| format!("{uri_prefix}{IDENTIFIER_PLACEHOLDER}"))
    }

    /// Get the URI format from the first strategy that produces one
    pub fn get_uri_format(&self, priority: Option<&[UriFormatter]>) -> Option<String> {
        priority
            .unwrap_or(&UriFormatter::DEFAULT_PRIORITY)
            .iter()
            .find_map(|formatter| formatter.format(self))
    }

    /// Get the URI prefix, i.e. the URI format without its trailing `$1`
    pub fn get_uri_prefix(&self, priority: Option<&[UriFormatter]>) -> Option<String> {
        let Some(uri_format) = self.get_uri_format(priority) else {
            debug!(prefix = %self.prefix(), "no URI format available");
            return None;
        };
        uri_prefix_from_format(&uri_format).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::ExternalRecord;

    fn go() -> Resource {
        let mut resource = Resource::new("go");
        resource.set_external(
            Metaprefix::Miriam,
            Some(
                ExternalRecord::new()
                    .with("prefix", "go")
                    .with("namespaceEmbeddedInLui", true)
                    .with("uri_format", "http://amigo.geneontology.org/amigo/term/GO:$1"),
            ),
        );
        resource.set_external(
            Metaprefix::N2t,
            Some(
                ExternalRecord::new()
                    .with("prefix", "go")
                    .with("uri_format", "https://n2t.net/go:$1"),
            ),
        );
        resource.set_external(
            Metaprefix::Obofoundry,
            Some(ExternalRecord::new().with("prefix", "go").with("preferredPrefix", "GO")),
        );
        resource.set_external(Metaprefix::Ols, Some(ExternalRecord::new().with("prefix", "go")));
        resource
    }

    #[test]
    fn test_strategies() {
        let go = go();
        assert_eq!(
            go.get_default_format(),
            Some("http://amigo.geneontology.org/amigo/term/GO:$1")
        );
        assert_eq!(
            go.get_obofoundry_uri_format().as_deref(),
            Some("http://purl.obolibrary.org/obo/GO_$1")
        );
        assert_eq!(
            go.get_miriam_uri_format().as_deref(),
            Some("https://identifiers.org/GO:$1")
        );
        assert_eq!(go.get_n2t_uri_format().as_deref(), Some("https://n2t.net/go:$1"));
        assert_eq!(
            go.get_ols_uri_format().as_deref(),
            Some("https://www.ebi.ac.uk/ols/ontologies/go/terms?iri=http://purl.obolibrary.org/obo/GO_$1")
        );
        assert_eq!(go.get_prefixcommons_uri_format(), None);
    }

    #[test]
    fn test_resolver_formats_rejected() {
        let mut resource = Resource::new("test");
        resource.set_external(
            Metaprefix::Miriam,
            Some(ExternalRecord::new().with("uri_format", "https://identifiers.org/test:$1")),
        );
        resource.set_external(
            Metaprefix::Wikidata,
            Some(ExternalRecord::new().with("uri_format", "https://example.org/test/$1")),
        );
        assert_eq!(resource.get_default_format(), Some("https://example.org/test/$1"));
    }

    #[test]
    fn test_priority() {
        let go = go();
        assert_eq!(
            go.get_uri_format(Some(&[UriFormatter::Obofoundry, UriFormatter::Default][..])).as_deref(),
            Some("http://purl.obolibrary.org/obo/GO_$1")
        );
        assert_eq!(
            go.get_uri_prefix(None).as_deref(),
            Some("http://amigo.geneontology.org/amigo/term/GO:")
        );
        assert_eq!(go.get_uri_format(Some(&[UriFormatter::Prefixcommons][..])), None);
    }

    #[test]
    fn test_uri_prefix_requires_single_trailing_placeholder() {
        assert_eq!(uri_prefix_from_format("https://example.org/$1"), Some("https://example.org/"));
        assert_eq!(uri_prefix_from_format("https://example.org/$1/$1"), None);
        assert_eq!(uri_prefix_from_format("https://example.org/$1.html"), None);
        assert_eq!(uri_prefix_from_format("https://example.org/"), None);
    }

    #[test]
    fn test_parse_priority() {
        let rv = UriFormatter::parse_priority(["bioregistry", "nope", "ols"], false).unwrap();
        assert_eq!(rv, vec![UriFormatter::Default, UriFormatter::Ols]);
        assert!(matches!(
            UriFormatter::parse_priority(["nope"], true),
            Err(RegistryError::UnknownFormatter(name)) if name == "nope"
        ));
    }
}
