//! Identifier normalization
//!
//! Some local identifiers are written with a redundant namespace stuck to
//! the front, e.g. `GO:0001234` under the `go` prefix. That embedded
//! namespace is called the banana. Normalization strips it before
//! validation, and the legacy Identifiers.org form adds it back.

use std::borrow::Cow;

use crate::error::Result;
use crate::schema::Resource;

impl Resource {
    /// Get the redundant prefix that may go before a local identifier.
    ///
    /// A curated banana wins. Resources explicitly marked as not embedding
    /// their namespace have none. Otherwise OBO Foundry ontologies use their
    /// preferred prefix, e.g. `FBbt` for `fbbt`.
    pub fn get_banana(&self) -> Option<Cow<'_, str>> {
        if let Some(banana) = self.banana.as_deref() {
            return Some(Cow::Borrowed(banana));
        }
        if self.namespace_in_lui == Some(false) {
            return None;
        }
        self.get_obo_preferred_prefix().map(Cow::Owned)
    }

    fn banana_colon(&self) -> Option<String> {
        self.get_banana()
            .filter(|banana| !banana.is_empty())
            .map(|banana| format!("{banana}:"))
    }

    /// Strip a banana or a redundant prefix from a local identifier.
    ///
    /// At most one strip happens: the banana if present, else `prefix`
    /// compared case-insensitively.
    pub fn standardize_identifier<'a>(&self, identifier: &'a str, prefix: Option<&str>) -> &'a str {
        if let Some(banana) = self.banana_colon() {
            if let Some(rest) = identifier.strip_prefix(banana.as_str()) {
                return rest;
            }
        }
        if let Some(prefix) = prefix {
            let n = prefix.len();
            let redundant = identifier.len() > n
                && identifier.as_bytes()[n] == b':'
                && identifier
                    .get(..n)
                    .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
            if redundant {
                return &identifier[n + 1..];
            }
        }
        identifier
    }

    /// Add the banana for the legacy Identifiers.org form, if missing
    pub fn miriam_standardize_identifier<'a>(&self, identifier: &'a str) -> Cow<'a, str> {
        match self.banana_colon() {
            Some(banana) if !identifier.starts_with(&banana) => {
                Cow::Owned(format!("{banana}{identifier}"))
            }
            _ => Cow::Borrowed(identifier),
        }
    }

    /// Check a local identifier against the pattern.
    ///
    /// `None` means no pattern is available, not that the identifier is bad.
    pub fn is_canonical_identifier(&self, identifier: &str) -> Result<Option<bool>> {
        Ok(self
            .get_full_match_re()?
            .map(|pattern| pattern.is_match(identifier)))
    }

    /// Strip the banana, then check against the pattern.
    ///
    /// Only the banana is stripped, so patterns that embed the namespace
    /// (e.g. `^MGI:\d+$`) still see it.
    pub fn is_known_identifier(&self, identifier: &str) -> Result<Option<bool>> {
        let identifier = self.standardize_identifier(identifier, None);
        self.is_canonical_identifier(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{ExternalRecord, Metaprefix};

    fn obo(prefix: &str, preferred: Option<&str>) -> Resource {
        let mut record = ExternalRecord::new().with("prefix", prefix);
        if let Some(preferred) = preferred {
            record.insert("preferredPrefix", preferred);
        }
        let mut resource = Resource::new(prefix);
        resource.set_external(Metaprefix::Obofoundry, Some(record));
        resource
    }

    #[test]
    fn test_banana_sources() {
        let mut vario = Resource::new("vario");
        vario.banana = Some("VariO".to_string());
        assert_eq!(vario.get_banana().as_deref(), Some("VariO"));

        assert_eq!(obo("fbbt", Some("FBbt")).get_banana().as_deref(), Some("FBbt"));
        assert_eq!(obo("chebi", None).get_banana().as_deref(), Some("CHEBI"));
        assert_eq!(Resource::new("pdb").get_banana(), None);

        let mut ncit = obo("ncit", None);
        ncit.namespace_in_lui = Some(false);
        assert_eq!(ncit.get_banana(), None);
    }

    #[test]
    fn test_standardize_strips_once() {
        let fbbt = obo("fbbt", Some("FBbt"));
        assert_eq!(fbbt.standardize_identifier("FBbt:00007294", None), "00007294");
        assert_eq!(fbbt.standardize_identifier("00007294", None), "00007294");
        assert_eq!(fbbt.standardize_identifier("FBbt:FBbt:1", None), "FBbt:1");

        let pdb = Resource::new("pdb");
        assert_eq!(pdb.standardize_identifier("00000020", None), "00000020");
        assert_eq!(pdb.standardize_identifier("PDB:1abc", Some("pdb")), "1abc");
        assert_eq!(pdb.standardize_identifier("PDB:1abc", None), "PDB:1abc");
    }

    #[test]
    fn test_miriam_round_trip() {
        let mut vario = Resource::new("vario");
        vario.banana = Some("VariO".to_string());
        let legacy = vario.miriam_standardize_identifier("0376");
        assert_eq!(legacy, "VariO:0376");
        assert_eq!(vario.miriam_standardize_identifier("VariO:0376"), "VariO:0376");
        assert_eq!(vario.standardize_identifier(&legacy, None), "0376");

        let mut ncbitaxon = obo("ncbitaxon", Some("NCBITaxon"));
        ncbitaxon.namespace_in_lui = Some(false);
        assert_eq!(ncbitaxon.miriam_standardize_identifier("9606"), "9606");
    }

    #[test]
    fn test_canonical_requires_pattern() {
        let mut resource = Resource::new("test");
        assert_eq!(resource.is_canonical_identifier("1234").unwrap(), None);

        resource.pattern = Some(r"^\d{7}$".to_string());
        assert_eq!(resource.is_canonical_identifier("0001234").unwrap(), Some(true));
        assert_eq!(resource.is_canonical_identifier("GO:0001234").unwrap(), Some(false));
        assert_eq!(resource.is_known_identifier("TEST:0001234").unwrap(), Some(false));

        resource.banana = Some("GO".to_string());
        assert_eq!(resource.is_known_identifier("GO:0001234").unwrap(), Some(true));
    }

    #[test]
    fn test_known_keeps_embedded_namespace() {
        let mut mgi = Resource::new("mgi");
        mgi.set_external(
            Metaprefix::Miriam,
            Some(
                ExternalRecord::new()
                    .with("prefix", "mgi")
                    .with("pattern", r"^MGI:\d+$")
                    .with("namespaceEmbeddedInLui", true),
            ),
        );
        assert_eq!(mgi.get_banana(), None);
        assert_eq!(mgi.is_canonical_identifier("MGI:2442292").unwrap(), Some(true));
        assert_eq!(mgi.is_known_identifier("MGI:2442292").unwrap(), Some(true));
        assert_eq!(mgi.is_known_identifier("2442292").unwrap(), Some(false));
    }
}
