use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use super::{deduplicate_publications, is_valid_email, Author, Provider, Publication};
use crate::error::Result;
use crate::external::{external_keys, ExternalRecord, ExternalSnapshots, Metaprefix};
use crate::license::standardize_license;
use crate::resolve::{self, resolve_flag, resolve_text, Field};

/// Metadata about an ontology, database, or other resource.
///
/// Locally curated fields are public and edited by curation tooling. The
/// snapshots of external registries are only replaced wholesale through
/// [`Resource::set_external`] by alignment jobs. Derived `get_*` methods
/// combine both through the fallback chains in [`crate::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    /// The normalized prefix; fixed once the resource is created
    #[serde(skip_serializing_if = "String::is_empty")]
    prefix: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Regular expression for local identifiers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// URI format string with at least one `$1`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_format: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<Provider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Contact email for the person responsible for the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Example local identifier, without any banana
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Super-prefix, e.g. `chembl.compound` is part of `chembl`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<String>,
    /// Prefix whose identifiers this resource reuses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provides: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_owl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_obo: Option<String>,
    /// Redundant prefix that may appear at the start of local identifiers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banana: Option<String>,
    /// Overrides deprecation flags from external registries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Metaprefix to prefix in that external registry
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub mappings: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub synonyms: BTreeSet<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub appears_in: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// Overrides MIRIAM's `namespaceEmbeddedInLui`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_in_lui: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_own_terms: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor: Option<Author>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<Author>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proprietary: Option<bool>,
    /// Prefix sharing this resource's IRIs that should be preferred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_canonical: Option<String>,
    /// Stylized prefix, e.g. `FBbt`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_prefix: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub publications: Vec<Publication>,

    #[serde(flatten)]
    externals: ExternalSnapshots,
}

impl Resource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Attach the registry key to a freshly deserialized record
    pub(crate) fn bind_prefix(&mut self, prefix: &str) {
        if self.prefix.is_empty() {
            self.prefix = prefix.to_string();
        } else if self.prefix != prefix {
            warn!(key = %prefix, prefix = %self.prefix, "record prefix differs from its key, using key");
            self.prefix = prefix.to_string();
        }
    }

    /// Get the snapshot of an external registry, if aligned
    pub fn get_external(&self, metaprefix: Metaprefix) -> Option<&ExternalRecord> {
        self.externals.get(metaprefix)
    }

    /// Replace the snapshot of an external registry
    pub fn set_external(&mut self, metaprefix: Metaprefix, record: Option<ExternalRecord>) {
        self.externals.set(metaprefix, record);
    }

    /// All aligned external snapshots
    pub fn externals(&self) -> impl Iterator<Item = (Metaprefix, &ExternalRecord)> + '_ {
        self.externals.iter()
    }

    /// Drop every external snapshot
    pub(crate) fn clear_externals(&mut self) {
        self.externals = ExternalSnapshots::default();
    }

    pub(crate) fn local_text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Description => self.description.as_deref(),
            Field::Pattern => self.pattern.as_deref(),
            Field::UriFormat => self.uri_format.as_deref(),
            Field::Homepage => self.homepage.as_deref(),
            Field::Contact => self.contact.as_deref(),
            Field::Example => self.example.as_deref(),
            Field::License => self.license.as_deref(),
            Field::Version => self.version.as_deref(),
            Field::DownloadObo => self.download_obo.as_deref(),
            Field::DownloadOwl => self.download_owl.as_deref(),
            Field::PreferredPrefix => self.preferred_prefix.as_deref(),
            Field::NamespaceInLui | Field::Deprecated | Field::DownloadObograph => None,
        }
    }

    pub(crate) fn local_flag(&self, field: Field) -> Option<bool> {
        match field {
            Field::NamespaceInLui => self.namespace_in_lui,
            Field::Deprecated => self.deprecated,
            _ => None,
        }
    }

    /// Get the CURIE for a local identifier
    pub fn get_curie(&self, identifier: &str) -> String {
        format!("{}:{}", self.prefix, identifier)
    }

    pub fn get_name(&self) -> Option<&str> {
        resolve_text(self, Field::Name, resolve::NAME_PRIORITY)
    }

    pub fn get_description(&self) -> Option<&str> {
        resolve_text(self, Field::Description, resolve::DESCRIPTION_PRIORITY)
    }

    pub fn get_homepage(&self) -> Option<&str> {
        resolve_text(self, Field::Homepage, resolve::HOMEPAGE_PRIORITY)
    }

    /// Get the contact email.
    ///
    /// A value that is not a valid email address is logged and discarded.
    pub fn get_contact(&self) -> Option<&str> {
        let rv = resolve_text(self, Field::Contact, resolve::CONTACT_PRIORITY)?;
        if !is_valid_email(rv) {
            warn!(prefix = %self.prefix, contact = %rv, "invalid email address listed");
            return None;
        }
        Some(rv)
    }

    /// The contact that [`Resource::get_contact`] discards, if any
    pub fn get_invalid_contact(&self) -> Option<&str> {
        resolve_text(self, Field::Contact, resolve::CONTACT_PRIORITY)
            .filter(|contact| !is_valid_email(contact))
    }

    /// Get an example local identifier from curation, MIRIAM, or NCBI
    pub fn get_example(&self) -> Option<&str> {
        resolve_text(self, Field::Example, resolve::EXAMPLE_PRIORITY)
    }

    /// Get the license, standardizing values taken from external registries
    pub fn get_license(&self) -> Option<String> {
        if let Some(license) = &self.license {
            return Some(license.clone());
        }
        resolve_text(self, Field::License, resolve::LICENSE_PRIORITY).map(standardize_license)
    }

    pub fn get_version(&self) -> Option<&str> {
        resolve_text(self, Field::Version, resolve::VERSION_PRIORITY)
    }

    /// Whether the namespace is embedded in local identifiers
    pub fn get_namespace_in_lui(&self) -> Option<bool> {
        resolve_flag(self, Field::NamespaceInLui, resolve::NAMESPACE_IN_LUI_PRIORITY)
    }

    /// Check the contributor and reviewer emails
    pub fn validate(&self) -> Result<()> {
        self.contributor
            .iter()
            .chain(self.reviewer.iter())
            .try_for_each(Author::validate)
    }

    /// Whether the resource is deprecated.
    ///
    /// A curated flag wins outright. Otherwise any of the OBO Foundry, OLS,
    /// or MIRIAM marking it deprecated is enough.
    pub fn is_deprecated(&self) -> bool {
        if let Some(deprecated) = self.deprecated {
            return deprecated;
        }
        resolve::DEPRECATED_SOURCES.iter().any(|&metaprefix| {
            self.get_external(metaprefix)
                .and_then(|record| record.get_bool(Field::Deprecated.key()))
                .unwrap_or(false)
        })
    }

    pub fn get_download_obo(&self) -> Option<&str> {
        resolve_text(self, Field::DownloadObo, resolve::DOWNLOAD_OBO_PRIORITY)
    }

    pub fn get_download_owl(&self) -> Option<&str> {
        resolve_text(self, Field::DownloadOwl, resolve::DOWNLOAD_OWL_PRIORITY)
    }

    pub fn get_download_obograph(&self) -> Option<&str> {
        resolve_text(self, Field::DownloadObograph, resolve::DOWNLOAD_OBOGRAPH_PRIORITY)
    }

    pub fn get_synonyms(&self) -> &BTreeSet<String> {
        &self.synonyms
    }

    /// Get the stylized prefix from curation or the OBO Foundry
    pub fn get_preferred_prefix(&self) -> Option<String> {
        self.preferred_prefix
            .clone()
            .or_else(|| self.get_obo_preferred_prefix())
    }

    /// The OBO Foundry's `preferredPrefix`, else its prefix upper-cased
    pub fn get_obo_preferred_prefix(&self) -> Option<String> {
        let obofoundry = self.get_external(Metaprefix::Obofoundry)?;
        let preferred = external_keys(Metaprefix::Obofoundry, Field::PreferredPrefix)
            .iter()
            .find_map(|key| obofoundry.get_str(key));
        match preferred {
            Some(preferred) => Some(preferred.to_string()),
            None => obofoundry.prefix().map(str::to_uppercase),
        }
    }

    /// Curated mappings overlaid with the prefixes of every aligned snapshot
    pub fn get_mappings(&self) -> BTreeMap<String, String> {
        let mut rv = self.mappings.clone();
        for (metaprefix, record) in self.externals() {
            let value = match metaprefix {
                Metaprefix::Obofoundry => self.get_obo_preferred_prefix(),
                _ => record.prefix().map(str::to_string),
            };
            match value {
                Some(value) => {
                    rv.insert(metaprefix.as_str().to_string(), value);
                }
                None => debug!(prefix = %self.prefix, %metaprefix, "snapshot has no prefix"),
            }
        }
        rv
    }

    /// Get the prefix used for this resource by another registry
    pub fn get_mapped_prefix(&self, metaprefix: &str) -> Option<String> {
        self.get_mappings().remove(metaprefix)
    }

    pub fn get_scholia_prefix(&self) -> Option<String> {
        self.get_mapped_prefix("scholia")
    }

    /// Curated providers followed by complete providers listed by MIRIAM
    pub fn get_extra_providers(&self) -> Vec<Provider> {
        let mut rv = self.providers.clone();
        let miriam_providers = self
            .get_external(Metaprefix::Miriam)
            .and_then(|record| record.get("providers"))
            .and_then(|value| value.as_array());
        for value in miriam_providers.into_iter().flatten() {
            match serde_json::from_value::<Provider>(value.clone()) {
                Ok(provider) => rv.push(provider),
                Err(e) => debug!(prefix = %self.prefix, error = %e, "skipping incomplete MIRIAM provider"),
            }
        }
        rv
    }

    pub fn get_publications(&self) -> Vec<Publication> {
        deduplicate_publications(self.publications.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chebi() -> Resource {
        let mut resource = Resource::new("chebi");
        resource.set_external(
            Metaprefix::Obofoundry,
            Some(
                ExternalRecord::new()
                    .with("prefix", "chebi")
                    .with("name", "Chemical Entities of Biological Interest")
                    .with("contact", "amalik@ebi.ac.uk")
                    .with("license", "CC BY 4.0"),
            ),
        );
        resource.set_external(
            Metaprefix::Miriam,
            Some(
                ExternalRecord::new()
                    .with("prefix", "chebi")
                    .with("name", "ChEBI")
                    .with("sampleId", "36927")
                    .with("providers", serde_json::json!([
                        {
                            "code": "ols",
                            "name": "ChEBI through OLS",
                            "description": "ChEBI through OLS",
                            "homepage": "https://www.ebi.ac.uk/ols/ontologies/chebi",
                            "uri_format": "https://www.ebi.ac.uk/ols/ontologies/chebi/terms?obo_id=CHEBI:$1"
                        },
                        {"code": "broken"}
                    ])),
            ),
        );
        resource.set_external(
            Metaprefix::Wikidata,
            Some(ExternalRecord::new().with("prefix", "P683")),
        );
        resource
    }

    #[test]
    fn test_name_prefers_obofoundry() {
        assert_eq!(chebi().get_name(), Some("Chemical Entities of Biological Interest"));
    }

    #[test]
    fn test_example_from_miriam_sample_id() {
        assert_eq!(chebi().get_example(), Some("36927"));
    }

    #[test]
    fn test_license_standardized() {
        assert_eq!(chebi().get_license().as_deref(), Some("CC-BY-4.0"));
        let mut resource = chebi();
        resource.license = Some("CC BY 4.0".to_string());
        assert_eq!(resource.get_license().as_deref(), Some("CC BY 4.0"));
    }

    #[test]
    fn test_invalid_contact_discarded() {
        let mut resource = chebi();
        assert_eq!(resource.get_contact(), Some("amalik@ebi.ac.uk"));
        assert_eq!(resource.get_invalid_contact(), None);

        resource.contact = Some("https://www.ebi.ac.uk/support".to_string());
        assert_eq!(resource.get_contact(), None);
        assert_eq!(resource.get_invalid_contact(), Some("https://www.ebi.ac.uk/support"));
    }

    #[test]
    fn test_mappings_overlay() {
        let mut resource = chebi();
        resource.mappings.insert("fairsharing".to_string(), "FAIRsharing.62qk8w".to_string());
        let mappings = resource.get_mappings();
        assert_eq!(mappings["obofoundry"], "CHEBI");
        assert_eq!(mappings["miriam"], "chebi");
        assert_eq!(mappings["wikidata"], "P683");
        assert_eq!(mappings["fairsharing"], "FAIRsharing.62qk8w");
        assert_eq!(resource.get_mapped_prefix("wikidata").as_deref(), Some("P683"));
    }

    #[test]
    fn test_extra_providers_skip_incomplete() {
        let providers = chebi().get_extra_providers();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].code, "ols");
    }

    #[test]
    fn test_deprecation_override() {
        let mut resource = chebi();
        assert!(!resource.is_deprecated());
        resource.set_external(
            Metaprefix::Ols,
            Some(ExternalRecord::new().with("prefix", "chebi").with("deprecated", true)),
        );
        assert!(resource.is_deprecated());
        resource.deprecated = Some(false);
        assert!(!resource.is_deprecated());
    }

    #[test]
    fn test_serialization_inlines_externals() {
        let value = serde_json::to_value(chebi()).unwrap();
        assert_eq!(value["miriam"]["sampleId"], "36927");
        assert!(value.get("name").is_none());
        let back: Resource = serde_json::from_value(value).unwrap();
        assert_eq!(back, chebi());
    }

    #[test]
    fn test_obo_preferred_prefix_key() {
        let mut dpo = Resource::new("dpo");
        dpo.set_external(
            Metaprefix::Obofoundry,
            Some(
                ExternalRecord::new()
                    .with("prefix", "dpo")
                    .with("preferredPrefix", "FBcv"),
            ),
        );
        assert_eq!(dpo.get_obo_preferred_prefix().as_deref(), Some("FBcv"));

        // The canonical field name is not an OBO Foundry key
        dpo.set_external(
            Metaprefix::Obofoundry,
            Some(
                ExternalRecord::new()
                    .with("prefix", "dpo")
                    .with("preferred_prefix", "FBcv"),
            ),
        );
        assert_eq!(dpo.get_obo_preferred_prefix().as_deref(), Some("DPO"));
    }

    #[test]
    fn test_validate_authors() {
        let mut resource = Resource::new("go");
        assert!(resource.validate().is_ok());

        let mut reviewer = Author::new("A", "0000-0000-0000-0000");
        reviewer.email = Some("not an email".to_string());
        resource.reviewer = Some(reviewer);
        assert!(resource.validate().is_err());
    }
}
