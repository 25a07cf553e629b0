//! Registry manager
//!
//! Owns the registry, metaregistry, and collections once loaded, plus an
//! index from normalized synonyms to prefixes. Every lookup goes through an
//! explicit [`Manager`] value passed to callers, never a global.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{RegistryError, Result};
use crate::schema::{Author, Collection, Registry, Resource};
use crate::store::{self, DataPaths};
use crate::uri_format::{UriFormatter, IDENTIFIER_PLACEHOLDER};

const BIOREGISTRY_RESOLVER: &str = "https://bioregistry.io/";

/// Lower-case and drop spaces, dots, and dashes
pub fn norm(s: &str) -> String {
    s.to_lowercase().replace([' ', '.', '-'], "")
}

/// Search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub score: i64,
}

/// Prefix correspondences between two external registries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalMappings {
    /// Source prefix to target prefix, for resources mapped in both
    pub mappings: BTreeMap<String, String>,
    /// Source prefixes with no counterpart in the target
    pub source_only: BTreeSet<String>,
    /// Target prefixes with no counterpart in the source
    pub target_only: BTreeSet<String>,
}

/// What a single contributor has done, keyed by prefix or identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributions {
    pub prefixes: BTreeSet<String>,
    pub reviews: BTreeSet<String>,
    pub contacts: BTreeSet<String>,
    pub registries: BTreeSet<String>,
    pub collections: BTreeSet<String>,
}

/// The loaded registry
#[derive(Debug, Clone, Default)]
pub struct Manager {
    registry: BTreeMap<String, Resource>,
    metaregistry: BTreeMap<String, Registry>,
    collections: BTreeMap<String, Collection>,
    synonyms: HashMap<String, String>,
}

impl Manager {
    /// Load all three store files
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let manager = Self::from_maps(
            store::read_registry(&paths.registry)?,
            store::read_metaregistry(&paths.metaregistry)?,
            store::read_collections(&paths.collections)?,
        );
        info!(
            resources = manager.registry.len(),
            registries = manager.metaregistry.len(),
            collections = manager.collections.len(),
            "loaded bioregistry"
        );
        Ok(manager)
    }

    /// Build a manager from records already in memory
    pub fn from_parts(
        registry: impl IntoIterator<Item = Resource>,
        metaregistry: impl IntoIterator<Item = Registry>,
        collections: impl IntoIterator<Item = Collection>,
    ) -> Self {
        Self::from_maps(
            registry
                .into_iter()
                .map(|resource| (resource.prefix().to_string(), resource))
                .collect(),
            metaregistry
                .into_iter()
                .map(|registry| (registry.prefix.clone(), registry))
                .collect(),
            collections
                .into_iter()
                .map(|collection| (collection.identifier.clone(), collection))
                .collect(),
        )
    }

    fn from_maps(
        registry: BTreeMap<String, Resource>,
        metaregistry: BTreeMap<String, Registry>,
        collections: BTreeMap<String, Collection>,
    ) -> Self {
        let mut manager = Self {
            registry,
            metaregistry,
            collections,
            synonyms: HashMap::new(),
        };
        manager.rebuild_index();
        manager
    }

    /// Recompute the synonym index after curation edits.
    ///
    /// Prefixes take precedence over synonyms, which take precedence over
    /// preferred prefixes.
    pub fn rebuild_index(&mut self) {
        let mut synonyms = HashMap::new();
        for prefix in self.registry.keys() {
            synonyms.insert(norm(prefix), prefix.clone());
        }
        for (prefix, resource) in &self.registry {
            for synonym in resource.get_synonyms() {
                synonyms.entry(norm(synonym)).or_insert_with(|| prefix.clone());
            }
        }
        for (prefix, resource) in &self.registry {
            if let Some(preferred) = resource.get_preferred_prefix() {
                synonyms.entry(norm(&preferred)).or_insert_with(|| prefix.clone());
            }
        }
        self.synonyms = synonyms;
    }

    pub fn write_registry(&self, path: impl AsRef<Path>) -> Result<()> {
        store::write_registry(path, &self.registry)
    }

    pub fn write_metaregistry(&self, path: impl AsRef<Path>) -> Result<()> {
        store::write_metaregistry(path, &self.metaregistry)
    }

    pub fn write_collections(&self, path: impl AsRef<Path>) -> Result<()> {
        store::write_collections(path, &self.collections)
    }

    /// Rewrite all three store files
    pub fn write(&self, paths: &DataPaths) -> Result<()> {
        self.write_registry(&paths.registry)?;
        self.write_metaregistry(&paths.metaregistry)?;
        self.write_collections(&paths.collections)
    }

    pub fn registry(&self) -> &BTreeMap<String, Resource> {
        &self.registry
    }

    pub fn metaregistry(&self) -> &BTreeMap<String, Registry> {
        &self.metaregistry
    }

    pub fn collections(&self) -> &BTreeMap<String, Collection> {
        &self.collections
    }

    /// Map any known spelling of a prefix onto the normalized prefix
    pub fn normalize_prefix(&self, prefix: &str) -> Option<&str> {
        if let Some((key, _)) = self.registry.get_key_value(prefix) {
            return Some(key);
        }
        self.synonyms.get(&norm(prefix)).map(String::as_str)
    }

    pub fn get_resource(&self, prefix: &str) -> Option<&Resource> {
        let prefix = self.normalize_prefix(prefix)?;
        self.registry.get(prefix)
    }

    /// Like [`Manager::get_resource`], but fails with `ResourceNotFound`
    pub fn require_resource(&self, prefix: &str) -> Result<&Resource> {
        self.get_resource(prefix)
            .ok_or_else(|| RegistryError::ResourceNotFound(prefix.to_string()))
    }

    /// Mutable access for curation; call [`Manager::rebuild_index`] after
    /// changing synonyms or preferred prefixes
    pub fn resource_mut(&mut self, prefix: &str) -> Option<&mut Resource> {
        let prefix = self.normalize_prefix(prefix)?.to_string();
        self.registry.get_mut(&prefix)
    }

    /// Add or replace a resource, returning the previous record
    pub fn insert_resource(&mut self, resource: Resource) -> Option<Resource> {
        let previous = self.registry.insert(resource.prefix().to_string(), resource);
        self.rebuild_index();
        previous
    }

    pub fn get_registry(&self, metaprefix: &str) -> Option<&Registry> {
        self.metaregistry.get(metaprefix)
    }

    /// Like [`Manager::get_registry`], but fails with `RegistryNotFound`
    pub fn require_registry(&self, metaprefix: &str) -> Result<&Registry> {
        self.get_registry(metaprefix)
            .ok_or_else(|| RegistryError::RegistryNotFound(metaprefix.to_string()))
    }

    pub fn get_collection(&self, identifier: &str) -> Option<&Collection> {
        self.collections.get(identifier)
    }

    /// Split a CURIE and normalize both halves.
    ///
    /// `GO:0001234`, `go:0001234`, and `go:GO:0001234` all give
    /// `("go", "0001234")`.
    pub fn parse_curie(&self, curie: &str) -> Option<(String, String)> {
        let (prefix, identifier) = curie.split_once(':')?;
        let resource = self.get_resource(prefix)?;
        let identifier = resource.standardize_identifier(identifier, Some(prefix));
        Some((resource.prefix().to_string(), identifier.to_string()))
    }

    pub fn get_uri_format(&self, prefix: &str, priority: Option<&[UriFormatter]>) -> Option<String> {
        self.get_resource(prefix)?.get_uri_format(priority)
    }

    pub fn get_uri_prefix(&self, prefix: &str, priority: Option<&[UriFormatter]>) -> Option<String> {
        self.get_resource(prefix)?.get_uri_prefix(priority)
    }

    /// Expand a prefix and identifier into an IRI
    pub fn get_iri(
        &self,
        prefix: &str,
        identifier: &str,
        priority: Option<&[UriFormatter]>,
    ) -> Option<String> {
        let resource = self.get_resource(prefix)?;
        let identifier = resource.standardize_identifier(identifier, Some(prefix));
        let uri_format = resource.get_uri_format(priority)?;
        Some(uri_format.replace(IDENTIFIER_PLACEHOLDER, identifier))
    }

    /// Map every prefix with a well-formed URI prefix onto it.
    ///
    /// `remapping` renames prefixes in the output, e.g. to OBO styling.
    pub fn get_prefix_map(
        &self,
        priority: Option<&[UriFormatter]>,
        remapping: Option<&BTreeMap<String, String>>,
    ) -> BTreeMap<String, String> {
        self.registry
            .iter()
            .filter_map(|(prefix, resource)| {
                let uri_prefix = resource.get_uri_prefix(priority)?;
                let key = remapping
                    .and_then(|remapping| remapping.get(prefix))
                    .unwrap_or(prefix);
                Some((key.clone(), uri_prefix))
            })
            .collect()
    }

    /// Every URI the identifier resolves to, by provider name
    pub fn get_providers(&self, prefix: &str, identifier: &str) -> Vec<(String, String)> {
        let Some(resource) = self.get_resource(prefix) else {
            return Vec::new();
        };
        let identifier = resource.standardize_identifier(identifier, Some(prefix));
        let mut rv = Vec::new();
        if let Some(uri) = resource.get_default_uri(identifier) {
            rv.push(("default".to_string(), uri));
        }
        rv.push((
            "bioregistry".to_string(),
            format!("{BIOREGISTRY_RESOLVER}{}", resource.get_curie(identifier)),
        ));
        for formatter in [
            UriFormatter::Obofoundry,
            UriFormatter::Miriam,
            UriFormatter::N2t,
            UriFormatter::Ols,
        ] {
            if let Some(uri_format) = formatter.format(resource) {
                rv.push((
                    formatter.as_str().to_string(),
                    uri_format.replace(IDENTIFIER_PLACEHOLDER, identifier),
                ));
            }
        }
        for provider in resource.get_extra_providers() {
            let uri = provider.resolve(identifier);
            rv.push((provider.code, uri));
        }
        rv
    }

    /// Prefix to the prefix used by one external registry
    pub fn get_registry_map(&self, metaprefix: &str) -> BTreeMap<String, String> {
        self.registry
            .iter()
            .filter_map(|(prefix, resource)| {
                resource
                    .get_mapped_prefix(metaprefix)
                    .map(|mapped| (prefix.clone(), mapped))
            })
            .collect()
    }

    /// External registry prefix back to prefix
    pub fn get_registry_invmap(&self, metaprefix: &str) -> BTreeMap<String, String> {
        self.get_registry_map(metaprefix)
            .into_iter()
            .map(|(prefix, mapped)| (mapped, prefix))
            .collect()
    }

    /// Compare how two external registries name the same resources
    pub fn get_external_mappings(&self, source: &str, target: &str) -> ExternalMappings {
        let mut rv = ExternalMappings::default();
        for resource in self.registry.values() {
            let mappings = resource.get_mappings();
            match (mappings.get(source), mappings.get(target)) {
                (Some(s), Some(t)) => {
                    rv.mappings.insert(s.clone(), t.clone());
                }
                (Some(s), None) => {
                    rv.source_only.insert(s.clone());
                }
                (None, Some(t)) => {
                    rv.target_only.insert(t.clone());
                }
                (None, None) => {}
            }
        }
        rv
    }

    pub fn get_part_of(&self, prefix: &str) -> Option<&str> {
        self.get_resource(prefix)?.part_of.as_deref()
    }

    /// Prefixes that declare themselves part of this one
    pub fn get_has_parts(&self, prefix: &str) -> BTreeSet<&str> {
        let Some(prefix) = self.normalize_prefix(prefix) else {
            return BTreeSet::new();
        };
        self.registry
            .values()
            .filter(|resource| resource.part_of.as_deref() == Some(prefix))
            .map(Resource::prefix)
            .collect()
    }

    pub fn get_provides_for(&self, prefix: &str) -> Option<&str> {
        self.get_resource(prefix)?.provides.as_deref()
    }

    /// Prefixes that reuse this one's identifiers
    pub fn get_provided_by(&self, prefix: &str) -> BTreeSet<&str> {
        let Some(prefix) = self.normalize_prefix(prefix) else {
            return BTreeSet::new();
        };
        self.registry
            .values()
            .filter(|resource| resource.provides.as_deref() == Some(prefix))
            .map(Resource::prefix)
            .collect()
    }

    pub fn get_has_canonical(&self, prefix: &str) -> Option<&str> {
        self.get_resource(prefix)?.has_canonical.as_deref()
    }

    /// Everyone credited anywhere, keyed by ORCiD
    pub fn read_contributors(&self) -> BTreeMap<String, Author> {
        let mut rv = BTreeMap::new();
        let mut add = |author: &Author| {
            rv.entry(author.orcid.clone())
                .or_insert_with(|| author.clone());
        };
        for resource in self.registry.values() {
            resource.contributor.iter().for_each(&mut add);
            resource.reviewer.iter().for_each(&mut add);
        }
        for registry in self.metaregistry.values() {
            registry.contributor.iter().for_each(&mut add);
        }
        for collection in self.collections.values() {
            collection.authors.iter().for_each(&mut add);
        }
        rv
    }

    /// What the contributor with this ORCiD has done
    pub fn get_contributions(&self, orcid: &str) -> Contributions {
        let mut rv = Contributions::default();
        let email = self
            .read_contributors()
            .remove(orcid)
            .and_then(|author| author.email);
        let is_author = |author: &Option<Author>| {
            author.as_ref().is_some_and(|author| author.orcid == orcid)
        };
        for (prefix, resource) in &self.registry {
            if is_author(&resource.contributor) {
                rv.prefixes.insert(prefix.clone());
            }
            if is_author(&resource.reviewer) {
                rv.reviews.insert(prefix.clone());
            }
            if email.is_some() && resource.get_contact() == email.as_deref() {
                rv.contacts.insert(prefix.clone());
            }
        }
        for (metaprefix, registry) in &self.metaregistry {
            if is_author(&registry.contributor) {
                rv.registries.insert(metaprefix.clone());
            }
        }
        for (identifier, collection) in &self.collections {
            if collection.authors.iter().any(|author| author.orcid == orcid) {
                rv.collections.insert(identifier.clone());
            }
        }
        rv
    }

    /// A copy of the resource with every derived field written out and
    /// the external snapshots dropped
    pub fn rasterized_resource(&self, resource: &Resource) -> Resource {
        let mut rv = resource.clone();
        rv.clear_externals();
        rv.name = resource.get_name().map(str::to_string);
        rv.description = resource.get_description().map(str::to_string);
        rv.pattern = resource.get_pattern();
        rv.uri_format = resource.get_default_format().map(str::to_string);
        rv.homepage = resource.get_homepage().map(str::to_string);
        rv.contact = resource.get_contact().map(str::to_string);
        rv.example = resource.get_example().map(str::to_string);
        rv.license = resource.get_license();
        rv.version = resource.get_version().map(str::to_string);
        rv.download_owl = resource.get_download_owl().map(str::to_string);
        rv.download_obo = resource.get_download_obo().map(str::to_string);
        rv.banana = resource.get_banana().map(|banana| banana.into_owned());
        rv.deprecated = match resource.deprecated {
            Some(_) => Some(resource.is_deprecated()),
            None => resource.is_deprecated().then_some(true),
        };
        rv.namespace_in_lui = resource.get_namespace_in_lui();
        rv.preferred_prefix = resource.get_preferred_prefix();
        rv.mappings = resource.get_mappings();
        rv.providers = resource.get_extra_providers();
        rv.publications = resource.get_publications();
        rv
    }

    /// Every resource, rasterized
    pub fn rasterized_registry(&self) -> BTreeMap<String, Resource> {
        self.registry
            .iter()
            .map(|(prefix, resource)| (prefix.clone(), self.rasterized_resource(resource)))
            .collect()
    }

    /// Fuzzy search over prefixes and names, best first
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        let matcher = SkimMatcherV2::default();
        let mut results: Vec<(i64, &Resource)> = Vec::new();

        for resource in self.registry.values() {
            let prefix_score = matcher.fuzzy_match(resource.prefix(), query);
            let name_score = resource
                .get_name()
                .and_then(|name| matcher.fuzzy_match(name, query));
            if let Some(score) = prefix_score.max(name_score) {
                results.push((score, resource));
            }
        }

        // Ties keep prefix order
        results.sort_by(|a, b| b.0.cmp(&a.0));
        debug!(query, hits = results.len(), "searched registry");

        results
            .into_iter()
            .take(limit)
            .map(|(score, resource)| SearchResult {
                prefix: resource.prefix().to_string(),
                name: resource.get_name().map(str::to_string),
                score,
            })
            .collect()
    }

    /// Prefixes starting with the query, case-insensitively
    pub fn autocomplete(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();
        self.registry
            .keys()
            .filter(|prefix| prefix.starts_with(&query))
            .map(String::as_str)
            .collect()
    }

    /// Prefix map restricted to a collection's members
    pub fn collection_prefix_map(&self, identifier: &str) -> Result<BTreeMap<String, String>> {
        let collection = self
            .get_collection(identifier)
            .ok_or_else(|| RegistryError::CollectionNotFound(identifier.to_string()))?;
        Ok(collection
            .resources
            .iter()
            .filter_map(|prefix| {
                self.get_uri_prefix(prefix, None)
                    .map(|uri_prefix| (prefix.clone(), uri_prefix))
            })
            .collect())
    }

    /// JSON-LD context for a collection
    pub fn collection_context(&self, identifier: &str) -> Result<serde_json::Value> {
        Ok(serde_json::json!({ "@context": self.collection_prefix_map(identifier)? }))
    }
}
