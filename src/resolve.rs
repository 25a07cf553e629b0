//! Priority-ordered field resolution
//!
//! A resource's locally curated value always wins. When it is missing, the
//! external snapshots are consulted in the order given by the field's
//! priority list and the first present value is returned. Nothing is
//! cached; every call recomputes from the in-memory records.

use crate::external::{external_keys, Metaprefix};
use crate::schema::Resource;

use Metaprefix::*;

/// A resolvable field of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Description,
    Pattern,
    UriFormat,
    Homepage,
    Contact,
    Example,
    License,
    Version,
    NamespaceInLui,
    Deprecated,
    DownloadObo,
    DownloadOwl,
    DownloadObograph,
    PreferredPrefix,
}

impl Field {
    /// Canonical field name, also the default key in external records
    pub fn key(&self) -> &'static str {
        self.default_keys()[0]
    }

    pub(crate) fn default_keys(&self) -> &'static [&'static str] {
        match self {
            Field::Name => &["name"],
            Field::Description => &["description"],
            Field::Pattern => &["pattern"],
            Field::UriFormat => &["uri_format"],
            Field::Homepage => &["homepage"],
            Field::Contact => &["contact"],
            Field::Example => &["example"],
            Field::License => &["license"],
            Field::Version => &["version"],
            Field::NamespaceInLui => &["namespace_in_lui"],
            Field::Deprecated => &["deprecated"],
            Field::DownloadObo => &["download_obo"],
            Field::DownloadOwl => &["download_owl"],
            Field::DownloadObograph => &["download_obograph"],
            Field::PreferredPrefix => &["preferred_prefix"],
        }
    }
}

pub const NAME_PRIORITY: &[Metaprefix] =
    &[Obofoundry, Ols, Wikidata, Go, Ncbi, Bioportal, Miriam, Cellosaurus];
pub const DESCRIPTION_PRIORITY: &[Metaprefix] = &[Miriam, Ols, Obofoundry, Wikidata];
pub const PATTERN_PRIORITY: &[Metaprefix] = &[Miriam, Wikidata];
pub const HOMEPAGE_PRIORITY: &[Metaprefix] =
    &[Obofoundry, Ols, Miriam, N2t, Wikidata, Go, Ncbi, Cellosaurus];
pub const CONTACT_PRIORITY: &[Metaprefix] = &[Obofoundry, Ols];
pub const LICENSE_PRIORITY: &[Metaprefix] = &[Obofoundry, Ols];
pub const VERSION_PRIORITY: &[Metaprefix] = &[Ols];
pub const NAMESPACE_IN_LUI_PRIORITY: &[Metaprefix] = &[Miriam];
pub const EXAMPLE_PRIORITY: &[Metaprefix] = &[Miriam, Ncbi];
pub const DEPRECATED_SOURCES: &[Metaprefix] = &[Obofoundry, Ols, Miriam];
pub const DOWNLOAD_OBO_PRIORITY: &[Metaprefix] = &[Obofoundry];
pub const DOWNLOAD_OWL_PRIORITY: &[Metaprefix] = &[Ols, Obofoundry];
pub const DOWNLOAD_OBOGRAPH_PRIORITY: &[Metaprefix] = &[Obofoundry];
/// Sources for a first-party URI format when none is curated
pub const DEFAULT_FORMAT_PRIORITY: &[Metaprefix] =
    &[Miriam, N2t, Go, Prefixcommons, Wikidata, Uniprot, Cellosaurus];

/// Resolve a text field through the fallback chain
pub fn resolve_text<'a>(
    resource: &'a Resource,
    field: Field,
    priority: &[Metaprefix],
) -> Option<&'a str> {
    resolve_text_where(resource, field, priority, |_| true)
}

/// Resolve a text field, skipping external values rejected by `accept`.
///
/// The local value is returned as-is.
pub fn resolve_text_where<'a>(
    resource: &'a Resource,
    field: Field,
    priority: &[Metaprefix],
    accept: impl Fn(&str) -> bool,
) -> Option<&'a str> {
    if let Some(value) = resource.local_text(field) {
        return Some(value);
    }
    priority.iter().find_map(|&metaprefix| {
        let record = resource.get_external(metaprefix)?;
        external_keys(metaprefix, field)
            .iter()
            .filter_map(|key| record.get_str(key))
            .find(|value| accept(value))
    })
}

/// Resolve a boolean field through the fallback chain
pub fn resolve_flag(resource: &Resource, field: Field, priority: &[Metaprefix]) -> Option<bool> {
    if let Some(value) = resource.local_flag(field) {
        return Some(value);
    }
    priority.iter().find_map(|&metaprefix| {
        let record = resource.get_external(metaprefix)?;
        external_keys(metaprefix, field)
            .iter()
            .find_map(|key| record.get_bool(key))
    })
}
