//! JSON document store
//!
//! ```text
//! data/
//! ├── registry.json        { "<prefix>": Resource, ... }
//! ├── metaregistry.json    { "metaregistry": [Registry, ...] }
//! └── collections.json     { "collections": [Collection, ...] }
//! ```
//!
//! Files are read wholesale and rewritten wholesale. Object keys come out
//! sorted and absent fields are omitted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::schema::{Collection, Registry, Resource};

/// Locations of the three store files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPaths {
    pub registry: PathBuf,
    pub metaregistry: PathBuf,
    pub collections: PathBuf,
}

impl DataPaths {
    /// The standard file names inside one directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            registry: dir.join("registry.json"),
            metaregistry: dir.join("metaregistry.json"),
            collections: dir.join("collections.json"),
        }
    }
}

#[derive(Deserialize)]
struct MetaregistryDocument {
    metaregistry: Vec<Registry>,
}

#[derive(Serialize)]
struct MetaregistryDocumentRef<'a> {
    metaregistry: Vec<&'a Registry>,
}

#[derive(Deserialize)]
struct CollectionsDocument {
    collections: Vec<Collection>,
}

#[derive(Serialize)]
struct CollectionsDocumentRef {
    collections: Vec<Collection>,
}

/// Read `registry.json`, binding each record to its key.
///
/// A contributor or reviewer with a malformed email fails the read.
pub fn read_registry(path: impl AsRef<Path>) -> Result<BTreeMap<String, Resource>> {
    let content = fs::read_to_string(path.as_ref())?;
    let mut registry: BTreeMap<String, Resource> = serde_json::from_str(&content)?;
    for (prefix, resource) in registry.iter_mut() {
        resource.bind_prefix(prefix);
        resource.validate()?;
    }
    info!(path = %path.as_ref().display(), resources = registry.len(), "read registry");
    Ok(registry)
}

/// Read `metaregistry.json`, keyed by metaprefix
pub fn read_metaregistry(path: impl AsRef<Path>) -> Result<BTreeMap<String, Registry>> {
    let content = fs::read_to_string(path.as_ref())?;
    let document: MetaregistryDocument = serde_json::from_str(&content)?;
    let mut rv = BTreeMap::new();
    for registry in document.metaregistry {
        registry.validate()?;
        rv.insert(registry.prefix.clone(), registry);
    }
    Ok(rv)
}

/// Read `collections.json`, keyed by identifier.
///
/// Every collection is validated; one bad record fails the read.
pub fn read_collections(path: impl AsRef<Path>) -> Result<BTreeMap<String, Collection>> {
    let content = fs::read_to_string(path.as_ref())?;
    let document: CollectionsDocument = serde_json::from_str(&content)?;
    let mut rv = BTreeMap::new();
    for collection in document.collections {
        collection.validate()?;
        rv.insert(collection.identifier.clone(), collection);
    }
    Ok(rv)
}

/// Rewrite `registry.json`
pub fn write_registry(path: impl AsRef<Path>, registry: &BTreeMap<String, Resource>) -> Result<()> {
    let mut document = serde_json::Map::new();
    for (prefix, resource) in registry {
        let mut value = serde_json::to_value(resource)?;
        // The key already carries the prefix
        if let Value::Object(fields) = &mut value {
            fields.remove("prefix");
        }
        document.insert(prefix.clone(), value);
    }
    write_json_atomic(path.as_ref(), &Value::Object(document))?;
    info!(path = %path.as_ref().display(), resources = registry.len(), "wrote registry");
    Ok(())
}

/// Rewrite `metaregistry.json`
pub fn write_metaregistry(
    path: impl AsRef<Path>,
    metaregistry: &BTreeMap<String, Registry>,
) -> Result<()> {
    let document = MetaregistryDocumentRef {
        metaregistry: metaregistry.values().collect(),
    };
    write_json_atomic(path.as_ref(), &serde_json::to_value(document)?)
}

/// Rewrite `collections.json`, normalizing each resource list
pub fn write_collections(
    path: impl AsRef<Path>,
    collections: &BTreeMap<String, Collection>,
) -> Result<()> {
    let document = CollectionsDocumentRef {
        collections: collections
            .values()
            .cloned()
            .map(|mut collection| {
                collection.normalize_resources();
                collection
            })
            .collect(),
    };
    write_json_atomic(path.as_ref(), &serde_json::to_value(document)?)
}

/// Write pretty JSON next to the target, then rename over it
pub(crate) fn write_json_atomic(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
