//! Prefix maps and JSON-LD contexts

use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::write_json;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::manager::Manager;
use crate::uri_format::UriFormatter;

/// Formatter priority for the OBO context
pub const OBO_PRIORITY: [UriFormatter; 5] = [
    UriFormatter::Obofoundry,
    UriFormatter::Default,
    UriFormatter::Prefixcommons,
    UriFormatter::Miriam,
    UriFormatter::Ols,
];

/// Non-OBO prefixes with established OBO spellings
pub const OBO_REMAPPING: &[(&str, &str)] = &[
    ("umls", "UMLS"),
    ("snomedct", "SCTID"),
    ("ensembl", "ENSEMBL"),
];

/// Prefix to URI prefix for every resource that has one
pub fn get_general_prefix_map(
    manager: &Manager,
    priority: Option<&[UriFormatter]>,
) -> BTreeMap<String, String> {
    manager.get_prefix_map(priority, None)
}

/// The prefix map keyed by OBO Foundry spellings where available
pub fn get_obofoundry_prefix_map(manager: &Manager) -> BTreeMap<String, String> {
    let mut remapping = manager.get_registry_map("obofoundry");
    remapping.extend(
        OBO_REMAPPING
            .iter()
            .map(|(prefix, obo)| (prefix.to_string(), obo.to_string())),
    );
    manager.get_prefix_map(Some(&OBO_PRIORITY[..]), Some(&remapping))
}

/// Wrap a prefix map as a JSON-LD context
pub fn as_context(prefix_map: &BTreeMap<String, String>) -> Value {
    json!({ "@context": prefix_map })
}

/// Write the general, OBO, and per-collection contexts under `contexts/`
pub fn export_contexts(
    manager: &Manager,
    dir: &Path,
    priority: Option<&[UriFormatter]>,
    format: OutputFormat,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let mut write = |name: String, context: Value| -> Result<()> {
        let relative = PathBuf::from("contexts").join(name);
        write_json(&dir.join(&relative), &context, format)?;
        written.push(relative);
        Ok(())
    };

    write(
        "bioregistry_context.jsonld".to_string(),
        as_context(&get_general_prefix_map(manager, priority)),
    )?;
    write(
        "obo_context.jsonld".to_string(),
        as_context(&get_obofoundry_prefix_map(manager)),
    )?;
    for (identifier, collection) in manager.collections() {
        if let Some(name) = &collection.context {
            write(
                format!("{name}_context.jsonld"),
                manager.collection_context(identifier)?,
            )?;
        }
    }

    Ok(written)
}
