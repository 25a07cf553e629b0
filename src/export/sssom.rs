//! SSSOM export of prefix mappings
//!
//! Every mapping of a prefix onto an external registry becomes one
//! `skos:exactMatch` row. A YAML sidecar carries the mapping-set metadata.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::Result;
use crate::manager::Manager;

pub const SSSOM_PATH: &str = "sssom/bioregistry.sssom.tsv";
pub const SSSOM_METADATA_PATH: &str = "sssom/bioregistry.sssom.yml";

const COLUMNS: [&str; 4] = ["subject_id", "predicate_id", "object_id", "match_type"];

/// One mapping row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingRow {
    pub subject_id: String,
    pub predicate_id: String,
    pub object_id: String,
    pub match_type: String,
}

impl MappingRow {
    fn exact(prefix: &str, metaprefix: &str, external: &str) -> Self {
        Self {
            subject_id: format!("bioregistry:{prefix}"),
            predicate_id: "skos:exactMatch".to_string(),
            object_id: format!("{metaprefix}:{external}"),
            match_type: "sssom:HumanCurated".to_string(),
        }
    }
}

/// Mapping-set metadata
#[derive(Debug, Clone, Serialize)]
pub struct SssomMetadata {
    pub license: String,
    pub mapping_provider: String,
    pub mapping_set_group: String,
    pub mapping_set_id: String,
    pub mapping_set_title: String,
    pub curie_map: BTreeMap<String, String>,
}

/// All rows, ordered by prefix then metaprefix
pub fn get_rows(manager: &Manager) -> Vec<MappingRow> {
    manager
        .registry()
        .iter()
        .flat_map(|(prefix, resource)| {
            resource
                .get_mappings()
                .into_iter()
                .map(move |(metaprefix, external)| MappingRow::exact(prefix, &metaprefix, &external))
        })
        .collect()
}

/// Metaprefix to provider URI prefix, for registries that have one
pub fn get_curie_map(manager: &Manager) -> BTreeMap<String, String> {
    let mut rv = BTreeMap::new();
    for (metaprefix, registry) in manager.metaregistry() {
        let Some(provider_uri_format) = &registry.provider_uri_format else {
            continue;
        };
        if manager.registry().contains_key(metaprefix) && registry.bioregistry_prefix.is_none() {
            warn!(%metaprefix, "metaprefix overlaps a prefix, leaving it out of the curie map");
            continue;
        }
        let uri_prefix = provider_uri_format
            .strip_suffix("$1")
            .unwrap_or(provider_uri_format);
        rv.insert(metaprefix.clone(), uri_prefix.to_string());
    }
    rv
}

pub fn get_metadata(manager: &Manager) -> SssomMetadata {
    SssomMetadata {
        license: "https://creativecommons.org/publicdomain/zero/1.0/".to_string(),
        mapping_provider: "https://github.com/biopragmatics/bioregistry".to_string(),
        mapping_set_group: "bioregistry".to_string(),
        mapping_set_id: "bioregistry".to_string(),
        mapping_set_title: "Bioregistry".to_string(),
        curie_map: get_curie_map(manager),
    }
}

/// Write the TSV and its metadata
pub fn export_sssom(manager: &Manager, dir: &Path) -> Result<Vec<PathBuf>> {
    let tsv_path = dir.join(SSSOM_PATH);
    if let Some(parent) = tsv_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(&tsv_path)?;
    writer.write_record(COLUMNS)?;
    for row in get_rows(manager) {
        writer.write_record([
            &row.subject_id,
            &row.predicate_id,
            &row.object_id,
            &row.match_type,
        ])?;
    }
    writer.flush()?;

    let metadata = serde_yaml::to_string(&get_metadata(manager))?;
    fs::write(dir.join(SSSOM_METADATA_PATH), metadata)?;

    Ok(vec![PathBuf::from(SSSOM_PATH), PathBuf::from(SSSOM_METADATA_PATH)])
}
