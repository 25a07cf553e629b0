//! YAML export
//!
//! The registry is rasterized first so the YAML carries resolved values
//! instead of raw external snapshots.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::manager::Manager;

pub const REGISTRY_YAML_PATH: &str = "yaml/registry.yml";
pub const METAREGISTRY_YAML_PATH: &str = "yaml/metaregistry.yml";
pub const COLLECTIONS_YAML_PATH: &str = "yaml/collections.yml";

fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_yaml::to_string(value)?)?;
    Ok(())
}

pub fn export_yaml(manager: &Manager, dir: &Path) -> Result<Vec<PathBuf>> {
    write_yaml(&dir.join(REGISTRY_YAML_PATH), &manager.rasterized_registry())?;
    write_yaml(&dir.join(METAREGISTRY_YAML_PATH), manager.metaregistry())?;
    write_yaml(&dir.join(COLLECTIONS_YAML_PATH), manager.collections())?;
    Ok(vec![
        PathBuf::from(REGISTRY_YAML_PATH),
        PathBuf::from(METAREGISTRY_YAML_PATH),
        PathBuf::from(COLLECTIONS_YAML_PATH),
    ])
}
