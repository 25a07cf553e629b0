//! Exporters
//!
//! ```text
//! exports/
//! ├── registry.json
//! ├── contexts/
//! │   ├── bioregistry_context.jsonld
//! │   ├── obo_context.jsonld
//! │   └── <collection>_context.jsonld
//! ├── sssom/
//! │   ├── bioregistry.sssom.tsv
//! │   └── bioregistry.sssom.yml
//! ├── yaml/
//! │   ├── registry.yml
//! │   ├── metaregistry.yml
//! │   └── collections.yml
//! ├── rdf/
//! │   └── bioregistry.nt
//! └── checksums.sha256
//! ```

pub mod prefix_maps;
pub mod rdf;
pub mod sssom;
pub mod yaml;

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::checksum::{self, MANIFEST_NAME};
use crate::config::{BioregistryConfig, OutputFormat};
use crate::error::Result;
use crate::manager::Manager;
use crate::uri_format::UriFormatter;

/// Settings for one export run
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub output_format: OutputFormat,
    pub include_checksums: bool,
    /// Formatter priority for the general prefix map
    pub priority: Option<Vec<UriFormatter>>,
}

impl ExportOptions {
    pub fn from_config(config: &BioregistryConfig) -> Result<Self> {
        Ok(Self {
            output_format: config.export.output_format,
            include_checksums: config.export.include_checksums,
            priority: config.formatter_priority()?,
        })
    }
}

pub(crate) fn write_json(path: &Path, value: &Value, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Compact => serde_json::to_string(value)?,
    };
    fs::write(path, content)?;
    Ok(())
}

/// Run every exporter into `dir`, returning the written paths relative to it
pub fn export_all(manager: &Manager, dir: impl AsRef<Path>, options: &ExportOptions) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let registry = serde_json::to_value(manager.rasterized_registry())?;
    write_json(&dir.join("registry.json"), &registry, options.output_format)?;
    written.push(PathBuf::from("registry.json"));

    written.extend(prefix_maps::export_contexts(
        manager,
        dir,
        options.priority.as_deref(),
        options.output_format,
    )?);
    written.extend(sssom::export_sssom(manager, dir)?);
    written.extend(yaml::export_yaml(manager, dir)?);
    written.extend(rdf::export_rdf(manager, dir)?);

    if options.include_checksums {
        checksum::write_manifest(dir, &written)?;
        written.push(PathBuf::from(MANIFEST_NAME));
    }

    info!(dir = %dir.display(), files = written.len(), "exported bioregistry");
    Ok(written)
}
