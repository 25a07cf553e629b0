//! Configuration management for the bioregistry tools
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (bioregistry.toml)
//! - Environment variables (BIOREGISTRY__*)
//!
//! ## Example config file (bioregistry.toml):
//! ```toml
//! [data]
//! dir = "./data"
//!
//! [export]
//! dir = "./exports"
//! output_format = "pretty"
//! include_checksums = true
//!
//! [resolution]
//! priority = ["obofoundry", "default", "miriam"]
//! strict_priority = true
//!
//! [validation]
//! fail_on_invalid_contact = false
//! ignore_prefixes = ["sty"]
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::store::DataPaths;
use crate::uri_format::UriFormatter;

/// Main configuration for the bioregistry tools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BioregistryConfig {
    /// Where the store files live
    #[serde(default)]
    pub data: DataConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// URI formatter settings
    #[serde(default)]
    pub resolution: ResolutionConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Store locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the three store files
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    /// Overrides for individual files
    #[serde(default)]
    pub registry: Option<PathBuf>,
    #[serde(default)]
    pub metaregistry: Option<PathBuf>,
    #[serde(default)]
    pub collections: Option<PathBuf>,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output directory
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,

    /// Output format (pretty or compact)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Include checksums file
    #[serde(default = "default_true")]
    pub include_checksums: bool,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

/// URI formatter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Formatter names, highest priority first
    #[serde(default)]
    pub priority: Option<Vec<String>>,

    /// Reject unknown formatter names instead of skipping them
    #[serde(default)]
    pub strict_priority: bool,
}

/// Validation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Count discarded contact emails as errors rather than warnings
    #[serde(default)]
    pub fail_on_invalid_contact: bool,

    /// Prefixes the validator skips
    #[serde(default)]
    pub ignore_prefixes: Vec<String>,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("exports")
}

fn default_true() -> bool {
    true
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            registry: None,
            metaregistry: None,
            collections: None,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
            output_format: OutputFormat::Pretty,
            include_checksums: true,
        }
    }
}

impl DataConfig {
    /// Resolve the store file locations
    pub fn paths(&self) -> DataPaths {
        let defaults = DataPaths::in_dir(&self.dir);
        DataPaths {
            registry: self.registry.clone().unwrap_or(defaults.registry),
            metaregistry: self.metaregistry.clone().unwrap_or(defaults.metaregistry),
            collections: self.collections.clone().unwrap_or(defaults.collections),
        }
    }
}

impl BioregistryConfig {
    /// Load configuration from default locations
    pub fn load() -> std::result::Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = [
            "bioregistry.toml",
            ".bioregistry.toml",
            "config/bioregistry.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("org", "biopragmatics", "bioregistry") {
            let xdg_config = config_dir.config_dir().join("bioregistry.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (BIOREGISTRY__*)
        builder = builder.add_source(
            Environment::with_prefix("BIOREGISTRY")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// The configured formatter priority, if any.
    ///
    /// Unknown names fail here when `strict_priority` is set.
    pub fn formatter_priority(&self) -> Result<Option<Vec<UriFormatter>>> {
        self.resolution
            .priority
            .as_ref()
            .map(|names| UriFormatter::parse_priority(names, self.resolution.strict_priority))
            .transpose()
    }
}
