//! Error types for the bioregistry

use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Registry errors
///
/// Missing metadata is never an error: getters return `None` instead.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Registry not found: {0}")]
    RegistryNotFound(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Invalid pattern for {prefix}: {source}")]
    Pattern {
        prefix: String,
        #[source]
        source: regex::Error,
    },

    #[error("No URI formatter named {0}")]
    UnknownFormatter(String),

    #[error("Invalid collection identifier (expected 7 digits): {0}")]
    InvalidCollectionId(String),

    #[error("Invalid email for author {orcid}: {email}")]
    InvalidEmail { orcid: String, email: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
