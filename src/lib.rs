//! Bioregistry
//!
//! A curated registry of bioinformatics namespace prefixes (e.g. `chebi`,
//! `go`) aligned against the external registries that also describe them.
//!
//! ## Features
//!
//! - **Field Resolution**: Curated values win; otherwise external registry
//!   snapshots are consulted in a fixed priority order per field
//! - **URI Formatting**: First-party, OBO Foundry, Prefix Commons,
//!   Identifiers.org, Name-to-Thing, and OLS URI format strategies
//! - **Identifier Normalization**: Strips or adds the redundant namespace
//!   ("banana") embedded in some local identifiers
//! - **Pattern Validation**: Checks local identifiers against cleaned,
//!   anchored regular expressions
//! - **Exports**: JSON-LD contexts, SSSOM, YAML, and N-Triples with a
//!   `checksums.sha256` manifest
//!
//! ## Architecture
//!
//! ```text
//! data/
//! ├── registry.json        prefix -> Resource (with external snapshots)
//! ├── metaregistry.json    external registries
//! └── collections.json     curated collections
//! ```

pub mod checksum;
pub mod config;
pub mod diff;
pub mod error;
pub mod export;
pub mod external;
pub mod identifier;
pub mod license;
pub mod manager;
pub mod pattern;
pub mod resolve;
pub mod schema;
pub mod store;
pub mod uri_format;

pub use checksum::Checksum;
pub use config::BioregistryConfig;
pub use diff::{compare_registries, RegistryDiff};
pub use error::{RegistryError, Result};
pub use external::{ExternalRecord, Metaprefix};
pub use manager::{Manager, SearchResult};
pub use pattern::clean_pattern;
pub use resolve::Field;
pub use schema::{Author, Collection, Provider, Publication, Registry, Resource};
pub use store::DataPaths;
pub use uri_format::UriFormatter;
