//! Checksum utilities for export integrity verification
//!
//! An export directory may carry a `checksums.sha256` manifest in the
//! `sha256sum` format: one `<hex>  <relative path>` line per file.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Name of the manifest written next to exported files
pub const MANIFEST_NAME: &str = "checksums.sha256";

/// SHA256 checksum of exported content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum(String);

impl Checksum {
    /// Compute checksum from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Compute checksum from a string
    pub fn from_content(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    /// Compute checksum of a file on disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_bytes(&fs::read(path)?))
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify that content matches this checksum
    pub fn verify(&self, content: &str) -> bool {
        let computed = Self::from_content(content);
        self.0 == computed.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Checksum {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Checksum {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Write a manifest in `dir` covering `files` (paths relative to `dir`)
pub fn write_manifest(dir: impl AsRef<Path>, files: &[PathBuf]) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let mut files: Vec<&PathBuf> = files.iter().collect();
    files.sort();

    let mut lines = Vec::with_capacity(files.len());
    for file in files {
        let checksum = Checksum::from_file(dir.join(file))?;
        lines.push(format!("{}  {}", checksum, file.display()));
    }

    let manifest_path = dir.join(MANIFEST_NAME);
    fs::write(&manifest_path, lines.join("\n") + "\n")?;
    Ok(manifest_path)
}

/// Check every file listed in the manifest, returning those that differ
/// or are missing
pub fn verify_manifest(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let content = fs::read_to_string(dir.join(MANIFEST_NAME))?;

    let mut mismatched = Vec::new();
    for line in content.lines().filter(|line| !line.trim().is_empty()) {
        let Some((expected, file)) = line.split_once("  ") else {
            continue;
        };
        let file = PathBuf::from(file);
        let matches = match fs::read(dir.join(&file)) {
            Ok(data) => Checksum::from_bytes(&data).as_str() == expected,
            Err(_) => false,
        };
        if !matches {
            mismatched.push(file);
        }
    }
    Ok(mismatched)
}
