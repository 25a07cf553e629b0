//! Identifier patterns
//!
//! Patterns from external registries are cleaned before use: any trailing
//! `?` is removed and the expression is anchored at both ends.

use regex::Regex;

use crate::error::{RegistryError, Result};
use crate::resolve::{self, resolve_text, Field};
use crate::schema::Resource;

/// Clean a regular expression string.
///
/// Applying it twice gives the same result as applying it once.
pub fn clean_pattern(pattern: &str) -> String {
    let mut rv = pattern.trim_end_matches('?').to_string();
    if !rv.starts_with('^') {
        rv.insert(0, '^');
    }
    if !rv.ends_with('$') {
        rv.push('$');
    }
    rv
}

impl Resource {
    /// Get the identifier pattern.
    ///
    /// A curated pattern is returned as written; MIRIAM and Wikidata
    /// patterns are cleaned with [`clean_pattern`].
    pub fn get_pattern(&self) -> Option<String> {
        if let Some(pattern) = &self.pattern {
            return Some(pattern.clone());
        }
        resolve_text(self, Field::Pattern, resolve::PATTERN_PRIORITY).map(clean_pattern)
    }

    /// Compile the identifier pattern
    pub fn get_pattern_re(&self) -> Result<Option<Regex>> {
        self.get_pattern()
            .map(|pattern| self.compile(&pattern))
            .transpose()
    }

    /// The pattern compiled to match whole identifiers only
    pub(crate) fn get_full_match_re(&self) -> Result<Option<Regex>> {
        self.get_pattern()
            .map(|pattern| self.compile(&format!("^(?:{pattern})$")))
            .transpose()
    }

    fn compile(&self, pattern: &str) -> Result<Regex> {
        Regex::new(pattern).map_err(|source| RegistryError::Pattern {
            prefix: self.prefix().to_string(),
            source,
        })
    }
}
