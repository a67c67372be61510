//! Operator-maintained brand correction table.

use std::collections::HashMap;

use serde::Serialize;

/// Maps an original brand spelling to its corrected form. Corrections are
/// consulted at scoring/search time; source records are never rewritten.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct BrandAliasMap {
    entries: HashMap<String, String>,
}

impl BrandAliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a correction. The corrected value is upper-cased before
    /// storage; a later write for the same original overwrites.
    pub fn set(&mut self, original: &str, corrected: &str) {
        self.entries
            .insert(original.to_string(), corrected.to_uppercase());
    }

    /// The corrected brand if one is recorded, else the original.
    pub fn resolve<'a>(&'a self, original: &'a str) -> &'a str {
        self.entries
            .get(original)
            .map(String::as_str)
            .unwrap_or(original)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &HashMap<String, String> {
        &self.entries
    }
}
