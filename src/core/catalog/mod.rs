//! Course catalog lookups

pub mod csv_parser;

pub use csv_parser::{load_catalog_csv, parse_catalog_csv};

use crate::core::models::CatalogEntry;
use crate::core::normalize::normalize_course_code;
use std::collections::{BTreeMap, HashMap};
use std::io;

/// Errors raised while loading a catalog export
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The file could not be read
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The text has no header record
    #[error("catalog has no header row")]
    MissingHeader,

    /// A required column is absent from the header
    #[error("catalog header is missing the '{0}' column")]
    MissingColumn(String),

    /// A quoted field runs to end of input
    #[error("unclosed quote starting on line {line}")]
    UnclosedQuote {
        /// 1-based line of the opening quote
        line: usize,
    },
}

/// Source of requisite text by course code
pub trait RequisiteLookup {
    /// Raw requisite text of `code`, if the course is known
    fn requisite_text(&self, code: &str) -> Option<&str>;
}

impl RequisiteLookup for HashMap<String, String> {
    fn requisite_text(&self, code: &str) -> Option<&str> {
        self.get(code).map(String::as_str)
    }
}

impl RequisiteLookup for BTreeMap<String, String> {
    fn requisite_text(&self, code: &str) -> Option<&str> {
        self.get(code).map(String::as_str)
    }
}

/// Course catalog keyed by normalized course code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry stored under its code
    pub fn insert(&mut self, entry: CatalogEntry) {
        self.entries.insert(entry.code.clone(), entry);
    }

    /// Entry for `code`, normalizing it first
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CatalogEntry> {
        self.entries
            .get(code)
            .or_else(|| self.entries.get(&normalize_course_code(code)))
    }

    /// Whether `code` is in the catalog
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in code order
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for entry in iter {
            catalog.insert(entry);
        }
        catalog
    }
}

impl RequisiteLookup for Catalog {
    fn requisite_text(&self, code: &str) -> Option<&str> {
        self.get(code).map(|entry| entry.requisites.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, requisites: &str) -> CatalogEntry {
        CatalogEntry {
            code: code.to_string(),
            title: format!("{code} — Example"),
            requisites: requisites.to_string(),
            ..CatalogEntry::default()
        }
    }

    #[test]
    fn test_lookup_normalizes_code() {
        let catalog: Catalog = [entry("COMP SCI 300", "COMP SCI 200")].into_iter().collect();
        assert_eq!(catalog.requisite_text("comp sci300"), Some("COMP SCI 200"));
        assert!(catalog.contains("COMP\u{a0}SCI 300"));
        assert_eq!(catalog.requisite_text("COMP SCI 400"), None);
    }

    #[test]
    fn test_later_entry_replaces_earlier() {
        let catalog: Catalog = [entry("MATH 221", "old"), entry("MATH 221", "new")]
            .into_iter()
            .collect();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.requisite_text("MATH 221"), Some("new"));
    }

    #[test]
    fn test_map_lookup() {
        let mut map = HashMap::new();
        map.insert("STAT 240".to_string(), "MATH 221".to_string());
        assert_eq!(map.requisite_text("STAT 240"), Some("MATH 221"));
        assert_eq!(map.requisite_text("STAT 340"), None);
    }
}
