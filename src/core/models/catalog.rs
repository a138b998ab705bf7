//! Course catalog entry model

use serde::{Deserialize, Serialize};

/// Phrase used by the catalog for graduate-only courses
pub const GRADUATE_STANDING: &str = "graduate/professional standing";

/// One course from the course catalog export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Normalized course code (e.g., "COMP SCI 300")
    pub code: String,
    /// Full title as printed (e.g., "COMP SCI 300 — Programming II")
    pub title: String,
    /// Credits column, kept verbatim ("3" or "1-3")
    pub credits: String,
    /// Catalog description
    pub description: String,
    /// Free-text requisite string
    pub requisites: String,
    /// Learning outcomes, empty when the export has no such column
    pub learning_outcomes: String,
    /// "Repeatable for Credit" column
    pub repeatable: String,
    /// "Last Taught" column
    pub last_taught: String,
    /// "Course Designation" column
    pub designation: String,
}

impl CatalogEntry {
    /// Whether the requisite text is exactly the graduate-standing phrase
    #[must_use]
    pub fn requires_only_graduate_standing(&self) -> bool {
        is_only_graduate_standing(&self.requisites)
    }

    /// Whether the entry lists any requisite text
    #[must_use]
    pub fn has_requisites(&self) -> bool {
        !self.requisites.trim().is_empty()
    }
}

/// Whether a requisite string is exactly "graduate/professional standing" (any case)
#[must_use]
pub fn is_only_graduate_standing(requisites: &str) -> bool {
    requisites.trim().eq_ignore_ascii_case(GRADUATE_STANDING)
}
