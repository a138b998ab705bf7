//! Recommendation candidate model

use serde::{Deserialize, Serialize};

/// A course stub returned by the similarity-search service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCourse {
    /// Catalog title, usually "CODE — Name"
    #[serde(alias = "courseTitle")]
    pub title: String,

    /// One-line description
    #[serde(default, alias = "oneLinerDescription")]
    pub description: String,
}

impl CandidateCourse {
    /// Create a new candidate
    #[must_use]
    pub const fn new(title: String, description: String) -> Self {
        Self { title, description }
    }

    /// Normalized course code taken from the title
    #[must_use]
    pub fn code(&self) -> String {
        crate::core::normalize::title_code(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_from_title() {
        let candidate = CandidateCourse::new(
            "COMP SCI 540 — Introduction to Artificial Intelligence".to_string(),
            String::new(),
        );
        assert_eq!(candidate.code(), "COMP SCI 540");
    }

    #[test]
    fn test_deserialize_search_field_names() {
        let json = r#"{"courseTitle": "MATH 340 — Linear Algebra", "oneLinerDescription": "Matrices"}"#;
        let candidate: CandidateCourse = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.title, "MATH 340 — Linear Algebra");
        assert_eq!(candidate.description, "Matrices");
    }
}
