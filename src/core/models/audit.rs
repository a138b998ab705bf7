//! Degree audit record model

use super::CourseRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Satisfaction status printed in front of a requirement heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementStatus {
    /// Requirement is satisfied
    #[serde(rename = "OK")]
    Ok,
    /// Requirement is not yet satisfied
    #[serde(rename = "NO")]
    No,
}

impl RequirementStatus {
    /// Parse the literal `OK` / `NO` token
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "OK" => Some(Self::Ok),
            "NO" => Some(Self::No),
            _ => None,
        }
    }

    /// Whether the requirement is satisfied
    #[must_use]
    pub const fn is_satisfied(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for RequirementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::No => write!(f, "NO"),
        }
    }
}

/// Student identity block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    /// Name as printed before " Catalog" on the second line
    pub student_name: String,
    /// Catalog year token (e.g., "20231")
    pub catalog_year: String,
    /// Program name (e.g., "DATA SCIENCE")
    pub program: String,
}

/// Credit totals for the whole degree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalCredits {
    /// Credits already earned
    pub earned: u32,
    /// Credits still needed
    pub needed: u32,
    /// Credits currently in progress
    pub in_progress: u32,
}

/// One `+`/`-` sub-requirement inside a requirement section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    /// Raw course designations completed toward this sub-requirement
    pub completed_courses: Vec<String>,
    /// Raw requirement lines ("NEEDS: ...", "SELECT FROM: ...")
    pub required_courses: Vec<String>,
}

/// A general-education or major requirement heading and its sub-requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementSection {
    /// OK / NO status of the heading
    pub status: RequirementStatus,
    /// Sub-requirements keyed by label (leading "N)" removed)
    pub subsections: BTreeMap<String, Subsection>,
}

impl RequirementSection {
    /// Create a section with no sub-requirements
    #[must_use]
    pub const fn new(status: RequirementStatus) -> Self {
        Self {
            status,
            subsections: BTreeMap::new(),
        }
    }
}

/// Structured form of a DARS-style degree audit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DegreeAuditRecord {
    /// Student identity
    pub student_info: StudentInfo,
    /// Completed courses in document order
    pub completed_courses: Vec<CourseRecord>,
    /// Courses in a term that has already started
    pub in_progress_courses: Vec<CourseRecord>,
    /// Courses in a term that has not started yet
    pub upcoming_courses: Vec<CourseRecord>,
    /// General education sections keyed by heading label
    pub general_education: BTreeMap<String, RequirementSection>,
    /// Major requirement sections keyed by heading label
    pub major_requirements: BTreeMap<String, RequirementSection>,
    /// Degree credit totals
    pub total_credits: TotalCredits,
}

impl DegreeAuditRecord {
    /// Every raw requirement line listed under the major requirements
    pub fn major_requirement_lines(&self) -> impl Iterator<Item = &str> {
        self.major_requirements
            .values()
            .flat_map(|section| section.subsections.values())
            .flat_map(|sub| sub.required_courses.iter().map(String::as_str))
    }

    /// Whether the parser recognized nothing at all in the document
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
