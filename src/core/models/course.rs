//! Course record model

use serde::{Deserialize, Serialize};

/// Grade token the audit uses for a course that is still running
pub const IN_PROGRESS_GRADE: &str = "INP";

/// Grade substituted for [`IN_PROGRESS_GRADE`] in the in-progress block
pub const PENDING_GRADE: &str = "-";

/// A single course line taken from a degree audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Term code (e.g., "SP24", "FA23")
    pub term: String,

    /// Course designation exactly as printed (e.g., "COMP SCI 300"), not normalized
    pub course_code: String,

    /// Credit hours (can be fractional)
    pub credits: f32,

    /// Grade token (e.g., "A", "AB", "CR", or "-" for a pending course)
    pub grade: String,

    /// Course name (e.g., "The Evolving Universe")
    pub course_name: String,
}

impl CourseRecord {
    /// Create a new course record
    ///
    /// # Arguments
    /// * `term` - Term code
    /// * `course_code` - Raw course designation
    /// * `credits` - Credit hours
    /// * `grade` - Grade token
    /// * `course_name` - Course name
    #[must_use]
    pub const fn new(
        term: String,
        course_code: String,
        credits: f32,
        grade: String,
        course_name: String,
    ) -> Self {
        Self {
            term,
            course_code,
            credits,
            grade,
            course_name,
        }
    }

    /// Whether the grade token marks the course as in progress ("INP", any case)
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        is_in_progress_grade(&self.grade)
    }

    /// The course designation in canonical "DEPT NUMBER" form
    #[must_use]
    pub fn normalized_code(&self) -> String {
        crate::core::normalize::normalize_course_code(&self.course_code)
    }
}

/// Whether a raw grade token means "in progress"
#[must_use]
pub fn is_in_progress_grade(grade: &str) -> bool {
    grade.eq_ignore_ascii_case(IN_PROGRESS_GRADE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(grade: &str) -> CourseRecord {
        CourseRecord::new(
            "SP24".to_string(),
            "ASTRON 103".to_string(),
            3.0,
            grade.to_string(),
            "The Evolving Universe".to_string(),
        )
    }

    #[test]
    fn test_record_creation() {
        let course = record("A");

        assert_eq!(course.term, "SP24");
        assert_eq!(course.course_code, "ASTRON 103");
        assert!((course.credits - 3.0).abs() < f32::EPSILON);
        assert_eq!(course.grade, "A");
        assert_eq!(course.course_name, "The Evolving Universe");
    }

    #[test]
    fn test_in_progress_grade_is_case_insensitive() {
        assert!(record("INP").is_in_progress());
        assert!(record("inp").is_in_progress());
        assert!(!record("A").is_in_progress());
        assert!(!record("-").is_in_progress());
    }

    #[test]
    fn test_normalized_code() {
        let mut course = record("A");
        course.course_code = "comp sci300".to_string();
        assert_eq!(course.normalized_code(), "COMP SCI 300");
    }
}
