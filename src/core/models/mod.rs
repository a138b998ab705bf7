//! Data models for `degree-navigator`

pub mod audit;
pub mod candidate;
pub mod catalog;
pub mod course;

pub use audit::{
    DegreeAuditRecord, RequirementSection, RequirementStatus, StudentInfo, Subsection,
    TotalCredits,
};
pub use candidate::CandidateCourse;
pub use catalog::CatalogEntry;
pub use course::CourseRecord;
