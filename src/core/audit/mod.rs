//! Degree audit parsing

pub mod aggregate;
pub mod blocks;
pub mod parser;

pub use aggregate::{aggregate, completed_codes, required_codes, AuditAggregator, AuditSummary};
pub use parser::{default_reference_date, parse_course_line, parse_degree_audit, AuditParser};
