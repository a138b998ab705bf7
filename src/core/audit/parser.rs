//! DARS-style degree audit parser
//!
//! The audit is free text with positional markers rather than a grammar, so
//! each field is recovered by its own independent scan:
//!
//! 1. Student name and catalog year from the second line
//! 2. Program from the line just above the first dashed delimiter
//! 3. Completed courses and credit totals from the "NO TOTAL CREDITS for the DEGREE" block
//! 4. In-progress vs. upcoming courses from the "COURSES currently IN-PROGRESS" block
//! 5. General education sections (`OK|NO University GENERAL EDUCATION: <label>`)
//! 6. Major requirement sections (`OK|NO <program> major: <label>`)
//!
//! Every scan is best-effort. A missing marker leaves its field at the default
//! value; parsing never fails.

use super::blocks::{block_lines, next_delimiter};
use crate::core::models::course::{is_in_progress_grade, PENDING_GRADE};
use crate::core::models::{
    CourseRecord, DegreeAuditRecord, RequirementSection, RequirementStatus, StudentInfo,
    Subsection, TotalCredits,
};
use crate::core::term::has_started;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Marker of the block listing every course counted toward the degree
pub const TOTAL_CREDITS_MARKER: &str = "NO TOTAL CREDITS for the DEGREE";

/// Marker of the block listing courses that are in progress or upcoming
pub const IN_PROGRESS_MARKER: &str = "COURSES currently IN-PROGRESS";

const CATALOG_MARKER: &str = " Catalog";
const YEAR_MARKER: &str = "Year:";
const MAJOR_WORD: &str = "major";
const NEEDS_PREFIX: &str = "NEEDS:";
const SELECT_PREFIX: &str = "SELECT FROM:";

/// `<term> <course code> <credits> <grade> <course name>`
static COURSE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{2}\d{2})\s+(.+?)\s+(\d+\.\d{2})\s+(\S+)\s+(.*)$")
        .expect("course line regex must compile")
});

static EARNED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"EARNED:\s*([\d.]+)\s*CREDITS").expect("earned credits regex must compile")
});

static IN_PROGRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"IN-PROGRESS\s+([\d.]+)\s*CREDITS")
        .expect("in-progress credits regex must compile")
});

static NEEDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"NEEDS:\s*([\d.]+)\s*CREDITS").expect("needed credits regex must compile")
});

static GENERAL_EDUCATION_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(OK|NO)\s+University\s+GENERAL\s+EDUCATION:\s+(.*)$")
        .expect("general education heading regex must compile")
});

static MAJOR_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(OK|NO)\s+(.*?)\s+major:\s+(.*)$").expect("major heading regex must compile")
});

/// `+ 1) Natural Science ...` / `- Electives ...`
static SUB_REQUIREMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]\s+(?:\d?\)?)?\s*(.*)$").expect("sub-requirement regex must compile")
});

static LEADING_ITEM_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\)\s*").expect("item number regex must compile")
});

/// Reference date used when none is supplied (the first week of spring 2025 registration)
#[must_use]
pub fn default_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 19).unwrap_or(NaiveDate::MIN)
}

/// Parse an audit with the default reference date.
///
/// # Examples
/// ```
/// use degree_navigator::core::audit::parse_degree_audit;
///
/// let record = parse_degree_audit("not an audit at all");
/// assert!(record.completed_courses.is_empty());
/// ```
#[must_use]
pub fn parse_degree_audit(raw: &str) -> DegreeAuditRecord {
    AuditParser::default().parse(raw)
}

/// Parse a single course line (`SP24 ASTRON 103 3.00 A The Evolving Universe`).
///
/// The line is trimmed first. Returns `None` when it does not have the
/// positional course layout.
#[must_use]
pub fn parse_course_line(line: &str) -> Option<CourseRecord> {
    let caps = COURSE_LINE.captures(line.trim())?;
    Some(CourseRecord::new(
        caps[1].to_string(),
        caps[2].to_string(),
        caps[3].parse().unwrap_or(0.0),
        caps[4].to_string(),
        caps[5].to_string(),
    ))
}

/// Degree audit parser
///
/// Holds the date against which in-progress courses are classified: a
/// course whose term starts after the reference date is upcoming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditParser {
    reference_date: NaiveDate,
}

impl Default for AuditParser {
    fn default() -> Self {
        Self::new(default_reference_date())
    }
}

impl AuditParser {
    /// Create a parser that classifies terms against `reference_date`
    #[must_use]
    pub const fn new(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    /// Reference date used for in-progress classification
    #[must_use]
    pub const fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Parse raw audit text into a structured record. Never fails.
    #[must_use]
    pub fn parse(&self, raw: &str) -> DegreeAuditRecord {
        let lines: Vec<&str> = raw.lines().collect();

        let mut student_info = parse_identity(&lines);
        student_info.program = parse_program(&lines);

        let total_block = block_lines(&lines, TOTAL_CREDITS_MARKER);
        if total_block.is_empty() {
            crate::debug!("Audit has no '{TOTAL_CREDITS_MARKER}' block");
        }

        let (in_progress_courses, upcoming_courses) = self.parse_in_progress(&lines);

        DegreeAuditRecord {
            student_info,
            completed_courses: parse_completed(&total_block),
            in_progress_courses,
            upcoming_courses,
            general_education: parse_sections(&lines, &GENERAL_EDUCATION_HEADING, 2),
            major_requirements: parse_sections(&lines, &MAJOR_HEADING, 3),
            total_credits: parse_totals(&total_block),
        }
    }

    /// Split the in-progress block into (started, not yet started) courses
    fn parse_in_progress(&self, lines: &[&str]) -> (Vec<CourseRecord>, Vec<CourseRecord>) {
        let block = block_lines(lines, IN_PROGRESS_MARKER);
        if block.is_empty() {
            crate::debug!("Audit has no '{IN_PROGRESS_MARKER}' block");
        }

        let mut in_progress = Vec::new();
        let mut upcoming = Vec::new();
        for mut course in block.iter().filter_map(|line| parse_course_line(line)) {
            if course.is_in_progress() {
                course.grade = PENDING_GRADE.to_string();
            }
            if has_started(&course.term, self.reference_date) {
                in_progress.push(course);
            } else {
                upcoming.push(course);
            }
        }
        (in_progress, upcoming)
    }
}

/// Student name and catalog year from "Last,First Catalog Year: 20231" on line 2
fn parse_identity(lines: &[&str]) -> StudentInfo {
    let mut info = StudentInfo::default();
    let Some(second) = lines.get(1).map(|line| line.trim()) else {
        return info;
    };
    let Some((name, _)) = second.split_once(CATALOG_MARKER) else {
        return info;
    };

    info.student_name = name.trim().to_string();
    if let Some(idx) = second.find(YEAR_MARKER) {
        info.catalog_year = second[idx + YEAR_MARKER.len()..].trim().to_string();
    }
    info
}

/// Program from the "DATA SCIENCE major" line just above the first delimiter
fn parse_program(lines: &[&str]) -> String {
    next_delimiter(lines, 0)
        .and_then(|idx| idx.checked_sub(1))
        .map(|idx| lines[idx].trim())
        .and_then(|line| line.split_once(MAJOR_WORD))
        .map(|(program, _)| program.trim().to_string())
        .unwrap_or_default()
}

fn parse_completed(block: &[&str]) -> Vec<CourseRecord> {
    block
        .iter()
        .filter_map(|line| parse_course_line(line))
        .filter(|course| !course.is_in_progress())
        .collect()
}

fn parse_totals(block: &[&str]) -> TotalCredits {
    let text = block.join("\n");
    TotalCredits {
        earned: capture_credits(&EARNED, &text),
        needed: capture_credits(&NEEDS, &text),
        in_progress: capture_credits(&IN_PROGRESS, &text),
    }
}

/// First credit amount matched by `pattern`, truncated to a whole number
fn capture_credits(pattern: &Regex, text: &str) -> u32 {
    pattern
        .captures(text)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .filter(|credits| credits.is_finite() && *credits >= 0.0)
        .map_or(0, |credits| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let whole = credits.trunc().min(f64::from(u32::MAX)) as u32;
            whole
        })
}

/// Collect every requirement section introduced by a `heading` line.
///
/// A section spans from its heading to the next heading of the same kind or
/// the next delimiter line, whichever comes first. `label_group` selects the
/// capture group used as the section key.
fn parse_sections(
    lines: &[&str],
    heading: &Regex,
    label_group: usize,
) -> BTreeMap<String, RequirementSection> {
    let headings: Vec<(usize, RequirementStatus, String)> = lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let caps = heading.captures(line)?;
            let status = RequirementStatus::from_token(&caps[1])?;
            let label = caps.get(label_group)?.as_str().trim().to_string();
            Some((idx, status, label))
        })
        .collect();

    let mut sections = BTreeMap::new();
    for (pos, (start, status, label)) in headings.iter().enumerate() {
        let next_heading = headings.get(pos + 1).map_or(lines.len(), |(idx, ..)| *idx);
        let delimiter = next_delimiter(lines, start + 1).unwrap_or(lines.len());
        let body = &lines[start + 1..next_heading.min(delimiter)];

        let mut section = RequirementSection::new(*status);
        section.subsections = parse_subsections(body);
        sections.insert(label.clone(), section);
    }
    sections
}

/// Split a section body on `+`/`-` sub-requirement lines and scan each span
fn parse_subsections(body: &[&str]) -> BTreeMap<String, Subsection> {
    let starts: Vec<(usize, String)> = body
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let caps = SUB_REQUIREMENT.captures(line.trim())?;
            let label = LEADING_ITEM_NUMBER.replace(caps[1].trim(), "");
            Some((idx, label.into_owned()))
        })
        .collect();

    let mut subsections = BTreeMap::new();
    for (pos, (start, label)) in starts.iter().enumerate() {
        let end = starts.get(pos + 1).map_or(body.len(), |(idx, _)| *idx);
        subsections.insert(label.clone(), scan_subsection(&body[start + 1..end]));
    }
    subsections
}

fn scan_subsection(span: &[&str]) -> Subsection {
    let mut subsection = Subsection::default();
    for line in span.iter().map(|line| line.trim()) {
        if line.starts_with(NEEDS_PREFIX) || line.starts_with(SELECT_PREFIX) {
            subsection.required_courses.push(line.to_string());
        }
        if let Some(course) = parse_course_line(line) {
            if !is_in_progress_grade(&course.grade) {
                subsection.completed_courses.push(course.course_code);
            }
        }
    }
    subsection
}
