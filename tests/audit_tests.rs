//! Integration tests for degree audit parsing and aggregation

use chrono::NaiveDate;
use degree_navigator::core::audit::{
    aggregate, parse_degree_audit, AuditAggregator, AuditParser, AuditSummary,
};
use degree_navigator::core::models::{DegreeAuditRecord, RequirementStatus};
use degree_navigator::core::store::{DocumentStore, MemoryStore};
use std::fs;

const SAMPLE_REPORT: &str = "samples/dars_report.txt";

fn sample_text() -> String {
    fs::read_to_string(SAMPLE_REPORT).expect("sample report should exist")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn codes(courses: &[degree_navigator::core::models::CourseRecord]) -> Vec<&str> {
    courses.iter().map(|c| c.course_code.as_str()).collect()
}

#[test]
fn test_sample_identity_and_totals() {
    let record = parse_degree_audit(&sample_text());

    assert_eq!(record.student_info.student_name, "Badger,Bucky");
    assert_eq!(record.student_info.catalog_year, "20231");
    assert_eq!(record.student_info.program, "DATA SCIENCE");

    assert_eq!(record.total_credits.earned, 78);
    assert_eq!(record.total_credits.in_progress, 14);
    assert_eq!(record.total_credits.needed, 120);
}

#[test]
fn test_sample_completed_courses_skip_inp() {
    let record = parse_degree_audit(&sample_text());

    assert_eq!(record.completed_courses.len(), 8);
    assert_eq!(record.completed_courses[0].course_code, "MATH 221");
    assert_eq!(record.completed_courses[0].term, "FA22");
    assert_eq!(record.completed_courses[0].course_name, "Calculus and Analytic Geometry 1");
    assert!(record
        .completed_courses
        .iter()
        .all(|course| !course.grade.eq_ignore_ascii_case("INP")));
}

#[test]
fn test_in_progress_split_follows_reference_date() {
    let text = sample_text();

    let before = AuditParser::new(date(2025, 1, 19)).parse(&text);
    assert_eq!(codes(&before.in_progress_courses), vec!["COMP SCI 320", "MATH 341"]);
    assert_eq!(codes(&before.upcoming_courses), vec!["STAT 436", "COMP SCI 400"]);
    assert!(before
        .in_progress_courses
        .iter()
        .chain(&before.upcoming_courses)
        .all(|course| course.grade == "-"));

    let after = AuditParser::new(date(2025, 1, 22)).parse(&text);
    assert_eq!(after.in_progress_courses.len(), 4);
    assert!(after.upcoming_courses.is_empty());
}

#[test]
fn test_requirement_sections() {
    let record = parse_degree_audit(&sample_text());

    let quantitative = &record.general_education["Quantitative Reasoning"];
    assert_eq!(quantitative.status, RequirementStatus::Ok);
    assert_eq!(quantitative.subsections["QR-A"].completed_courses, vec!["MATH 221"]);
    assert_eq!(quantitative.subsections["QR-B"].completed_courses, vec!["STAT 240"]);

    let communication = &record.general_education["Communication"];
    assert_eq!(communication.status, RequirementStatus::No);
    assert_eq!(
        communication.subsections["Communication Part B"].required_courses,
        vec!["NEEDS: 1 COURSE", "SELECT FROM: COMP SCI 270 OR L I S 461"]
    );

    assert_eq!(record.major_requirements.len(), 2);
    let core = &record.major_requirements["Core Requirements"];
    assert_eq!(
        core.subsections["Programming"].completed_courses,
        vec!["COMP SCI 300", "COMP SCI 220"]
    );
    let advanced = &core.subsections["Advanced Programming"];
    assert!(advanced.completed_courses.is_empty());
    assert_eq!(advanced.required_courses.len(), 2);

    // Subsections never leak into the next section.
    let electives = &record.major_requirements["Electives"];
    assert_eq!(electives.subsections.len(), 2);
    assert!(!electives.subsections.contains_key("Advanced Programming"));
}

#[test]
fn test_json_shape() {
    let record = parse_degree_audit(&sample_text());
    let json = serde_json::to_value(&record).unwrap();

    for key in [
        "student_info",
        "completed_courses",
        "in_progress_courses",
        "upcoming_courses",
        "general_education",
        "major_requirements",
        "total_credits",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["major_requirements"]["Electives"]["status"], "NO");

    let back: DegreeAuditRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_arbitrary_text_yields_defaults() {
    for text in ["", "\n\n\n", "hello world", "----\n----", "OK major:"] {
        let record = parse_degree_audit(text);
        assert!(record.completed_courses.is_empty(), "{text:?}");
        assert_eq!(record.total_credits.earned, 0);
    }
    assert!(parse_degree_audit("").is_empty());
}

#[test]
fn test_summary_of_sample() {
    let record = parse_degree_audit(&sample_text());
    let summary = aggregate([&record]);

    assert_eq!(summary.completed.len(), 8);
    assert!(summary.completed.contains("COMP SCI 300"));

    let expected_required = [
        "COMP SCI 400",
        "COMP SCI 354",
        "COMP SCI 532",
        "STAT 451",
        "COMP SCI 540",
        "L I S 461",
        "E C E 570",
    ];
    assert_eq!(summary.required.len(), expected_required.len());
    for code in expected_required {
        assert!(summary.required.contains(code), "missing {code}");
    }
}

#[test]
fn test_aggregator_merges_reports() {
    let text = sample_text();
    let second = "\
Degree Audit Report
Badger,Bucky Catalog Year: 20231
MATHEMATICS major
----
NO TOTAL CREDITS for the DEGREE
FA24 MATH 521 3.00 A Analysis I
----
NO  MATHEMATICS major: Upper Level
- 1) Algebra
     NEEDS: 1 COURSE
     SELECT FROM: MATH 541
----
";
    let mut aggregator = AuditAggregator::new(
        AuditParser::default(),
        MemoryStore::<String, DegreeAuditRecord>::new(),
    );
    let summary: AuditSummary =
        aggregator.summarize([("data-science", text.as_str()), ("math", second)]);

    assert_eq!(summary.completed.len(), 9);
    assert!(summary.completed.contains("MATH 521"));
    assert!(summary.required.contains("MATH 541"));
    assert_eq!(aggregator.store().len(), 2);
    assert!(aggregator.store().get(&"math".to_string()).is_some());
}
