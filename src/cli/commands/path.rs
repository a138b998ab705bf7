//! Path command handler

use super::{load_catalog, summarize_audits};
use degree_navigator::config::Config;
use degree_navigator::core::normalize::normalize_course_code;
use degree_navigator::core::prereq::{PathCost, PrereqPath};
use degree_navigator::error;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Path of one course with the prerequisites still to take
#[derive(Debug, Serialize)]
pub struct CoursePath {
    /// Normalized target code
    pub course: String,
    /// Selected path
    #[serde(flatten)]
    pub selection: PrereqPath,
    /// Prerequisites on the path not yet completed
    pub remaining: Vec<String>,
}

impl CoursePath {
    /// Attach the remaining prerequisites to a selection
    pub fn new(course: String, selection: PrereqPath, completed: &BTreeSet<String>) -> Self {
        let remaining = selection.remaining(completed);
        Self {
            course,
            selection,
            remaining,
        }
    }

    /// One-line human summary
    pub fn describe(&self) -> String {
        match self.selection.cost {
            PathCost::Unresolvable => {
                format!("{}: no known path (requisites could not be read)", self.course)
            }
            PathCost::Steps(0) => format!("{}: no prerequisites needed", self.course),
            cost => {
                let remaining = if self.remaining.is_empty() {
                    "none".to_string()
                } else {
                    self.remaining.join(", ")
                };
                format!(
                    "{}: {} (cost {cost}; still needed: {remaining})",
                    self.course,
                    self.selection.path.join(" -> ")
                )
            }
        }
    }
}

/// Select and print a prerequisite path for each course.
pub fn run(courses: &[String], audit_files: &[PathBuf], as_json: bool, config: &Config) {
    if let Err(err) = select_all(courses, audit_files, as_json, config) {
        error!("Path selection failed: {err}");
        eprintln!("{err}");
    }
}

fn select_all(
    courses: &[String],
    audit_files: &[PathBuf],
    as_json: bool,
    config: &Config,
) -> Result<(), String> {
    let catalog = load_catalog(config, true)?;
    let completed = summarize_audits(audit_files, config)?.completed;
    let selector = config.path_selector();

    let paths: Vec<CoursePath> = courses
        .iter()
        .map(|course| {
            let code = normalize_course_code(course);
            let selection = selector.select(&code, &completed, &catalog);
            CoursePath::new(code, selection, &completed)
        })
        .collect();

    if as_json {
        let json = serde_json::to_string_pretty(&paths)
            .map_err(|e| format!("✗ Failed to serialize result: {e}"))?;
        println!("{json}");
    } else {
        for path in &paths {
            println!("{}", path.describe());
        }
    }
    Ok(())
}
