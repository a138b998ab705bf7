//! Recommend command handler

use super::path::CoursePath;
use super::{load_catalog, read_text, summarize_audits};
use degree_navigator::config::Config;
use degree_navigator::core::models::CandidateCourse;
use degree_navigator::core::recommend::RankedCandidates;
use degree_navigator::{error, info, verbose};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct Recommendation {
    #[serde(flatten)]
    candidate: CandidateCourse,
    #[serde(flatten)]
    path: CoursePath,
}

/// Filter the ranked candidates in `candidates_file` against the audits.
pub fn run(
    audit_files: &[PathBuf],
    candidates_file: &Path,
    as_json: bool,
    config: &Config,
) {
    if let Err(err) = recommend(audit_files, candidates_file, as_json, config) {
        error!("Recommendation failed: {err}");
        eprintln!("{err}");
    }
}

fn recommend(
    audit_files: &[PathBuf],
    candidates_file: &Path,
    as_json: bool,
    config: &Config,
) -> Result<(), String> {
    let ranked = RankedCandidates::from_json(&read_text(candidates_file)?).map_err(|e| {
        format!(
            "✗ Failed to read candidates from {}: {e}",
            candidates_file.display()
        )
    })?;
    info!("Loaded {} ranked candidate(s)", ranked.len());

    let catalog = load_catalog(config, false)?;
    let summary = summarize_audits(audit_files, config)?;
    verbose!(
        "✓ {} completed course(s), {} required course(s) across {} report(s)",
        summary.completed.len(),
        summary.required.len(),
        audit_files.len()
    );

    let selected = config.recommend_policy().recommend(
        &ranked,
        &[],
        config.recommend.top_k,
        &summary.completed,
        &summary.required,
        &catalog,
    );

    let selector = config.path_selector();
    let recommendations: Vec<Recommendation> = selected
        .into_iter()
        .map(|candidate| {
            let code = candidate.code();
            let selection = selector.select(&code, &summary.completed, &catalog);
            let path = CoursePath::new(code, selection, &summary.completed);
            Recommendation { candidate, path }
        })
        .collect();

    if as_json {
        let json = serde_json::to_string_pretty(&recommendations)
            .map_err(|e| format!("✗ Failed to serialize result: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    if recommendations.is_empty() {
        println!("✗ No courses left after filtering.");
        return Ok(());
    }

    println!("\n=== Recommended Courses ===\n");
    for (idx, rec) in recommendations.iter().enumerate() {
        println!("{}. {}", idx + 1, rec.candidate.title);
        if !rec.candidate.description.is_empty() {
            println!("   {}", rec.candidate.description);
        }
        println!("   {}", rec.path.describe());
    }
    Ok(())
}
