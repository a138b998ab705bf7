//! Audit command handler

use super::{audit_parser, read_text};
use degree_navigator::config::Config;
use degree_navigator::core::audit::{completed_codes, required_codes, AuditParser};
use degree_navigator::{error, info, verbose};
use std::path::{Path, PathBuf};

/// Run the audit command for one or more report text files.
///
/// # Arguments
/// * `input_files` - Paths to report text files
/// * `output_files` - Optional output paths; must match inputs 1:1 when provided
/// * `to_stdout` - Print JSON instead of writing files
/// * `config` - Configuration containing the output directory and reference date
///
/// A per-report summary follows each file when verbose output is enabled.
pub fn run(input_files: &[PathBuf], output_files: &[PathBuf], to_stdout: bool, config: &Config) {
    if input_files.is_empty() {
        eprintln!("✗ No input files provided.");
        return;
    }

    if !output_files.is_empty() && output_files.len() != input_files.len() {
        eprintln!(
            "✗ When using -o/--output, provide one output path per input file ({} inputs, {} outputs).",
            input_files.len(),
            output_files.len()
        );
        return;
    }

    let parser = match audit_parser(config) {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    info!("Audit reference date: {}", parser.reference_date());

    for (idx, input_file) in input_files.iter().enumerate() {
        let output_file = output_files.get(idx).map(PathBuf::as_path);
        if let Err(err) = parse_single(&parser, input_file, output_file, to_stdout, config) {
            error!("Audit failed for {}: {err}", input_file.display());
            eprintln!("{err}");
        }
    }
}

fn parse_single(
    parser: &AuditParser,
    input_file: &Path,
    output_file: Option<&Path>,
    to_stdout: bool,
    config: &Config,
) -> Result<(), String> {
    let text = read_text(input_file)?;
    let record = parser.parse(&text);
    if record.is_empty() {
        info!(
            "No audit markers recognized in {}; writing an empty record",
            input_file.display()
        );
    }

    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| format!("✗ Failed to serialize {}: {e}", input_file.display()))?;

    if to_stdout {
        println!("{json}");
    } else {
        let final_output_path = output_path(input_file, output_file, config)?;
        std::fs::write(&final_output_path, json).map_err(|e| {
            format!(
                "✗ Failed to write {}: {e}",
                final_output_path.display()
            )
        })?;
        println!("✓ Audit written to: {}", final_output_path.display());
    }

    verbose!(
        "\n=== {} ({}, catalog {}) ===",
        record.student_info.student_name,
        record.student_info.program,
        record.student_info.catalog_year
    );
    verbose!(
        "Completed: {}  In progress: {}  Upcoming: {}",
        record.completed_courses.len(),
        record.in_progress_courses.len(),
        record.upcoming_courses.len()
    );
    verbose!(
        "Credits: {} earned / {} needed ({} in progress)",
        record.total_credits.earned,
        record.total_credits.needed,
        record.total_credits.in_progress
    );
    verbose!(
        "Distinct completed codes: {}  Required codes: {}",
        completed_codes(&record).len(),
        required_codes(&record).len()
    );
    Ok(())
}

fn output_path(
    input_file: &Path,
    output_file: Option<&Path>,
    config: &Config,
) -> Result<PathBuf, String> {
    if let Some(output) = output_file {
        return Ok(output.to_path_buf());
    }

    let out_dir = PathBuf::from(&config.paths.out_dir);
    std::fs::create_dir_all(&out_dir).map_err(|e| {
        format!(
            "✗ Failed to create output directory {}: {e}",
            out_dir.display()
        )
    })?;

    let filename = input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("audit");
    Ok(out_dir.join(format!("{filename}.json")))
}
