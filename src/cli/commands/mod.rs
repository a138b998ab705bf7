//! CLI command handlers for `degnav`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod audit;
pub mod config;
pub mod path;
pub mod prereq;
pub mod recommend;

use degree_navigator::config::Config;
use degree_navigator::core::audit::{AuditAggregator, AuditParser, AuditSummary};
use degree_navigator::core::catalog::{load_catalog_csv, Catalog};
use degree_navigator::core::models::DegreeAuditRecord;
use degree_navigator::core::store::MemoryStore;
use degree_navigator::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Parser configured with the effective reference date
pub fn audit_parser(config: &Config) -> Result<AuditParser, String> {
    config
        .reference_date()
        .map(AuditParser::new)
        .map_err(|e| format!("✗ {e}"))
}

/// Read a text file, mapping failures to a CLI message
pub fn read_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("✗ Failed to read {}: {e}", path.display()))
}

/// Parse every audit file and union their completed and required course sets
pub fn summarize_audits(files: &[PathBuf], config: &Config) -> Result<AuditSummary, String> {
    let mut aggregator = AuditAggregator::new(
        audit_parser(config)?,
        MemoryStore::<String, DegreeAuditRecord>::new(),
    );
    let documents = files
        .iter()
        .map(|file| Ok((file.to_string_lossy().to_string(), read_text(file)?)))
        .collect::<Result<Vec<(String, String)>, String>>()?;

    Ok(aggregator.summarize(
        documents
            .iter()
            .map(|(key, text)| (key.as_str(), text.as_str())),
    ))
}

/// Load the configured catalog
///
/// With `required` unset a missing catalog path yields an empty catalog.
pub fn load_catalog(config: &Config, required: bool) -> Result<Catalog, String> {
    let path = PathBuf::from(&config.paths.catalog);
    if config.paths.catalog.is_empty() || !path.exists() {
        if required {
            return Err(format!(
                "✗ Course catalog not found at '{}' (set it with --catalog or `config set catalog`)",
                path.display()
            ));
        }
        warn!(
            "Course catalog not found at '{}'; continuing without requisites",
            path.display()
        );
        return Ok(Catalog::new());
    }

    let catalog = load_catalog_csv(&path).map_err(|e| format!("✗ {e}"))?;
    info!("Catalog ready: {} courses", catalog.len());
    Ok(catalog)
}
