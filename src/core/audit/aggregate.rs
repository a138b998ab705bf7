//! Merging parsed audits into completed / required course sets

use super::parser::AuditParser;
use crate::core::models::DegreeAuditRecord;
use crate::core::normalize::{extract_course_codes, normalize_course_code};
use crate::core::store::DocumentStore;
use serde::Serialize;
use std::collections::BTreeSet;

/// Normalized course codes a student has finished and still has to choose from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    /// Codes of completed courses
    pub completed: BTreeSet<String>,
    /// Codes mentioned by unmet major requirement lines
    pub required: BTreeSet<String>,
}

impl AuditSummary {
    /// Union another summary into this one
    pub fn merge(&mut self, other: Self) {
        self.completed.extend(other.completed);
        self.required.extend(other.required);
    }
}

/// Normalized codes of every completed course in the record
#[must_use]
pub fn completed_codes(record: &DegreeAuditRecord) -> BTreeSet<String> {
    record
        .completed_courses
        .iter()
        .map(|course| normalize_course_code(&course.course_code))
        .collect()
}

/// Normalized codes referenced by the major requirement lines ("SELECT FROM: ...")
#[must_use]
pub fn required_codes(record: &DegreeAuditRecord) -> BTreeSet<String> {
    record
        .major_requirement_lines()
        .flat_map(extract_course_codes)
        .map(|code| normalize_course_code(&code))
        .collect()
}

/// Set-union of the completed and required codes of several audits
pub fn aggregate<'a, I>(records: I) -> AuditSummary
where
    I: IntoIterator<Item = &'a DegreeAuditRecord>,
{
    records
        .into_iter()
        .fold(AuditSummary::default(), |mut summary, record| {
            summary.merge(AuditSummary {
                completed: completed_codes(record),
                required: required_codes(record),
            });
            summary
        })
}

/// Parses audits on demand and memoizes the records in a [`DocumentStore`]
#[derive(Debug)]
pub struct AuditAggregator<S> {
    parser: AuditParser,
    store: S,
}

impl<S: DocumentStore<String, DegreeAuditRecord>> AuditAggregator<S> {
    /// Create an aggregator over an injected store
    #[must_use]
    pub const fn new(parser: AuditParser, store: S) -> Self {
        Self { parser, store }
    }

    /// Parsed record for the document stored under `key`, parsing `raw` on a miss
    pub fn record(&mut self, key: &str, raw: &str) -> DegreeAuditRecord {
        if let Some(record) = self.store.get(&key.to_string()) {
            crate::debug!("Using cached audit record for {key}");
            return record;
        }
        let record = self.parser.parse(raw);
        self.store.set(key.to_string(), record.clone());
        record
    }

    /// Drop the cached record for `key`
    pub fn forget(&mut self, key: &str) {
        self.store.delete(&key.to_string());
    }

    /// Parse (or reuse) every `(key, text)` document and union their course sets
    pub fn summarize<'a, I>(&mut self, documents: I) -> AuditSummary
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let records: Vec<DegreeAuditRecord> = documents
            .into_iter()
            .map(|(key, raw)| self.record(key, raw))
            .collect();
        let summary = aggregate(&records);
        crate::info!(
            "Aggregated {} audit(s): {} completed, {} required",
            records.len(),
            summary.completed.len(),
            summary.required.len()
        );
        summary
    }

    /// The underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }
}
