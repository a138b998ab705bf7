//! CSV parser for course catalog exports

use super::{Catalog, CatalogError};
use crate::core::models::CatalogEntry;
use crate::core::normalize::title_code;
use std::fs;
use std::path::Path;

const TITLE: &str = "Course Title";
const CREDITS: &str = "Credits";
const DESCRIPTION: &str = "Description";
const REQUISITES: &str = "Requisites";
const LEARNING_OUTCOMES: &str = "Learning Outcomes";
const REPEATABLE: &str = "Repeatable for Credit";
const LAST_TAUGHT: &str = "Last Taught";
const DESIGNATION: &str = "Course Designation";

/// Load a catalog CSV file
///
/// # Arguments
/// * `path` - Path to the CSV export
///
/// # Errors
/// Returns an error if the file cannot be read or its header is incomplete
pub fn load_catalog_csv<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = parse_catalog_csv(&content)?;
    crate::info!("Loaded {} courses from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Parse catalog CSV text
///
/// The first record is the header. Entries are keyed by the normalized code
/// in front of the em-dash in `Course Title`; a later row with the same code
/// replaces an earlier one.
///
/// # Errors
/// Returns an error if a required column is missing or a quote is never closed
pub fn parse_catalog_csv(text: &str) -> Result<Catalog, CatalogError> {
    let mut records = parse_records(text)?.into_iter();
    let headers = records.next().ok_or(CatalogError::MissingHeader)?;
    let columns = Columns::locate(&headers)?;

    let mut catalog = Catalog::new();
    for (idx, record) in records.enumerate() {
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        match columns.entry(&record) {
            Some(entry) => catalog.insert(entry),
            // idx + 2: one for the header, one for 1-based numbering
            None => crate::debug!("Skipping catalog record {} with empty title", idx + 2),
        }
    }
    Ok(catalog)
}

/// Column positions resolved from the header record
struct Columns {
    title: usize,
    credits: usize,
    description: usize,
    requisites: Option<usize>,
    learning_outcomes: Option<usize>,
    repeatable: Option<usize>,
    last_taught: Option<usize>,
    designation: Option<usize>,
}

impl Columns {
    fn locate(headers: &[String]) -> Result<Self, CatalogError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require =
            |name: &str| find(name).ok_or_else(|| CatalogError::MissingColumn(name.to_string()));

        Ok(Self {
            title: require(TITLE)?,
            credits: require(CREDITS)?,
            description: require(DESCRIPTION)?,
            requisites: find(REQUISITES),
            learning_outcomes: find(LEARNING_OUTCOMES),
            repeatable: find(REPEATABLE),
            last_taught: find(LAST_TAUGHT),
            designation: find(DESIGNATION),
        })
    }

    fn entry(&self, record: &[String]) -> Option<CatalogEntry> {
        let field = |idx: usize| {
            record
                .get(idx)
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };
        let optional = |idx: Option<usize>| idx.map(field).unwrap_or_default();

        let title = field(self.title);
        if title.is_empty() {
            return None;
        }

        Some(CatalogEntry {
            code: title_code(&title),
            title,
            credits: field(self.credits),
            description: field(self.description),
            requisites: optional(self.requisites),
            learning_outcomes: optional(self.learning_outcomes),
            repeatable: optional(self.repeatable),
            last_taught: optional(self.last_taught),
            designation: optional(self.designation),
        })
    }
}

/// Split CSV text into records of unquoted fields
///
/// Quoted fields may contain commas, newlines and doubled quotes.
fn parse_records(text: &str) -> Result<Vec<Vec<String>>, CatalogError> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut quote_line = 0;
    let mut chars = text.trim_start_matches('\u{feff}').chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                line += 1;
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(CatalogError::UnclosedQuote { line: quote_line });
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_with_quotes() {
        let text = "a,\"b, c\",\"say \"\"hi\"\"\"\r\n\"multi\nline\",x,\n";
        let records = parse_records(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec!["a", "b, c", "say \"hi\""]);
        assert_eq!(records[1], vec!["multi\nline", "x", ""]);
    }

    #[test]
    fn test_unclosed_quote() {
        let err = parse_records("a,b\nc,\"open\n").unwrap_err();
        assert!(matches!(err, CatalogError::UnclosedQuote { line: 2 }));
    }

    #[test]
    fn test_parse_catalog() {
        let csv = "\
Course Title,Credits,Description,Requisites,Last Taught
\"COMP SCI 300 — Programming II\",3,\"Data structures, objects\",\"COMP SCI 200, MATH 222\",Fall 2024
COMP SCI 760 — Machine Learning,3,Theory,Graduate/professional standing,
,3,Orphan row,,
";
        let catalog = parse_catalog_csv(csv).unwrap();
        assert_eq!(catalog.len(), 2);

        let entry = catalog.get("COMP SCI 300").unwrap();
        assert_eq!(entry.title, "COMP SCI 300 — Programming II");
        assert_eq!(entry.description, "Data structures, objects");
        assert_eq!(entry.requisites, "COMP SCI 200, MATH 222");
        assert_eq!(entry.last_taught, "Fall 2024");
        assert!(entry.designation.is_empty());

        assert!(catalog.get("COMP SCI 760").unwrap().requires_only_graduate_standing());
    }

    #[test]
    fn test_missing_column() {
        let err = parse_catalog_csv("Course Title,Credits\nMATH 221 — Calculus,5\n").unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn(ref name) if name == "Description"));
        assert!(matches!(parse_catalog_csv(""), Err(CatalogError::MissingHeader)));
    }

    #[test]
    fn test_requisites_column_is_optional() {
        let catalog =
            parse_catalog_csv("Course Title,Credits,Description\nMATH 221 — Calculus,5,Limits\n")
                .unwrap();
        assert!(!catalog.get("MATH 221").unwrap().has_requisites());
    }
}
