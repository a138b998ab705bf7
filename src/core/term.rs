//! Term code to start-date resolution
//!
//! A term code is a two-letter semester tag followed by a two-digit year
//! (`SP25`, `FA24`, `SU23`). The audit only tells us the term, so whether a
//! course is running yet is decided against the official first day of that term.

use chrono::NaiveDate;

/// Year used when the year digits of a term code cannot be read
const FALLBACK_YEAR: i32 = 2000;

/// Semester encoded by the first two characters of a term code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Semester {
    /// `SP`, starts January 21
    Spring,
    /// `SU`, starts June 1
    Summer,
    /// `FA`, starts September 7
    Fall,
    /// Any other tag, treated as starting January 1
    Other,
}

impl Semester {
    /// Semester for a two-letter tag
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "SP" => Self::Spring,
            "SU" => Self::Summer,
            "FA" => Self::Fall,
            _ => Self::Other,
        }
    }

    /// Month and day the semester starts
    #[must_use]
    pub const fn start_month_day(self) -> (u32, u32) {
        match self {
            Self::Spring => (1, 21),
            Self::Summer => (6, 1),
            Self::Fall => (9, 7),
            Self::Other => (1, 1),
        }
    }
}

/// Official start date of the term named by `term`.
///
/// Never fails: an unknown tag starts on January 1, and unreadable year
/// digits fall back to January 1, 2000.
#[must_use]
pub fn term_start_date(term: &str) -> NaiveDate {
    let term = term.trim();
    let semester = term.get(..2).map_or(Semester::Other, Semester::from_tag);
    let Some(year) = term_year(term) else {
        return january_first(FALLBACK_YEAR);
    };

    let (month, day) = semester.start_month_day();
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| january_first(year))
}

/// Whether the term has started on `reference` (the start day itself counts as started)
#[must_use]
pub fn has_started(term: &str, reference: NaiveDate) -> bool {
    reference >= term_start_date(term)
}

fn term_year(term: &str) -> Option<i32> {
    let digits = term.get(2..)?;
    if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<i32>().ok().map(|yy| 2000 + yy)
}

fn january_first(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_known_semesters() {
        assert_eq!(term_start_date("SP25"), date(2025, 1, 21));
        assert_eq!(term_start_date("FA24"), date(2024, 9, 7));
        assert_eq!(term_start_date("SU23"), date(2023, 6, 1));
    }

    #[test]
    fn test_unknown_tag_starts_january_first() {
        assert_eq!(term_start_date("WI26"), date(2026, 1, 1));
    }

    #[test]
    fn test_malformed_codes_fall_back() {
        assert_eq!(term_start_date("SPXX"), date(2000, 1, 1));
        assert_eq!(term_start_date("S"), date(2000, 1, 1));
        assert_eq!(term_start_date(""), date(2000, 1, 1));
        assert_eq!(term_start_date("FA2024"), date(2000, 1, 1));
    }

    #[test]
    fn test_spring_boundary() {
        assert!(!has_started("SP25", date(2025, 1, 19)));
        assert!(has_started("SP25", date(2025, 1, 21)));
        assert!(has_started("SP25", date(2025, 1, 22)));
    }
}
