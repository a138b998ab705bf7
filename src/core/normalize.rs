//! Course code normalization
//!
//! Audits, catalog titles and requirement lines all spell course codes slightly
//! differently ("COMP SCI 300", "COMP SCI300", "comp sci 300" with a non-breaking
//! space). Every comparison between two course references goes through
//! [`normalize_course_code`] first.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Separator between code and name in catalog titles ("MATH 222 — Calculus")
pub const TITLE_SEPARATOR: char = '—';

const NON_BREAKING_SPACE: char = '\u{a0}';

/// Department words (optionally `/`-joined cross-listings), a number and an optional letter suffix
static COURSE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z]+(?:\s+[a-z]+)*(?:/[a-z]+(?:\s+[a-z]+)*)*\s*\d+[a-z]?")
        .expect("course reference regex must compile")
});

/// Canonicalize a course code to uppercase "DEPT NUMBER".
///
/// Non-breaking spaces become ordinary spaces, the text is trimmed, and when
/// it ends in a run of digits exactly one space is placed between the
/// department prefix and that run. Idempotent.
///
/// # Examples
/// ```
/// use degree_navigator::core::normalize::normalize_course_code;
///
/// assert_eq!(normalize_course_code("COMP\u{a0}SCI200"), "COMP SCI 200");
/// assert_eq!(normalize_course_code("math 222"), "MATH 222");
/// ```
#[must_use]
pub fn normalize_course_code(text: &str) -> String {
    let cleaned = text.replace(NON_BREAKING_SPACE, " ");
    let code = cleaned.trim();

    let digits_start = code
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(idx, _)| idx);

    let spaced = match digits_start {
        Some(start) => {
            let dept = code[..start].trim();
            let number = &code[start..];
            if dept.is_empty() {
                number.to_string()
            } else {
                format!("{dept} {number}")
            }
        }
        None => code.to_string(),
    };

    spaced.to_uppercase()
}

/// Normalized code of a catalog title such as "COMP SCI 300 — Programming II"
#[must_use]
pub fn title_code(title: &str) -> String {
    let code = title.split(TITLE_SEPARATOR).next().unwrap_or(title);
    normalize_course_code(code)
}

/// Course references mentioned in free requirement text.
///
/// Returned trimmed but not normalized. A reference never starts with the
/// connective words `OR` / `AND`, so "L I S 461 OR E C E 570" yields
/// "L I S 461" and "E C E 570".
#[must_use]
pub fn extract_course_codes(text: &str) -> BTreeSet<String> {
    COURSE_REFERENCE
        .find_iter(text)
        .filter_map(|m| strip_connectives(m.as_str()))
        .collect()
}

fn strip_connectives(reference: &str) -> Option<String> {
    let mut rest = reference.trim();
    loop {
        let Some((word, tail)) = rest.split_once(char::is_whitespace) else {
            break;
        };
        if word.eq_ignore_ascii_case("or") || word.eq_ignore_ascii_case("and") {
            rest = tail.trim_start();
        } else {
            break;
        }
    }

    // Whatever is left must still start with a department word.
    rest.starts_with(|c: char| c.is_alphabetic())
        .then(|| rest.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserts_missing_space() {
        assert_eq!(normalize_course_code("COMP\u{a0}SCI200"), "COMP SCI 200");
        assert_eq!(normalize_course_code("MATH222"), "MATH 222");
    }

    #[test]
    fn test_collapses_space_before_number() {
        assert_eq!(normalize_course_code("  MATH   222 "), "MATH 222");
        assert_eq!(normalize_course_code("L I S\u{a0}461"), "L I S 461");
    }

    #[test]
    fn test_leaves_codes_without_trailing_digits() {
        assert_eq!(normalize_course_code("comp sci 200a"), "COMP SCI 200A");
        assert_eq!(normalize_course_code("elective"), "ELECTIVE");
        assert_eq!(normalize_course_code(""), "");
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(normalize_course_code("200"), "200");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "COMP\u{a0}SCI200",
            "math 222",
            " E C E  570 ",
            "stat240",
            "INTEGRATED LIBERAL STUDIES",
            "200",
            "COMP SCI 200A",
            "",
        ];
        for input in inputs {
            let once = normalize_course_code(input);
            assert_eq!(normalize_course_code(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_title_code() {
        assert_eq!(
            title_code("COMP SCI 300 — Programming II"),
            "COMP SCI 300"
        );
        assert_eq!(title_code("stat240"), "STAT 240");
    }

    #[test]
    fn test_extract_course_codes_from_select_line() {
        let codes = extract_course_codes("SELECT FROM: L I S 461 OR E C E 570");
        let expected: BTreeSet<String> = ["L I S 461", "E C E 570"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(codes, expected);
    }

    #[test]
    fn test_extract_course_codes_lowercase_connectives() {
        let codes = extract_course_codes("MATH 221 and COMP SCI 200 or STAT 240");
        assert!(codes.contains("MATH 221"));
        assert!(codes.contains("COMP SCI 200"));
        assert!(codes.contains("STAT 240"));
        assert_eq!(codes.len(), 3);
    }

    #[test]
    fn test_extract_course_codes_ignores_counts() {
        assert!(extract_course_codes("NEEDS: 1 COURSE").is_empty());
    }
}
