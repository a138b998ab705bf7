//! Picking one satisfying prerequisite sequence for a target course

use super::parser::{tokenize, PrereqParser, DEFAULT_MAX_DEPTH};
use super::sequences::{count_sequences, generate_sequences};
use crate::core::catalog::RequisiteLookup;
use crate::core::models::catalog::is_only_graduate_standing;
use crate::core::normalize::normalize_course_code;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Number of courses on a path, or unresolvable
///
/// Every finite cost orders before [`PathCost::Unresolvable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathCost {
    /// Courses on the path, target included
    ///
    /// The prerequisite count alone is one less for any non-trivial path.
    Steps(usize),
    /// The requisite text could not be interpreted
    Unresolvable,
}

impl PathCost {
    /// Whether a path is known
    #[must_use]
    pub const fn is_resolvable(self) -> bool {
        matches!(self, Self::Steps(_))
    }

    /// Finite step count, if any
    #[must_use]
    pub const fn steps(self) -> Option<usize> {
        match self {
            Self::Steps(steps) => Some(steps),
            Self::Unresolvable => None,
        }
    }

    /// Cost as a float, with `Unresolvable` mapped to positive infinity
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.steps().map_or(f64::INFINITY, |steps| steps as f64)
    }
}

impl fmt::Display for PathCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Steps(steps) => write!(f, "{steps}"),
            Self::Unresolvable => write!(f, "∞"),
        }
    }
}

impl Serialize for PathCost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Steps(steps) => serializer.serialize_u64(*steps as u64),
            Self::Unresolvable => serializer.serialize_str("unresolvable"),
        }
    }
}

/// Result of path selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrereqPath {
    /// Cost of the path
    pub cost: PathCost,
    /// Prerequisites in order, ending with the target course
    pub path: Vec<String>,
}

impl PrereqPath {
    /// Zero-cost path holding only the target
    #[must_use]
    pub fn trivial(code: &str) -> Self {
        Self {
            cost: PathCost::Steps(0),
            path: vec![code.to_string()],
        }
    }

    /// Path holding only the target, flagged unresolvable
    #[must_use]
    pub fn unresolvable(code: &str) -> Self {
        Self {
            cost: PathCost::Unresolvable,
            path: vec![code.to_string()],
        }
    }

    /// The target course (last path element)
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// Prerequisites before the target that the student has not completed yet
    #[must_use]
    pub fn remaining(&self, completed: &BTreeSet<String>) -> Vec<String> {
        let prerequisites = self.path.len().saturating_sub(1);
        self.path[..prerequisites]
            .iter()
            .filter(|code| !completed.contains(&normalize_course_code(code)))
            .cloned()
            .collect()
    }
}

/// Chooses the first sequence a requisite expression denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSelector {
    max_sequences: Option<usize>,
    max_depth: usize,
}

impl Default for PathSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl PathSelector {
    /// Selector without an enumeration bound
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_sequences: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Treat expressions with more than `limit` sequences as unresolvable
    #[must_use]
    pub const fn with_max_sequences(limit: usize) -> Self {
        Self {
            max_sequences: Some(limit),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Treat expressions nested deeper than `depth` parentheses as unresolvable
    #[must_use]
    pub const fn nesting_limit(self, depth: usize) -> Self {
        Self {
            max_depth: depth,
            ..self
        }
    }

    /// Configured enumeration bound
    #[must_use]
    pub const fn max_sequences(&self) -> Option<usize> {
        self.max_sequences
    }

    /// Configured nesting bound
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Path to `code` given the student's completed courses.
    ///
    /// Completed targets and courses without real requisites cost nothing.
    /// Otherwise the first generated sequence is taken and `code` appended;
    /// no alternatives are compared and prerequisites are not expanded
    /// recursively. Text that fails to parse, nests too deeply or expands to
    /// too many sequences yields an unresolvable path.
    pub fn select<C>(&self, code: &str, completed: &BTreeSet<String>, catalog: &C) -> PrereqPath
    where
        C: RequisiteLookup + ?Sized,
    {
        if completed.contains(code) || completed.contains(&normalize_course_code(code)) {
            return PrereqPath::trivial(code);
        }

        let text = match catalog.requisite_text(code) {
            Some(text) if !text.trim().is_empty() && !is_only_graduate_standing(text) => text,
            _ => return PrereqPath::trivial(code),
        };

        let tree = match PrereqParser::with_max_depth(tokenize(text), self.max_depth).parse() {
            Ok(tree) => tree,
            Err(e) => {
                crate::warn!("Cannot parse requisites of {code} ({text:?}): {e}");
                return PrereqPath::unresolvable(code);
            }
        };

        if let Some(limit) = self.max_sequences {
            let count = count_sequences(&tree);
            if count > limit {
                crate::warn!(
                    "Requisites of {code} expand to {count} sequences (limit {limit}); skipping"
                );
                return PrereqPath::unresolvable(code);
            }
        }

        let mut path = generate_sequences(&tree)
            .into_iter()
            .next()
            .unwrap_or_default();
        path.push(code.to_string());
        crate::debug!("Selected path for {code}: {}", path.join(" -> "));

        PrereqPath {
            cost: PathCost::Steps(path.len()),
            path,
        }
    }
}

/// [`PathSelector::select`] without an enumeration bound
pub fn select_path<C>(code: &str, completed: &BTreeSet<String>, catalog: &C) -> PrereqPath
where
    C: RequisiteLookup + ?Sized,
{
    PathSelector::new().select(code, completed, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn catalog(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(code, text)| ((*code).to_string(), (*text).to_string()))
            .collect()
    }

    fn set(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_first_alternative_is_chosen() {
        let catalog = catalog(&[("COMP SCI 300", "COMP SCI 200, MATH 222")]);
        let result = select_path("COMP SCI 300", &BTreeSet::new(), &catalog);
        assert_eq!(result.cost, PathCost::Steps(2));
        assert_eq!(result.path, vec!["COMP SCI 200", "COMP SCI 300"]);
    }

    #[test]
    fn test_and_group_keeps_leaf_order() {
        let catalog = catalog(&[("COMP SCI 300", "MATH 221 and (MATH 222 or MATH 234)")]);
        let result = select_path("COMP SCI 300", &BTreeSet::new(), &catalog);
        assert_eq!(result.path, vec!["MATH 221", "MATH 222", "COMP SCI 300"]);
        assert_eq!(result.cost, PathCost::Steps(3));
    }

    #[test]
    fn test_trivial_cases() {
        let catalog = catalog(&[
            ("COMP SCI 300", "COMP SCI 200"),
            ("COMP SCI 760", "Graduate/Professional standing"),
            ("COMP SCI 240", "   "),
        ]);
        for (code, completed) in [
            ("COMP SCI 300", set(&["COMP SCI 300"])),
            ("COMP SCI 760", BTreeSet::new()),
            ("COMP SCI 240", BTreeSet::new()),
            ("COMP SCI 999", BTreeSet::new()),
        ] {
            let result = select_path(code, &completed, &catalog);
            assert_eq!(result, PrereqPath::trivial(code), "{code}");
        }
    }

    #[test]
    fn test_parse_failure_is_unresolvable() {
        let catalog = catalog(&[("COMP SCI 400", "(COMP SCI 300 or COMP SCI 367")]);
        let result = select_path("COMP SCI 400", &BTreeSet::new(), &catalog);
        assert_eq!(result.cost, PathCost::Unresolvable);
        assert!(!result.cost.is_resolvable());
        assert!(result.cost.as_f64().is_infinite());
        assert_eq!(result.path, vec!["COMP SCI 400"]);
    }

    #[test]
    fn test_sequence_limit() {
        let catalog = catalog(&[("STAT 340", "(A or B) and (C or D)")]);
        let bounded = PathSelector::with_max_sequences(3);
        assert_eq!(
            bounded.select("STAT 340", &BTreeSet::new(), &catalog).cost,
            PathCost::Unresolvable
        );
        let roomy = PathSelector::with_max_sequences(4);
        assert_eq!(
            roomy.select("STAT 340", &BTreeSet::new(), &catalog).path,
            vec!["A", "C", "STAT 340"]
        );
    }

    #[test]
    fn test_remaining_excludes_completed_and_target() {
        let catalog = catalog(&[("COMP SCI 300", "MATH 221 and MATH 222")]);
        let result = select_path("COMP SCI 300", &set(&["MATH 221"]), &catalog);
        assert_eq!(result.remaining(&set(&["MATH 221"])), vec!["MATH 222"]);
        assert_eq!(result.target(), Some("COMP SCI 300"));
    }

    #[test]
    fn test_cost_ordering_and_json() {
        assert!(PathCost::Steps(usize::MAX) < PathCost::Unresolvable);
        assert_eq!(PathCost::Unresolvable.to_string(), "∞");
        let json = serde_json::to_value(PrereqPath::trivial("MATH 221")).unwrap();
        assert_eq!(json, serde_json::json!({"cost": 0, "path": ["MATH 221"]}));
    }

    #[test]
    fn test_deep_nesting_is_unresolvable() {
        let deep = format!("{}MATH 221{}", "(".repeat(20_000), ")".repeat(20_000));
        let catalog = catalog(&[("COMP SCI 300", deep.as_str())]);
        let result = select_path("COMP SCI 300", &BTreeSet::new(), &catalog);
        assert_eq!(result, PrereqPath::unresolvable("COMP SCI 300"));

        let shallow = catalog_with_depth(3);
        assert_eq!(
            select_path("COMP SCI 300", &BTreeSet::new(), &shallow).cost,
            PathCost::Steps(2)
        );
        assert_eq!(
            PathSelector::new()
                .nesting_limit(2)
                .select("COMP SCI 300", &BTreeSet::new(), &shallow)
                .cost,
            PathCost::Unresolvable
        );
    }

    fn catalog_with_depth(depth: usize) -> HashMap<String, String> {
        let text = format!("{}MATH 221{}", "(".repeat(depth), ")".repeat(depth));
        catalog(&[("COMP SCI 300", text.as_str())])
    }
}
