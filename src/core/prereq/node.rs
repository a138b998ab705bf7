//! Boolean requisite tree

use serde::Serialize;
use std::fmt;

/// A parsed requisite expression
///
/// Built once per requisite string and never mutated. Interior nodes always
/// have at least two children; single-child groups collapse to the child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrereqNode {
    /// Every child is required, in order
    And(Vec<PrereqNode>),
    /// Any one child satisfies the requirement
    Or(Vec<PrereqNode>),
    /// An opaque course reference or condition ("MATH 221", "consent of instructor")
    Leaf(String),
}

impl PrereqNode {
    /// Leaf holding the trimmed `value`
    #[must_use]
    pub fn leaf(value: &str) -> Self {
        Self::Leaf(value.trim().to_string())
    }

    /// Conjunction of `children`, collapsing a single child to itself
    #[must_use]
    pub fn and(mut children: Vec<Self>) -> Self {
        if children.len() == 1 {
            children.remove(0)
        } else {
            Self::And(children)
        }
    }

    /// Disjunction of `children`, collapsing a single child to itself
    #[must_use]
    pub fn or(mut children: Vec<Self>) -> Self {
        if children.len() == 1 {
            children.remove(0)
        } else {
            Self::Or(children)
        }
    }

    /// Leaf values in left-to-right order
    #[must_use]
    pub fn leaves(&self) -> Vec<&str> {
        match self {
            Self::Leaf(value) => vec![value.as_str()],
            Self::And(children) | Self::Or(children) => {
                children.iter().flat_map(Self::leaves).collect()
            }
        }
    }

    /// Nesting depth; a leaf has depth 1
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::And(children) | Self::Or(children) => {
                1 + children.iter().map(Self::depth).max().unwrap_or(0)
            }
        }
    }
}

impl fmt::Display for PrereqNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (children, joiner) = match self {
            Self::Leaf(value) => return write!(f, "{value}"),
            Self::And(children) => (children, " AND "),
            Self::Or(children) => (children, " OR "),
        };
        write!(f, "(")?;
        for (idx, child) in children.iter().enumerate() {
            if idx > 0 {
                write!(f, "{joiner}")?;
            }
            write!(f, "{child}")?;
        }
        write!(f, ")")
    }
}
