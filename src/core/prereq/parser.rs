//! Recursive-descent parser for requisite strings
//!
//! Catalog requisites are free text such as
//! `"MATH 221 and (MATH 222 or MATH 234)"` or `"COMP SCI 200, MATH 222"`.
//! Commas mean alternation in this data, so they are rewritten to `or`
//! before tokenizing. The grammar is:
//!
//! ```text
//! expr    := and_expr
//! and_expr:= or_expr ( "and" or_expr )*
//! or_expr := primary ( "or" primary )*
//! primary := "(" and_expr ")" | LEAF
//! ```
//!
//! `and` separates groups of `or` alternatives, so `A or B and C` reads as
//! `(A or B) and C`. Source text almost always parenthesizes explicitly.
//! Connectives are only recognized as whitespace-delimited words, so
//! `and/or` or `Honors` never split a leaf.

use super::node::PrereqNode;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Deepest parenthesis nesting accepted by [`parse_requisites`]
pub const DEFAULT_MAX_DEPTH: usize = 64;

static DELIMITER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(|\)|\s+and\s+|\s+or\s+").expect("requisite delimiter regex must compile")
});

/// Errors raised for requisite text that does not fit the grammar
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrereqSyntaxError {
    /// Nothing but whitespace and commas
    #[error("requisite text is empty")]
    Empty,

    /// A token appeared where the grammar does not allow it
    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// Offending token text
        token: String,
        /// Zero-based token index
        position: usize,
    },

    /// An opening parenthesis was never closed
    #[error("unclosed '(' at position {position}")]
    UnclosedParen {
        /// Zero-based token index of the opening parenthesis
        position: usize,
    },

    /// Input ended where an operand was required
    #[error("unexpected end of requisite text")]
    UnexpectedEnd,

    /// Parentheses nest deeper than the parser accepts
    #[error("'(' at position {position} nests deeper than {limit} levels")]
    TooDeep {
        /// Zero-based token index of the first rejected parenthesis
        position: usize,
        /// Nesting limit in effect
        limit: usize,
    },
}

/// Lexical token of a requisite string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `(`
    Open,
    /// `)`
    Close,
    /// `and` (any case)
    And,
    /// `or` (any case, or a rewritten comma)
    Or,
    /// Any other run of text, trimmed
    Leaf(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "("),
            Self::Close => write!(f, ")"),
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
            Self::Leaf(text) => write!(f, "{text}"),
        }
    }
}

/// Split requisite text into tokens, rewriting commas to `or` first
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    let text = text.replace(',', " or ");
    let mut tokens = Vec::new();
    let mut last = 0;

    for m in DELIMITER.find_iter(&text) {
        push_leaf(&mut tokens, &text[last..m.start()]);
        let token = match m.as_str().trim().to_ascii_lowercase().as_str() {
            "(" => Token::Open,
            ")" => Token::Close,
            "and" => Token::And,
            _ => Token::Or,
        };
        tokens.push(token);
        last = m.end();
    }
    push_leaf(&mut tokens, &text[last..]);
    tokens
}

fn push_leaf(tokens: &mut Vec<Token>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        tokens.push(Token::Leaf(text.to_string()));
    }
}

/// Parse a requisite string into a [`PrereqNode`] tree.
///
/// # Errors
/// Returns [`PrereqSyntaxError`] for empty input, unmatched parentheses,
/// dangling connectives, tokens left over after a complete expression, or
/// nesting deeper than [`DEFAULT_MAX_DEPTH`].
///
/// # Examples
/// ```
/// use degree_navigator::core::prereq::parse_requisites;
///
/// let tree = parse_requisites("COMP SCI 200, MATH 222").unwrap();
/// assert_eq!(tree.to_string(), "(COMP SCI 200 OR MATH 222)");
/// ```
pub fn parse_requisites(text: &str) -> Result<PrereqNode, PrereqSyntaxError> {
    PrereqParser::new(tokenize(text)).parse()
}

/// Parser state over a token list
#[derive(Debug)]
pub struct PrereqParser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl PrereqParser {
    /// Create a parser over already tokenized input
    #[must_use]
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_DEPTH)
    }

    /// Create a parser that rejects more than `max_depth` nested parentheses
    #[must_use]
    pub const fn with_max_depth(tokens: Vec<Token>, max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Parse the whole token list as one expression.
    ///
    /// # Errors
    /// See [`parse_requisites`].
    pub fn parse(mut self) -> Result<PrereqNode, PrereqSyntaxError> {
        if self.tokens.is_empty() {
            return Err(PrereqSyntaxError::Empty);
        }
        let node = self.parse_and()?;
        match self.peek() {
            None => Ok(node),
            Some(token) => Err(self.unexpected(token)),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, token: &Token) -> PrereqSyntaxError {
        PrereqSyntaxError::UnexpectedToken {
            token: token.to_string(),
            position: self.pos,
        }
    }

    fn parse_and(&mut self) -> Result<PrereqNode, PrereqSyntaxError> {
        let mut nodes = vec![self.parse_or()?];
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            nodes.push(self.parse_or()?);
        }
        Ok(PrereqNode::and(nodes))
    }

    fn parse_or(&mut self) -> Result<PrereqNode, PrereqSyntaxError> {
        let mut nodes = vec![self.parse_primary()?];
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            nodes.push(self.parse_primary()?);
        }
        Ok(PrereqNode::or(nodes))
    }

    fn parse_primary(&mut self) -> Result<PrereqNode, PrereqSyntaxError> {
        let opened_at = self.pos;
        match self.next() {
            Some(Token::Open) => {
                if self.depth >= self.max_depth {
                    return Err(PrereqSyntaxError::TooDeep {
                        position: opened_at,
                        limit: self.max_depth,
                    });
                }
                self.depth += 1;
                let node = self.parse_and()?;
                self.depth -= 1;
                match self.peek() {
                    Some(Token::Close) => {
                        self.pos += 1;
                        Ok(node)
                    }
                    Some(token) => Err(self.unexpected(token)),
                    None => Err(PrereqSyntaxError::UnclosedParen {
                        position: opened_at,
                    }),
                }
            }
            Some(Token::Leaf(value)) => Ok(PrereqNode::leaf(&value)),
            Some(token) => Err(PrereqSyntaxError::UnexpectedToken {
                token: token.to_string(),
                position: opened_at,
            }),
            None => Err(PrereqSyntaxError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: &str) -> PrereqNode {
        PrereqNode::leaf(value)
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("MATH 221 AND (MATH 222, MATH 234)");
        assert_eq!(
            tokens,
            vec![
                Token::Leaf("MATH 221".to_string()),
                Token::And,
                Token::Open,
                Token::Leaf("MATH 222".to_string()),
                Token::Or,
                Token::Leaf("MATH 234".to_string()),
                Token::Close,
            ]
        );
    }

    #[test]
    fn test_connectives_need_surrounding_whitespace() {
        assert_eq!(
            tokenize("Honors standing and/or consent"),
            vec![Token::Leaf("Honors standing and/or consent".to_string())]
        );
    }

    #[test]
    fn test_comma_is_alternation() {
        let tree = parse_requisites("COMP SCI 200, MATH 222").unwrap();
        assert_eq!(tree, PrereqNode::Or(vec![leaf("COMP SCI 200"), leaf("MATH 222")]));
    }

    #[test]
    fn test_and_of_or_group() {
        let tree = parse_requisites("MATH 221 and (MATH 222 or MATH 234)").unwrap();
        assert_eq!(
            tree,
            PrereqNode::And(vec![
                leaf("MATH 221"),
                PrereqNode::Or(vec![leaf("MATH 222"), leaf("MATH 234")]),
            ])
        );
    }

    #[test]
    fn test_or_groups_joined_by_and() {
        let tree = parse_requisites("A or B and C").unwrap();
        assert_eq!(
            tree,
            PrereqNode::And(vec![PrereqNode::Or(vec![leaf("A"), leaf("B")]), leaf("C")])
        );
    }

    #[test]
    fn test_redundant_parentheses_collapse() {
        assert_eq!(parse_requisites("((STAT 240))").unwrap(), leaf("STAT 240"));
    }

    #[test]
    fn test_single_leaf() {
        assert_eq!(
            parse_requisites("  Consent of instructor ").unwrap(),
            leaf("Consent of instructor")
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_requisites(""), Err(PrereqSyntaxError::Empty));
        assert_eq!(parse_requisites("   "), Err(PrereqSyntaxError::Empty));
        assert_eq!(
            parse_requisites("MATH 221 and "),
            Err(PrereqSyntaxError::UnexpectedEnd)
        );
        assert_eq!(
            parse_requisites(" , "),
            Err(PrereqSyntaxError::UnexpectedToken {
                token: "or".to_string(),
                position: 0
            })
        );
        assert_eq!(
            parse_requisites("(MATH 221 or MATH 222"),
            Err(PrereqSyntaxError::UnclosedParen { position: 0 })
        );
        assert_eq!(
            parse_requisites("MATH 221) or MATH 222"),
            Err(PrereqSyntaxError::UnexpectedToken {
                token: ")".to_string(),
                position: 1
            })
        );
        assert!(matches!(
            parse_requisites("MATH 221 and ()"),
            Err(PrereqSyntaxError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            parse_requisites("(MATH 221) STAT 240"),
            Err(PrereqSyntaxError::UnexpectedToken { .. })
        ));
    }

    fn nested(depth: usize) -> String {
        format!("{}MATH 221{}", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn test_nesting_limit() {
        assert_eq!(
            parse_requisites(&nested(DEFAULT_MAX_DEPTH)).unwrap(),
            leaf("MATH 221")
        );
        assert_eq!(
            parse_requisites(&nested(DEFAULT_MAX_DEPTH + 1)),
            Err(PrereqSyntaxError::TooDeep {
                position: DEFAULT_MAX_DEPTH,
                limit: DEFAULT_MAX_DEPTH
            })
        );

        let shallow = PrereqParser::with_max_depth(tokenize("A and (B or (C and D))"), 1).parse();
        assert_eq!(
            shallow,
            Err(PrereqSyntaxError::TooDeep {
                position: 5,
                limit: 1
            })
        );
    }

    #[test]
    fn test_very_deep_nesting_is_rejected_not_overflowed() {
        let err = parse_requisites(&nested(20_000)).unwrap_err();
        assert!(matches!(err, PrereqSyntaxError::TooDeep { .. }));
        assert!(err.to_string().contains("deeper than 64"));
    }
}
