//! Line-span extraction for audit sections
//!
//! An audit is a sequence of sections separated by lines of dashes. Each
//! helper here works on line indices and returns half-open `Range<usize>`
//! spans into the caller's line slice.

use std::ops::Range;

/// Minimum number of leading dashes that make a section delimiter
const DELIMITER: &str = "---";

/// Whether a line separates two audit sections (trimmed text starts with `---`)
#[must_use]
pub fn is_delimiter(line: &str) -> bool {
    line.trim().starts_with(DELIMITER)
}

/// Index of the first delimiter line at or after `from`, if any
#[must_use]
pub fn next_delimiter(lines: &[&str], from: usize) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .skip(from)
        .find_map(|(idx, line)| is_delimiter(line).then_some(idx))
}

/// Span of the block anchored at the first line containing `marker`.
///
/// The block starts at the marker line and stops before the next delimiter
/// line, or at the end of input. When the marker never appears the span is
/// empty, which callers treat as "section absent".
#[must_use]
pub fn find_block(lines: &[&str], marker: &str) -> Range<usize> {
    let Some(start) = lines.iter().position(|line| line.contains(marker)) else {
        return 0..0;
    };
    let end = next_delimiter(lines, start + 1).unwrap_or(lines.len());
    start..end
}

/// Lines of the block anchored at `marker` (empty when absent)
#[must_use]
pub fn block_lines<'a>(lines: &[&'a str], marker: &str) -> Vec<&'a str> {
    lines[find_block(lines, marker)].to_vec()
}
