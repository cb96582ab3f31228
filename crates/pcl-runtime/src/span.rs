//! Source locations
//!
//! Spans are half-open ranges of *character* indices into the source string
//! (`start..end`). The lexer works on `char`s, so a span never splits a
//! multi-byte character.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open range of character indices in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Index of the first character
    pub start: usize,
    /// Index one past the last character
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covering a single character
    pub fn single(position: usize) -> Self {
        Self::new(position, position + 1)
    }

    /// Placeholder span for values that were not produced from source
    pub fn dummy() -> Self {
        Self::new(0, 0)
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the last character covered (inclusive end)
    pub fn last(&self) -> usize {
        self.end.saturating_sub(1).max(self.start)
    }

    /// Smallest span covering both `self` and `other`
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Extract the covered text from `source`
    pub fn slice(&self, source: &str) -> String {
        source.chars().skip(self.start).take(self.len()).collect()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
