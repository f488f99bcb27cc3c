//! Logical buffer coordinates.
//!
//! Lines are 1-based and columns are 0-based, counted in Unicode scalar values (`char`). This is
//! the coordinate system parsers report diagnostics in, so no translation is needed between a
//! parser's `(line, column)` pair and a [`Position`].

use std::fmt;

/// A `(line, column)` location in the buffer.
///
/// Ordering is lexicographic by `(line, column)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 0-based column, in chars.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position `columns` chars to the right on the same line.
    pub fn offset_columns(self, columns: usize) -> Self {
        Self {
            line: self.line,
            column: self.column.saturating_add(columns),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range `[start, end)` between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
}

impl Span {
    /// Create a span. Endpoints are swapped if given in reverse order, so `start <= end` always
    /// holds.
    pub fn new(start: Position, end: Position) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// A span covering exactly one char at `position`.
    pub fn single_char(position: Position) -> Self {
        Self::new(position, position.offset_columns(1))
    }

    /// Returns `true` if the span covers no text.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `position` lies inside the span.
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }

}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
