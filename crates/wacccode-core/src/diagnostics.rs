//! Syntax diagnostics data model.
//!
//! Syntax errors are data, not failures: every parse produces a fresh list which replaces the
//! previous one wholesale. Renderers use them for the diagnostics log and for inline markers.

use crate::position::{Position, Span};
use std::fmt;

/// A single syntax error reported by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxError {
    /// 1-based line of the offending symbol.
    pub line: usize,
    /// 0-based column of the offending symbol.
    pub column: usize,
    /// Parser message.
    pub message: String,
}

impl SyntaxError {
    /// Create a new syntax error.
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    /// The position of the offending symbol.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// The single-char span markers are anchored to.
    pub fn anchor(&self) -> Span {
        Span::single_char(self.position())
    }

    /// The diagnostics log line for this error (`Line <line>:<column> <message>`).
    pub fn log_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}:{} {}", self.line, self.column, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_covers_one_char() {
        let error = SyntaxError::new(3, 9, "token recognition error at: '\"'");
        assert_eq!(
            error.anchor(),
            Span::new(Position::new(3, 9), Position::new(3, 10))
        );
    }

    #[test]
    fn test_log_line_format() {
        let error = SyntaxError::new(12, 4, "missing 'fi' at 'done'");
        assert_eq!(error.log_line(), "Line 12:4 missing 'fi' at 'done'");
    }
}
