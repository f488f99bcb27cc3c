#![warn(missing_docs)]
//! `wacccode-lang` - data-driven language configuration for the WACC teaching language.
//!
//! This crate intentionally stays lightweight and does **not** depend on any parsing or
//! highlighting systems. It provides small structs that the buffer kernel and the highlight
//! pipeline use to behave in a language-aware way.

/// Reserved words of the WACC language.
///
/// The grammar is owned by the external parser; this list only exists for hosts that want to
/// offer completion or documentation without running a parse.
pub const WACC_KEYWORDS: &[&str] = &[
    "begin", "end", "is", "skip", "read", "free", "return", "exit", "print", "println", "if",
    "then", "else", "fi", "while", "do", "done", "newpair", "call", "fst", "snd", "pair", "null",
    "true", "false", "struct",
];

/// Comment tokens for a given language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentConfig {
    /// Line comment token (e.g. `#`).
    pub line: Option<String>,
}

impl CommentConfig {
    /// Create a config that supports only line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            line: Some(token.into()),
        }
    }

    /// Returns `true` if a line comment token is configured.
    pub fn has_line(&self) -> bool {
        self.line.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Find the char column at which a line comment starts in `line_text`.
    ///
    /// Only the first occurrence of the marker counts; everything from it to the end of the
    /// line is comment text.
    pub fn line_comment_column(&self, line_text: &str) -> Option<usize> {
        let token = self.line.as_deref().filter(|s| !s.is_empty())?;
        let byte = line_text.find(token)?;
        Some(line_text[..byte].chars().count())
    }
}

/// Language configuration consumed by the editor kernel and the highlighter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Human readable language name.
    pub name: String,
    /// Comment tokens.
    pub comments: CommentConfig,
    /// Tab width in cells.
    pub tab_width: usize,
}

impl LanguageConfig {
    /// The WACC configuration: `#` line comments and two-cell tabs.
    pub fn wacc() -> Self {
        Self {
            name: "WACC".to_string(),
            comments: CommentConfig::line("#"),
            tab_width: 2,
        }
    }

    /// Returns `true` if `word` is a reserved WACC word.
    pub fn is_keyword(word: &str) -> bool {
        WACC_KEYWORDS.contains(&word)
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self::wacc()
    }
}
