//! Line index over the buffer text.
//!
//! Backed by a [`Rope`], giving O(log N) line access, insertion and deletion. All offsets are
//! char offsets; all line numbers exposed by this type are 1-based to match [`Position`].

use crate::position::Position;
use ropey::Rope;

/// Logical line index - implemented using Rope data structure
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty line index.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build line index from text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get total line count.
    ///
    /// A trailing newline starts a new, empty line (N newlines => N+1 lines).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Length of a 1-based line in chars, excluding its line terminator.
    pub fn line_len(&self, line: usize) -> Option<usize> {
        let idx = self.line_to_index(line)?;
        let slice = self.rope.line(idx);
        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
        }
        if len > 0 && slice.char(len - 1) == '\r' {
            len -= 1;
        }
        Some(len)
    }

    /// Text of a 1-based line, excluding its line terminator.
    pub fn line_text(&self, line: usize) -> Option<String> {
        let idx = self.line_to_index(line)?;
        let mut text = self.rope.line(idx).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        Some(text)
    }

    /// Returns `true` if `position` addresses a char (or the end) of an existing line.
    pub fn is_valid(&self, position: Position) -> bool {
        self.line_len(position.line)
            .is_some_and(|len| position.column <= len)
    }

    /// Convert a position into a char offset, or `None` if the position is not valid.
    pub fn position_to_char_offset(&self, position: Position) -> Option<usize> {
        if !self.is_valid(position) {
            return None;
        }
        let idx = self.line_to_index(position.line)?;
        Some(self.rope.line_to_char(idx) + position.column)
    }

    /// Char offset of a position, clamping the column to the end of the line's raw text
    /// (terminator included) and the line to the last line.
    pub fn clamped_char_offset(&self, position: Position) -> usize {
        let last = self.line_count();
        let line = position.line.clamp(1, last);
        let idx = line - 1;
        let line_start = self.rope.line_to_char(idx);
        let next_start = if idx + 1 < last {
            self.rope.line_to_char(idx + 1)
        } else {
            self.rope.len_chars()
        };
        (line_start + position.column).min(next_start)
    }

    /// Get the position of a char offset (clamped to the end of the text).
    pub fn char_offset_to_position(&self, char_offset: usize) -> Position {
        let char_offset = char_offset.min(self.rope.len_chars());
        let line_idx = self.rope.char_to_line(char_offset);
        let line_start_char = self.rope.line_to_char(line_idx);
        Position::new(line_idx + 1, char_offset - line_start_char)
    }

    /// Insert text (at specified character offset)
    pub fn insert(&mut self, char_offset: usize, text: &str) {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(char_offset, text);
    }

    /// Delete text range (character offset)
    pub fn delete(&mut self, start_char: usize, len_chars: usize) {
        let start_char = start_char.min(self.rope.len_chars());
        let end_char = (start_char + len_chars).min(self.rope.len_chars());

        if start_char < end_char {
            self.rope.remove(start_char..end_char);
        }
    }

    /// Get complete text
    pub fn get_text(&self) -> String {
        self.rope.to_string()
    }

    /// Get the text between two char offsets.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.rope.len_chars());
        let start = start.min(end);
        self.rope.slice(start..end).to_string()
    }

    fn line_to_index(&self, line: usize) -> Option<usize> {
        if line == 0 || line > self.rope.len_lines() {
            return None;
        }
        Some(line - 1)
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
