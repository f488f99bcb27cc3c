//! Editable text buffer with per-class tag layers.
//!
//! [`TextBuffer`] is the narrow interface the highlight pipeline consumes: read the text, observe
//! mutations, tag and untag ranges, and convert positions to pixels. [`CodeBuffer`] is the
//! kernel's implementation of it.
//!
//! # Example
//!
//! ```rust
//! use wacccode_core::{CodeBuffer, Position, Span, TextBuffer, VisualClass};
//!
//! let mut buffer = CodeBuffer::new("begin skip end");
//! buffer
//!     .tag(Span::new(Position::new(1, 0), Position::new(1, 5)), VisualClass::Keyword)
//!     .unwrap();
//! assert_eq!(buffer.foreground_at(Position::new(1, 2)), Some(VisualClass::Keyword));
//!
//! buffer.insert(Position::new(1, 0), "# ").unwrap();
//! assert_eq!(buffer.foreground_at(Position::new(1, 4)), Some(VisualClass::Keyword));
//! ```

use crate::intervals::{Interval, IntervalTree};
use crate::line_index::LineIndex;
use crate::position::{Position, Span};
use crate::viewport::{CellMetrics, Rect, Viewport, cell_width_at, visual_x_for_column};
use crate::visual_class::{Layer, VisualClass};
use log::trace;
use std::collections::BTreeMap;
use std::ops::Range;
use wacccode_lang::LanguageConfig;

/// Errors returned by buffer operations that address text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// The position does not address an existing line/column.
    #[error("invalid position {0}")]
    InvalidPosition(Position),
    /// The span does not address an existing range of text.
    #[error("invalid span {0}")]
    InvalidSpan(Span),
}

/// The kind of an accepted text mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Text inserted.
    Insert,
    /// Text deleted.
    Delete,
    /// A range replaced by new text.
    Replace,
}

/// Notification delivered to mutation observers after every accepted edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationEvent {
    /// What kind of edit happened.
    pub kind: MutationKind,
    /// Buffer version after the edit.
    pub version: u64,
    /// Char range of the new text (empty for pure deletions).
    pub affected: Range<usize>,
}

/// Mutation observer.
///
/// Observers run synchronously on the thread that edits the buffer, so they are not required to
/// be `Send`.
pub type MutationCallback = Box<dyn FnMut(&MutationEvent)>;

/// The buffer interface consumed by the highlight pipeline.
pub trait TextBuffer {
    /// The full text.
    fn text(&self) -> String;

    /// Register an observer called after every insert, delete and replace.
    fn on_mutation(&mut self, callback: MutationCallback);

    /// Tag `span` with `class`.
    ///
    /// Fails if the span's start is not a valid position or its end line does not exist. The
    /// end column is clamped to the end of its line, line terminator included.
    fn tag(&mut self, span: Span, class: VisualClass) -> Result<(), BufferError>;

    /// Remove every range tagged with `class`.
    fn untag_all(&mut self, class: VisualClass);

    /// Pixel box of the char at `position`, or `None` if it is off screen or invalid.
    fn bbox(&self, position: Position) -> Option<Rect>;

    /// Set the tab width, in cells, used by [`TextBuffer::bbox`].
    fn set_tab_width(&mut self, tab_width: usize);
}

/// Rope-backed [`TextBuffer`] with tag layers and viewport geometry.
pub struct CodeBuffer {
    line_index: LineIndex,
    tags: BTreeMap<VisualClass, IntervalTree>,
    next_seq: u64,
    version: u64,
    callbacks: Vec<MutationCallback>,
    viewport: Viewport,
    metrics: CellMetrics,
    tab_width: usize,
}

impl CodeBuffer {
    /// Create a buffer holding `text`, configured for WACC.
    pub fn new(text: &str) -> Self {
        Self::with_language(text, &LanguageConfig::wacc())
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Create a buffer using the tab width of `language`.
    pub fn with_language(text: &str, language: &LanguageConfig) -> Self {
        Self {
            line_index: LineIndex::from_text(text),
            tags: BTreeMap::new(),
            next_seq: 0,
            version: 0,
            callbacks: Vec::new(),
            viewport: Viewport::default(),
            metrics: CellMetrics::default(),
            tab_width: language.tab_width.max(1),
        }
    }

    /// The underlying line index.
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Number of accepted mutations so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Total line count.
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// Insert `text` at `position`.
    pub fn insert(&mut self, position: Position, text: &str) -> Result<(), BufferError> {
        let offset = self
            .line_index
            .position_to_char_offset(position)
            .ok_or(BufferError::InvalidPosition(position))?;
        let len = text.chars().count();

        self.line_index.insert(offset, text);
        self.shift_tags_for_insertion(offset, len);
        self.notify(MutationKind::Insert, offset..offset + len);
        Ok(())
    }

    /// Delete the text covered by `span`.
    pub fn delete(&mut self, span: Span) -> Result<(), BufferError> {
        let range = self.span_to_range(span)?;

        self.line_index.delete(range.start, range.len());
        self.shift_tags_for_deletion(range.clone());
        self.notify(MutationKind::Delete, range.start..range.start);
        Ok(())
    }

    /// Replace the text covered by `span` with `text`.
    pub fn replace(&mut self, span: Span, text: &str) -> Result<(), BufferError> {
        let range = self.span_to_range(span)?;
        let len = text.chars().count();

        self.line_index.delete(range.start, range.len());
        self.shift_tags_for_deletion(range.clone());
        self.line_index.insert(range.start, text);
        self.shift_tags_for_insertion(range.start, len);
        self.notify(MutationKind::Replace, range.start..range.start + len);
        Ok(())
    }

    /// Replace the whole text.
    pub fn set_text(&mut self, text: &str) {
        let end = self
            .line_index
            .char_offset_to_position(self.line_index.char_count());
        let whole = Span::new(Position::new(1, 0), end);
        // The whole-document span is always valid.
        if let Err(err) = self.replace(whole, text) {
            trace!(err:?; "set_text failed to replace the document");
        }
    }

    /// Tagged spans of `class`, in start order.
    pub fn tagged_spans(&self, class: VisualClass) -> Vec<Span> {
        let Some(tree) = self.tags.get(&class) else {
            return Vec::new();
        };
        tree.iter()
            .map(|interval| {
                Span::new(
                    self.line_index.char_offset_to_position(interval.start),
                    self.line_index.char_offset_to_position(interval.end),
                )
            })
            .collect()
    }

    /// Total number of tagged ranges across every class.
    pub fn tag_count(&self) -> usize {
        self.tags.values().map(IntervalTree::len).sum()
    }

    /// Every class tagged at `position`.
    pub fn classes_at(&self, position: Position) -> Vec<VisualClass> {
        let Some(offset) = self.line_index.position_to_char_offset(position) else {
            return Vec::new();
        };
        self.tags
            .iter()
            .filter(|(_, tree)| !tree.query_point(offset).is_empty())
            .map(|(class, _)| *class)
            .collect()
    }

    /// The foreground class that visually wins at `position`.
    ///
    /// Highest [`VisualClass::display_priority`] wins; among equal priorities the most recently
    /// applied tag wins.
    pub fn foreground_at(&self, position: Position) -> Option<VisualClass> {
        self.dominant_at(position, Layer::Foreground)
    }

    /// The background class at `position`, if any.
    pub fn background_at(&self, position: Position) -> Option<VisualClass> {
        self.dominant_at(position, Layer::Background)
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replace the viewport (scroll or resize).
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Viewport {
            first_line: viewport.first_line.max(1),
            ..viewport
        };
    }

    /// Scroll so that `first_line` is the top visible line and `first_cell` the leftmost cell.
    pub fn scroll_to(&mut self, first_line: usize, first_cell: usize) {
        self.set_viewport(Viewport {
            first_line,
            first_cell,
            ..self.viewport
        });
    }

    /// Resize the widget.
    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        self.set_viewport(Viewport {
            width_px,
            height_px,
            ..self.viewport
        });
    }

    /// Font metrics used for pixel conversion.
    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// Set the font metrics used for pixel conversion.
    pub fn set_metrics(&mut self, metrics: CellMetrics) {
        self.metrics = metrics;
    }

    /// Tab width in cells.
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Visible line numbers with their top y pixel, for drawing a line-number gutter.
    pub fn visible_lines(&self) -> Vec<(usize, i32)> {
        let visible = self.viewport.visible_line_count(&self.metrics);
        let first = self.viewport.first_line;
        let last = (first + visible).min(self.line_count() + 1);
        (first..last)
            .map(|line| {
                let y = (line - first) as u64 * self.metrics.line_height as u64;
                (line, y as i32)
            })
            .collect()
    }

    fn dominant_at(&self, position: Position, layer: Layer) -> Option<VisualClass> {
        let offset = self.line_index.position_to_char_offset(position)?;
        self.tags
            .iter()
            .filter(|(class, _)| class.layer() == layer)
            .flat_map(|(class, tree)| {
                tree.query_point(offset)
                    .into_iter()
                    .map(move |interval| (class.display_priority(), interval.seq, *class))
            })
            .max()
            .map(|(_, _, class)| class)
    }

    fn span_to_range(&self, span: Span) -> Result<Range<usize>, BufferError> {
        let start = self
            .line_index
            .position_to_char_offset(span.start)
            .ok_or(BufferError::InvalidSpan(span))?;
        if self.line_index.line_len(span.end.line).is_none() {
            return Err(BufferError::InvalidSpan(span));
        }
        let end = self.line_index.clamped_char_offset(span.end);
        if end < start {
            return Err(BufferError::InvalidSpan(span));
        }
        Ok(start..end)
    }

    fn shift_tags_for_insertion(&mut self, offset: usize, len: usize) {
        if len == 0 {
            return;
        }
        for tree in self.tags.values_mut() {
            tree.update_for_insertion(offset, len);
        }
    }

    fn shift_tags_for_deletion(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        for tree in self.tags.values_mut() {
            tree.update_for_deletion(range.start, range.end);
        }
    }

    fn notify(&mut self, kind: MutationKind, affected: Range<usize>) {
        self.version += 1;
        let event = MutationEvent {
            kind,
            version: self.version,
            affected,
        };
        trace!(version = self.version, kind:?; "buffer mutated");
        for callback in &mut self.callbacks {
            callback(&event);
        }
    }
}

impl TextBuffer for CodeBuffer {
    fn text(&self) -> String {
        self.line_index.get_text()
    }

    fn on_mutation(&mut self, callback: MutationCallback) {
        self.callbacks.push(callback);
    }

    fn tag(&mut self, span: Span, class: VisualClass) -> Result<(), BufferError> {
        let range = self.span_to_range(span)?;
        if range.is_empty() {
            return Ok(());
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tags
            .entry(class)
            .or_default()
            .insert(Interval::new(range.start, range.end, seq));
        Ok(())
    }

    fn untag_all(&mut self, class: VisualClass) {
        self.tags.remove(&class);
    }

    fn bbox(&self, position: Position) -> Option<Rect> {
        let line_text = self.line_index.line_text(position.line)?;
        let line_len = line_text.chars().count();
        if position.column > line_len || !self.viewport.shows_line(position.line, &self.metrics) {
            return None;
        }

        let cell = visual_x_for_column(&line_text, position.column, self.tab_width);
        let first_cell = self.viewport.first_cell;
        if cell < first_cell || cell >= first_cell + self.viewport.visible_cell_count(&self.metrics)
        {
            return None;
        }

        let width_cells = line_text
            .chars()
            .nth(position.column)
            .map(|ch| cell_width_at(ch, cell, self.tab_width))
            .unwrap_or(1);
        let line_offset = (position.line - self.viewport.first_line) as u64;

        Some(Rect {
            x: ((cell - first_cell) as u64 * self.metrics.cell_width as u64) as i32,
            y: (line_offset * self.metrics.line_height as u64) as i32,
            width: width_cells as u32 * self.metrics.cell_width,
            height: self.metrics.line_height,
        })
    }

    fn set_tab_width(&mut self, tab_width: usize) {
        self.tab_width = tab_width.max(1);
    }
}

impl Default for CodeBuffer {
    fn default() -> Self {
        Self::empty()
    }
}
