#![warn(missing_docs)]
//! WACC Code Core - headless buffer kernel for the WACC editor
//!
//! # Overview
//!
//! `wacccode-core` holds the editable text of one editor pane together with the visual state
//! derived from it: highlighting tags, error backgrounds and the viewport geometry needed to
//! place floating markers. It does not render anything and it does not parse anything; the
//! highlight pipeline (`wacccode-highlight`) drives it through the [`TextBuffer`] trait.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  DecorationApplier (full-repaint batches)   │  ← Highlight output
//! ├─────────────────────────────────────────────┤
//! │  TextBuffer / CodeBuffer (tags, observers)  │  ← Consumed interface
//! ├─────────────────────────────────────────────┤
//! │  IntervalTree per VisualClass               │  ← Tag storage
//! ├─────────────────────────────────────────────┤
//! │  Viewport + CellMetrics                     │  ← Position → pixel
//! ├─────────────────────────────────────────────┤
//! │  LineIndex (Rope-based)                     │  ← Line access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use wacccode_core::{
//!     CodeBuffer, DecorationApplier, DecorationCommand, Position, Span, VisualClass,
//! };
//!
//! let mut buffer = CodeBuffer::new("while true do skip done");
//! let mut applier = DecorationApplier::new();
//!
//! let keyword = |start, end| {
//!     DecorationCommand::new(
//!         VisualClass::Keyword,
//!         Span::new(Position::new(1, start), Position::new(1, end)),
//!     )
//! };
//! let report = applier.apply(&mut buffer, &[keyword(0, 5), keyword(11, 13), keyword(19, 23)]);
//!
//! assert_eq!(report.applied, 3);
//! assert_eq!(buffer.foreground_at(Position::new(1, 20)), Some(VisualClass::Keyword));
//! assert_eq!(buffer.foreground_at(Position::new(1, 7)), None);
//! ```
//!
//! # Module Description
//!
//! - [`position`] - 1-based line / 0-based column coordinates
//! - [`line_index`] - Rope based line index
//! - [`visual_class`] - the closed set of highlighting categories
//! - [`intervals`] - tagged range storage
//! - [`buffer`] - the [`TextBuffer`] interface and [`CodeBuffer`]
//! - [`viewport`] - viewport and font metrics
//! - [`decorations`] - decoration commands and the full-repaint applier
//! - [`diagnostics`] - syntax error data model

pub mod buffer;
pub mod decorations;
pub mod diagnostics;
pub mod intervals;
pub mod line_index;
pub mod position;
pub mod viewport;
pub mod visual_class;

pub use buffer::{
    BufferError, CodeBuffer, MutationCallback, MutationEvent, MutationKind, TextBuffer,
};
pub use decorations::{ApplyReport, DecorationApplier, DecorationCommand};
pub use diagnostics::SyntaxError;
pub use intervals::{Interval, IntervalTree};
pub use line_index::LineIndex;
pub use position::{Position, Span};
pub use viewport::{CellMetrics, Rect, Viewport};
pub use visual_class::{Layer, UnknownVisualClass, VisualClass};
