#![warn(missing_docs)]
//! WACC Code Highlight - debounced syntax highlighting and error annotation
//!
//! # Overview
//!
//! `wacccode-highlight` keeps a [`TextBuffer`](wacccode_core::TextBuffer) coloured and annotated
//! while the user types. Edits are debounced: a highlight pass runs once the buffer has been
//! quiet for the configured interval, re-parses the whole text through a [`ParseService`],
//! repaints every decoration and replaces every error annotation.
//!
//! The WACC grammar is not part of this crate. Hosts plug in a parser that produces a
//! [`ParseNode`] tree tagged with [`Construct`]s.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  HighlightSession                           │  ← Host entry point
//! ├──────────────────────┬──────────────────────┤
//! │  HighlightScheduler  │  ErrorSurface        │  ← Debounce / errors
//! ├──────────────────────┴──────────────────────┤
//! │  TokenPainter + construct table             │  ← Parse → decorations
//! ├─────────────────────────────────────────────┤
//! │  ParseService (external grammar)            │  ← Parser seam
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use wacccode_core::{CodeBuffer, Position, VisualClass};
//! use wacccode_highlight::{
//!     Anchor, Construct, HighlightConfig, HighlightSession, ManualClock, ParseFailure, ParseNode,
//!     ParseOutput, Token,
//! };
//!
//! // A stand-in parser that recognises a lone `skip`.
//! let parser = |text: &str| -> Result<ParseOutput, ParseFailure> {
//!     let tree = (text == "skip").then(|| {
//!         ParseNode::new(Construct::StatSkip).with_terminal(Anchor::Keyword, Token::new(1, 0, 0, 3))
//!     });
//!     Ok(ParseOutput { tree, ..ParseOutput::default() })
//! };
//!
//! let clock = ManualClock::new();
//! let config = HighlightConfig::default();
//! let mut session =
//!     HighlightSession::with_clock(CodeBuffer::new(""), parser, &config, Rc::new(clock.clone()));
//!
//! session.buffer_mut().set_text("skip");
//! assert!(session.tick().is_none());
//!
//! clock.advance(Duration::from_millis(1000));
//! assert!(session.tick().is_some());
//! assert_eq!(
//!     session.buffer().foreground_at(Position::new(1, 2)),
//!     Some(VisualClass::Keyword)
//! );
//! assert!(session.diagnostics_log().is_clean());
//! ```
//!
//! # Module Description
//!
//! - [`parse`] - parser seam and parse tree model
//! - [`table`] - construct → visual class rules
//! - [`painter`] - parse tree and comment painting
//! - [`scheduler`] - debounce with generation tokens
//! - [`surface`] - error tags, diagnostics log and inline markers
//! - [`session`] - the wired pipeline
//! - [`config`] - TOML configuration

pub mod config;
pub mod painter;
pub mod parse;
pub mod scheduler;
pub mod session;
pub mod surface;
pub mod table;

pub use config::{ConfigError, HighlightConfig, InvalidRgb, MarkerGeometry, Rgb, Theme};
pub use painter::{PaintResult, ParseOutcome, TokenPainter};
pub use parse::{
    Anchor, Construct, ParseFailure, ParseNode, ParseOutput, ParseService, Terminal, Token,
};
pub use scheduler::{
    Clock, DEFAULT_QUIET_INTERVAL, Generation, HighlightScheduler, ManualClock, SystemClock,
};
pub use session::{HighlightSession, PassReport};
pub use surface::{
    DiagnosticsCallback, DiagnosticsLog, ErrorMarker, ErrorSurface, MarkerPlacement,
    NO_SYNTAX_ERRORS_MSG, SyncReport, Tooltip,
};
