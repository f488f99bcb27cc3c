//! The highlight session: one editor pane's buffer wired to the pipeline.
//!
//! ```text
//! buffer mutation ─▶ HighlightScheduler ─(quiet interval)─▶ TokenPainter
//!                                                              │
//!                        DecorationApplier ◀── commands ───────┤
//!                        ErrorSurface      ◀── errors ─────────┘
//! ```

use crate::config::HighlightConfig;
use crate::painter::{ParseOutcome, TokenPainter};
use crate::parse::ParseService;
use crate::scheduler::{Clock, Generation, HighlightScheduler, SystemClock};
use crate::surface::{DiagnosticsCallback, DiagnosticsLog, ErrorMarker, ErrorSurface, Tooltip};
use log::debug;
use std::rc::Rc;
use std::time::Instant;
use wacccode_core::{ApplyReport, CodeBuffer, DecorationApplier, SyntaxError, TextBuffer};

/// Outcome of one highlight pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    /// Generation the pass painted.
    pub generation: Generation,
    /// How the parse went.
    pub outcome: ParseOutcome,
    /// Decoration batch outcome.
    pub decorations: ApplyReport,
    /// Syntax errors surfaced.
    pub errors: usize,
}

/// Owns a buffer and keeps its highlighting and error display in step with its text.
pub struct HighlightSession<P, B = CodeBuffer> {
    buffer: B,
    scheduler: HighlightScheduler,
    painter: TokenPainter<P>,
    applier: DecorationApplier,
    surface: ErrorSurface,
    last_painted: Option<Generation>,
}

impl<P: ParseService, B: TextBuffer> HighlightSession<P, B> {
    /// Create a session on the wall clock.
    pub fn new(buffer: B, parser: P, config: &HighlightConfig) -> Self {
        Self::with_clock(buffer, parser, config, Rc::new(SystemClock))
    }

    /// Create a session on a custom clock.
    ///
    /// Every mutation of `buffer` from now on is forwarded to the scheduler, and the buffer takes
    /// the configured tab width.
    pub fn with_clock(
        mut buffer: B,
        parser: P,
        config: &HighlightConfig,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let scheduler = HighlightScheduler::with_clock(config.quiet_interval(), clock);
        buffer.on_mutation(scheduler.mutation_observer());
        buffer.set_tab_width(config.tab_width());

        Self {
            buffer,
            scheduler,
            painter: TokenPainter::with_comments(parser, config.comments()),
            applier: DecorationApplier::new(),
            surface: ErrorSurface::new(config.marker_geometry()),
            last_painted: None,
        }
    }

    /// The buffer.
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Mutable access to the buffer. Edits made through it are observed by the scheduler.
    pub fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &HighlightScheduler {
        &self.scheduler
    }

    /// The painter.
    pub fn painter(&self) -> &TokenPainter<P> {
        &self.painter
    }

    /// Record a mutation made behind the buffer's back.
    pub fn notify_mutation(&mut self) -> Generation {
        self.scheduler.notify_mutation()
    }

    /// Fire every callback due on the scheduler's clock, running at most one pass.
    pub fn tick(&mut self) -> Option<PassReport> {
        let now = self.scheduler.now();
        self.tick_at(now)
    }

    /// Fire every callback due at `now`, running at most one pass.
    pub fn tick_at(&mut self, now: Instant) -> Option<PassReport> {
        self.scheduler.poll_at(now)?;
        Some(self.run_pass())
    }

    /// Run a pass now, regardless of the schedule (initial load, explicit refresh).
    ///
    /// Callbacks armed by earlier edits are dropped, since this pass already covers them.
    pub fn highlight_now(&mut self) -> PassReport {
        self.run_pass()
    }

    fn run_pass(&mut self) -> PassReport {
        let generation = self.scheduler.generation();
        self.scheduler.disarm();
        let text = self.buffer.text();

        let painted = self.painter.paint(&text);
        let decorations = self.applier.apply(&mut self.buffer, &painted.commands);
        let sync = self.surface.sync(&mut self.buffer, painted.errors);
        self.last_painted = Some(generation);

        debug!(
            generation = generation.count(),
            applied = decorations.applied,
            errors = sync.errors;
            "highlight pass complete"
        );

        PassReport {
            generation,
            outcome: painted.outcome,
            decorations,
            errors: sync.errors,
        }
    }

    /// Reposition markers after the buffer's viewport moved or resized.
    pub fn on_viewport_change(&mut self) {
        self.surface.on_viewport_change(&self.buffer);
    }

    /// Syntax errors from the most recent pass.
    pub fn get_diagnostics(&self) -> &[SyntaxError] {
        self.surface.diagnostics()
    }

    /// The diagnostics log.
    pub fn diagnostics_log(&self) -> &DiagnosticsLog {
        self.surface.log()
    }

    /// Register a callback receiving the error list after each pass.
    pub fn subscribe_diagnostics(&mut self, callback: DiagnosticsCallback) {
        self.surface.subscribe(callback);
    }

    /// All markers from the most recent pass.
    pub fn markers(&self) -> &[ErrorMarker] {
        self.surface.markers()
    }

    /// Returns `true` while edits have happened since the last pass.
    pub fn is_stale(&self) -> bool {
        self.last_painted != Some(self.scheduler.generation())
    }

    /// Markers to draw: on-screen ones, none while an edit burst is pending.
    pub fn visible_markers(&self) -> impl Iterator<Item = &ErrorMarker> {
        let stale = self.is_stale();
        self.surface
            .markers()
            .iter()
            .filter(move |marker| !stale && marker.is_visible())
    }

    /// Pointer entered marker `index`.
    pub fn pointer_enter(&mut self, index: usize) -> Option<Tooltip> {
        self.surface.pointer_enter(index)
    }

    /// Pointer left marker `index`.
    pub fn pointer_leave(&mut self, index: usize) {
        self.surface.pointer_leave(index);
    }
}

impl<P: ParseService> HighlightSession<P, CodeBuffer> {
    /// Scroll the buffer and follow with the markers.
    pub fn scroll_to(&mut self, first_line: usize, first_cell: usize) {
        self.buffer.scroll_to(first_line, first_cell);
        self.on_viewport_change();
    }

    /// Resize the buffer's viewport and follow with the markers.
    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        self.buffer.resize(width_px, height_px);
        self.on_viewport_change();
    }
}
