//! Error surfacing.
//!
//! After every highlight pass the [`ErrorSurface`] replaces, wholesale, what the user sees about
//! syntax errors:
//!
//! - the error background tags on the buffer;
//! - the [`DiagnosticsLog`], one line per error or a single "no errors" sentinel;
//! - one [`ErrorMarker`] per error, floating just below its anchor char.
//!
//! Markers follow their anchor through scrolling and resizing via
//! [`ErrorSurface::on_viewport_change`], and are hidden while the anchor is off screen.

use crate::config::MarkerGeometry;
use log::{debug, trace};
use wacccode_core::{Position, SyntaxError, TextBuffer, VisualClass};

/// Log text shown when the last parse reported no errors.
pub const NO_SYNTAX_ERRORS_MSG: &str = "No Syntax Errors have been detected.";

/// Callback invoked with the current error list after each sync.
pub type DiagnosticsCallback = Box<dyn FnMut(&[SyntaxError])>;

/// The read-only diagnostics log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticsLog {
    lines: Vec<String>,
}

impl DiagnosticsLog {
    /// Replace the log contents with `errors`.
    pub fn render(&mut self, errors: &[SyntaxError]) {
        self.lines.clear();
        if errors.is_empty() {
            self.lines.push(NO_SYNTAX_ERRORS_MSG.to_string());
        } else {
            self.lines.extend(errors.iter().map(SyntaxError::log_line));
        }
    }

    /// Log lines, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole log as newline-separated text.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns `true` if the log shows the no-errors sentinel.
    pub fn is_clean(&self) -> bool {
        self.lines.len() == 1 && self.lines[0] == NO_SYNTAX_ERRORS_MSG
    }
}

/// Where a marker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPlacement {
    /// Drawn at the given pixel position (top-left, text-area coordinates).
    Visible {
        /// X coordinate.
        x: i32,
        /// Y coordinate.
        y: i32,
    },
    /// Anchor is off screen.
    Hidden,
}

/// Hover label of a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    /// Error message.
    pub text: String,
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

/// An inline error marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMarker {
    error: SyntaxError,
    geometry: MarkerGeometry,
    placement: MarkerPlacement,
    hovered: bool,
}

impl ErrorMarker {
    /// Create a hidden marker for `error`.
    pub fn new(error: SyntaxError, geometry: MarkerGeometry) -> Self {
        Self {
            error,
            geometry,
            placement: MarkerPlacement::Hidden,
            hovered: false,
        }
    }

    /// The anchor position.
    pub fn anchor(&self) -> Position {
        self.error.position()
    }

    /// The error this marker shows.
    pub fn error(&self) -> &SyntaxError {
        &self.error
    }

    /// Current placement.
    pub fn placement(&self) -> MarkerPlacement {
        self.placement
    }

    /// Returns `true` if the marker is on screen.
    pub fn is_visible(&self) -> bool {
        matches!(self.placement, MarkerPlacement::Visible { .. })
    }

    /// Returns `true` while the pointer is over the marker.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Recompute placement from the anchor's on-screen box.
    pub fn reposition<B: TextBuffer + ?Sized>(&mut self, buffer: &B) {
        self.placement = match buffer.bbox(self.anchor()) {
            Some(rect) => MarkerPlacement::Visible {
                x: rect.x + self.geometry.padding_x - rect.width as i32,
                y: rect.y + self.geometry.distance_from_char + self.geometry.padding_y,
            },
            None => {
                self.hovered = false;
                MarkerPlacement::Hidden
            }
        };
    }

    /// The pointer entered the marker. Returns the label to show.
    pub fn pointer_enter(&mut self) -> Option<Tooltip> {
        let MarkerPlacement::Visible { .. } = self.placement else {
            return None;
        };
        self.hovered = true;
        self.tooltip()
    }

    /// The pointer left the marker.
    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    /// The label currently shown, if any.
    pub fn tooltip(&self) -> Option<Tooltip> {
        match (self.hovered, self.placement) {
            (true, MarkerPlacement::Visible { x, y }) => Some(Tooltip {
                text: self.error.message.clone(),
                x: x + self.geometry.hover_label_offset,
                y,
            }),
            _ => None,
        }
    }
}

/// Outcome of one [`ErrorSurface::sync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Errors received.
    pub errors: usize,
    /// Error anchors tagged on the buffer.
    pub decorated: usize,
    /// Anchors that no longer fit the buffer.
    pub skipped: usize,
}

/// Owns the error channel of the editor: background tags, log and markers.
pub struct ErrorSurface {
    errors: Vec<SyntaxError>,
    log: DiagnosticsLog,
    markers: Vec<ErrorMarker>,
    geometry: MarkerGeometry,
    callbacks: Vec<DiagnosticsCallback>,
}

impl ErrorSurface {
    /// Create an empty surface.
    pub fn new(geometry: MarkerGeometry) -> Self {
        Self {
            errors: Vec::new(),
            log: DiagnosticsLog::default(),
            markers: Vec::new(),
            geometry,
            callbacks: Vec::new(),
        }
    }

    /// Replace everything shown about errors with `errors`.
    pub fn sync<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &mut B,
        errors: Vec<SyntaxError>,
    ) -> SyncReport {
        buffer.untag_all(VisualClass::Error);

        let mut report = SyncReport {
            errors: errors.len(),
            ..SyncReport::default()
        };
        for error in &errors {
            match buffer.tag(error.anchor(), VisualClass::Error) {
                Ok(()) => report.decorated += 1,
                Err(err) => {
                    trace!(
                        line = error.line,
                        column = error.column,
                        err:?;
                        "error anchor out of range"
                    );
                    report.skipped += 1;
                }
            }
        }

        self.log.render(&errors);

        self.markers = errors
            .iter()
            .cloned()
            .map(|error| ErrorMarker::new(error, self.geometry))
            .collect();
        for marker in &mut self.markers {
            marker.reposition(&*buffer);
        }

        self.errors = errors;
        for callback in &mut self.callbacks {
            callback(&self.errors);
        }

        debug!(
            errors = report.errors,
            decorated = report.decorated,
            skipped = report.skipped;
            "error surface synced"
        );
        report
    }

    /// Reposition every marker after a scroll or resize.
    pub fn on_viewport_change<B: TextBuffer + ?Sized>(&mut self, buffer: &B) {
        for marker in &mut self.markers {
            marker.reposition(buffer);
        }
    }

    /// Register a callback that receives the error list after each sync.
    pub fn subscribe(&mut self, callback: DiagnosticsCallback) {
        self.callbacks.push(callback);
    }

    /// Errors from the most recent sync.
    pub fn diagnostics(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// The diagnostics log.
    pub fn log(&self) -> &DiagnosticsLog {
        &self.log
    }

    /// All markers, in error order.
    pub fn markers(&self) -> &[ErrorMarker] {
        &self.markers
    }

    /// Marker placement offsets.
    pub fn geometry(&self) -> MarkerGeometry {
        self.geometry
    }

    /// Pointer entered marker `index`.
    pub fn pointer_enter(&mut self, index: usize) -> Option<Tooltip> {
        self.markers.get_mut(index)?.pointer_enter()
    }

    /// Pointer left marker `index`.
    pub fn pointer_leave(&mut self, index: usize) {
        if let Some(marker) = self.markers.get_mut(index) {
            marker.pointer_leave();
        }
    }
}

impl Default for ErrorSurface {
    fn default() -> Self {
        Self::new(MarkerGeometry::default())
    }
}
