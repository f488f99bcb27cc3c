//! Decoration commands and their application onto a buffer.
//!
//! A highlight pass produces a complete batch of [`DecorationCommand`]s. Applying a batch is a
//! full repaint: every foreground tag is removed first, then the batch is tagged in order, so
//! applying the same batch twice leaves the buffer exactly as applying it once.
//!
//! Error backgrounds are a separate channel owned by the error surface and are left untouched.

use crate::buffer::TextBuffer;
use crate::position::Span;
use crate::visual_class::{Layer, VisualClass};
use log::trace;

/// Tag `span` with `class`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecorationCommand {
    /// Highlighting category.
    pub class: VisualClass,
    /// Tagged range.
    pub span: Span,
}

impl DecorationCommand {
    /// Create a new decoration command.
    pub fn new(class: VisualClass, span: Span) -> Self {
        Self { class, span }
    }
}

/// Outcome of applying one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyReport {
    /// Commands tagged onto the buffer.
    pub applied: usize,
    /// Commands whose span no longer fits the buffer.
    pub skipped: usize,
}

/// Applies decoration batches with full-repaint semantics.
#[derive(Debug, Default)]
pub struct DecorationApplier {
    batches: u64,
}

impl DecorationApplier {
    /// Create a new applier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of batches applied so far.
    pub fn batches_applied(&self) -> u64 {
        self.batches
    }

    /// Clear every foreground class on `buffer`.
    pub fn clear<B: TextBuffer + ?Sized>(&self, buffer: &mut B) {
        for class in VisualClass::ALL {
            if class.layer() == Layer::Foreground {
                buffer.untag_all(class);
            }
        }
    }

    /// Clear all foreground decorations, then tag each command in batch order.
    ///
    /// Later commands dominate earlier ones of equal display priority where spans overlap.
    /// Commands addressing text that no longer exists are skipped.
    pub fn apply<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &mut B,
        commands: &[DecorationCommand],
    ) -> ApplyReport {
        self.clear(buffer);

        let mut report = ApplyReport::default();
        for command in commands {
            match buffer.tag(command.span, command.class) {
                Ok(()) => report.applied += 1,
                Err(err) => {
                    trace!(class = command.class.tag_name(), err:?; "skipping stale decoration");
                    report.skipped += 1;
                }
            }
        }

        self.batches += 1;
        trace!(
            batch = self.batches,
            applied = report.applied,
            skipped = report.skipped;
            "applied decoration batch"
        );
        report
    }
}
