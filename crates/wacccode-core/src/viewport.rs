//! Viewport geometry: which part of the buffer is on screen and where a char lands in pixels.
//!
//! The kernel stays headless. Hosts report their widget size, scroll offsets and font metrics;
//! the kernel answers position → pixel queries from those numbers alone.

use unicode_width::UnicodeWidthChar;

/// Default tab width (in cells) used when a caller does not specify a tab width.
pub const DEFAULT_TAB_WIDTH: usize = 2;

/// A screen rectangle in pixels, relative to the text area's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Fixed-pitch font metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    /// Width of one cell in pixels.
    pub cell_width: u32,
    /// Height of one line in pixels.
    pub line_height: u32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: 8,
            line_height: 18,
        }
    }
}

/// The visible window onto the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// 1-based line shown at the top of the widget.
    pub first_line: usize,
    /// Horizontal scroll offset in cells.
    pub first_cell: usize,
    /// Widget width in pixels.
    pub width_px: u32,
    /// Widget height in pixels.
    pub height_px: u32,
}

impl Viewport {
    /// Create a viewport scrolled to the top-left corner.
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            first_line: 1,
            first_cell: 0,
            width_px,
            height_px,
        }
    }

    /// Number of lines that are at least partially visible.
    pub fn visible_line_count(&self, metrics: &CellMetrics) -> usize {
        let line_height = metrics.line_height.max(1);
        self.height_px.div_ceil(line_height) as usize
    }

    /// Number of cells that are at least partially visible on one line.
    pub fn visible_cell_count(&self, metrics: &CellMetrics) -> usize {
        let cell_width = metrics.cell_width.max(1);
        self.width_px.div_ceil(cell_width) as usize
    }

    /// Returns `true` if the 1-based `line` is on screen.
    pub fn shows_line(&self, line: usize, metrics: &CellMetrics) -> bool {
        line >= self.first_line && line < self.first_line + self.visible_line_count(metrics)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 800)
    }
}

/// Visual width of a char in cells (UAX #11).
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Calculate visual width (in cells) for a character at a specific cell offset within the line.
///
/// For `'\t'`, width advances to the next tab stop based on `tab_width`.
pub fn cell_width_at(ch: char, cell_offset_in_line: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        let rem = cell_offset_in_line % tab_width;
        tab_width - rem
    } else {
        char_width(ch)
    }
}

/// Cell offset of the char at `column` within `line`.
pub fn visual_x_for_column(line: &str, column: usize, tab_width: usize) -> usize {
    let mut x = 0usize;
    for ch in line.chars().take(column) {
        x = x.saturating_add(cell_width_at(ch, x, tab_width));
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_x_with_tabs_and_wide_chars() {
        assert_eq!(visual_x_for_column("\tskip", 1, 2), 2);
        assert_eq!(visual_x_for_column("a\tb", 2, 4), 4);
        assert_eq!(visual_x_for_column("你好x", 2, 2), 4);
    }

    #[test]
    fn test_visible_counts_round_up() {
        let metrics = CellMetrics {
            cell_width: 10,
            line_height: 20,
        };
        let viewport = Viewport::new(95, 50);
        assert_eq!(viewport.visible_cell_count(&metrics), 10);
        assert_eq!(viewport.visible_line_count(&metrics), 3);
        assert!(viewport.shows_line(3, &metrics));
        assert!(!viewport.shows_line(4, &metrics));
    }
}
