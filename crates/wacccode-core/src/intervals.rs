//! Tagged char ranges.
//!
//! Each [`VisualClass`](crate::VisualClass) owns one [`IntervalTree`]. Intervals remember the
//! sequence number of the tag operation that created them so overlapping tags can be layered by
//! application order.

/// A tagged `[start, end)` char range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    /// Start char offset.
    pub start: usize,
    /// End char offset (exclusive).
    pub end: usize,
    /// Application sequence number; larger means applied later.
    pub seq: u64,
}

impl Interval {
    /// Create a new interval with `[start, end)` offsets and an application sequence number.
    pub fn new(start: usize, end: usize, seq: u64) -> Self {
        Self { start, end, seq }
    }

    /// Check if interval contains a specific position
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

}

/// Interval tree - manages tagged intervals
///
/// Uses a sorted vector with binary search for efficient interval queries.
/// Query complexity: O(log n + k), where k is the number of overlapping intervals.
/// Insertion complexity: O(n) (requires maintaining sort order).
pub struct IntervalTree {
    /// List of intervals (kept sorted by start position)
    intervals: Vec<Interval>,
    /// Prefix maximum end position: `prefix_max_end[i] = max(intervals[0..=i].end)`
    prefix_max_end: Vec<usize>,
}

impl IntervalTree {
    /// Create an empty interval tree.
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
            prefix_max_end: Vec::new(),
        }
    }

    fn rebuild_prefix_max_end_from(&mut self, start_idx: usize) {
        if self.intervals.is_empty() {
            self.prefix_max_end.clear();
            return;
        }

        if self.prefix_max_end.len() != self.intervals.len() {
            self.prefix_max_end.resize(self.intervals.len(), 0);
        }

        let mut max_end = if start_idx == 0 {
            0
        } else {
            self.prefix_max_end[start_idx - 1]
        };

        for (idx, interval) in self.intervals.iter().enumerate().skip(start_idx) {
            max_end = max_end.max(interval.end);
            self.prefix_max_end[idx] = max_end;
        }
    }

    fn rebuild_prefix_max_end(&mut self) {
        self.rebuild_prefix_max_end_from(0);
    }

    /// Insert an interval. Empty intervals are ignored.
    pub fn insert(&mut self, interval: Interval) {
        if interval.start >= interval.end {
            return;
        }

        // Insert after existing intervals with the same start so iteration order follows
        // application order for identical ranges.
        let pos = self
            .intervals
            .partition_point(|i| i.start <= interval.start);

        self.intervals.insert(pos, interval);
        self.prefix_max_end.insert(pos, 0);
        self.rebuild_prefix_max_end_from(pos);
    }

    /// Query all intervals containing a specific position
    pub fn query_point(&self, pos: usize) -> Vec<&Interval> {
        self.query_point_impl(pos).0
    }

    fn query_point_impl(&self, pos: usize) -> (Vec<&Interval>, usize) {
        if self.intervals.is_empty() {
            return (Vec::new(), 0);
        }

        let mut result = Vec::new();
        let mut scanned = 0usize;

        // All intervals with start <= pos are before idx
        let idx = self.intervals.partition_point(|i| i.start <= pos);

        for i in (0..idx).rev() {
            scanned = scanned.saturating_add(1);

            // If maximum end of `intervals[0..=i]` is <= pos, earlier intervals cannot contain pos.
            if self.prefix_max_end[i] <= pos {
                break;
            }

            let interval = &self.intervals[i];
            if interval.contains(pos) {
                result.push(interval);
            }
        }

        (result, scanned)
    }

    #[cfg(test)]
    fn query_point_scan_count(&self, pos: usize) -> usize {
        self.query_point_impl(pos).1
    }

    /// Iterate over all intervals in start order.
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }

    /// Get number of intervals
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Shift intervals after inserting `delta` chars at `pos`.
    ///
    /// Text inserted at an interval's start is not tagged; text inserted strictly inside it is.
    pub fn update_for_insertion(&mut self, pos: usize, delta: usize) {
        for interval in &mut self.intervals {
            if interval.start >= pos {
                interval.start += delta;
                interval.end += delta;
            } else if interval.end > pos {
                // Interval spans insertion point, extend end position
                interval.end += delta;
            }
        }
        self.rebuild_prefix_max_end();
    }

    /// Shift and trim intervals after deleting the char range `[start, end)`.
    pub fn update_for_deletion(&mut self, start: usize, end: usize) {
        let delta = end - start;

        self.intervals.retain_mut(|interval| {
            if interval.end <= start {
                // Interval is before deletion range, unaffected
            } else if interval.start >= end {
                interval.start -= delta;
                interval.end -= delta;
            } else if interval.start >= start && interval.end <= end {
                // Completely within the deleted range
                return false;
            } else if interval.start < start && interval.end > end {
                interval.end -= delta;
            } else if interval.start < start {
                interval.end = start;
            } else {
                interval.start = start;
                interval.end -= delta;
            }
            true
        });

        // Shifting can break the sort order only for intervals clipped to `start`.
        self.intervals.sort_by_key(|i| i.start);
        self.rebuild_prefix_max_end();
    }
}

impl Default for IntervalTree {
    fn default() -> Self {
        Self::new()
    }
}
