//! What the user asked to extract for one build.

use serde::{Deserialize, Serialize};

/// Range bound meaning "not set".
pub const UNSET_BOUND: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionOptions {
    pub save_first: bool,
    pub save_last: bool,
    pub range_start: i64,
    pub range_end: i64,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            save_first: false,
            save_last: false,
            range_start: UNSET_BOUND,
            range_end: UNSET_BOUND,
        }
    }
}

impl ExtractionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first(mut self) -> Self {
        self.save_first = true;
        self
    }

    pub fn with_last(mut self) -> Self {
        self.save_last = true;
        self
    }

    pub fn with_range(mut self, start: i64, end: i64) -> Self {
        self.range_start = start;
        self.range_end = end;
        self
    }

    /// The requested range, if both bounds are set and ordered.
    ///
    /// Anything else is "no range", never an error.
    pub fn active_range(&self) -> Option<FrameRange> {
        FrameRange::new(self.range_start, self.range_end)
    }

    pub fn is_requested(&self) -> bool {
        self.save_first || self.save_last || self.active_range().is_some()
    }
}

/// Inclusive, non-empty run of frame indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    start: i64,
    end: i64,
    frame_count: i64,
}

impl FrameRange {
    /// `None` unless both bounds are set and ordered. A range whose length
    /// does not fit in an `i64` (e.g. `0..=i64::MAX`) is also rejected.
    pub fn new(start: i64, end: i64) -> Option<Self> {
        if start < 0 || end < 0 || start > end {
            return None;
        }
        let frame_count = end.checked_sub(start)?.checked_add(1)?;
        Some(Self {
            start,
            end,
            frame_count,
        })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Number of frames covered, both bounds included.
    pub fn frame_count(&self) -> i64 {
        self.frame_count
    }
}
