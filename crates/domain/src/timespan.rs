use serde::{Deserialize, Serialize};

/// A half-open `[start_ts, end_ts)` interval in millis since the unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSpan {
    start_ts: i64,
    end_ts: i64,
}

impl TimeSpan {
    pub fn new(start_ts: i64, end_ts: i64) -> Self {
        Self { start_ts, end_ts }
    }

    pub fn start(&self) -> i64 {
        self.start_ts
    }

    pub fn end(&self) -> i64 {
        self.end_ts
    }

    /// A `TimeSpan` must have a positive length
    pub fn is_valid(&self) -> bool {
        self.start_ts < self.end_ts
    }

    /// Two spans overlap when each one starts before the other ends.
    /// Spans that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start_ts < other.end_ts && self.end_ts > other.start_ts
    }
}
