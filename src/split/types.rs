//! Split Types
//!
//! Core types for range splitting:
//! - `Chunk`: One sub-interval produced by the chunker
//! - `TimeRange`: A time interval to be split

use serde::{Deserialize, Serialize};

/// A single chunk of a split query range
///
/// Both bounds are unix timestamps in milliseconds. Serialized as a
/// two-element array `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct Chunk {
    /// First timestamp covered by the chunk
    pub start: i64,
    /// Last timestamp covered by the chunk
    pub end: i64,
}

impl Chunk {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Get the span of the chunk in milliseconds
    pub fn duration_millis(&self) -> i64 {
        self.end - self.start
    }
}

impl From<(i64, i64)> for Chunk {
    fn from((start, end): (i64, i64)) -> Self {
        Self { start, end }
    }
}

impl From<Chunk> for (i64, i64) {
    fn from(chunk: Chunk) -> Self {
        (chunk.start, chunk.end)
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// A time range in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start timestamp, in milliseconds
    pub start: i64,
    /// End timestamp, in milliseconds
    pub end: i64,
}

impl TimeRange {
    /// Create a time range, returning None if start is after end
    pub fn try_new(start: i64, end: i64) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_serializes_as_pair() {
        let chunk = Chunk::new(1000, 2000);
        let json = serde_json::to_string(&chunk).unwrap();
        assert_eq!(json, "[1000,2000]");
        assert_eq!(chunk.to_string(), "[1000, 2000]");

        let restored: Chunk = serde_json::from_str("[5,15]").unwrap();
        assert_eq!(restored, Chunk::new(5, 15));
        assert_eq!(restored.duration_millis(), 10);
    }

    #[test]
    fn test_time_range_try_new() {
        assert!(TimeRange::try_new(1000, 2000).is_some());
        assert!(TimeRange::try_new(1000, 1000).is_some());
        assert!(TimeRange::try_new(2000, 1000).is_none());
    }
}
