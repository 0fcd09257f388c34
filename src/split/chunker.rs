//! Range Chunker
//!
//! Splits a large query range into smaller sub-ranges so a backend can be
//! queried piece by piece.
//!
//! Metric queries are evaluated on a grid of `step`-spaced timestamps, so
//! metric chunks are aligned to that grid and their bounds are inclusive:
//! the next chunk starts one step after the previous one ended. Log queries
//! have no grid, so log chunks share their boundaries instead.
//!
//! Both layouts walk from the end of the range backwards, which leaves the
//! only short chunk at the start of the range. For metric chunks that short
//! chunk may be a single sample (`start == end`) when the aligned start falls
//! exactly between two full chunks.

use crate::split::types::{Chunk, TimeRange};

/// Upper bound on the number of chunks a single request may produce
pub const DEFAULT_MAX_CHUNK_COUNT: usize = 50;

/// Splits time ranges into bounded chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeChunker {
    max_chunk_count: usize,
}

impl Default for RangeChunker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK_COUNT)
    }
}

impl RangeChunker {
    /// Create a chunker with a custom chunk-count cap
    pub fn new(max_chunk_count: usize) -> Self {
        Self { max_chunk_count }
    }

    /// Get the chunk-count cap
    pub fn max_chunk_count(&self) -> usize {
        self.max_chunk_count
    }

    /// Split a metric query range into step-aligned chunks.
    ///
    /// `start` is floored and `end` is ceiled to the `step` grid. Each chunk
    /// spans the largest multiple of `step` that fits in `max_chunk_ms`.
    ///
    /// Returns `None` when the request cannot be satisfied: a non-positive
    /// step, `start > end`, an empty aligned range, `max_chunk_ms < step`,
    /// or more chunks than the cap allows.
    pub fn chunk(&self, start: i64, end: i64, step: i64, max_chunk_ms: i64) -> Option<Vec<Chunk>> {
        if step <= 0 || start > end {
            return None;
        }

        if max_chunk_ms < step {
            tracing::debug!(step, max_chunk_ms, "chunk size is smaller than step");
            return None;
        }

        let span = (max_chunk_ms / step) * step;
        let aligned_start = start.checked_sub(start.rem_euclid(step))?;
        let aligned_end = align_up(end, step)?;

        if aligned_end <= aligned_start {
            return None;
        }

        // Chunk bounds are inclusive, so consecutive chunks are one step apart.
        let stride = span.checked_add(step)?;

        let mut chunks = Vec::new();
        let mut chunk_end = aligned_end;

        while chunk_end >= aligned_start {
            let chunk_start = chunk_end.saturating_sub(span).max(aligned_start);
            chunks.push(Chunk::new(chunk_start, chunk_end));

            if chunks.len() > self.max_chunk_count {
                tracing::debug!(
                    start,
                    end,
                    step,
                    max_chunk_ms,
                    max_chunk_count = self.max_chunk_count,
                    "too many chunks requested"
                );
                return None;
            }

            chunk_end = match chunk_end.checked_sub(stride) {
                Some(next) => next,
                None => break,
            };
        }

        chunks.reverse();
        Some(chunks)
    }

    /// Split a metric query over a `TimeRange`
    pub fn chunk_range(&self, range: TimeRange, step: i64, max_chunk_ms: i64) -> Option<Vec<Chunk>> {
        self.chunk(range.start, range.end, step, max_chunk_ms)
    }

    /// Split a log query range into contiguous chunks of at most `chunk_ms`.
    ///
    /// A range no longer than `chunk_ms` comes back as a single chunk.
    /// Returns `None` for a non-positive chunk size, an empty range, or more
    /// chunks than the cap allows.
    pub fn log_chunks(&self, start: i64, end: i64, chunk_ms: i64) -> Option<Vec<Chunk>> {
        if chunk_ms <= 0 || end <= start {
            return None;
        }

        let mut chunks = Vec::new();
        let mut chunk_end = end;

        while chunk_end > start {
            let chunk_start = chunk_end.saturating_sub(chunk_ms).max(start);
            chunks.push(Chunk::new(chunk_start, chunk_end));

            if chunks.len() > self.max_chunk_count {
                tracing::debug!(
                    start,
                    end,
                    chunk_ms,
                    max_chunk_count = self.max_chunk_count,
                    "too many log chunks requested"
                );
                return None;
            }

            chunk_end = chunk_start;
        }

        chunks.reverse();
        Some(chunks)
    }

    /// Split a log query over a `TimeRange`
    pub fn log_chunks_range(&self, range: TimeRange, chunk_ms: i64) -> Option<Vec<Chunk>> {
        self.log_chunks(range.start, range.end, chunk_ms)
    }
}

/// Round `value` up to the next multiple of `step`
fn align_up(value: i64, step: i64) -> Option<i64> {
    match value.rem_euclid(step) {
        0 => Some(value),
        rem => value.checked_add(step - rem),
    }
}

/// Split a metric query range using the default chunk-count cap
pub fn range_chunks(start: i64, end: i64, step: i64, max_chunk_ms: i64) -> Option<Vec<Chunk>> {
    RangeChunker::default().chunk(start, end, step, max_chunk_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> i64 {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    fn pairs(chunks: &[Chunk]) -> Vec<(i64, i64)> {
        chunks.iter().map(|c| (c.start, c.end)).collect()
    }

    #[test]
    fn test_splits_into_step_aligned_chunks() {
        let start = ts("2022-02-06T14:10:03");
        let end = ts("2022-02-06T14:11:03");

        let chunks = range_chunks(start, end, 10_000, 25_000).unwrap();

        assert_eq!(
            pairs(&chunks),
            vec![
                (ts("2022-02-06T14:10:00"), ts("2022-02-06T14:10:10")),
                (ts("2022-02-06T14:10:20"), ts("2022-02-06T14:10:40")),
                (ts("2022-02-06T14:10:50"), ts("2022-02-06T14:11:10")),
            ]
        );
    }

    #[test]
    fn test_too_many_chunks_returns_none() {
        let start = ts("2022-02-06T14:10:03");
        let end = ts("2022-02-06T14:35:01");

        assert!(range_chunks(start, end, 10_000, 20_000).is_none());
    }

    #[test]
    fn test_chunk_size_below_step_returns_none() {
        let start = ts("2022-02-06T14:10:03");
        let end = ts("2022-02-06T14:10:33");

        assert!(range_chunks(start, end, 10_000, 1_000).is_none());
    }

    #[test]
    fn test_chunk_count_cap_boundary() {
        // span 20s + one 10s step between chunks: 30s per chunk
        let at_cap = range_chunks(0, 1_490_000, 10_000, 20_000).unwrap();
        assert_eq!(at_cap.len(), DEFAULT_MAX_CHUNK_COUNT);

        assert!(range_chunks(0, 1_490_001, 10_000, 20_000).is_none());
    }

    #[test]
    fn test_custom_cap() {
        let chunker = RangeChunker::new(2);
        let start = ts("2022-02-06T14:10:03");
        let end = ts("2022-02-06T14:11:03");

        assert!(chunker.chunk(start, end, 10_000, 25_000).is_none());
        assert_eq!(RangeChunker::new(3).chunk(start, end, 10_000, 25_000).unwrap().len(), 3);
    }

    #[test]
    fn test_chunk_invariants() {
        let start = 1_644_156_603_000;
        let end = start + 3_600_000;
        let step = 15_000;
        let max_chunk_ms = 400_000;

        let chunks = range_chunks(start, end, step, max_chunk_ms).unwrap();

        assert!(chunks[0].start <= start);
        assert!(chunks.last().unwrap().end >= end);

        for chunk in &chunks {
            assert!(chunk.start <= chunk.end);
            assert!(chunk.duration_millis() <= max_chunk_ms);
            assert_eq!(chunk.start.rem_euclid(step), 0);
            assert_eq!(chunk.end.rem_euclid(step), 0);
        }

        for pair in chunks.windows(2) {
            assert_eq!(pair[1].start, pair[0].end + step);
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(range_chunks(1000, 2000, 0, 5000).is_none());
        assert!(range_chunks(1000, 2000, -10, 5000).is_none());
        assert!(range_chunks(2000, 1000, 10, 5000).is_none());
        // start == end on the step grid leaves nothing to split
        assert!(range_chunks(10_000, 10_000, 10_000, 20_000).is_none());
    }

    #[test]
    fn test_unaligned_point_expands_to_one_step() {
        let chunks = range_chunks(10_003, 10_003, 10_000, 20_000).unwrap();
        assert_eq!(pairs(&chunks), vec![(10_000, 20_000)]);
    }

    #[test]
    fn test_negative_timestamps_floor() {
        let chunks = range_chunks(-15_000, -1_000, 10_000, 20_000).unwrap();
        assert_eq!(pairs(&chunks), vec![(-20_000, 0)]);
    }

    #[test]
    fn test_aligned_start_on_stride_boundary_is_covered() {
        // chunk ends land on 0 and -20_000; the aligned start itself still
        // gets a single-sample chunk
        let chunks = range_chunks(-15_000, -1_000, 10_000, 10_000).unwrap();
        assert_eq!(pairs(&chunks), vec![(-20_000, -20_000), (-10_000, 0)]);
        assert!(chunks[0].start <= -15_000);
    }

    #[test]
    fn test_overflow_returns_none() {
        assert!(range_chunks(i64::MAX - 5, i64::MAX - 1, 10, 100).is_none());
    }

    #[test]
    fn test_start_near_min_does_not_overflow() {
        // flooring i64::MIN onto a grid of 3 would step below i64::MIN
        assert!(range_chunks(i64::MIN, 0, 3, 3).is_none());
        assert!(range_chunks(i64::MIN + 1, i64::MIN + 2, 3, 3).is_none());

        // already on the grid, so the floor is a no-op; the cap still applies
        assert!(range_chunks(i64::MIN, 0, 1 << 40, 1 << 40).is_none());
        let chunks = range_chunks(i64::MIN, i64::MIN + 10, 2, 20).unwrap();
        assert_eq!(pairs(&chunks), vec![(i64::MIN, i64::MIN + 10)]);
    }

    #[test]
    fn test_chunk_range_matches_chunk() {
        let range = TimeRange::try_new(3_000, 63_000).unwrap();
        assert_eq!(
            RangeChunker::default().chunk_range(range, 10_000, 25_000),
            range_chunks(3_000, 63_000, 10_000, 25_000)
        );
    }

    #[test]
    fn test_log_chunks_range_matches_log_chunks() {
        let chunker = RangeChunker::default();
        let range = TimeRange::try_new(1_000, 10_000).unwrap();
        assert_eq!(
            chunker.log_chunks_range(range, 4_000),
            chunker.log_chunks(1_000, 10_000, 4_000)
        );
    }

    #[test]
    fn test_deterministic() {
        let a = range_chunks(0, 600_000, 10_000, 60_000);
        let b = range_chunks(0, 600_000, 10_000, 60_000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_log_chunks_contiguous() {
        let chunker = RangeChunker::default();
        let chunks = chunker.log_chunks(1_000, 10_000, 4_000).unwrap();

        assert_eq!(pairs(&chunks), vec![(1_000, 2_000), (2_000, 6_000), (6_000, 10_000)]);
    }

    #[test]
    fn test_log_chunks_short_range_is_single_chunk() {
        let chunker = RangeChunker::default();
        let chunks = chunker.log_chunks(1_000, 3_000, 4_000).unwrap();

        assert_eq!(pairs(&chunks), vec![(1_000, 3_000)]);
    }

    #[test]
    fn test_log_chunks_rejects_degenerate_and_oversized() {
        let chunker = RangeChunker::default();

        assert!(chunker.log_chunks(1_000, 1_000, 4_000).is_none());
        assert!(chunker.log_chunks(1_000, 5_000, 0).is_none());
        assert_eq!(chunker.log_chunks(0, 50_000, 1_000).unwrap().len(), 50);
        assert!(chunker.log_chunks(0, 50_001, 1_000).is_none());
    }
}
