//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::split::{parse_duration, parse_timestamp, Chunk, SplitResult};
use crate::traceql::FilterDescriptor;

/// A timestamp or duration given either as milliseconds or as text
///
/// Text timestamps accept ISO 8601 or relative forms like "now-1h";
/// text durations accept forms like "30s" or "1m30s".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MillisOrText {
    Millis(i64),
    Text(String),
}

impl MillisOrText {
    /// Resolve as an epoch-millisecond timestamp
    pub fn timestamp(&self) -> SplitResult<i64> {
        match self {
            Self::Millis(ms) => Ok(*ms),
            Self::Text(s) => parse_timestamp(s),
        }
    }

    /// Resolve as a duration in milliseconds
    pub fn duration(&self) -> SplitResult<i64> {
        match self {
            Self::Millis(ms) => Ok(*ms),
            Self::Text(s) => parse_duration(s),
        }
    }
}

// ============================================
// SPLIT DTOs
// ============================================

/// Metric range split request
#[derive(Debug, Deserialize)]
pub struct SplitRequest {
    /// Range start
    pub start: MillisOrText,
    /// Range end
    pub end: MillisOrText,
    /// Query step
    pub step: MillisOrText,
    /// Largest allowed chunk span
    pub max_chunk: MillisOrText,
}

/// Log range split request
#[derive(Debug, Deserialize)]
pub struct LogSplitRequest {
    /// Range start
    pub start: MillisOrText,
    /// Range end
    pub end: MillisOrText,
    /// Chunk span
    pub chunk: MillisOrText,
}

/// Split response
///
/// `chunks` is null when the range cannot be split within the limits.
#[derive(Debug, Serialize, Deserialize)]
pub struct SplitResponse {
    pub chunks: Option<Vec<Chunk>>,
    /// Number of chunks, 0 when `chunks` is null
    pub chunk_count: usize,
}

impl From<Option<Vec<Chunk>>> for SplitResponse {
    fn from(chunks: Option<Vec<Chunk>>) -> Self {
        let chunk_count = chunks.as_ref().map_or(0, Vec::len);
        Self {
            chunks,
            chunk_count,
        }
    }
}

// ============================================
// TRACEQL DTOs
// ============================================

/// TraceQL compile request
#[derive(Debug, Deserialize)]
pub struct TraceqlRequest {
    /// Filter rows in editor order; malformed rows are skipped
    #[serde(default, deserialize_with = "crate::traceql::deserialize_rows")]
    pub filters: Vec<FilterDescriptor>,
}

/// TraceQL compile response
#[derive(Debug, Serialize, Deserialize)]
pub struct TraceqlResponse {
    pub query: String,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status
    pub status: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
    /// Chunk-count cap in effect
    pub max_chunk_count: usize,
}
