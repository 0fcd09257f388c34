//! Split Routes
//!
//! Endpoints for splitting query ranges into chunks.
//!
//! - POST /api/v1/split - Step-aligned metric chunks
//! - POST /api/v1/split/logs - Contiguous log chunks

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{LogSplitRequest, SplitRequest, SplitResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::split::TimeRange;

/// POST /api/v1/split
///
/// Split a metric query range. A range that cannot be split within the
/// limits is not an error: the response carries `"chunks": null`.
pub async fn split_metric_range(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SplitRequest>, JsonRejection>,
) -> ApiResult<Json<SplitResponse>> {
    let Json(req) = payload?;

    let range = request_range(req.start.timestamp()?, req.end.timestamp()?)?;
    let step = req.step.duration()?;
    let max_chunk = req.max_chunk.duration()?;

    let chunks = state.chunker.chunk_range(range, step, max_chunk);

    tracing::debug!(
        start = range.start,
        end = range.end,
        step,
        max_chunk,
        chunks = chunks.as_ref().map(Vec::len),
        "split metric range"
    );

    Ok(Json(SplitResponse::from(chunks)))
}

/// POST /api/v1/split/logs
///
/// Split a log query range into contiguous chunks.
pub async fn split_log_range(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LogSplitRequest>, JsonRejection>,
) -> ApiResult<Json<SplitResponse>> {
    let Json(req) = payload?;

    let range = request_range(req.start.timestamp()?, req.end.timestamp()?)?;
    let chunk = req.chunk.duration()?;

    let chunks = state.chunker.log_chunks_range(range, chunk);

    tracing::debug!(
        start = range.start,
        end = range.end,
        chunk,
        chunks = chunks.as_ref().map(Vec::len),
        "split log range"
    );

    Ok(Json(SplitResponse::from(chunks)))
}

fn request_range(start: i64, end: i64) -> ApiResult<TimeRange> {
    TimeRange::try_new(start, end)
        .ok_or_else(|| ApiError::Validation("start must not be after end".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_range() {
        assert_eq!(request_range(1, 2).unwrap(), TimeRange { start: 1, end: 2 });
        assert!(request_range(2, 2).is_ok());
        assert!(matches!(request_range(3, 2), Err(ApiError::Validation(_))));
    }
}
