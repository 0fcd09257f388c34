//! TraceQL Routes
//!
//! - POST /api/v1/traceql - Compile filter rows into a TraceQL query

use axum::{extract::rejection::JsonRejection, Json};

use crate::api::dto::{TraceqlRequest, TraceqlResponse};
use crate::api::error::ApiResult;
use crate::traceql;

/// POST /api/v1/traceql
pub async fn compile_filters(
    payload: Result<Json<TraceqlRequest>, JsonRejection>,
) -> ApiResult<Json<TraceqlResponse>> {
    let Json(req) = payload?;

    let query = traceql::compile(&req.filters);
    Ok(Json(TraceqlResponse { query }))
}
