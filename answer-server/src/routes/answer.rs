//! Query resolution routes

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use super::ApiError;
use crate::AppState;

/// Request id header, echoed back on every answer
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `GET /v1/answer?q=` parameters
#[derive(Debug, Deserialize)]
pub struct AnswerParams {
    #[serde(default)]
    pub q: String,
}

/// `POST /v1/answer` body
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub query: String,
}

/// Resolve a query passed in the URL
pub async fn answer_get(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<AnswerParams>,
) -> Result<Response, ApiError> {
    respond(&state, &headers, &params.q).await
}

/// Resolve a query passed as JSON
pub async fn answer_post(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<AnswerRequest>,
) -> Result<Response, ApiError> {
    respond(&state, &headers, &req.query).await
}

async fn respond(
    state: &AppState,
    headers: &HeaderMap,
    query: &str,
) -> Result<Response, ApiError> {
    let ctx = match headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()) {
        Some(id) if !id.is_empty() => state.context().with_request_id(id),
        _ => state.context(),
    };

    match state.registry.resolve(&ctx, query).await {
        Ok(Some(answer)) => Ok((
            [(REQUEST_ID_HEADER, ctx.request_id().to_string())],
            Json(answer),
        )
            .into_response()),
        Ok(None) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(err) => {
            tracing::warn!(
                request_id = ctx.request_id(),
                code = err.error_code(),
                "resolve failed: {}",
                err
            );
            Err(err.into())
        }
    }
}
