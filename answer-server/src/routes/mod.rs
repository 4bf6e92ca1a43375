//! HTTP route handlers

mod answer;
mod plugins;

use std::sync::Arc;

use answer_core::{AnswerError, ErrorResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::AppState;

pub use answer::AnswerRequest;
pub use plugins::PluginsResponse;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub plugins: usize,
}

/// Engine error rendered as `ErrorResponse` with its mapped status
#[derive(Debug)]
pub struct ApiError(pub AnswerError);

impl From<AnswerError> for ApiError {
    fn from(err: AnswerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = self.0.to_error_response();
        (status, Json(body)).into_response()
    }
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        plugins: state.registry.len(),
    })
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/answer", get(answer::answer_get).post(answer::answer_post))
        .route("/v1/plugins", get(plugins::list_plugins))
        .with_state(state)
}
