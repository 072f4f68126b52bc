//! # REST API Interface Layer
//!
//! HTTP endpoints for the student information system. This layer handles
//! JSON (de)serialization, maps domain outcomes to status codes and the
//! `{success, ...}` envelope, and logs each request. It holds no business
//! rules of its own.
//!
//! ## Endpoints
//!
//! - `GET /api/students`: list, with `search`, `program` and `gender` filters
//! - `POST /api/students`: create
//! - `DELETE /api/students/:id`: delete
//! - `GET /api/health`: liveness probe
//! - `POST /api/logs`: browser log forwarding

pub mod health_apis;
pub mod logging_apis;
pub mod student_apis;

use axum::{
    extract::OriginalUri,
    http::StatusCode,
    response::{IntoResponse, Json},
    Router,
};
use shared::ApiResponse;
use tracing::warn;

use crate::AppState;

/// All API routes, to be nested under `/api`. Unknown API paths get a JSON
/// 404 instead of falling through to the static files.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/students", student_apis::router())
        .nest("/health", health_apis::router())
        .nest("/logs", logging_apis::router())
        .fallback(unknown_endpoint)
}

async fn unknown_endpoint(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    warn!("No API endpoint for {}", uri.path());
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error(format!("Unknown API endpoint: {}", uri.path()))),
    )
}
