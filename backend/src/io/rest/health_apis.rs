use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use shared::{HealthResponse, HEALTH_MESSAGE};

use crate::AppState;

/// Create a router for the liveness probe, nested under `/api/health`
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Report that the server is up, with the current UTC time
async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        success: true,
        message: HEALTH_MESSAGE.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    (StatusCode::OK, Json(response))
}
