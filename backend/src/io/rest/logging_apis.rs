use axum::{routing::post, Json, Router};
use shared::{LogRequest, LogResponse};
use tracing::{debug, error, info, warn};

use crate::AppState;

/// Create a router for browser log forwarding, nested under `/api/logs`
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(log_message))
}

/// Re-emit a browser log line through the server's tracing subscriber
async fn log_message(Json(request): Json<LogRequest>) -> Json<LogResponse> {
    let component = request.component.as_deref().unwrap_or("frontend");

    match request.level.to_lowercase().as_str() {
        "debug" => debug!(target: "sims_frontend", component, "{}", request.message),
        "warn" => warn!(target: "sims_frontend", component, "{}", request.message),
        "error" => error!(target: "sims_frontend", component, "{}", request.message),
        _ => info!(target: "sims_frontend", component, "{}", request.message),
    }

    Json(LogResponse { success: true })
}
