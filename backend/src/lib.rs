//! # SIMS Backend
//!
//! HTTP server for the student information management system.
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (Yew frontend)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (StudentService; field rules from `shared::validation`)
//!     ↓
//! Storage Layer (StudentStorage)
//! ```
//!
//! The store is created once by `initialize_backend` and carried in
//! `AppState`; nothing is held in global state.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::domain::StudentService;
use crate::storage::{InMemoryStudentStore, StudentStorage};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub student_service: StudentService,
}

impl AppState {
    pub fn new(storage: Arc<dyn StudentStorage>) -> Self {
        Self {
            student_service: StudentService::new(storage),
        }
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend() -> AppState {
    info!("Setting up student store");
    let storage: Arc<dyn StudentStorage> = Arc::new(InMemoryStudentStore::new());

    info!("Setting up application state");
    AppState::new(storage)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Result<Router> {
    let origin = config
        .frontend_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid frontend origin: {}", config.frontend_origin))?;

    // CORS setup to allow the trunk dev server to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    Ok(Router::new()
        .nest("/api", io::api_router())
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn test_config() -> ServerConfig {
        ServerConfig {
            static_dir: std::env::temp_dir().join("sims-missing-dist"),
            ..ServerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_router_serves_api_routes() {
        let app = create_router(initialize_backend(), &test_config()).unwrap();

        for uri in ["/api/health", "/api/students"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "uri: {}", uri);
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["success"], true);
        }
    }

    #[tokio::test]
    async fn test_unknown_api_path_answers_with_json_404() {
        let app = create_router(initialize_backend(), &test_config()).unwrap();

        let response = app
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Unknown API endpoint: /api/nope");
    }

    #[tokio::test]
    async fn test_cors_allows_frontend_origin() {
        let app = create_router(initialize_backend(), &test_config()).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/students")
                    .header("origin", "http://localhost:8080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let config = ServerConfig {
            frontend_origin: "bad\norigin".to_string(),
            ..test_config()
        };

        assert!(create_router(initialize_backend(), &config).is_err());
    }
}
