//! # REST API for Student Management
//!
//! Endpoints for listing, creating and deleting students. Every outcome,
//! including rejected input, is answered with the JSON envelope
//! `{success, data?, message?, error?}`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get},
    Router,
};
use shared::{
    ApiResponse, NewStudentRequest, StudentListQuery, StudentListResponse, StudentRecord,
    STUDENT_ADDED_MESSAGE, STUDENT_DELETED_MESSAGE,
};
use tracing::{error, info, warn};

use crate::domain::StudentServiceError;
use crate::AppState;

/// Create a router for student APIs, nested under `/api/students`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route("/:id", delete(delete_student))
}

impl IntoResponse for StudentServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            StudentServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            StudentServiceError::DuplicateId(_) => StatusCode::CONFLICT,
            StudentServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            StudentServiceError::Storage(e) => {
                error!("Storage failure: {:?}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<()>::error("Internal server error")),
                )
                    .into_response();
            }
        };
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}

/// List students, optionally filtered by search term, program and gender
async fn list_students(
    State(state): State<AppState>,
    query: Result<Query<StudentListQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!("GET /api/students - unreadable query: {}", rejection.body_text());
            let message = format!("Invalid query string: {}", rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(ApiResponse::<()>::error(message))).into_response();
        }
    };
    info!("GET /api/students - query: {:?}", query);

    match state.student_service.list_students(&query).await {
        Ok(listing) => {
            let response = StudentListResponse {
                success: true,
                data: listing.students,
                total: listing.total,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Create a new student
async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<NewStudentRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("POST /api/students - unreadable body: {}", rejection.body_text());
            let message = format!("Invalid request body: {}", rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(ApiResponse::<()>::error(message))).into_response();
        }
    };
    info!("POST /api/students - request: {:?}", request);

    match state.student_service.create_student(request).await {
        Ok(student) => (
            StatusCode::CREATED,
            Json(ApiResponse::<StudentRecord>::success(student, STUDENT_ADDED_MESSAGE)),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a student by ID
async fn delete_student(State(state): State<AppState>, Path(student_id): Path<String>) -> Response {
    info!("DELETE /api/students/{}", student_id);

    match state.student_service.delete_student(&student_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::<()>::message(STUDENT_DELETED_MESSAGE)),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStudentStore;
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::util::ServiceExt; // for `oneshot`

    fn setup_test_app() -> Router {
        let state = AppState::new(Arc::new(InMemoryStudentStore::new()));
        router().with_state(state)
    }

    fn student_json(id: &str) -> Value {
        json!({
            "id": id,
            "fullName": "Ann Lee",
            "gender": "Female",
            "email": "ann.lee@example.edu",
            "program": "CS",
            "yearLevel": "1st Year",
            "university": "ABC"
        })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_create_student_returns_record_and_message() {
        let app = setup_test_app();

        let (status, body) = send(&app, Method::POST, "/", Some(student_json("S1"))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Student added successfully");
        assert_eq!(body["data"], student_json("S1"));
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_create_then_list_contains_record_once() {
        let app = setup_test_app();
        send(&app, Method::POST, "/", Some(student_json("S1"))).await;

        let (status, body) = send(&app, Method::GET, "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["total"], 1);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.iter().filter(|s| s["id"] == "S1").count(), 1);
    }

    #[tokio::test]
    async fn test_create_invalid_student_joins_messages() {
        let app = setup_test_app();
        let mut student = student_json("S1");
        student["email"] = json!("bad-email");
        student["gender"] = json!("Other");

        let (status, body) = send(&app, Method::POST, "/", Some(student)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "Gender must be Male or Female, Valid email address is required"
            })
        );
    }

    #[tokio::test]
    async fn test_create_with_missing_fields_reports_them() {
        let app = setup_test_app();

        let (status, body) = send(&app, Method::POST, "/", Some(json!({ "id": "S1" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error = body["error"].as_str().unwrap();
        assert!(error.contains("Full Name is required"));
        assert!(error.contains("University is required"));
        assert!(!error.contains("Student ID"));
    }

    #[tokio::test]
    async fn test_create_with_wrongly_typed_fields_reports_field_rules() {
        let app = setup_test_app();
        let mut student = student_json("S1");
        student["gender"] = json!(1);
        student["email"] = json!(42);
        student["yearLevel"] = json!(3);

        let (status, body) = send(&app, Method::POST, "/", Some(student)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "Gender must be Male or Female, Valid email address is required, \
                          Valid year level is required (1st Year to 6th Year)"
            })
        );

        let (_, list) = send(&app, Method::GET, "/", None).await;
        assert_eq!(list["total"], 0);
    }

    #[tokio::test]
    async fn test_create_duplicate_id() {
        let app = setup_test_app();
        send(&app, Method::POST, "/", Some(student_json("S1"))).await;

        let mut second = student_json("S1");
        second["fullName"] = json!("Someone Else");
        let (status, body) = send(&app, Method::POST, "/", Some(second)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "success": false, "error": "Student ID already exists" }));

        let (_, list) = send(&app, Method::GET, "/", None).await;
        assert_eq!(list["data"].as_array().unwrap().len(), 1);
        assert_eq!(list["data"][0]["fullName"], "Ann Lee");
    }

    #[tokio::test]
    async fn test_create_with_malformed_json() {
        let app = setup_test_app();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ApiResponse<()> = serde_json::from_slice(&bytes).unwrap();
        assert!(!body.success);
        assert!(body.error.unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_delete_student() {
        let app = setup_test_app();
        send(&app, Method::POST, "/", Some(student_json("S1"))).await;
        send(&app, Method::POST, "/", Some(student_json("S2"))).await;

        let (status, body) = send(&app, Method::DELETE, "/S1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "message": "Student deleted successfully" }));

        let (_, list) = send(&app, Method::GET, "/", None).await;
        let ids: Vec<&str> = list["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|s| s["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["S2"]);
    }

    #[tokio::test]
    async fn test_delete_unknown_student() {
        let app = setup_test_app();
        send(&app, Method::POST, "/", Some(student_json("S1"))).await;

        let (status, body) = send(&app, Method::DELETE, "/S404", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "success": false, "error": "Student not found" }));

        let (_, list) = send(&app, Method::GET, "/", None).await;
        assert_eq!(list["total"], 1);
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let app = setup_test_app();
        let mut bob = student_json("S2");
        bob["fullName"] = json!("Bob Cruz");
        bob["gender"] = json!("Male");
        bob["program"] = json!("IT");
        send(&app, Method::POST, "/", Some(student_json("S1"))).await;
        send(&app, Method::POST, "/", Some(bob)).await;

        let (_, by_gender) = send(&app, Method::GET, "/?gender=Male", None).await;
        assert_eq!(by_gender["data"].as_array().unwrap().len(), 1);
        assert_eq!(by_gender["data"][0]["id"], "S2");
        assert_eq!(by_gender["total"], 2);

        let (_, by_search) = send(&app, Method::GET, "/?search=ann%20LEE&program=CS", None).await;
        assert_eq!(by_search["data"].as_array().unwrap().len(), 1);
        assert_eq!(by_search["data"][0]["id"], "S1");

        let (_, all) = send(&app, Method::GET, "/?program=all&gender=all", None).await;
        assert_eq!(all["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_with_unreadable_query_answers_with_envelope() {
        let app = setup_test_app();

        let (status, body) = send(&app, Method::GET, "/?search=a&search=b", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid query string"));
        assert!(body.get("data").is_none());
    }
}
