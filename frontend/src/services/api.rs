use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    ApiResponse, HealthResponse, NewStudentRequest, StudentListQuery, StudentListResponse,
    StudentRecord,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Test connection to the backend
    pub async fn health(&self) -> Result<HealthResponse, String> {
        let url = format!("{}/api/health", self.base_url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Connection failed: {}", e))?;
        read_json(response).await
    }

    /// Fetch students matching the given filters
    pub async fn list_students(&self, query: &StudentListQuery) -> Result<StudentListResponse, String> {
        let url = format!("{}/api/students", self.base_url);

        let response = Request::get(&url)
            .query(query.to_pairs())
            .send()
            .await
            .map_err(|e| format!("Failed to fetch students: {}", e))?;
        read_json(response).await
    }

    /// Create a student. On success returns the stored record and the server's message.
    pub async fn create_student(&self, request: &NewStudentRequest) -> Result<(StudentRecord, String), String> {
        let url = format!("{}/api/students", self.base_url);

        let response = Request::post(&url)
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        let body: ApiResponse<StudentRecord> = read_json(response).await?;
        match body {
            ApiResponse { success: true, data: Some(student), message, .. } => {
                Ok((student, message.unwrap_or_else(|| shared::STUDENT_ADDED_MESSAGE.to_string())))
            }
            ApiResponse { error, .. } => Err(error.unwrap_or_else(|| "Failed to add student".to_string())),
        }
    }

    /// Delete a student by ID. On success returns the server's message.
    pub async fn delete_student(&self, student_id: &str) -> Result<String, String> {
        let url = format!(
            "{}/api/students/{}",
            self.base_url,
            String::from(js_sys::encode_uri_component(student_id))
        );

        let response = Request::delete(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        let body: ApiResponse<serde::de::IgnoredAny> = read_json(response).await?;
        if body.success {
            Ok(body
                .message
                .unwrap_or_else(|| shared::STUDENT_DELETED_MESSAGE.to_string()))
        } else {
            Err(body.error.unwrap_or_else(|| "Failed to delete student".to_string()))
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a JSON body whatever the status code; the API reports failures in the body.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    let status = response.status();
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Unexpected response (status {}): {}", status, e))
}
