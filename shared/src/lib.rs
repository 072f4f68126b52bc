use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub mod validation;

pub use validation::{validate_student, StudentField, ValidationError};

/// Message returned when a create request reuses an existing student ID
pub const DUPLICATE_ID_MESSAGE: &str = "Student ID already exists";
/// Message returned when a delete request names an unknown student ID
pub const NOT_FOUND_MESSAGE: &str = "Student not found";
pub const STUDENT_ADDED_MESSAGE: &str = "Student added successfully";
pub const STUDENT_DELETED_MESSAGE: &str = "Student deleted successfully";
pub const HEALTH_MESSAGE: &str = "SIMS Server is running";

/// A stored student. Every instance has passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Unique student ID (1-20 characters)
    pub id: String,
    /// Full name (2-100 characters)
    pub full_name: String,
    pub gender: Gender,
    pub email: String,
    /// Degree program, e.g. "BS Computer Science"
    pub program: String,
    pub year_level: YearLevel,
    pub university: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    /// Exact, case-sensitive match on the wire value
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Year level, serialized as "1st Year" through "6th Year"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum YearLevel {
    #[serde(rename = "1st Year")]
    First,
    #[serde(rename = "2nd Year")]
    Second,
    #[serde(rename = "3rd Year")]
    Third,
    #[serde(rename = "4th Year")]
    Fourth,
    #[serde(rename = "5th Year")]
    Fifth,
    #[serde(rename = "6th Year")]
    Sixth,
}

impl YearLevel {
    pub const ALL: [YearLevel; 6] = [
        YearLevel::First,
        YearLevel::Second,
        YearLevel::Third,
        YearLevel::Fourth,
        YearLevel::Fifth,
        YearLevel::Sixth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            YearLevel::First => "1st Year",
            YearLevel::Second => "2nd Year",
            YearLevel::Third => "3rd Year",
            YearLevel::Fourth => "4th Year",
            YearLevel::Fifth => "5th Year",
            YearLevel::Sixth => "6th Year",
        }
    }
}

impl fmt::Display for YearLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YearLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        YearLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Returned when a string does not name any variant of an enumerated field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown value: {}", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

/// A candidate student as submitted by a client. Any field may be missing
/// or hold a non-string JSON value; validation decides whether it can become
/// a `StudentRecord`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudentRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub program: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub university: Option<String>,
}

/// Reads any JSON value; anything but a string counts as absent so the
/// field fails its own rule instead of the whole body.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(value) => Some(value),
        _ => None,
    })
}

/// Query parameters accepted by `GET /api/students`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentListQuery {
    /// Case-insensitive substring matched against name, ID and email
    pub search: Option<String>,
    /// Exact program match
    pub program: Option<String>,
    /// Exact gender match
    pub gender: Option<String>,
}

impl StudentListQuery {
    /// Non-empty parameters as `(name, value)` pairs, ready for a query string
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("search", &self.search),
            ("program", &self.program),
            ("gender", &self.gender),
        ]
        .into_iter()
        .filter_map(|(name, value)| match value {
            Some(v) if !v.is_empty() => Some((name, v.clone())),
            _ => None,
        })
        .collect()
    }
}

/// Standard JSON envelope: `{success, data?, message?, error?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Response for `GET /api/students`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentListResponse {
    pub success: bool,
    /// Records matching the query, in insertion order
    pub data: Vec<StudentRecord>,
    /// Size of the whole collection before filtering
    pub total: usize,
}

/// Response for `GET /api/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    /// RFC 3339 UTC timestamp
    pub timestamp: String,
}

/// A log line forwarded from the browser to the server log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRequest {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}

/// Summary figures shown above the student table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentStats {
    pub total: usize,
    pub male: usize,
    pub female: usize,
    /// Number of distinct programs
    pub programs: usize,
}

impl StudentStats {
    pub fn from_records(records: &[StudentRecord]) -> Self {
        let count = |gender: Gender| records.iter().filter(|s| s.gender == gender).count();
        let programs: BTreeSet<&str> = records.iter().map(|s| s.program.as_str()).collect();

        Self {
            total: records.len(),
            male: count(Gender::Male),
            female: count(Gender::Female),
            programs: programs.len(),
        }
    }
}
