use std::sync::Arc;

use shared::validation::join_messages;
use shared::{
    NewStudentRequest, StudentListQuery, StudentRecord, ValidationError, DUPLICATE_ID_MESSAGE,
    NOT_FOUND_MESSAGE,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::storage::{InsertOutcome, StudentStorage};

/// Errors produced by student operations
#[derive(Debug, Error)]
pub enum StudentServiceError {
    /// The candidate record broke one or more field rules
    #[error("{}", join_messages(.0))]
    Validation(Vec<ValidationError>),
    #[error("{}", DUPLICATE_ID_MESSAGE)]
    DuplicateId(String),
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type StudentResult<T> = Result<T, StudentServiceError>;

/// Filters for listing students. Empty values and "all" disable a filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentFilter {
    /// Lowercased search term
    search: Option<String>,
    program: Option<String>,
    gender: Option<String>,
}

impl StudentFilter {
    pub fn from_query(query: &StudentListQuery) -> Self {
        Self {
            search: active_value(query.search.as_deref()).map(|s| s.to_lowercase()),
            program: active_value(query.program.as_deref()).map(str::to_string),
            gender: active_value(query.gender.as_deref()).map(str::to_string),
        }
    }

    pub fn matches(&self, student: &StudentRecord) -> bool {
        let search_ok = self.search.as_deref().map_or(true, |term| {
            [&student.full_name, &student.id, &student.email]
                .iter()
                .any(|field| field.to_lowercase().contains(term))
        });
        let program_ok = self.program.as_deref().map_or(true, |p| student.program == p);
        let gender_ok = self.gender.as_deref().map_or(true, |g| student.gender.as_str() == g);

        search_ok && program_ok && gender_ok
    }
}

fn active_value(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

/// Students matching a query, plus the size of the whole collection
#[derive(Debug, Clone, PartialEq)]
pub struct StudentListing {
    pub students: Vec<StudentRecord>,
    pub total: usize,
}

/// Service for managing student records
#[derive(Clone)]
pub struct StudentService {
    storage: Arc<dyn StudentStorage>,
}

impl StudentService {
    pub fn new(storage: Arc<dyn StudentStorage>) -> Self {
        Self { storage }
    }

    /// List students matching the query, in insertion order
    pub async fn list_students(&self, query: &StudentListQuery) -> StudentResult<StudentListing> {
        let filter = StudentFilter::from_query(query);
        let all = self.storage.list_students().await?;
        let total = all.len();

        let students: Vec<StudentRecord> = all.into_iter().filter(|s| filter.matches(s)).collect();
        info!("Listing {} of {} students", students.len(), total);

        Ok(StudentListing { students, total })
    }

    /// Validate and store a new student
    pub async fn create_student(&self, request: NewStudentRequest) -> StudentResult<StudentRecord> {
        let student = request.into_record().map_err(|errors| {
            warn!("Rejected student: {}", join_messages(&errors));
            StudentServiceError::Validation(errors)
        })?;

        match self.storage.insert_student(&student).await? {
            InsertOutcome::Inserted => {
                info!("Created student: {} with ID: {}", student.full_name, student.id);
                Ok(student)
            }
            InsertOutcome::DuplicateId => {
                warn!("Student ID already exists: {}", student.id);
                Err(StudentServiceError::DuplicateId(student.id))
            }
        }
    }

    /// Delete a student by ID
    pub async fn delete_student(&self, student_id: &str) -> StudentResult<()> {
        if self.storage.delete_student(student_id).await? {
            info!("Deleted student with ID: {}", student_id);
            Ok(())
        } else {
            warn!("Student not found: {}", student_id);
            Err(StudentServiceError::NotFound(student_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStudentStore;
    use shared::Gender;

    fn setup_test() -> StudentService {
        StudentService::new(Arc::new(InMemoryStudentStore::new()))
    }

    fn request(id: &str, name: &str, gender: &str, program: &str) -> NewStudentRequest {
        NewStudentRequest {
            id: Some(id.to_string()),
            full_name: Some(name.to_string()),
            gender: Some(gender.to_string()),
            email: Some(format!("{}@example.edu", id.to_lowercase())),
            program: Some(program.to_string()),
            year_level: Some("2nd Year".to_string()),
            university: Some("State University".to_string()),
        }
    }

    fn query(search: Option<&str>, program: Option<&str>, gender: Option<&str>) -> StudentListQuery {
        StudentListQuery {
            search: search.map(str::to_string),
            program: program.map(str::to_string),
            gender: gender.map(str::to_string),
        }
    }

    async fn seeded() -> StudentService {
        let service = setup_test();
        for r in [
            request("S1", "Ann Lee", "Female", "CS"),
            request("S2", "Bob Cruz", "Male", "IT"),
            request("S3", "Cara Annis", "Female", "IT"),
        ] {
            service.create_student(r).await.expect("Failed to create student");
        }
        service
    }

    #[tokio::test]
    async fn test_create_student() {
        let service = setup_test();

        let student = service
            .create_student(request("S1", "Ann Lee", "Female", "CS"))
            .await
            .expect("Failed to create student");

        assert_eq!(student.id, "S1");
        assert_eq!(student.gender, Gender::Female);

        let listing = service.list_students(&StudentListQuery::default()).await.unwrap();
        assert_eq!(listing.students, vec![student]);
    }

    #[tokio::test]
    async fn test_create_student_validation() {
        let service = setup_test();
        let mut invalid = request("S1", "Ann Lee", "Female", "CS");
        invalid.email = Some("bad-email".to_string());
        invalid.year_level = None;

        let err = service.create_student(invalid).await.unwrap_err();

        match &err {
            StudentServiceError::Validation(errors) => {
                assert_eq!(errors, &vec![ValidationError::InvalidEmail, ValidationError::InvalidYearLevel]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "Valid email address is required, Valid year level is required (1st Year to 6th Year)"
        );
        assert_eq!(service.list_students(&StudentListQuery::default()).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_create_duplicate_id_fails_regardless_of_other_fields() {
        let service = setup_test();
        service.create_student(request("S1", "Ann Lee", "Female", "CS")).await.unwrap();

        let err = service
            .create_student(request("S1", "Totally Different", "Male", "Nursing"))
            .await
            .unwrap_err();

        assert!(matches!(err, StudentServiceError::DuplicateId(ref id) if id == "S1"));
        assert_eq!(err.to_string(), "Student ID already exists");

        // Surrounding whitespace does not make an ID distinct
        let err = service
            .create_student(request(" S1 ", "Ann Lee", "Female", "CS"))
            .await
            .unwrap_err();
        assert!(matches!(err, StudentServiceError::DuplicateId(_)));

        let listing = service.list_students(&StudentListQuery::default()).await.unwrap();
        assert_eq!(listing.students.len(), 1);
        assert_eq!(listing.students[0].full_name, "Ann Lee");
    }

    #[tokio::test]
    async fn test_delete_student() {
        let service = seeded().await;

        service.delete_student("S2").await.expect("Failed to delete student");

        let listing = service.list_students(&StudentListQuery::default()).await.unwrap();
        assert!(listing.students.iter().all(|s| s.id != "S2"));
        assert_eq!(listing.total, 2);
    }

    #[tokio::test]
    async fn test_delete_missing_student_does_not_mutate() {
        let service = seeded().await;

        let err = service.delete_student("NOPE").await.unwrap_err();

        assert!(matches!(err, StudentServiceError::NotFound(_)));
        assert_eq!(err.to_string(), "Student not found");
        assert_eq!(service.list_students(&StudentListQuery::default()).await.unwrap().total, 3);
    }

    #[tokio::test]
    async fn test_list_search_is_case_insensitive_across_name_id_and_email() {
        let service = seeded().await;

        let by_name = service.list_students(&query(Some("ANN"), None, None)).await.unwrap();
        let ids: Vec<&str> = by_name.students.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S3"]);
        assert_eq!(by_name.total, 3);

        let by_id = service.list_students(&query(Some("s2"), None, None)).await.unwrap();
        assert_eq!(by_id.students.len(), 1);
        assert_eq!(by_id.students[0].full_name, "Bob Cruz");

        let by_email = service.list_students(&query(Some("s3@EXAMPLE"), None, None)).await.unwrap();
        assert_eq!(by_email.students.len(), 1);
    }

    #[tokio::test]
    async fn test_list_program_and_gender_filters_are_exact() {
        let service = seeded().await;

        let it_females = service.list_students(&query(None, Some("IT"), Some("Female"))).await.unwrap();
        assert_eq!(it_females.students.len(), 1);
        assert_eq!(it_females.students[0].id, "S3");

        let lowercase = service.list_students(&query(None, Some("it"), None)).await.unwrap();
        assert!(lowercase.students.is_empty());
    }

    #[tokio::test]
    async fn test_list_treats_all_and_empty_as_no_filter() {
        let service = seeded().await;

        let listing = service
            .list_students(&query(Some(""), Some("all"), Some("All")))
            .await
            .unwrap();

        assert_eq!(listing.students.len(), 3);
    }
}
