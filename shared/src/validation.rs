//! Field rules for candidate student records.
//!
//! The same rules run in the browser before submission and on the server
//! before storage, so both sides report identical messages.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::{Gender, NewStudentRequest, StudentRecord, YearLevel};

pub const MAX_ID_LENGTH: usize = 20;
pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MIN_PROGRAM_LENGTH: usize = 2;
pub const MIN_UNIVERSITY_LENGTH: usize = 2;

/// `local@domain.tld`, with no whitespace or extra `@` in any part
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// The form field a validation error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentField {
    Id,
    FullName,
    Gender,
    Email,
    Program,
    YearLevel,
    University,
}

impl StudentField {
    pub const ALL: [StudentField; 7] = [
        StudentField::Id,
        StudentField::FullName,
        StudentField::Gender,
        StudentField::Email,
        StudentField::Program,
        StudentField::YearLevel,
        StudentField::University,
    ];
}

/// A single field rule violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Student ID is required")]
    IdRequired,
    #[error("Student ID must be less than 20 characters")]
    IdTooLong,
    #[error("Full Name is required")]
    FullNameRequired,
    #[error("Full Name must be at least 2 characters long")]
    FullNameTooShort,
    #[error("Full Name must be less than 100 characters")]
    FullNameTooLong,
    #[error("Gender must be Male or Female")]
    InvalidGender,
    #[error("Valid email address is required")]
    InvalidEmail,
    #[error("Program is required")]
    ProgramRequired,
    #[error("Program must be at least 2 characters long")]
    ProgramTooShort,
    #[error("Valid year level is required (1st Year to 6th Year)")]
    InvalidYearLevel,
    #[error("University is required")]
    UniversityRequired,
    #[error("University must be at least 2 characters long")]
    UniversityTooShort,
}

impl ValidationError {
    pub fn field(&self) -> StudentField {
        match self {
            ValidationError::IdRequired | ValidationError::IdTooLong => StudentField::Id,
            ValidationError::FullNameRequired
            | ValidationError::FullNameTooShort
            | ValidationError::FullNameTooLong => StudentField::FullName,
            ValidationError::InvalidGender => StudentField::Gender,
            ValidationError::InvalidEmail => StudentField::Email,
            ValidationError::ProgramRequired | ValidationError::ProgramTooShort => {
                StudentField::Program
            }
            ValidationError::InvalidYearLevel => StudentField::YearLevel,
            ValidationError::UniversityRequired | ValidationError::UniversityTooShort => {
                StudentField::University
            }
        }
    }
}

/// Check every field of a candidate record and collect all violations,
/// in field order. An empty result means the record may be stored.
pub fn validate_student(request: &NewStudentRequest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match trimmed_len(request.id.as_deref()) {
        None => errors.push(ValidationError::IdRequired),
        Some(len) if len > MAX_ID_LENGTH => errors.push(ValidationError::IdTooLong),
        Some(_) => {}
    }

    match trimmed_len(request.full_name.as_deref()) {
        None => errors.push(ValidationError::FullNameRequired),
        Some(len) if len < MIN_NAME_LENGTH => errors.push(ValidationError::FullNameTooShort),
        Some(len) if len > MAX_NAME_LENGTH => errors.push(ValidationError::FullNameTooLong),
        Some(_) => {}
    }

    if parse_gender(request.gender.as_deref()).is_none() {
        errors.push(ValidationError::InvalidGender);
    }

    if !request.email.as_deref().is_some_and(is_valid_email) {
        errors.push(ValidationError::InvalidEmail);
    }

    match trimmed_len(request.program.as_deref()) {
        None => errors.push(ValidationError::ProgramRequired),
        Some(len) if len < MIN_PROGRAM_LENGTH => errors.push(ValidationError::ProgramTooShort),
        Some(_) => {}
    }

    if parse_year_level(request.year_level.as_deref()).is_none() {
        errors.push(ValidationError::InvalidYearLevel);
    }

    match trimmed_len(request.university.as_deref()) {
        None => errors.push(ValidationError::UniversityRequired),
        Some(len) if len < MIN_UNIVERSITY_LENGTH => {
            errors.push(ValidationError::UniversityTooShort)
        }
        Some(_) => {}
    }

    errors
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Human-readable messages, one per error
pub fn error_messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

/// All messages joined for single-line display
pub fn join_messages(errors: &[ValidationError]) -> String {
    error_messages(errors).join(", ")
}

impl NewStudentRequest {
    /// Validate and convert into a stored record with trimmed text fields.
    pub fn into_record(self) -> Result<StudentRecord, Vec<ValidationError>> {
        let errors = validate_student(&self);
        let gender = parse_gender(self.gender.as_deref());
        let year_level = parse_year_level(self.year_level.as_deref());

        match (errors.is_empty(), gender, year_level) {
            (true, Some(gender), Some(year_level)) => Ok(StudentRecord {
                id: trimmed(self.id),
                full_name: trimmed(self.full_name),
                gender,
                email: self.email.unwrap_or_default(),
                program: trimmed(self.program),
                year_level,
                university: trimmed(self.university),
            }),
            _ => Err(errors),
        }
    }
}

/// Character count after trimming, or `None` when missing or blank
fn trimmed_len(value: Option<&str>) -> Option<usize> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.chars().count())
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn parse_gender(value: Option<&str>) -> Option<Gender> {
    value.and_then(|v| v.parse().ok())
}

fn parse_year_level(value: Option<&str>) -> Option<YearLevel> {
    value.and_then(|v| v.parse().ok())
}
