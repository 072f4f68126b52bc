//! # Storage Traits
//!
//! Storage abstraction for student records, so the domain layer can work
//! against any backend that keeps these guarantees.

use anyhow::Result;
use async_trait::async_trait;
use shared::StudentRecord;

/// Outcome of an insert attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A record with the same ID already exists; nothing was written
    DuplicateId,
}

/// Interface for student record storage
///
/// Implementations must make the ID check and the write in `insert_student`
/// a single atomic step.
#[async_trait]
pub trait StudentStorage: Send + Sync {
    /// Store a new student unless its ID is already taken
    async fn insert_student(&self, student: &StudentRecord) -> Result<InsertOutcome>;

    /// All students in insertion order
    async fn list_students(&self) -> Result<Vec<StudentRecord>>;

    /// Delete a student by ID
    /// Returns true if the student was found and deleted, false otherwise
    async fn delete_student(&self, student_id: &str) -> Result<bool>;
}
