use anyhow::Result;
use async_trait::async_trait;
use shared::StudentRecord;
use tokio::sync::RwLock;
use tracing::debug;

use super::traits::{InsertOutcome, StudentStorage};

/// Student storage held in process memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryStudentStore {
    students: RwLock<Vec<StudentRecord>>,
}

impl InMemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStorage for InMemoryStudentStore {
    async fn insert_student(&self, student: &StudentRecord) -> Result<InsertOutcome> {
        let mut students = self.students.write().await;

        if students.iter().any(|s| s.id == student.id) {
            debug!("Rejecting duplicate student id: {}", student.id);
            return Ok(InsertOutcome::DuplicateId);
        }

        students.push(student.clone());
        debug!("Stored student {} ({} total)", student.id, students.len());
        Ok(InsertOutcome::Inserted)
    }

    async fn list_students(&self) -> Result<Vec<StudentRecord>> {
        Ok(self.students.read().await.clone())
    }

    async fn delete_student(&self, student_id: &str) -> Result<bool> {
        let mut students = self.students.write().await;

        match students.iter().position(|s| s.id == student_id) {
            Some(index) => {
                students.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
