//! Driving port for creating, updating and deleting student records.
//!
//! Commands take raw JSON payloads; validation against the student schema
//! happens behind the port so every adapter gets identical error reporting.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Error, Student, StudentId};

/// Write-side use cases for student records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsCommand: Send + Sync {
    /// Validate `payload`, assign a fresh identifier and store the record.
    async fn create(&self, payload: &Value) -> Result<Student, Error>;

    /// Validate `payload` as a partial update and apply it to `id`.
    ///
    /// Unknown identifiers fail with not-found before the payload is
    /// validated.
    async fn update(&self, id: StudentId, payload: &Value) -> Result<Student, Error>;

    /// Remove `id`; not-found when it is absent.
    async fn delete(&self, id: StudentId) -> Result<(), Error>;
}
