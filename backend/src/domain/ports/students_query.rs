//! Driving port for reading student records.
//!
//! HTTP handlers depend on this port rather than on storage adapters. The
//! production implementation is [`crate::domain::StudentService`].

use async_trait::async_trait;

use crate::domain::{Error, Student, StudentId};

/// Read-side use cases for student records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsQuery: Send + Sync {
    /// Every stored student in ascending identifier order.
    async fn list(&self) -> Result<Vec<Student>, Error>;

    /// A single student.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when `id` is not
    /// stored.
    async fn get(&self, id: StudentId) -> Result<Student, Error>;
}
