//! Storage port for student records and its errors.
//!
//! Adapters own the collection. Each mutating call is one critical section:
//! `insert` allocates the identifier and stores the record together, and
//! `update` reads, merges and writes under the same lock or transaction.

use async_trait::async_trait;

use crate::domain::{NestedMergePolicy, Student, StudentDraft, StudentId, StudentPatch};

use super::define_port_error;

define_port_error! {
    /// Errors raised by student storage adapters.
    pub enum StudentRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } => "student repository connection failed: {message}",
        /// The store rejected a query or mutation.
        Query { message: String } => "student repository query failed: {message}",
    }
}

/// Port for reading and mutating the student collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All students in insertion order.
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Fetch a student by identifier.
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError>;

    /// Allocate an identifier for `draft` and store it.
    async fn insert(&self, draft: StudentDraft) -> Result<Student, StudentRepositoryError>;

    /// Apply `patch` to the stored record; `None` when `id` is absent.
    async fn update(
        &self,
        id: StudentId,
        patch: StudentPatch,
        policy: NestedMergePolicy,
    ) -> Result<Option<Student>, StudentRepositoryError>;

    /// Remove a record; `false` when `id` is absent.
    async fn delete(&self, id: StudentId) -> Result<bool, StudentRepositoryError>;
}
