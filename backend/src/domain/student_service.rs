//! Student records domain service.
//!
//! Implements the [`StudentsQuery`] and [`StudentsCommand`] driving ports on
//! top of any [`StudentRepository`]. Payload validation, not-found detection
//! and repository error mapping live here so every adapter reports failures
//! identically.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::domain::ports::{
    StudentRepository, StudentRepositoryError, StudentsCommand, StudentsQuery,
};
use crate::domain::{
    Error, NestedMergePolicy, SchemaError, Student, StudentId, validate_create, validate_patch,
};

/// Message returned whenever an identifier is not stored.
pub const STUDENT_NOT_FOUND: &str = "Student not found";

/// Student service implementing the driving ports.
pub struct StudentService<R: ?Sized> {
    repository: Arc<R>,
    merge_policy: NestedMergePolicy,
}

impl<R: ?Sized> Clone for StudentService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            merge_policy: self.merge_policy,
        }
    }
}

impl<R: ?Sized> StudentService<R> {
    /// Create a service using the default nested merge policy.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            merge_policy: NestedMergePolicy::default(),
        }
    }

    /// Override how nested objects in updates combine with stored values.
    #[must_use]
    pub fn with_merge_policy(mut self, policy: NestedMergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    /// Policy applied to nested objects in updates.
    pub fn merge_policy(&self) -> NestedMergePolicy {
        self.merge_policy
    }
}

impl<R> StudentService<R>
where
    R: StudentRepository + ?Sized,
{
    fn map_repository_error(error: StudentRepositoryError) -> Error {
        match error {
            StudentRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("student repository unavailable: {message}"))
            }
            StudentRepositoryError::Query { message } => {
                Error::internal(format!("student repository error: {message}"))
            }
        }
    }

    fn map_schema_error(error: SchemaError) -> Error {
        debug!(error = %error, "student payload rejected");
        let details = match error.path() {
            Some(field) => json!({ "field": field, "code": error.code() }),
            None => json!({ "code": error.code() }),
        };
        Error::invalid_request(error.to_string()).with_details(details)
    }

    fn not_found(id: StudentId) -> Error {
        Error::not_found(STUDENT_NOT_FOUND).with_details(json!({
            "id": id.get(),
            "code": "student_not_found",
        }))
    }
}

#[async_trait]
impl<R> StudentsQuery for StudentService<R>
where
    R: StudentRepository + ?Sized,
{
    async fn list(&self) -> Result<Vec<Student>, Error> {
        self.repository
            .list()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get(&self, id: StudentId) -> Result<Student, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(id))
    }
}

#[async_trait]
impl<R> StudentsCommand for StudentService<R>
where
    R: StudentRepository + ?Sized,
{
    async fn create(&self, payload: &Value) -> Result<Student, Error> {
        let draft = validate_create(payload).map_err(Self::map_schema_error)?;
        let student = self
            .repository
            .insert(draft)
            .await
            .map_err(Self::map_repository_error)?;
        info!(student_id = %student.id(), "student created");
        Ok(student)
    }

    async fn update(&self, id: StudentId, payload: &Value) -> Result<Student, Error> {
        // Unknown identifiers report not-found even when the payload is invalid.
        if self
            .repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .is_none()
        {
            return Err(Self::not_found(id));
        }

        let patch = validate_patch(payload).map_err(Self::map_schema_error)?;
        let updated = self
            .repository
            .update(id, patch, self.merge_policy)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(id))?;
        info!(student_id = %id, policy = %self.merge_policy, "student updated");
        Ok(updated)
    }

    async fn delete(&self, id: StudentId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if !removed {
            return Err(Self::not_found(id));
        }
        info!(student_id = %id, "student deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
