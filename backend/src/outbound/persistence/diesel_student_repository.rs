//! PostgreSQL-backed `StudentRepository` implementation using Diesel ORM.
//!
//! Identifiers come from the `students_id_seq` sequence, which only moves
//! forward, so deleted identifiers are never handed out again. Updates lock
//! the row with `SELECT ... FOR UPDATE` inside a transaction, apply the patch
//! in Rust and write every column back.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{NestedMergePolicy, Student, StudentDraft, StudentId, StudentPatch};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{StudentRecordRow, StudentRow};
use super::pool::DbPool;
use super::schema::students;

/// Diesel-backed implementation of the [`StudentRepository`] port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/students")).await?;
    /// let repo = DieselStudentRepository::new(pool);
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_student(row: StudentRow) -> Result<Student, DieselError> {
    Student::try_from(row).map_err(DieselError::DeserializationError)
}

fn draft_to_record(draft: &StudentDraft) -> Result<StudentRecordRow, DieselError> {
    StudentRecordRow::try_from(draft).map_err(DieselError::SerializationError)
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<StudentRow> = students::table
            .select(StudentRow::as_select())
            .order_by(students::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| row_to_student(row).map_err(map_diesel_error))
            .collect()
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<StudentRow> = students::table
            .find(id.get())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_student)
            .transpose()
            .map_err(map_diesel_error)
    }

    async fn insert(&self, draft: StudentDraft) -> Result<Student, StudentRepositoryError> {
        let record = draft_to_record(&draft).map_err(map_diesel_error)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: StudentRow = diesel::insert_into(students::table)
            .values(&record)
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_student(row).map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: StudentId,
        patch: StudentPatch,
        policy: NestedMergePolicy,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let current: Option<StudentRow> = students::table
                    .find(id.get())
                    .select(StudentRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some(current) = current else {
                    return Ok(None);
                };

                let updated = row_to_student(current)?.apply(patch, policy);
                let record = draft_to_record(updated.record())?;
                let row: StudentRow = diesel::update(students::table.find(id.get()))
                    .set(&record)
                    .returning(StudentRow::as_returning())
                    .get_result(conn)
                    .await?;
                row_to_student(row).map(Some)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(students::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
