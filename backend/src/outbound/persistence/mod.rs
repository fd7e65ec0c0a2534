//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the [`DieselStudentRepository`] implementation of the storage
//! port, backed by `diesel-async` with `bb8` connection pooling, plus the
//! embedded migrations that create its table.
//!
//! Row structs (`models.rs`) and the table definition (`schema.rs`) are
//! internal; only domain types cross this boundary.
//!
//! # Example
//!
//! ```ignore
//! use student_records::outbound::persistence::{DbPool, DieselStudentRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/students")).await?;
//! let repo = DieselStudentRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_student_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_student_repository::DieselStudentRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
