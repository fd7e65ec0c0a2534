//! In-process storage adapters.
//!
//! Used when no database is configured and by tests that need real
//! repository semantics without PostgreSQL.

mod in_memory_student_repository;

pub use in_memory_student_repository::InMemoryStudentRepository;
