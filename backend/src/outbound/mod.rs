//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local student store used without a database.
//! - **persistence**: PostgreSQL-backed student store using Diesel ORM.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business rules beyond keeping each mutation atomic.

pub mod memory;
pub mod persistence;
