//! HTTP inbound adapter exposing the student records REST endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod students;
pub mod validation;

pub use error::ApiResult;
