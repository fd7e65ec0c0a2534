//! Diesel and pool error mapping shared by the student adapters.
//!
//! Connection-level failures become `Connection` errors so the domain can
//! answer 503; everything else is a `Query` error. Messages stay generic and
//! the underlying detail is only logged.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::StudentRepositoryError;

use super::pool::PoolError;

/// Map pool errors into a repository connection error.
pub(crate) fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    debug!(%message, "student pool checkout failed");
    StudentRepositoryError::connection(message)
}

/// Map Diesel error variants into query or connection errors.
pub(crate) fn map_diesel_error(error: DieselError) -> StudentRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        DieselError::DeserializationError(cause) | DieselError::SerializationError(cause) => {
            debug!(error = %cause, "student row conversion failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => StudentRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => StudentRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            StudentRepositoryError::connection("database connection error")
        }
        DieselError::DeserializationError(_) | DieselError::SerializationError(_) => {
            StudentRepositoryError::query("stored student record is malformed")
        }
        _ => StudentRepositoryError::query("database error"),
    }
}
