//! Translation of pool and Diesel failures into repository errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;
use crate::domain::ports::HomeworkSessionRepositoryError;

pub(super) fn map_pool_error(error: PoolError) -> HomeworkSessionRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    HomeworkSessionRepositoryError::connection(message)
}

/// Database messages are logged at debug level only; the error returned
/// carries a fixed summary so row contents never reach callers.
pub(super) fn map_diesel_error(error: DieselError) -> HomeworkSessionRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            HomeworkSessionRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            HomeworkSessionRepositoryError::query("duplicate homework session id")
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::NotNullViolation | DatabaseErrorKind::CheckViolation,
            _,
        ) => HomeworkSessionRepositoryError::query("homework session row rejected"),
        DieselError::NotFound => {
            HomeworkSessionRepositoryError::query("insert returned no row")
        }
        DieselError::QueryBuilderError(_) => {
            HomeworkSessionRepositoryError::query("database query error")
        }
        _ => HomeworkSessionRepositoryError::query("database error"),
    }
}
