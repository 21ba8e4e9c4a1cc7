//! Mapping from pool and Diesel failures to [`StorageError`].

use tracing::debug;

use crate::domain::StorageError;

use super::pool::PoolError;

/// Map pool errors to storage connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> StorageError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    StorageError::connection(message)
}

/// Map Diesel errors to storage errors.
///
/// Unique-constraint violations become [`StorageError::Conflict`] so the
/// tournament-participant guard surfaces as a distinct failure; everything
/// else collapses into query/connection errors the way the rest of the
/// schema (which has no such guards) behaves.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> StorageError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

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
        DieselError::NotFound => StorageError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StorageError::conflict(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StorageError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => StorageError::query("database error"),
        _ => StorageError::query("database error"),
    }
}
