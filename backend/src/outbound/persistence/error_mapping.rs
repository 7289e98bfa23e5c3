//! Shared Diesel error mapping for the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{RecordPersistenceError, UserPersistenceError};

use super::pool::PoolError;

/// Log a Diesel failure without leaking row data.
fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }
}

/// Pick the connection or query constructor for a Diesel failure.
fn classify<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    log_diesel_error(&error);
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        _ => query("database error"),
    }
}

pub(super) fn record_pool_error(error: PoolError) -> RecordPersistenceError {
    RecordPersistenceError::connection(error.into_message())
}

pub(super) fn record_diesel_error(error: DieselError) -> RecordPersistenceError {
    classify(
        error,
        RecordPersistenceError::query,
        RecordPersistenceError::connection,
    )
}

pub(super) fn user_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

/// Unique violations on insert are reported as duplicate emails; `email` is
/// the only unique column besides the primary key.
pub(super) fn user_diesel_error(error: DieselError, email: &str) -> UserPersistenceError {
    if matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    ) {
        log_diesel_error(&error);
        return UserPersistenceError::duplicate_email(email);
    }
    classify(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Stored rows that no longer satisfy domain validation.
pub(super) fn corrupt_row(
    table: &'static str,
    detail: impl std::fmt::Display,
) -> RecordPersistenceError {
    RecordPersistenceError::query(format!("invalid {table} row: {detail}"))
}
