//! Shared Diesel error mapping for the fest repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::models::RowConversionError;
use super::pool::PoolError;

/// Failure inside a Diesel transaction closure.
#[derive(Debug, thiserror::Error)]
pub(crate) enum AdapterError {
    #[error(transparent)]
    Diesel(#[from] DieselError),
    #[error(transparent)]
    Row(#[from] RowConversionError),
}

impl From<AdapterError> for RepositoryError {
    fn from(value: AdapterError) -> Self {
        match value {
            AdapterError::Diesel(err) => map_diesel_error(err),
            AdapterError::Row(err) => map_row_error(err),
        }
    }
}

pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

pub(crate) fn map_row_error(error: RowConversionError) -> RepositoryError {
    debug!(%error, "stored row failed domain conversion");
    RepositoryError::query(error.to_string())
}

/// Map Diesel failures onto repository errors.
///
/// Unique and foreign-key violations keep the constraint name so callers can
/// report which record collided or was missing.
pub(crate) fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RepositoryError::unique_violation(describe_constraint(
                "record already exists",
                info.constraint_name(),
            ))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            RepositoryError::foreign_key_violation(describe_constraint(
                "referenced record does not exist",
                info.constraint_name(),
            ))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        _ => RepositoryError::query("database error"),
    }
}

fn describe_constraint(summary: &str, constraint: Option<&str>) -> String {
    match constraint {
        Some(name) => format!("{summary} ({name})"),
        None => summary.to_owned(),
    }
}
