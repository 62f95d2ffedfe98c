//! Classification of pool and Diesel failures shared by the repositories.
//!
//! Repositories translate a [`StoreFailure`] into their own port error, so
//! the logic that inspects driver errors lives in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Driver failure reduced to what the domain cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// The database could not be reached or the connection dropped.
    Connection(String),
    /// A unique constraint rejected the write; carries the constraint name.
    UniqueViolation(Option<String>),
    /// A check, not-null or foreign key constraint rejected the values.
    Rejected(String),
    /// Anything else.
    Query(String),
}

pub(crate) fn classify_pool_error(error: PoolError) -> StoreFailure {
    debug!(%error, "connection pool checkout failed");
    StoreFailure::Connection(error.message().to_owned())
}

pub(crate) fn classify_diesel_error(error: DieselError) -> StoreFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            match kind {
                DatabaseErrorKind::UniqueViolation => {
                    StoreFailure::UniqueViolation(info.constraint_name().map(str::to_owned))
                }
                DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::ForeignKeyViolation => {
                    StoreFailure::Rejected(info.message().to_owned())
                }
                DatabaseErrorKind::ClosedConnection => {
                    StoreFailure::Connection("database connection closed".to_owned())
                }
                _ => StoreFailure::Query("database error".to_owned()),
            }
        }
        DieselError::NotFound => StoreFailure::Query("record not found".to_owned()),
        other => {
            debug!(error = %other, "diesel operation failed");
            StoreFailure::Query("database query error".to_owned())
        }
    }
}
