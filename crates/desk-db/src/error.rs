//! Database error types for desk-db.

use desk_core::errors::DeskError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or a row could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A versioned write found a newer row than the one it was based on.
    #[error("Version conflict on {entity} {id}")]
    Conflict { entity: &'static str, id: String },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<DatabaseError> for DeskError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Conflict { .. } => Self::Conflict,
            other => Self::internal(other),
        }
    }
}
