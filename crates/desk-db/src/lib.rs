//! # desk-db
//!
//! libSQL storage for the helpdesk: users, tickets, and comments.
//!
//! This crate is a passthrough persistence layer. It enforces no business
//! rules beyond the ticket version guard; authorization and validation live
//! in `desk-engine`.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Storage handle shared by every engine operation.
///
/// Construct once with [`DeskDb::open_local`] and inject it (usually behind
/// an `Arc`) wherever storage is needed.
pub struct DeskDb {
    // Owns the file handle behind `conn`.
    _db: libsql::Database,
    conn: libsql::Connection,
}

impl DeskDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let database = Builder::new_local(path).build().await?;
        let conn = database.connect()?;

        // Comment cascade on ticket delete depends on this; SQLite leaves it
        // off for every new connection.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("enabling foreign keys: {e}")))?;

        let store = Self {
            _db: database,
            conn,
        };
        store.run_migrations().await?;
        tracing::debug!(path, "opened helpdesk database");
        Ok(store)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID, e.g. `"tkt-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
