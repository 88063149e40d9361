//! A string key-value store in the style of the browser's `localStorage`.
//!
//! The ledger keeps its entire state as one value in this store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

/// Reads and writes string values under string keys.
pub trait KeyValueStore: std::fmt::Debug + Send + Sync {
    /// Get the value stored under `key`, or `None` if nothing is stored there.
    fn get_item(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Remove the value stored under `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), Error>;
}

/// A [KeyValueStore] backed by a table in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteKeyValueStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteKeyValueStore {
    /// Create a store on `connection`, creating the backing table if needed.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Result<Self, Error> {
        {
            let connection = connection
                .lock()
                .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
                .map_err(|_| Error::DatabaseLockError)?;
            create_local_storage_table(&connection)?;
        }

        Ok(Self { connection })
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    ) -> Result<T, Error> {
        let connection = self
            .connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        f(&connection).map_err(|error| error.into())
    }
}

impl KeyValueStore for SQLiteKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        self.with_connection(|connection| {
            connection
                .query_row(
                    "SELECT value FROM local_storage WHERE key = :key",
                    &[(":key", key)],
                    |row| row.get(0),
                )
                .optional()
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        self.with_connection(|connection| {
            connection.execute(
                "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                (key, value),
            )
        })?;

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Error> {
        self.with_connection(|connection| {
            connection.execute("DELETE FROM local_storage WHERE key = :key", &[(":key", key)])
        })?;

        Ok(())
    }
}

/// Create the key-value table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_local_storage_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}
