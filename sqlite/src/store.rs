//! Datastore handle and schema bootstrap.
//!
//! [`Datastore`] owns the single SQLite connection used for one command
//! invocation. Opening it guarantees the `shop` table and hostname index
//! exist; the connection closes when the value is dropped.
//!
//! # Example
//!
//! ```no_run
//! use sps_sqlite::Datastore;
//!
//! let mut store = Datastore::open("shops.db").unwrap();
//! store.registry().create("https://www.example.com", None, Some("Example")).unwrap();
//!
//! let report = store.import("exports/*.csv", false).unwrap();
//! println!("Imported data from {} file(s)", report.files_matched);
//! ```

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;
use crate::import::{self, ImportReport};
use crate::registry::ShopRegistry;
use crate::schema::{SCHEMA_SQL, SHOP_TABLE};

/// An open, initialized shop datastore.
///
/// Registry operations borrow the connection through [`registry`](Self::registry);
/// bulk import needs exclusive access and goes through [`import`](Self::import).
pub struct Datastore {
    conn: Connection,
}

impl Datastore {
    /// Opens (creating if needed) the datastore file at `path` and ensures
    /// the schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DatabaseError`](crate::StoreError::DatabaseError)
    /// if the file cannot be opened or the schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Opening datastore");
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens a transient in-memory datastore.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wraps an existing connection and ensures the schema exists.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        let mut store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Creates the `shop` table and hostname index if they are missing.
    ///
    /// Safe to call repeatedly. A table left unconstrained by a rebuild
    /// import stays unconstrained: only the missing index is added.
    pub fn init(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(SCHEMA_SQL)?;
        tx.commit()?;
        Ok(())
    }

    /// Returns a registry view over this datastore.
    pub fn registry(&self) -> ShopRegistry<'_> {
        ShopRegistry::new(&self.conn)
    }

    /// Imports shops from every file matching the glob `pattern`.
    ///
    /// See [`ImportReport`] for the summary returned.
    pub fn import(&mut self, pattern: &str, rebuild: bool) -> Result<ImportReport> {
        import::import_shops(&mut self.conn, pattern, rebuild)
    }

    /// Returns a snapshot of the table state.
    pub fn status(&self) -> Result<DatastoreStatus> {
        let table_exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [SHOP_TABLE],
            |row| row.get(0),
        )?;

        if !table_exists {
            return Ok(DatastoreStatus {
                table_exists,
                shop_count: 0,
                constrained: false,
            });
        }

        let shop_count: usize = self
            .conn
            .query_row("SELECT COUNT(*) FROM shop", [], |row| row.get(0))?;
        let constrained: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM pragma_table_info(?1) WHERE pk > 0",
            [SHOP_TABLE],
            |row| row.get(0),
        )?;

        Ok(DatastoreStatus {
            table_exists,
            shop_count,
            constrained,
        })
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consumes the datastore and returns the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

/// Snapshot of the `shop` table returned by [`Datastore::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatastoreStatus {
    /// Whether the `shop` table exists.
    pub table_exists: bool,
    /// Number of rows in the table.
    pub shop_count: usize,
    /// Whether the table still carries its primary key. `false` after a
    /// rebuild import.
    pub constrained: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_initializes_schema() {
        let store = Datastore::open_in_memory().unwrap();
        let status = store.status().unwrap();
        assert!(status.table_exists);
        assert!(status.constrained);
        assert_eq!(status.shop_count, 0);
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut store = Datastore::open_in_memory().unwrap();
        store.init().unwrap();
        store.init().unwrap();
        assert!(store.status().unwrap().table_exists);
    }

    #[test]
    fn test_status_without_table() {
        let store = Datastore::open_in_memory().unwrap();
        store.connection().execute_batch("DROP TABLE shop;").unwrap();
        let status = store.status().unwrap();
        assert!(!status.table_exists);
        assert!(!status.constrained);
    }

    #[test]
    fn test_open_file_persists_between_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shops.db");

        {
            let store = Datastore::open(&path).unwrap();
            store.registry().create("example.com", None, None).unwrap();
        }

        let store = Datastore::open(&path).unwrap();
        assert_eq!(store.status().unwrap().shop_count, 1);
    }
}
