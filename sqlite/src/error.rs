//! Error types for shop registry operations.
//!
//! Provides a unified error type covering input validation, conflict and
//! lookup failures, storage access, and import file decoding.

use std::path::PathBuf;

use sps_core::ValidationError;
use thiserror::Error;

/// Errors that can occur during registry, import, or datastore operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Creation input failed validation; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A shop with the same slug or hostname is already registered.
    #[error("a shop with slug '{slug}' or hostname '{hostname}' already exists")]
    DuplicateShop {
        /// Slug that was being created.
        slug: String,
        /// Hostname that was being created.
        hostname: String,
    },

    /// No shop is registered under the requested slug.
    #[error("no shop found with slug '{0}'")]
    ShopNotFound(String),

    /// SQLite operation failure.
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// File or directory I/O failure.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// CSV import file could not be decoded.
    #[error("CSV error in '{path}': {source}")]
    CsvError {
        /// File being imported.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: csv::Error,
    },

    /// CSV row lacks the slug or hostname column.
    #[error("CSV error in '{path}': line {line} has {columns} column(s), expected at least 2")]
    CsvRowTooShort {
        /// File being imported.
        path: PathBuf,
        /// 1-based line of the row.
        line: u64,
        /// Columns found on the row.
        columns: usize,
    },

    /// JSON import file could not be decoded.
    #[error("JSON error in '{path}': {source}")]
    JsonError {
        /// File being imported.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: serde_json::Error,
    },

    /// Import pattern is not a valid glob.
    #[error("invalid import pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    /// No home directory could be determined for the default datastore.
    #[error("cannot determine home directory for the default datastore location")]
    HomeDirUnavailable,
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
