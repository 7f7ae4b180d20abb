//! SQL for the `shop` table.
//!
//! # Table structure
//!
//! ```text
//! shop (slug TEXT PRIMARY KEY, hostname TEXT UNIQUE, name TEXT)
//! idx_shop_hostname ON shop (hostname)
//! ```
//!
//! The hostname index duplicates the uniqueness constraint's implicit index.
//! It exists so lookups stay indexed on a table recreated by a rebuild
//! import, which carries no constraints at all.

/// Name of the single registry table.
pub(crate) const SHOP_TABLE: &str = "shop";

/// Creates the constrained `shop` table and its hostname index if missing.
pub(crate) const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS shop (
    slug TEXT PRIMARY KEY,
    hostname TEXT UNIQUE,
    name TEXT
);

CREATE INDEX IF NOT EXISTS idx_shop_hostname ON shop (hostname);
"#;

/// Drops the `shop` table and recreates it without any key or uniqueness
/// constraint.
pub(crate) const REBUILD_SQL: &str = r#"
DROP TABLE IF EXISTS shop;

CREATE TABLE shop (
    slug TEXT,
    hostname TEXT,
    name TEXT
);
"#;
