//! Shop CRUD over an open datastore connection.
//!
//! [`ShopRegistry`] validates creation input with `sps_core` before touching
//! storage, so an invalid request never produces a partial write. Every
//! statement binds user values as parameters.
//!
//! # Example
//!
//! ```no_run
//! use sps_sqlite::Datastore;
//!
//! let store = Datastore::open("shops.db").unwrap();
//! let registry = store.registry();
//!
//! let shop = registry.create("shop.example.com", None, None).unwrap();
//! assert_eq!(shop.slug, "example");
//!
//! assert!(registry.delete("example").unwrap());
//! assert!(!registry.delete("example").unwrap());
//! ```

use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};
use sps_core::{Shop, validate_new_shop};
use tracing::{debug, info};

use crate::error::{Result, StoreError};

/// Registry operations on the `shop` table.
///
/// Borrows a connection for its lifetime; obtain one with
/// [`Datastore::registry`](crate::Datastore::registry) or wrap any
/// connection whose schema is initialized.
pub struct ShopRegistry<'a> {
    conn: &'a Connection,
}

impl<'a> ShopRegistry<'a> {
    /// Creates a registry over `conn`.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns all shops in storage order.
    pub fn list(&self) -> Result<Vec<Shop>> {
        let mut stmt = self.conn.prepare("SELECT slug, hostname, name FROM shop")?;
        let shops = stmt
            .query_map([], row_to_shop)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(shops)
    }

    /// Creates a shop from a URL or hostname.
    ///
    /// When `slug` is `None` it is derived from the hostname. An explicit
    /// slug must already be canonical. `name` defaults to an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for malformed input,
    /// [`StoreError::DuplicateShop`] if the slug or hostname is taken, or
    /// [`StoreError::DatabaseError`] on storage failure.
    pub fn create(&self, identifier: &str, slug: Option<&str>, name: Option<&str>) -> Result<Shop> {
        let (slug, hostname) = validate_new_shop(identifier, slug)?;
        let shop = Shop::new(slug, hostname, name.unwrap_or_default());

        let tx = self.conn.unchecked_transaction()?;

        if conflict_exists(&tx, &shop.slug, &shop.hostname)? {
            return Err(duplicate(&shop));
        }

        tx.execute(
            "INSERT INTO shop (slug, hostname, name) VALUES (?1, ?2, ?3)",
            params![shop.slug, shop.hostname, shop.name],
        )
        .map_err(|e| match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => duplicate(&shop),
            _ => StoreError::from(e),
        })?;

        tx.commit()?;
        info!(slug = %shop.slug, hostname = %shop.hostname, "Created shop");
        Ok(shop)
    }

    /// Returns the shop registered under `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShopNotFound`] if no such shop exists.
    pub fn get(&self, slug: &str) -> Result<Shop> {
        self.conn
            .query_row(
                "SELECT slug, hostname, name FROM shop WHERE slug = ?1",
                params![slug],
                row_to_shop,
            )
            .optional()?
            .ok_or_else(|| StoreError::ShopNotFound(slug.to_string()))
    }

    /// Deletes the shop registered under `slug`.
    ///
    /// Returns `true` if a row was removed and `false` if none matched.
    pub fn delete(&self, slug: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM shop WHERE slug = ?1", params![slug])?;
        if rows > 0 {
            info!(slug, "Deleted shop");
        } else {
            debug!(slug, "No shop to delete");
        }
        Ok(rows > 0)
    }

    /// Returns `true` if any shop already uses `slug` or `hostname`.
    pub fn has_conflict(&self, slug: &str, hostname: &str) -> Result<bool> {
        conflict_exists(self.conn, slug, hostname)
    }
}

/// Single combined slug-or-hostname lookup.
fn conflict_exists(conn: &Connection, slug: &str, hostname: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM shop WHERE slug = ?1 OR hostname = ?2",
        params![slug, hostname],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn duplicate(shop: &Shop) -> StoreError {
    StoreError::DuplicateShop {
        slug: shop.slug.clone(),
        hostname: shop.hostname.clone(),
    }
}

/// Maps a `(slug, hostname, name)` row, reading NULLs left by bulk imports
/// as empty strings.
fn row_to_shop(row: &Row<'_>) -> rusqlite::Result<Shop> {
    Ok(Shop {
        slug: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
        hostname: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Datastore;
    use sps_core::ValidationError;

    #[test]
    fn test_create_derives_slug_and_hostname() {
        let store = Datastore::open_in_memory().unwrap();
        let shop = store
            .registry()
            .create("https://www.Example.com", None, None)
            .unwrap();
        assert_eq!(shop, Shop::new("example", "example.com", ""));
    }

    #[test]
    fn test_create_then_get_round_trips() {
        let store = Datastore::open_in_memory().unwrap();
        let registry = store.registry();
        let created = registry
            .create("shop.example.com", Some("example-shop"), Some("Example Shop"))
            .unwrap();
        assert_eq!(registry.get(&created.slug).unwrap(), created);
    }

    #[test]
    fn test_create_rejects_same_hostname_variants() {
        let store = Datastore::open_in_memory().unwrap();
        let registry = store.registry();
        registry.create("https://www.Example.com", None, None).unwrap();

        let err = registry
            .create("EXAMPLE.com", Some("another"), None)
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateShop { .. }));
    }

    #[test]
    fn test_create_rejects_same_slug() {
        let store = Datastore::open_in_memory().unwrap();
        let registry = store.registry();
        registry.create("example.com", None, None).unwrap();

        let err = registry.create("example.org", None, None).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateShop { ref slug, .. } if slug == "example"));
    }

    #[test]
    fn test_create_validation_writes_nothing() {
        let store = Datastore::open_in_memory().unwrap();
        let registry = store.registry();
        let err = registry.create("EXAMPLE", Some("Bad Slug!"), None).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::InvalidSlugFormat(_))
        ));
        assert!(registry.list().unwrap().is_empty());
    }

    #[test]
    fn test_get_missing() {
        let store = Datastore::open_in_memory().unwrap();
        let err = store.registry().get("nope").unwrap_err();
        assert!(matches!(err, StoreError::ShopNotFound(ref slug) if slug == "nope"));
    }

    #[test]
    fn test_delete_reports_whether_removed() {
        let store = Datastore::open_in_memory().unwrap();
        let registry = store.registry();
        registry.create("example.com", None, None).unwrap();

        assert!(registry.delete("example").unwrap());
        assert!(!registry.delete("example").unwrap());
        assert!(!registry.delete("nonexistent").unwrap());
    }

    #[test]
    fn test_has_conflict() {
        let store = Datastore::open_in_memory().unwrap();
        let registry = store.registry();
        registry.create("example.com", None, None).unwrap();

        assert!(registry.has_conflict("example", "other.com").unwrap());
        assert!(registry.has_conflict("other", "example.com").unwrap());
        assert!(!registry.has_conflict("other", "other.com").unwrap());
    }

    #[test]
    fn test_list_reads_null_columns_as_empty() {
        let store = Datastore::open_in_memory().unwrap();
        store
            .connection()
            .execute(
                "INSERT INTO shop (slug, hostname, name) VALUES ('acme', 'acme.io', NULL)",
                [],
            )
            .unwrap();
        let shops = store.registry().list().unwrap();
        assert_eq!(shops, vec![Shop::new("acme", "acme.io", "")]);
    }
}
