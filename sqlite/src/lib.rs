//! SQLite-backed shop registry.
//!
//! This crate persists [`Shop`](sps_core::Shop) records in a single `shop`
//! table and provides everything a command needs to reach it:
//!
//! - **`path`**: datastore location from flag, environment, or default
//! - **`store`**: opening the datastore and bootstrapping the schema
//! - **`registry`**: create/get/delete/list with conflict checking
//! - **`import`**: bulk CSV/JSON loading from a glob pattern
//!
//! # Quick start
//!
//! ```no_run
//! use sps_sqlite::{Datastore, resolve_datastore_path};
//!
//! let path = resolve_datastore_path(None, std::env::var_os("DATASTORE").as_deref()).unwrap();
//! let store = Datastore::open(&path).unwrap();
//!
//! let shop = store.registry().create("https://www.example.com", None, None).unwrap();
//! assert_eq!(shop.hostname, "example.com");
//!
//! for shop in store.registry().list().unwrap() {
//!     println!("{} {}", shop.slug, shop.hostname);
//! }
//! ```

mod error;
mod import;
mod path;
mod registry;
mod schema;
mod store;

pub use error::{Result, StoreError};
pub use import::{ImportFileKind, ImportReport, ImportWarning};
pub use path::{DATASTORE_ENV, DEFAULT_DATASTORE_FILE, HOME_DIR_NAME, resolve_datastore_path};
pub use registry::ShopRegistry;
pub use store::{Datastore, DatastoreStatus};
