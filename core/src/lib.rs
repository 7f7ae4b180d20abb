//! Core types and validation for the shop registry.
//!
//! This crate holds everything about a shop that does not need storage:
//!
//! - [`Shop`]: the registry record (slug, hostname, display name).
//! - [`normalize`]: text to canonical kebab-case slug.
//! - [`parse_hostname`] / [`extract_default_slug`]: URL or bare hostname to
//!   the canonical hostname, and the label a default slug comes from.
//! - [`validate_new_shop`]: the full creation precondition chain, reporting
//!   failures as [`ValidationError`].
//!
//! # Example
//!
//! ```
//! use sps_core::*;
//!
//! let hostname = parse_hostname("https://www.Example.com").unwrap();
//! assert_eq!(hostname, "example.com");
//! assert_eq!(normalize(extract_default_slug(&hostname)), "example");
//! ```

mod hostname;
mod slug;
mod types;
mod validate;

pub use hostname::{extract_default_slug, parse_hostname};
pub use slug::{is_canonical, normalize};
pub use types::*;
pub use validate::{ValidationError, resolve_slug, validate_new_shop};
