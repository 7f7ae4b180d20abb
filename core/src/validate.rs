//! Input validation for shop creation.
//!
//! Turns the raw `identifier` and optional `slug` a user supplies into a
//! canonical `(slug, hostname)` pair, or reports the first precondition that
//! failed. Nothing here touches storage, so every check runs before any
//! write is attempted.
//!
//! # Examples
//!
//! ```
//! use sps_core::*;
//!
//! let (slug, hostname) = validate_new_shop("https://www.Example.com", None).unwrap();
//! assert_eq!((slug.as_str(), hostname.as_str()), ("example", "example.com"));
//!
//! let err = validate_new_shop("EXAMPLE", Some("Bad Slug!")).unwrap_err();
//! assert!(matches!(err, ValidationError::InvalidSlugFormat(_)));
//! ```

use thiserror::Error;

use crate::hostname::{extract_default_slug, parse_hostname};
use crate::slug::{is_canonical, normalize};
use crate::types::{SLUG_MAX_LEN, SLUG_MIN_LEN};

/// Shop input validation errors.
///
/// Each variant names one failed precondition. The `Display` impl is the
/// message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Identifier is empty or whitespace-only.
    #[error("URL or hostname is required for shop creation")]
    EmptyIdentifier,
    /// Identifier does not parse as a URL with a host.
    #[error("invalid URL or hostname '{0}': please provide a valid domain")]
    InvalidIdentifier(String),
    /// An explicit slug was given but is whitespace-only.
    #[error("slug must not be empty")]
    EmptySlug,
    /// An explicit slug is not already in canonical form.
    #[error(
        "invalid slug '{0}': must be lowercase and contain only alphanumeric characters and hyphens"
    )]
    InvalidSlugFormat(String),
    /// Slug length falls outside the accepted range.
    #[error("slug must be between {min} and {max} characters (got {0})", min = SLUG_MIN_LEN, max = SLUG_MAX_LEN)]
    SlugLengthOutOfRange(usize),
}

/// Validates an explicit slug or derives one from `hostname`.
///
/// A derived slug is normalized. An explicit slug is only trimmed: it must
/// already equal its own normalized form, otherwise the caller is told
/// rather than having the slug silently rewritten.
///
/// # Errors
///
/// Returns [`ValidationError::EmptySlug`], [`ValidationError::InvalidSlugFormat`],
/// or [`ValidationError::SlugLengthOutOfRange`].
pub fn resolve_slug(explicit: Option<&str>, hostname: &str) -> Result<String, ValidationError> {
    let slug = match explicit {
        None => normalize(extract_default_slug(hostname)),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ValidationError::EmptySlug);
            }
            if !is_canonical(trimmed) {
                return Err(ValidationError::InvalidSlugFormat(trimmed.to_string()));
            }
            trimmed.to_string()
        }
    };

    let len = slug.chars().count();
    if !(SLUG_MIN_LEN..=SLUG_MAX_LEN).contains(&len) {
        return Err(ValidationError::SlugLengthOutOfRange(len));
    }
    Ok(slug)
}

/// Validates creation input and returns the canonical `(slug, hostname)`.
///
/// # Errors
///
/// Returns the first failing [`ValidationError`], checked in order:
/// identifier present, identifier parses, slug valid.
pub fn validate_new_shop(
    identifier: &str,
    slug: Option<&str>,
) -> Result<(String, String), ValidationError> {
    if identifier.trim().is_empty() {
        return Err(ValidationError::EmptyIdentifier);
    }
    let hostname = parse_hostname(identifier)?;
    let slug = resolve_slug(slug, &hostname)?;
    Ok((slug, hostname))
}
