//! Shop record definition.
//!
//! A [`Shop`] is the only entity the registry manages: a canonical slug, a
//! canonical hostname, and an optional display name. The type round-trips
//! through JSON import files and SQLite rows unchanged.

use serde::{Deserialize, Deserializer, Serialize};

/// Minimum accepted slug length, inclusive.
pub const SLUG_MIN_LEN: usize = 2;

/// Maximum accepted slug length, inclusive.
pub const SLUG_MAX_LEN: usize = 128;

/// A registered shop.
///
/// `slug` and `hostname` are both unique across the registry. `name` is a
/// free-form label and is stored as an empty string when absent; import
/// files may omit it entirely.
///
/// # Examples
///
/// ```
/// use sps_core::Shop;
///
/// let shop = Shop::new("example", "example.com", "Example Store");
/// assert_eq!(shop.slug, "example");
///
/// let parsed: Shop =
///     serde_json::from_str(r#"{"slug":"acme","hostname":"acme.io"}"#).unwrap();
/// assert_eq!(parsed.name, "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    /// Canonical lowercase kebab-case identifier.
    pub slug: String,
    /// Lowercase hostname without scheme, path, or leading `www.`.
    pub hostname: String,
    /// Display label.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

impl Shop {
    /// Creates a shop record from its three fields.
    pub fn new(
        slug: impl Into<String>,
        hostname: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            hostname: hostname.into(),
            name: name.into(),
        }
    }
}

/// Treats an explicit `null` name the same as a missing one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_name_defaults_to_empty() {
        let shop: Shop =
            serde_json::from_str(r#"{"slug":"acme","hostname":"acme.io"}"#).unwrap();
        assert_eq!(shop, Shop::new("acme", "acme.io", ""));
    }

    #[test]
    fn test_null_name_becomes_empty() {
        let shop: Shop =
            serde_json::from_str(r#"{"slug":"acme","hostname":"acme.io","name":null}"#).unwrap();
        assert_eq!(shop.name, "");
    }
}
