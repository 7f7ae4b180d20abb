//! Slug normalization.
//!
//! Turns arbitrary text into the canonical `[a-z0-9]+(-[a-z0-9]+)*` form
//! used as the shop primary key.

use std::sync::LazyLock;

use regex::Regex;

static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex must compile"));

/// Normalizes text into a slug.
///
/// Lowercases the input, collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen, and trims hyphens from both ends.
/// Never fails; empty or all-punctuation input yields an empty string,
/// which callers must reject on their own.
///
/// # Examples
///
/// ```
/// use sps_core::normalize;
///
/// assert_eq!(normalize("Hello, World!"), "hello-world");
/// assert_eq!(normalize("--my__shop--"), "my-shop");
/// assert_eq!(normalize("!!!"), "");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_SLUG_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Returns `true` if `slug` is already in canonical form.
pub fn is_canonical(slug: &str) -> bool {
    !slug.is_empty() && normalize(slug) == slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_hyphenates() {
        assert_eq!(normalize("Bad Slug!"), "bad-slug");
        assert_eq!(normalize("ACME  Corp"), "acme-corp");
        assert_eq!(normalize("a.b_c/d"), "a-b-c-d");
    }

    #[test]
    fn test_normalize_trims_edges() {
        assert_eq!(normalize("  shop  "), "shop");
        assert_eq!(normalize("-shop-"), "shop");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn test_normalize_drops_non_ascii_letters() {
        assert_eq!(normalize("café-münchen"), "caf-m-nchen");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in [
            "",
            "Example",
            "shop.example.com",
            "  Bad Slug!  ",
            "a--b",
            "ÄÖÜ 123",
            "x",
            "-_-",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical("example"));
        assert!(is_canonical("my-shop-2"));
        assert!(!is_canonical(""));
        assert!(!is_canonical("My-Shop"));
        assert!(!is_canonical("a--b"));
        assert!(!is_canonical("-a"));
    }
}
