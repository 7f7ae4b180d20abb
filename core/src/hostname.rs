//! Identifier parsing into canonical hostnames.
//!
//! Users identify a shop by URL or bare hostname (`https://www.Example.com/`,
//! `shop.example.com`, `EXAMPLE`). [`parse_hostname`] reduces all of them to
//! the lowercase network location with any leading `www.` removed, and
//! [`extract_default_slug`] picks the label used as the slug when none is
//! given.

use url::Url;

use crate::validate::ValidationError;

const WWW_PREFIX: &str = "www.";

/// Returns `true` if the identifier already carries an `http`/`https` scheme.
fn has_http_scheme(identifier: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        identifier
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Parses a URL or hostname into a canonical hostname.
///
/// Scheme-less input is treated as `http://<input>`. The URL parser only
/// decides validity; the result is the network location exactly as typed,
/// lowercased, with exactly one leading `www.` stripped. Ports, userinfo,
/// numeric and non-ASCII hosts are kept verbatim.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidIdentifier`] if the input does not
/// parse as a URL with a non-empty host.
///
/// # Examples
///
/// ```
/// use sps_core::parse_hostname;
///
/// assert_eq!(parse_hostname("https://www.Example.com/about").unwrap(), "example.com");
/// assert_eq!(parse_hostname("shop.example.com").unwrap(), "shop.example.com");
/// assert!(parse_hostname("http://").is_err());
/// ```
pub fn parse_hostname(identifier: &str) -> Result<String, ValidationError> {
    let identifier = identifier.trim();
    let candidate = if has_http_scheme(identifier) {
        identifier.to_string()
    } else {
        format!("http://{identifier}")
    };

    let invalid = || ValidationError::InvalidIdentifier(identifier.to_string());
    let url = Url::parse(&candidate).map_err(|_| invalid())?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }

    let netloc = raw_netloc(&candidate).ok_or_else(invalid)?.to_lowercase();

    Ok(match netloc.strip_prefix(WWW_PREFIX) {
        Some(rest) => rest.to_string(),
        None => netloc,
    })
}

/// Returns the authority text of `url` as typed: everything after `://` up to
/// the first `/`, `?` or `#`.
fn raw_netloc(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    rest.split(['/', '?', '#'])
        .next()
        .filter(|netloc| !netloc.is_empty())
}

/// Picks the hostname label used to derive a default slug.
///
/// Hostnames with three or more labels yield the second-to-last label
/// (`shop.example.com` gives `example`), two labels yield the first
/// (`example.com` gives `example`), and a single label is returned as is.
/// The result is not normalized.
pub fn extract_default_slug(hostname: &str) -> &str {
    let labels: Vec<&str> = hostname.split('.').collect();
    match labels.as_slice() {
        [.., second_to_last, _] if labels.len() > 2 => *second_to_last,
        [first, _] => *first,
        _ => hostname,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_scheme_and_www() {
        assert_eq!(parse_hostname("https://www.Example.com").unwrap(), "example.com");
        assert_eq!(parse_hostname("http://www.example.com/path?q=1").unwrap(), "example.com");
        assert_eq!(parse_hostname("www.example.com").unwrap(), "example.com");
    }

    #[test]
    fn test_parse_strips_www_only_once() {
        assert_eq!(parse_hostname("www.www.example.com").unwrap(), "www.example.com");
    }

    #[test]
    fn test_parse_accepts_bare_names() {
        assert_eq!(parse_hostname("EXAMPLE").unwrap(), "example");
        assert_eq!(parse_hostname("shop.example.com").unwrap(), "shop.example.com");
    }

    #[test]
    fn test_parse_keeps_explicit_port() {
        assert_eq!(parse_hostname("example.com:8080").unwrap(), "example.com:8080");
    }

    #[test]
    fn test_parse_keeps_default_port() {
        assert_eq!(parse_hostname("example.com:80").unwrap(), "example.com:80");
        assert_eq!(parse_hostname("https://Example.com:443/x").unwrap(), "example.com:443");
    }

    #[test]
    fn test_parse_keeps_numeric_hosts_as_typed() {
        assert_eq!(parse_hostname("12345").unwrap(), "12345");
        assert_eq!(parse_hostname("192.168.1").unwrap(), "192.168.1");
        assert_eq!(parse_hostname("http://4000/").unwrap(), "4000");
    }

    #[test]
    fn test_parse_keeps_userinfo() {
        assert_eq!(parse_hostname("User@Example.com").unwrap(), "user@example.com");
    }

    #[test]
    fn test_parse_keeps_non_ascii_hosts() {
        assert_eq!(parse_hostname("Café.com").unwrap(), "café.com");
        assert_eq!(parse_hostname("https://www.café.com/menu").unwrap(), "café.com");
    }

    #[test]
    fn test_parse_stops_at_query_and_fragment() {
        assert_eq!(parse_hostname("example.com?ref=1").unwrap(), "example.com");
        assert_eq!(parse_hostname("example.com#top").unwrap(), "example.com");
    }

    #[test]
    fn test_parse_scheme_is_case_insensitive() {
        assert_eq!(parse_hostname("HTTPS://Shop.IO").unwrap(), "shop.io");
    }

    #[test]
    fn test_parse_rejects_missing_host() {
        assert!(matches!(
            parse_hostname("http://"),
            Err(ValidationError::InvalidIdentifier(_))
        ));
        assert!(parse_hostname("exa mple.com").is_err());
    }

    #[test]
    fn test_parsed_hostname_never_has_scheme_or_www() {
        for input in [
            "https://www.example.com",
            "http://WWW.Shop.Example.com/x",
            "www.acme.io",
            "acme.io",
            "HTTP://www.Upper.COM",
        ] {
            let host = parse_hostname(input).unwrap();
            assert!(!host.contains("://"), "{input} -> {host}");
            assert!(!host.starts_with("www."), "{input} -> {host}");
        }
    }

    #[test]
    fn test_extract_default_slug() {
        assert_eq!(extract_default_slug("shop.example.com"), "example");
        assert_eq!(extract_default_slug("a.b.example.co"), "example");
        assert_eq!(extract_default_slug("example.com"), "example");
        assert_eq!(extract_default_slug("localhost"), "localhost");
    }
}
