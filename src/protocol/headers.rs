//! Entity-tag header parsing and formatting.
//!
//! Redfish services return an `ETag` header on GET and honour `If-Match` on
//! PATCH and POST (DSP0266 section 6.5). Entity tags are quoted strings, for
//! example `"abc123"` or the weak form `W/"abc123"`.
//!
//! Some implementations only match the unquoted tag. [`strip_etag_quotes`]
//! produces that form.
//!
//! # Examples
//!
//! ```
//! use redfish_entity::protocol::{format_if_match, strip_etag_quotes};
//!
//! assert_eq!(strip_etag_quotes("\"abc123\""), "abc123");
//! assert_eq!(format_if_match("\"abc123\"", false), "\"abc123\"");
//! assert_eq!(format_if_match("\"abc123\"", true), "abc123");
//! ```

use crate::types::Headers;

/// Response header carrying the entity tag.
pub const ETAG: &str = "ETag";

/// Request header carrying the expected entity tag.
pub const IF_MATCH: &str = "If-Match";

/// Remove surrounding `"` characters from an entity tag.
///
/// Every leading and trailing quote is removed; inner quotes are kept.
///
/// # Examples
///
/// ```
/// use redfish_entity::protocol::strip_etag_quotes;
///
/// assert_eq!(strip_etag_quotes("\"v1\""), "v1");
/// assert_eq!(strip_etag_quotes("v1"), "v1");
/// assert_eq!(strip_etag_quotes("W/\"v1\""), "W/\"v1");
/// ```
pub fn strip_etag_quotes(etag: &str) -> &str {
    etag.trim_matches('"')
}

/// Format the `If-Match` value for a stored entity tag.
#[inline]
pub fn format_if_match(etag: &str, strip_quotes: bool) -> String {
    if strip_quotes {
        strip_etag_quotes(etag).to_string()
    } else {
        etag.to_string()
    }
}

/// Build the header map for a conditional write.
///
/// Returns an empty map when `etag` is `None` or empty.
pub fn if_match_headers(etag: Option<&str>) -> Headers {
    let mut headers = Headers::new();
    if let Some(tag) = etag.filter(|t| !t.is_empty()) {
        headers.insert(IF_MATCH.to_string(), tag.to_string());
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_etag_quotes("\"abc123\""), "abc123");
        assert_eq!(strip_etag_quotes("abc123"), "abc123");
        assert_eq!(strip_etag_quotes("\"\""), "");
    }

    #[test]
    fn test_format_if_match_keeps_quotes_by_default() {
        assert_eq!(format_if_match("\"abc123\"", false), "\"abc123\"");
    }

    #[test]
    fn test_format_if_match_stripped() {
        assert_eq!(format_if_match("\"abc123\"", true), "abc123");
    }

    #[test]
    fn test_if_match_headers() {
        let headers = if_match_headers(Some("\"v2\""));
        assert_eq!(headers.get(IF_MATCH).map(String::as_str), Some("\"v2\""));
        assert!(if_match_headers(Some("")).is_empty());
        assert!(if_match_headers(None).is_empty());
    }
}
