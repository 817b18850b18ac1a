//! Entity-tag bookkeeping for optimistic concurrency.
//!
//! Each entity owns one [`ConcurrencyControl`]. A successful GET stores the
//! returned `ETag`; PATCH and POST read it to build the `If-Match` header.
//!
//! ```text
//! Untracked ──GET with ETag──▶ Tracked ──GET with ETag──▶ Tracked (refreshed)
//! ```
//!
//! Writes never change the state.

use crate::protocol::headers::{format_if_match, if_match_headers};
use crate::types::Headers;

/// Whether an entity tag is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionState {
    /// No entity tag has been seen.
    Untracked,
    /// An entity tag from the last fetch is stored.
    Tracked,
}

/// Stored entity tag plus the two vendor work-around switches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConcurrencyControl {
    etag: Option<String>,
    strip_quotes: bool,
    disable_match: bool,
}

impl ConcurrencyControl {
    /// Untracked, with both flags off.
    pub fn new() -> Self {
        Self::default()
    }

    /// The entity tag as the service returned it.
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// Whether a non-empty tag is stored.
    pub fn state(&self) -> VersionState {
        match self.etag.as_deref() {
            Some(tag) if !tag.is_empty() => VersionState::Tracked,
            _ => VersionState::Untracked,
        }
    }

    /// Store the tag returned by a fetch. An absent header keeps the old tag.
    pub fn record(&mut self, etag: Option<&str>) {
        if let Some(tag) = etag {
            self.etag = Some(tag.to_string());
        }
    }

    /// Send the tag without its surrounding quotes.
    ///
    /// For services whose `If-Match` only matches the bare tag.
    pub fn set_strip_quotes(&mut self, strip: bool) {
        self.strip_quotes = strip;
    }

    /// Whether `If-Match` is sent without quotes.
    pub fn strips_quotes(&self) -> bool {
        self.strip_quotes
    }

    /// Never send `If-Match`.
    ///
    /// For services that reject every conditional request, even with `*`.
    pub fn set_disable_match(&mut self, disable: bool) {
        self.disable_match = disable;
    }

    /// Whether `If-Match` is suppressed.
    pub fn match_disabled(&self) -> bool {
        self.disable_match
    }

    /// Headers for a conditional write.
    ///
    /// Empty when matching is disabled or no tag is known.
    pub fn if_match_headers(&self) -> Headers {
        if self.disable_match {
            return Headers::new();
        }
        let value = self
            .etag
            .as_deref()
            .map(|tag| format_if_match(tag, self.strip_quotes));
        if_match_headers(value.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::headers::IF_MATCH;

    fn tracked(tag: &str) -> ConcurrencyControl {
        let mut cc = ConcurrencyControl::new();
        cc.record(Some(tag));
        cc
    }

    #[test]
    fn test_starts_untracked() {
        let cc = ConcurrencyControl::new();
        assert_eq!(cc.state(), VersionState::Untracked);
        assert!(cc.if_match_headers().is_empty());
    }

    #[test]
    fn test_record_and_refresh() {
        let mut cc = tracked("\"1\"");
        assert_eq!(cc.state(), VersionState::Tracked);

        cc.record(None);
        assert_eq!(cc.etag(), Some("\"1\""));

        cc.record(Some("\"2\""));
        assert_eq!(cc.etag(), Some("\"2\""));
    }

    #[test]
    fn test_quoted_if_match() {
        let headers = tracked("\"abc123\"").if_match_headers();
        assert_eq!(headers.get(IF_MATCH).unwrap(), "\"abc123\"");
    }

    #[test]
    fn test_stripped_if_match() {
        let mut cc = tracked("\"abc123\"");
        cc.set_strip_quotes(true);
        assert_eq!(cc.if_match_headers().get(IF_MATCH).unwrap(), "abc123");
        assert_eq!(cc.etag(), Some("\"abc123\""));
    }

    #[test]
    fn test_disabled_match_sends_nothing() {
        let mut cc = tracked("\"abc123\"");
        cc.set_disable_match(true);
        assert!(cc.if_match_headers().is_empty());
    }

    #[test]
    fn test_empty_tag_is_untracked() {
        let cc = tracked("");
        assert_eq!(cc.state(), VersionState::Untracked);
        assert!(cc.if_match_headers().is_empty());
    }
}
