//! HTTP response as seen by the entity layer.

use crate::error::Result;
use crate::protocol::headers::ETAG;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// A completed transport response.
///
/// The body is fully buffered; dropping the response releases it.
#[derive(Clone, Debug)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers as received.
    pub headers: BTreeMap<String, String>,
    /// Raw response body.
    pub body: Bytes,
}

impl Response {
    /// A response with no headers.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Response {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// A `200 OK` response carrying `body`.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(200, body)
    }

    /// Add a header, builder style.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The entity tag returned by the service, verbatim.
    pub fn etag(&self) -> Option<&str> {
        self.header(ETAG)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// The body as UTF-8, if it is valid.
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// `true` for 2xx.
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl Default for Response {
    fn default() -> Self {
        Response {
            status: 200,
            headers: BTreeMap::new(),
            body: Bytes::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    #[test]
    fn test_header_lookup_ignores_case() {
        let response = Response::ok("{}").with_header("ETag", "W/\"12\"");
        assert_eq!(response.header("etag"), Some("W/\"12\""));
        assert_eq!(response.etag(), Some("W/\"12\""));
        assert_eq!(response.header("If-Match"), None);
    }

    #[test]
    fn test_json_decode() {
        let response = Response::ok(r#"{"Name":"bmc"}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["Name"], "bmc");
    }

    #[test]
    fn test_json_decode_failure() {
        let response = Response::ok("not json");
        let err = response.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, ModelError::Decode(_)));
    }

    #[test]
    fn test_success_range() {
        assert!(Response::new(204, "").is_success());
        assert!(!Response::new(412, "").is_success());
        assert!(Response::default().is_success());
    }
}
