//! Error types for entity operations.
//!
//! This module defines every error that can surface from fetching, diffing,
//! updating or listing Redfish resources. The [`Result`] type alias provides a
//! convenient shorthand for operations that may fail.
//!
//! # Error Categories
//!
//! | Category | Variants | Raised before network I/O |
//! |----------|----------|---------------------------|
//! | Transport | `Http`, `Status` | No |
//! | Decoding | `Decode`, `Encode` | No / Yes |
//! | Validation | `ReadOnlyField`, `NoClient` | Yes |
//! | Collection | `Collection` | No |
//! | Configuration | `Config` | Yes |
//!
//! Nothing in this crate retries a failed request. A stale entity tag comes back
//! from the service as an ordinary [`ModelError::Status`]; use
//! [`ModelError::is_conflict()`] to recognise it and decide whether to refetch.
//!
//! # Examples
//!
//! ```
//! use redfish_entity::ModelError;
//!
//! let err = ModelError::ReadOnlyField("Id".into());
//! assert_eq!(err.to_string(), "Id field is read only");
//! assert!(!err.is_transport());
//! ```

use crate::client::is_conflict_status;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Result type for entity operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while working with Redfish entities.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ModelError {
    /// The request could not be completed (connection refused, TLS failure,
    /// timeout, body read failure).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service answered with a non-success status code.
    #[error("{uri} returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The URI the request was sent to.
        uri: String,
        /// Response body, usually a Redfish extended error document.
        body: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A field value could not be turned into a payload value.
    #[error("Encode error: {0}")]
    Encode(String),

    /// An update tried to change a field outside the resource's allow-list.
    ///
    /// Raised locally before any request is sent.
    #[error("{0} field is read only")]
    ReadOnlyField(String),

    /// One or more members of a collection could not be retrieved.
    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// A write was attempted on an entity with no bound client.
    #[error("Entity has no client bound; fetch it before writing")]
    NoClient,

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error in the library (worker task failure).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        ModelError::Http(err.to_string())
    }
}

impl ModelError {
    /// Check if this error came from the transport (network or status).
    #[inline]
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, ModelError::Http(_) | ModelError::Status { .. })
    }

    /// Check if the service rejected a conditional write.
    ///
    /// Returns `true` for HTTP 409 (Conflict) and 412 (Precondition Failed),
    /// the statuses services use for a stale `If-Match` value.
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        match self {
            ModelError::Status { status, .. } => is_conflict_status(*status),
            _ => false,
        }
    }

    /// HTTP status code, if the service answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ModelError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Aggregate of per-member failures from one collection retrieval.
///
/// Every key is a member (or collection page) link; each link appears once.
#[derive(Debug, Default)]
pub struct CollectionError {
    failures: BTreeMap<String, ModelError>,
}

impl CollectionError {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `link`.
    pub fn insert(&mut self, link: impl Into<String>, err: ModelError) {
        self.failures.insert(link.into(), err);
    }

    /// `true` when no member failed.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of failed links.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// The link → error mapping.
    pub fn failures(&self) -> &BTreeMap<String, ModelError> {
        &self.failures
    }

    /// Look up the failure recorded for `link`.
    pub fn get(&self, link: &str) -> Option<&ModelError> {
        self.failures.get(link)
    }

    /// Consume the aggregate, returning the mapping.
    pub fn into_failures(self) -> BTreeMap<String, ModelError> {
        self.failures
    }
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to retrieve {} collection member(s):", self.failures.len())?;
        for (link, err) in &self.failures {
            write!(f, " [{}: {}]", link, err)?;
        }
        Ok(())
    }
}

impl std::error::Error for CollectionError {}

/// A collection retrieval in which some members failed.
///
/// Carries whatever was retrieved successfully alongside the aggregate error.
/// Converting into [`ModelError`] (for example through `?`) keeps only the
/// error.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct PartialCollection<T: fmt::Debug> {
    /// Members that were retrieved.
    pub items: Vec<T>,
    /// Members that failed, keyed by link.
    #[source]
    pub error: CollectionError,
}

impl<T: fmt::Debug> From<PartialCollection<T>> for ModelError {
    fn from(partial: PartialCollection<T>) -> Self {
        ModelError::Collection(partial.error)
    }
}
