//! Transport layer consumed by the entity model.
//!
//! The entity operations never talk to the network directly. They go through
//! the [`Client`] trait, which exposes the three calls the model needs:
//!
//! - **`get`** - retrieve a resource document
//! - **`patch_with_headers`** - partial update, with conditional headers
//! - **`post_with_headers`** - action or creation, with conditional headers
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── fetch   - HttpClient, the reqwest-backed implementation
//! ├── config  - Client configuration
//! └── utils   - Status classification and URI helpers
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Client`] | Transport capability used by every entity |
//! | [`HttpClient`] | HTTP implementation over `reqwest` |
//! | [`ClientConfig`] | Endpoint, timeouts, credentials |
//!
//! # Examples
//!
//! ## Creating a Client
//!
//! ```
//! use redfish_entity::client::{ClientConfig, HttpClient};
//!
//! let config = ClientConfig {
//!     endpoint: "https://bmc.example.com".into(),
//!     request_timeout_ms: 10_000,
//!     ..Default::default()
//! };
//! let client = HttpClient::with_config(config).unwrap();
//! assert_eq!(client.config().request_timeout_ms, 10_000);
//! ```
//!
//! ## Utility Functions
//!
//! ```
//! use redfish_entity::client::{is_conflict_status, join_endpoint};
//!
//! assert!(is_conflict_status(412));
//! assert_eq!(
//!     join_endpoint("https://bmc", "/redfish/v1").unwrap(),
//!     "https://bmc/redfish/v1"
//! );
//! ```

mod config;
mod fetch;
mod utils;

pub use config::ClientConfig;
pub use fetch::HttpClient;
pub use utils::*;

use crate::error::Result;
use crate::types::{Headers, Response};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Transport capability shared by all entities.
///
/// Implementations must report a non-success status as an error; the entity
/// layer treats any `Ok` response as accepted.
#[async_trait]
pub trait Client: Send + Sync {
    /// Retrieve the document at `uri`.
    async fn get(&self, uri: &str) -> Result<Response>;

    /// Send a partial update to `uri`.
    async fn patch_with_headers(
        &self,
        uri: &str,
        payload: &Value,
        headers: &Headers,
    ) -> Result<Response>;

    /// Send an action or creation request to `uri`.
    async fn post_with_headers(
        &self,
        uri: &str,
        payload: &Value,
        headers: &Headers,
    ) -> Result<Response>;
}

/// Shared handle to a transport, bound to entities after a fetch.
pub type SharedClient = Arc<dyn Client>;

#[async_trait]
impl<C: Client + ?Sized> Client for Arc<C> {
    async fn get(&self, uri: &str) -> Result<Response> {
        (**self).get(uri).await
    }

    async fn patch_with_headers(
        &self,
        uri: &str,
        payload: &Value,
        headers: &Headers,
    ) -> Result<Response> {
        (**self).patch_with_headers(uri, payload, headers).await
    }

    async fn post_with_headers(
        &self,
        uri: &str,
        payload: &Value,
        headers: &Headers,
    ) -> Result<Response> {
        (**self).post_with_headers(uri, payload, headers).await
    }
}
