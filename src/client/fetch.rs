//! HTTP transport implementation.
//!
//! Provides [`HttpClient`], the `reqwest`-backed [`Client`] used against real
//! Redfish services.
//!
//! # Examples
//!
//! ## Fetching a resource
//!
//! ```ignore
//! use redfish_entity::client::{ClientConfig, HttpClient};
//! use redfish_entity::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::with_config(ClientConfig {
//!         endpoint: "https://bmc.example.com".into(),
//!         username: Some("admin".into()),
//!         password: Some("secret".into()),
//!         ..Default::default()
//!     })?;
//!     let response = client.get("/redfish/v1/Systems/1").await?;
//!     println!("ETag: {:?}", response.etag());
//!     Ok(())
//! }
//! ```

use crate::client::{config::ClientConfig, join_endpoint, Client};
use crate::error::{ModelError, Result};
use crate::types::{Headers, Response};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// HTTP transport for Redfish services.
///
/// Cheap to clone; clones share the connection pool. No request is retried.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl HttpClient {
    /// Create a client for `endpoint` with default settings.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig {
            endpoint: endpoint.into(),
            ..Default::default()
        })
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .pool_max_idle_per_host(config.max_idle_per_host as usize)
            .danger_accept_invalid_certs(config.insecure);

        if !config.proxy_url.is_empty() {
            let proxy = reqwest::Proxy::all(&config.proxy_url)
                .map_err(|e| ModelError::Config(format!("invalid proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| ModelError::Config(e.to_string()))?;

        Ok(HttpClient {
            client,
            config: Arc::new(config),
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send(
        &self,
        method: reqwest::Method,
        uri: &str,
        payload: Option<&Value>,
        headers: &Headers,
    ) -> Result<Response> {
        let url = join_endpoint(&self.config.endpoint, uri)?;
        let mut req_builder = self
            .client
            .request(method.clone(), &url)
            .header(http::header::ACCEPT, "application/json");

        if let Some(user) = &self.config.username {
            req_builder = req_builder.basic_auth(user, self.config.password.as_deref());
        }
        for (k, v) in headers {
            req_builder = req_builder.header(k, v);
        }
        if let Some(body) = payload {
            req_builder = req_builder.json(body);
        }

        if self.config.enable_logging {
            tracing::debug!(%method, %url, headers = ?headers, "sending request");
        }

        let response = req_builder.send().await?;
        let status = response.status().as_u16();

        let mut response_headers = BTreeMap::new();
        for (k, v) in response.headers() {
            if let Ok(val) = v.to_str() {
                response_headers.insert(k.as_str().to_string(), val.to_string());
            }
        }

        let body = response.bytes().await?;

        if self.config.enable_logging {
            tracing::debug!(%method, %url, status, bytes = body.len(), "received response");
        }

        if !(200..300).contains(&status) {
            return Err(ModelError::Status {
                status,
                uri: uri.to_string(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(Response {
            status,
            headers: response_headers,
            body,
        })
    }
}

#[async_trait]
impl Client for HttpClient {
    async fn get(&self, uri: &str) -> Result<Response> {
        self.send(reqwest::Method::GET, uri, None, &Headers::new())
            .await
    }

    async fn patch_with_headers(
        &self,
        uri: &str,
        payload: &Value,
        headers: &Headers,
    ) -> Result<Response> {
        self.send(reqwest::Method::PATCH, uri, Some(payload), headers)
            .await
    }

    async fn post_with_headers(
        &self,
        uri: &str,
        payload: &Value,
        headers: &Headers,
    ) -> Result<Response> {
        self.send(reqwest::Method::POST, uri, Some(payload), headers)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::headers::IF_MATCH;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new("https://bmc.example.com").unwrap();
        assert_eq!(client.config().endpoint, "https://bmc.example.com");
        assert_eq!(client.config().request_timeout_ms, 30_000);
    }

    #[tokio::test]
    async fn test_get_returns_body_and_etag() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/redfish/v1/Systems/1")
            .with_status(200)
            .with_header("ETag", "\"abc123\"")
            .with_body(r#"{"Id":"1"}"#)
            .create_async()
            .await;

        let client = HttpClient::new(server.url()).unwrap();
        let response = client.get("/redfish/v1/Systems/1").await.unwrap();

        assert_eq!(response.etag(), Some("\"abc123\""));
        assert_eq!(response.body_str(), Some(r#"{"Id":"1"}"#));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_patch_sends_if_match_and_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/redfish/v1/Systems/1")
            .match_header("if-match", "\"abc123\"")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(json!({"AssetTag": "rack-7"})))
            .with_status(204)
            .create_async()
            .await;

        let client = HttpClient::new(server.url()).unwrap();
        let mut headers = Headers::new();
        headers.insert(IF_MATCH.to_string(), "\"abc123\"".to_string());
        let response = client
            .patch_with_headers("/redfish/v1/Systems/1", &json!({"AssetTag": "rack-7"}), &headers)
            .await
            .unwrap();

        assert_eq!(response.status, 204);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_precondition_failed_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/redfish/v1/Systems/1/Actions/ComputerSystem.Reset")
            .with_status(412)
            .with_body("stale")
            .create_async()
            .await;

        let client = HttpClient::new(server.url()).unwrap();
        let err = client
            .post_with_headers(
                "/redfish/v1/Systems/1/Actions/ComputerSystem.Reset",
                &json!({"ResetType": "On"}),
                &Headers::new(),
            )
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        match err {
            ModelError::Status { body, .. } => assert_eq!(body, "stale"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_http_error() {
        let client = HttpClient::new("http://127.0.0.1:1").unwrap();
        let err = client.get("/redfish/v1").await.unwrap_err();
        assert!(matches!(err, ModelError::Http(_)));
    }
}
