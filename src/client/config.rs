//! Configuration for the HTTP transport.
//!
//! # Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `endpoint` | `https://localhost` | Base URL relative URIs are joined to |
//! | `request_timeout_ms` | 30000 | Per-request timeout |
//! | `max_idle_per_host` | 100 | Idle connections kept per host |
//! | `proxy_url` | empty | Route requests through a proxy |
//! | `insecure` | false | Accept invalid TLS certificates |
//! | `username` / `password` | none | Basic credentials |
//! | `enable_logging` | false | Log every request and response |
//!
//! # Examples
//!
//! ```
//! use redfish_entity::client::ClientConfig;
//!
//! let config = ClientConfig {
//!     endpoint: "https://10.0.0.5".into(),
//!     insecure: true,
//!     ..Default::default()
//! };
//! assert_eq!(config.request_timeout_ms, 30_000);
//! ```

/// Configuration for [`HttpClient`](super::HttpClient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the service, e.g. `https://bmc.example.com`.
    pub endpoint: String,

    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,

    /// Maximum idle connections kept per host.
    pub max_idle_per_host: u32,

    /// Proxy URL. Empty disables the proxy.
    pub proxy_url: String,

    /// Accept self-signed or otherwise invalid TLS certificates.
    ///
    /// Management controllers commonly ship with self-signed certificates.
    pub insecure: bool,

    /// Basic-auth user name.
    pub username: Option<String>,

    /// Basic-auth password.
    pub password: Option<String>,

    /// Log request/response details using the `tracing` crate.
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            endpoint: "https://localhost".to_string(),
            request_timeout_ms: 30_000,
            max_idle_per_host: 100,
            proxy_url: String::new(),
            insecure: false,
            username: None,
            password: None,
            enable_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "https://localhost");
        assert_eq!(config.request_timeout_ms, 30_000);
        assert!(!config.insecure);
        assert!(config.username.is_none());
    }

    #[test]
    fn test_partial_override() {
        let config = ClientConfig {
            username: Some("admin".into()),
            ..Default::default()
        };
        assert_eq!(config.username.as_deref(), Some("admin"));
        assert_eq!(config.max_idle_per_host, 100);
    }
}
