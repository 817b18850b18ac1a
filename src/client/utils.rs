//! Utility functions for the HTTP transport.
//!
//! - Status code classification
//! - Joining relative resource URIs onto the service endpoint

use crate::error::{ModelError, Result};
use url::Url;

/// Check if status code indicates a rejected conditional write.
pub fn is_conflict_status(status: u16) -> bool {
    matches!(status, 409 | 412)
}

/// Resolve `uri` against `endpoint`.
///
/// Absolute URIs are returned unchanged. Relative URIs such as
/// `/redfish/v1/Systems` replace the endpoint's path.
pub fn join_endpoint(endpoint: &str, uri: &str) -> Result<String> {
    if uri.starts_with("http://") || uri.starts_with("https://") {
        return Ok(uri.to_string());
    }
    let base = Url::parse(endpoint)
        .map_err(|e| ModelError::Config(format!("invalid endpoint '{}': {}", endpoint, e)))?;
    let joined = base
        .join(uri)
        .map_err(|e| ModelError::Config(format!("invalid uri '{}': {}", uri, e)))?;
    Ok(joined.to_string())
}
