//! Core data types shared by the transport and the entity layer.

mod response;

pub use bytes::Bytes;
pub use response::Response;

/// Header map passed to conditional writes (`If-Match` and friends).
pub type Headers = std::collections::BTreeMap<String, String>;
