//! Wire conventions of the Redfish REST protocol.
//!
//! # Headers
//!
//! | Header | Direction | Purpose |
//! |--------|-----------|---------|
//! | `ETag` | response | Version of the fetched resource |
//! | `If-Match` | request | Conditional PATCH/POST against a known version |
//!
//! # Properties
//!
//! Every resource carries `@odata.id`, `Id` and `Name`. Collections list their
//! members under `Members` and continue on `Members@odata.nextLink`.

pub mod headers;

pub use headers::{format_if_match, if_match_headers, strip_etag_quotes};

/// Property names used on the wire.
pub mod properties {
    /// Canonical resource location.
    pub const ODATA_ID: &str = "@odata.id";
    /// Resource-local identifier.
    pub const ID: &str = "Id";
    /// Display label.
    pub const NAME: &str = "Name";
    /// Member links of a collection resource.
    pub const MEMBERS: &str = "Members";
    /// Link to the next page of a collection.
    pub const MEMBERS_NEXT_LINK: &str = "Members@odata.nextLink";
}
