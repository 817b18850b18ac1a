#![warn(missing_docs)]

//! # Redfish Entity: a client-side resource model
//!
//! This crate is the model layer of a Redfish/Swordfish client. Resources are
//! JSON documents reachable by URI, and each carries an entity tag (`ETag`)
//! for optimistic concurrency. The crate provides the pieces every resource
//! type shares:
//!
//! 1. **Structural diffs** - compute the minimal PATCH body from two snapshots
//! 2. **Guarded writes** - thread the stored `ETag` into `If-Match` on PATCH/POST
//! 3. **Collections** - fetch every member of a collection concurrently, keeping
//!    partial results and a per-link failure map
//! 4. **Query filters** - build `$skip`/`$top` query strings for list requests
//!
//! ## Usage
//!
//! ```ignore
//! use redfish_entity::client::{ClientConfig, HttpClient};
//! use redfish_entity::resources::{get_data_storage_line_of_service, ProvisioningPolicy};
//! use redfish_entity::{Resource, SharedClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client: SharedClient = Arc::new(HttpClient::with_config(ClientConfig {
//!         endpoint: "https://bmc.example.com".into(),
//!         username: Some("admin".into()),
//!         password: Some("secret".into()),
//!         ..Default::default()
//!     })?);
//!
//!     let uri = "/redfish/v1/StorageServices/1/LinesOfService/DataStorageLineOfService/Gold";
//!     let mut gold = get_data_storage_line_of_service(&client, uri).await?;
//!
//!     gold.provisioning_policy = Some(ProvisioningPolicy::Fixed);
//!     gold.update().await?; // PATCH {"ProvisioningPolicy": "Fixed"} with If-Match
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[client]** - Transport trait and the `reqwest` implementation
//! - **[entity]** - Entity envelope, concurrency control, diff engine, operations
//! - **[collection]** - Concurrent collection retrieval
//! - **[filter]** - Query-string builder
//! - **[protocol]** - Header and property names, entity-tag helpers
//! - **[resources]** - Schema types built on the entity
//! - **[error]** - Error types and result handling
//! - **[types]** - Transport response type

pub mod client;
pub mod collection;
pub mod entity;
pub mod error;
pub mod filter;
pub mod protocol;
pub mod resources;
pub mod types;

pub use client::{Client, ClientConfig, HttpClient, SharedClient};
pub use collection::{list_referenced, list_referenced_filtered};
pub use entity::{diff, ConcurrencyControl, Diffable, Entity, Field, Payload, Resource};
pub use error::{CollectionError, ModelError, PartialCollection, Result};
pub use filter::{Filter, FilterOption};
pub use types::Response;
