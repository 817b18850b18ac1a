//! The entity envelope shared by every Redfish resource.
//!
//! A schema type embeds an [`Entity`] (flattened on the wire) and implements
//! [`Resource`]. That is enough to fetch it, diff it, and send guarded writes:
//!
//! - [`get`] - fetch, decode, normalise `Id`, capture the `ETag`, bind the client
//! - [`Entity::patch`] / [`Entity::post`] - writes carrying `If-Match`
//! - [`Entity::update`] - diff, check the allow-list, then PATCH
//! - [`update`] - [`Entity::update`] against the snapshot taken at fetch time
//!
//! # Examples
//!
//! ```ignore
//! use redfish_entity::entity;
//! use redfish_entity::resources::DataStorageLineOfService;
//!
//! let mut los: DataStorageLineOfService =
//!     entity::get(&client, "/redfish/v1/StorageServices/1/LinesOfService/Gold").await?;
//! los.is_space_efficient = true;
//! entity::update(&los).await?;
//! ```

mod concurrency;
mod diff;

pub use concurrency::{ConcurrencyControl, VersionState};
pub use diff::{diff, Diffable, Field, FieldValue, Payload};

use crate::client::SharedClient;
use crate::collection;
use crate::error::{ModelError, PartialCollection, Result};
use crate::protocol::properties;
use crate::types::{Bytes, Response};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Identity and concurrency state of one resource instance.
///
/// Created empty, populated by [`get`], dropped with its resource. The client
/// handle, entity tag and fetch snapshot are never serialized.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct Entity {
    /// Location of the resource.
    #[serde(rename = "@odata.id", default)]
    pub odata_id: String,
    /// Resource-local identifier. Numeric ids are stored as strings.
    #[serde(rename = "Id", default, deserialize_with = "string_or_number")]
    pub id: String,
    /// Name of the resource or array element.
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(skip)]
    concurrency: ConcurrencyControl,
    #[serde(skip)]
    client: Option<SharedClient>,
    #[serde(skip)]
    snapshot: Option<Bytes>,
}

impl Entity {
    /// Set the client used for writes from this entity.
    pub fn set_client(&mut self, client: SharedClient) {
        self.client = Some(client);
    }

    /// Client bound by [`get`] or [`Entity::set_client`].
    pub fn client(&self) -> Option<&SharedClient> {
        self.client.as_ref()
    }

    /// Send the entity tag without surrounding quotes on writes.
    pub fn strip_etag_quotes(&mut self, strip: bool) {
        self.concurrency.set_strip_quotes(strip);
    }

    /// Skip the `If-Match` header on writes.
    pub fn disable_etag_match(&mut self, disable: bool) {
        self.concurrency.set_disable_match(disable);
    }

    /// Entity tag from the latest fetch, as the service sent it.
    pub fn etag(&self) -> Option<&str> {
        self.concurrency.etag()
    }

    /// `true` once a fetch has recorded an entity tag.
    pub fn is_tracked(&self) -> bool {
        self.concurrency.state() == VersionState::Tracked
    }

    /// Entity tag and write flags.
    pub fn concurrency(&self) -> &ConcurrencyControl {
        &self.concurrency
    }

    /// Body of the response this entity was decoded from.
    pub fn snapshot(&self) -> Option<&Bytes> {
        self.snapshot.as_ref()
    }

    fn bind(&mut self, client: &SharedClient, response: &Response) {
        self.concurrency.record(response.etag());
        self.client = Some(client.clone());
        self.snapshot = Some(response.body.clone());
    }

    fn bound_client(&self) -> Result<&SharedClient> {
        self.client.as_ref().ok_or(ModelError::NoClient)
    }

    /// PATCH `payload` to `uri`, guarded by the stored entity tag.
    pub async fn patch(&self, uri: &str, payload: &Value) -> Result<()> {
        let client = self.bound_client()?;
        let headers = self.concurrency.if_match_headers();
        tracing::debug!(uri, conditional = !headers.is_empty(), "PATCH");
        client.patch_with_headers(uri, payload, &headers).await?;
        Ok(())
    }

    /// POST `payload` to `uri`, guarded by the stored entity tag.
    pub async fn post(&self, uri: &str, payload: &Value) -> Result<()> {
        let client = self.bound_client()?;
        let headers = self.concurrency.if_match_headers();
        tracing::debug!(uri, conditional = !headers.is_empty(), "POST");
        client.post_with_headers(uri, payload, &headers).await?;
        Ok(())
    }

    /// Commit the difference between two snapshots of this entity.
    ///
    /// Fails with [`ModelError::ReadOnlyField`] before any request if a changed
    /// field is not in `allowed`. An empty diff sends nothing.
    pub async fn update(
        &self,
        original: &dyn Diffable,
        updated: &dyn Diffable,
        allowed: &[&str],
    ) -> Result<()> {
        let payload = diff(original, updated)?;
        tracing::trace!(uri = %self.odata_id, fields = ?payload.keys().collect::<Vec<_>>(), "computed diff");

        if let Some(field) = payload.keys().find(|k| !allowed.contains(&k.as_str())) {
            return Err(ModelError::ReadOnlyField(field.clone()));
        }

        if payload.is_empty() {
            return Ok(());
        }
        self.patch(&self.odata_id, &Value::Object(payload)).await
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("odata_id", &self.odata_id)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("concurrency", &self.concurrency)
            .field("client", &self.client.is_some())
            .finish()
    }
}

impl Diffable for Entity {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::scalar(properties::ODATA_ID, &self.odata_id),
            Field::scalar(properties::ID, &self.id),
            Field::scalar(properties::NAME, &self.name),
        ]
    }
}

/// A schema type built on [`Entity`].
///
/// Implementors supply the entity accessors and, for writable types, the
/// allow-list. Fetching, updating and listing come with the trait.
#[async_trait]
pub trait Resource: Diffable + DeserializeOwned + fmt::Debug + Send + Sync + 'static {
    /// Wire names of the properties a client may change.
    const ALLOWED_UPDATES: &'static [&'static str] = &[];

    /// The embedded entity envelope.
    fn entity(&self) -> &Entity;

    /// Mutable access to the embedded entity envelope.
    fn entity_mut(&mut self) -> &mut Entity;

    /// Fetch the resource at `uri`. See [`get`].
    async fn get(client: &SharedClient, uri: &str) -> Result<Self> {
        get(client, uri).await
    }

    /// Commit local changes. See [`update`].
    async fn update(&self) -> Result<()> {
        update(self).await
    }

    /// Fetch every member of the collection at `link`.
    /// See [`collection::list_referenced`].
    async fn list_referenced(
        client: &SharedClient,
        link: &str,
    ) -> std::result::Result<Vec<Self>, PartialCollection<Self>> {
        collection::list_referenced(client, link).await
    }
}

/// Fetch and decode the resource at `uri`.
///
/// The returned resource is bound to `client` and tracks the response's
/// entity tag.
pub async fn get<T: Resource>(client: &SharedClient, uri: &str) -> Result<T> {
    tracing::debug!(uri, "GET");
    let response = client.get(uri).await?;
    let mut resource: T = response.json()?;
    resource.entity_mut().bind(client, &response);
    Ok(resource)
}

/// Commit local changes to `resource`.
///
/// The baseline is the body captured when the resource was fetched. A resource
/// that was never fetched is compared against a fresh GET of its URI, and the
/// PATCH is then guarded by the entity tag from that GET.
pub async fn update<T: Resource>(resource: &T) -> Result<()> {
    let entity = resource.entity();
    match entity.snapshot() {
        Some(raw) => {
            let original: T = serde_json::from_slice(raw)?;
            entity.update(&original, resource, T::ALLOWED_UPDATES).await
        }
        None => {
            let original: T = get(entity.bound_client()?, &entity.odata_id).await?;
            let mut guarded = entity.clone();
            guarded.concurrency.record(original.entity().etag());
            guarded.update(&original, resource, T::ALLOWED_UPDATES).await
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for Id, got {}",
            other
        ))),
    }
}
