//! Swordfish `DataStorageLineOfService`.
//!
//! Describes a service option covering storage provisioning and availability.

use crate::client::SharedClient;
use crate::collection;
use crate::entity::{self, Diffable, Entity, Field, Resource};
use crate::error::{PartialCollection, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Storage access a consumer of the line of service requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageAccessCapability {
    /// Data can be read.
    Read,
    /// Data can be written.
    Write,
    /// Data can be written once.
    WriteOnce,
    /// Data can be appended but not overwritten.
    Append,
    /// Data can be read as a stream.
    Streaming,
    /// Data can be executed.
    Execute,
}

/// How storage is provisioned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvisioningPolicy {
    /// Storage is allocated in full up front.
    Fixed,
    /// Storage is allocated on demand.
    Thin,
}

/// Time after a disaster before conformant access to the primary store returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryAccessScope {
    /// Access is available immediately.
    Immediate,
    /// Access is available from an online replica.
    Online,
    /// Access needs a nearline replica to be brought online.
    Nearline,
    /// Access needs an offline replica to be restored.
    Offline,
}

/// A data storage line of service.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DataStorageLineOfService {
    /// Identity and concurrency state.
    #[serde(flatten)]
    pub entity: Entity,
    /// OData context URL.
    #[serde(rename = "@odata.context", default)]
    pub odata_context: String,
    /// OData schema type.
    #[serde(rename = "@odata.type", default)]
    pub odata_type: String,
    /// Each entry is a required storage access capability.
    #[serde(rename = "AccessCapabilities", default)]
    pub access_capabilities: Vec<StorageAccessCapability>,
    /// Free-form description. Read only.
    #[serde(rename = "Description", default)]
    pub description: String,
    /// Storage is compressed or deduplicated. Defaults to false.
    #[serde(rename = "IsSpaceEfficient", default)]
    pub is_space_efficient: bool,
    /// Vendor extensions.
    #[serde(rename = "Oem", default)]
    pub oem: Value,
    /// Whether storage is allocated up front or on demand.
    #[serde(rename = "ProvisioningPolicy", default)]
    pub provisioning_policy: Option<ProvisioningPolicy>,
    /// Minimum number of spare capacity sources that must remain available
    /// when an equivalent source fails.
    #[serde(rename = "RecoverableCapacitySourceCount", default)]
    pub recoverable_capacity_source_count: i64,
    /// How quickly access returns after a disaster.
    #[serde(rename = "RecoveryTimeObjectives", default)]
    pub recovery_time_objectives: Option<RecoveryAccessScope>,
}

impl Diffable for DataStorageLineOfService {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::embedded("Entity", &self.entity),
            Field::scalar("@odata.context", &self.odata_context),
            Field::scalar("@odata.type", &self.odata_type),
            Field::collection("AccessCapabilities", &self.access_capabilities),
            Field::scalar("Description", &self.description),
            Field::scalar("IsSpaceEfficient", &self.is_space_efficient),
            Field::collection("Oem", &self.oem),
            Field::scalar("ProvisioningPolicy", &self.provisioning_policy),
            Field::scalar(
                "RecoverableCapacitySourceCount",
                &self.recoverable_capacity_source_count,
            ),
            Field::scalar("RecoveryTimeObjectives", &self.recovery_time_objectives),
        ]
    }
}

impl Resource for DataStorageLineOfService {
    const ALLOWED_UPDATES: &'static [&'static str] = &[
        "AccessCapabilities",
        "IsSpaceEfficient",
        "ProvisioningPolicy",
        "RecoverableCapacitySourceCount",
        "RecoveryTimeObjectives",
    ];

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

/// Get a `DataStorageLineOfService` from the service.
pub async fn get_data_storage_line_of_service(
    client: &SharedClient,
    uri: &str,
) -> Result<DataStorageLineOfService> {
    entity::get(client, uri).await
}

/// Get every `DataStorageLineOfService` in the collection at `link`.
pub async fn list_referenced_data_storage_line_of_services(
    client: &SharedClient,
    link: &str,
) -> std::result::Result<Vec<DataStorageLineOfService>, PartialCollection<DataStorageLineOfService>>
{
    collection::list_referenced(client, link).await
}
