//! Schema types built on the generic entity.
//!
//! Each type flattens an [`Entity`](crate::entity::Entity), lists its wire
//! fields for the diff engine and names the properties clients may change.

mod line_of_service;

pub use line_of_service::{
    get_data_storage_line_of_service, list_referenced_data_storage_line_of_services,
    DataStorageLineOfService, ProvisioningPolicy, RecoveryAccessScope, StorageAccessCapability,
};
