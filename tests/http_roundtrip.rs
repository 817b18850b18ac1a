//! End-to-end flows over HTTP against a mockito server.

use redfish_entity::client::{ClientConfig, HttpClient};
use redfish_entity::filter::{with_top, Filter};
use redfish_entity::resources::{
    get_data_storage_line_of_service, list_referenced_data_storage_line_of_services,
    ProvisioningPolicy,
};
use redfish_entity::{list_referenced_filtered, ModelError, Resource, SharedClient};
use serde_json::json;
use std::sync::Arc;

const COLLECTION: &str = "/redfish/v1/StorageServices/1/LinesOfService/DataStorageLineOfService";

fn member(name: &str) -> String {
    format!("{}/{}", COLLECTION, name)
}

fn body(name: &str) -> String {
    json!({
        "@odata.id": member(name),
        "@odata.type": "#DataStorageLineOfService.v1_1_0.DataStorageLineOfService",
        "Id": name,
        "Name": name,
        "ProvisioningPolicy": "Thin",
        "IsSpaceEfficient": true
    })
    .to_string()
}

fn client(url: String) -> SharedClient {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    Arc::new(
        HttpClient::with_config(ClientConfig {
            endpoint: url,
            enable_logging: true,
            ..Default::default()
        })
        .unwrap(),
    )
}

#[tokio::test]
async fn get_then_update_sends_if_match() {
    let mut server = mockito::Server::new_async().await;
    let get = server
        .mock("GET", member("Gold").as_str())
        .with_status(200)
        .with_header("ETag", "\"abc123\"")
        .with_body(body("Gold"))
        .create_async()
        .await;
    let patch = server
        .mock("PATCH", member("Gold").as_str())
        .match_header("if-match", "\"abc123\"")
        .match_body(mockito::Matcher::Json(json!({"ProvisioningPolicy": "Fixed"})))
        .with_status(204)
        .create_async()
        .await;

    let client = client(server.url());
    let mut gold = get_data_storage_line_of_service(&client, &member("Gold"))
        .await
        .unwrap();
    gold.provisioning_policy = Some(ProvisioningPolicy::Fixed);
    gold.update().await.unwrap();

    get.assert_async().await;
    patch.assert_async().await;
}

#[tokio::test]
async fn stale_etag_is_reported_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let _get = server
        .mock("GET", member("Gold").as_str())
        .with_status(200)
        .with_header("ETag", "\"old\"")
        .with_body(body("Gold"))
        .create_async()
        .await;
    let patch = server
        .mock("PATCH", member("Gold").as_str())
        .with_status(412)
        .expect(1)
        .create_async()
        .await;

    let client = client(server.url());
    let mut gold = get_data_storage_line_of_service(&client, &member("Gold"))
        .await
        .unwrap();
    gold.is_space_efficient = false;

    let err = gold.update().await.unwrap_err();
    assert!(err.is_conflict());
    patch.assert_async().await;
}

#[tokio::test]
async fn read_only_change_never_reaches_server() {
    let mut server = mockito::Server::new_async().await;
    let _get = server
        .mock("GET", member("Gold").as_str())
        .with_status(200)
        .with_body(body("Gold"))
        .create_async()
        .await;
    let patch = server
        .mock("PATCH", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client(server.url());
    let mut gold = get_data_storage_line_of_service(&client, &member("Gold"))
        .await
        .unwrap();
    gold.entity.name = "Platinum".into();

    let err = gold.update().await.unwrap_err();
    assert!(matches!(err, ModelError::ReadOnlyField(ref f) if f == "Name"));
    patch.assert_async().await;
}

#[tokio::test]
async fn collection_keeps_partial_results() {
    let mut server = mockito::Server::new_async().await;
    let _collection = server
        .mock("GET", COLLECTION)
        .with_status(200)
        .with_body(
            json!({"Members": [
                {"@odata.id": member("Gold")},
                {"@odata.id": member("Silver")},
                {"@odata.id": member("Bronze")}
            ]})
            .to_string(),
        )
        .create_async()
        .await;
    let _gold = server
        .mock("GET", member("Gold").as_str())
        .with_status(200)
        .with_body(body("Gold"))
        .create_async()
        .await;
    let _silver = server
        .mock("GET", member("Silver").as_str())
        .with_status(200)
        .with_body(body("Silver"))
        .create_async()
        .await;
    let _bronze = server
        .mock("GET", member("Bronze").as_str())
        .with_status(500)
        .create_async()
        .await;

    let client = client(server.url());
    let partial = list_referenced_data_storage_line_of_services(&client, COLLECTION)
        .await
        .unwrap_err();

    assert_eq!(partial.items.len(), 2);
    assert_eq!(partial.error.len(), 1);
    assert_eq!(
        partial.error.get(&member("Bronze")).and_then(|e| e.status()),
        Some(500)
    );
}

#[tokio::test]
async fn filtered_collection_request() {
    let mut server = mockito::Server::new_async().await;
    let collection = server
        .mock("GET", COLLECTION)
        .match_query(mockito::Matcher::UrlEncoded("$top".into(), "1".into()))
        .with_status(200)
        .with_body(json!({"Members": [{"@odata.id": member("Gold")}]}).to_string())
        .create_async()
        .await;
    let _gold = server
        .mock("GET", member("Gold").as_str())
        .with_status(200)
        .with_body(body("Gold"))
        .create_async()
        .await;

    let client = client(server.url());
    let mut filter = Filter::new();
    filter.set([with_top(1)]);

    let items = list_referenced_filtered::<redfish_entity::resources::DataStorageLineOfService>(
        &client, COLLECTION, &filter,
    )
    .await
    .unwrap();

    assert_eq!(items.len(), 1);
    collection.assert_async().await;
}
