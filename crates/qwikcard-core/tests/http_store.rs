use std::time::Duration;

use httpmock::prelude::*;
use qwikcard_core::{
    FieldType, HttpProfileStore, ProfileDraft, ProfileStore, ServiceConfig, StoreError,
    SubmissionFlow, SubmissionState,
};
use serde_json::json;

fn store_for(server: &MockServer) -> HttpProfileStore {
    let config = ServiceConfig {
        api_base_url: server.base_url(),
        timeout_secs: 5,
        ..ServiceConfig::default()
    };
    HttpProfileStore::new(&config).expect("http store")
}

#[tokio::test]
async fn create_posts_only_non_empty_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/create-profile")
                .header("content-type", "application/json")
                .json_body(json!({
                    "name": "Ada",
                    "fields": [{"type": "email", "value": "ada@example.com"}]
                }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"profile_id": "Xy12Ab"}));
        })
        .await;

    let mut draft = ProfileDraft::new("Ada");
    draft.set_field(FieldType::Email, "ada@example.com");

    let mut flow = SubmissionFlow::new(store_for(&server), "http://localhost:5173");
    let id = flow.submit(&draft).await.expect("created");
    mock.assert_async().await;
    assert_eq!(id, "Xy12Ab");
    assert_eq!(
        flow.profile_url().as_deref(),
        Some("http://localhost:5173/profile/Xy12Ab")
    );
}

#[tokio::test]
async fn non_success_status_fails_the_submission() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/create-profile");
            then.status(422).json_body(json!({"detail": "bad"}));
        })
        .await;

    let mut flow = SubmissionFlow::new(store_for(&server), "http://localhost:5173");
    flow.submit(&ProfileDraft::new("Ada"))
        .await
        .expect_err("422 is a failure");
    mock.assert_async().await;
    assert_eq!(flow.state().as_str(), "failed");
    assert!(matches!(flow.state(), SubmissionState::Failed { .. }));
}

#[tokio::test]
async fn empty_name_never_reaches_the_server() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/create-profile");
            then.status(200).json_body(json!({"profile_id": "never"}));
        })
        .await;

    let mut flow = SubmissionFlow::new(store_for(&server), "http://localhost:5173");
    flow.submit(&ProfileDraft::new(""))
        .await
        .expect_err("name required");
    assert_eq!(mock.hits_async().await, 0);
    assert_eq!(flow.state(), &SubmissionState::Idle);
}

#[tokio::test]
async fn fetch_reads_name_and_fields() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/profile/Xy12Ab");
            then.status(200).json_body(json!({
                "id": "Xy12Ab",
                "name": "Ada",
                "fields": [
                    {"type": "phone", "value": "+1 555-0100"},
                    {"type": "github", "value": "ada"}
                ]
            }));
        })
        .await;

    let profile = store_for(&server)
        .fetch_profile("Xy12Ab")
        .await
        .expect("profile");
    assert_eq!(profile.id, "Xy12Ab");
    assert_eq!(profile.name, "Ada");
    assert_eq!(profile.fields.len(), 2);
    assert_eq!(profile.fields[1].kind, "github");
}

#[tokio::test]
async fn fetch_missing_profile_reports_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/profile/missing");
            then.status(404).json_body(json!({"detail": "Profile not found"}));
        })
        .await;

    let err = store_for(&server)
        .fetch_profile("missing")
        .await
        .expect_err("404");
    assert!(matches!(err, StoreError::Status { status: 404 }));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(500))
        .build()
        .expect("client");
    let store = HttpProfileStore::with_client(client, "http://127.0.0.1:9/");
    let err = store.fetch_profile("any").await.expect_err("unreachable");
    assert!(matches!(err, StoreError::Transport(_)));
}
