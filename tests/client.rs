// ABOUTME: HTTP-level tests for the control-plane client.
// ABOUTME: Verifies auth, decoding, and uniform error translation.

use std::time::Duration;

use serde_json::json;
use stratus::api::{
    ClientError, ClientErrorKind, ControlPlaneApi, DeployStatus, HttpClient, ServiceState,
};
use stratus::types::ServiceId;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(base_url: &str) -> HttpClient {
    HttpClient::new(base_url, "tok-test", Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn get_service_sends_bearer_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/srv-1"))
        .and(header("authorization", "Bearer tok-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "srv-1",
            "name": "volunteer-api",
            "type": "web_service",
            "state": "available",
            "url": "https://volunteer-api.example.com",
            "plan": "starter",
            "region": "frankfurt",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-02-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = client(&server.uri())
        .get_service(&ServiceId::new("srv-1"))
        .await
        .unwrap();

    assert_eq!(service.name, "volunteer-api");
    assert_eq!(service.state, ServiceState::Available);
    assert_eq!(service.url.as_deref(), Some("https://volunteer-api.example.com"));
}

#[tokio::test]
async fn missing_service_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/srv-gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such service"))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .get_service(&ServiceId::new("srv-gone"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ClientErrorKind::NotFound);
    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such service");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_deploys_passes_limit_and_tolerates_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/srv-1/deploys"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let deploys = client(&server.uri())
        .list_deploys(&ServiceId::new("srv-1"), 5)
        .await
        .unwrap();

    assert!(deploys.is_empty(), "empty history is a valid answer");
}

#[tokio::test]
async fn create_deploy_posts_and_returns_the_new_deploy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/srv-1/deploys"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "dep-77",
            "service_id": "srv-1",
            "status": "created",
            "created_at": "2026-03-01T12:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let deploy = client(&server.uri())
        .create_deploy(&ServiceId::new("srv-1"))
        .await
        .unwrap();

    assert_eq!(deploy.id.as_str(), "dep-77");
    assert_eq!(deploy.status, DeployStatus::Created);
}

#[tokio::test]
async fn connection_failure_is_a_transport_error() {
    // Nothing listens on port 1.
    let err = client("http://127.0.0.1:1")
        .get_service(&ServiceId::new("srv-1"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ClientErrorKind::Transport);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/srv-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .get_service(&ServiceId::new("srv-1"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ClientErrorKind::Decode);
}
