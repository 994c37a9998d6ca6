#![allow(clippy::unwrap_used)]
// Integration tests for `OccupancyClient` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use checkr_api::{Error, OccupancyClient, OccupancyReport, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, OccupancyClient) {
    let server = MockServer::start().await;
    let endpoint = Url::parse(&format!("{}/prod/", server.uri())).unwrap();
    let client = OccupancyClient::with_client(reqwest::Client::new(), endpoint);
    (server, client)
}

async fn respond(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/prod/"))
        .respond_with(template)
        .mount(server)
        .await;
}

// ── Decoding ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_full_report() {
    let (server, client) = setup().await;
    respond(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "green",
            "room_number": 101,
            "building_number": 2,
            "max_capacity": 50,
            "curr_capacity": 10
        })),
    )
    .await;

    let report = client.fetch().await.unwrap();

    assert_eq!(
        report,
        OccupancyReport {
            status: Some("green".into()),
            room_number: Some(json!(101)),
            building_number: Some(json!(2)),
            max_capacity: Some(50),
            curr_capacity: Some(10),
        }
    );
}

#[tokio::test]
async fn test_fetch_string_identifiers_and_unknown_status() {
    let (server, client) = setup().await;
    respond(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "purple",
            "room_number": "GOL-1400",
            "building_number": "70",
            "max_capacity": 30,
            "curr_capacity": 45
        })),
    )
    .await;

    let report = client.fetch().await.unwrap();

    assert_eq!(report.status.as_deref(), Some("purple"));
    assert_eq!(report.room_number, Some(json!("GOL-1400")));
    assert_eq!(report.building_number, Some(json!("70")));
    assert_eq!(report.curr_capacity, Some(45));
}

#[tokio::test]
async fn test_fetch_missing_and_null_fields_decode_as_none() {
    let (server, client) = setup().await;
    respond(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "status": null,
            "room_number": 7
        })),
    )
    .await;

    let report = client.fetch().await.unwrap();

    assert_eq!(
        report,
        OccupancyReport {
            room_number: Some(json!(7)),
            ..OccupancyReport::default()
        }
    );
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_non_success_status() {
    let (server, client) = setup().await;
    respond(
        &server,
        ResponseTemplate::new(502).set_body_json(json!({"message": "Internal server error"})),
    )
    .await;

    let result = client.fetch().await;

    assert!(
        matches!(result, Err(Error::Status { status: 502, .. })),
        "expected Status error, got: {result:?}"
    );
    assert_eq!(result.unwrap_err().status_code(), Some(502));
}

#[tokio::test]
async fn test_transport_error_reports_status_code() {
    let (server, _client) = setup().await;
    respond(&server, ResponseTemplate::new(418)).await;

    let err = reqwest::get(format!("{}/prod/", server.uri()))
        .await
        .unwrap()
        .error_for_status()
        .unwrap_err();
    let err = Error::from(err);

    assert!(err.is_transport());
    assert_eq!(err.status_code(), Some(418));
}

#[tokio::test]
async fn test_fetch_malformed_json() {
    let (server, client) = setup().await;
    respond(&server, ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

    let result = client.fetch().await;

    match result {
        Err(Error::Deserialization { body, .. }) => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_negative_capacity_is_rejected() {
    let (server, client) = setup().await;
    respond(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "red",
            "max_capacity": -1,
            "curr_capacity": 3
        })),
    )
    .await;

    let result = client.fetch().await;

    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Bind then drop a listener so the port is closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = Url::parse(&format!("http://{addr}/prod/")).unwrap();
    let client = OccupancyClient::with_client(reqwest::Client::new(), endpoint);
    let result = client.fetch().await;

    assert!(result.unwrap_err().is_transport());
}

#[tokio::test]
async fn test_configured_timeout_applies() {
    let (server, _) = setup().await;
    respond(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({"status": "green"}))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let endpoint = Url::parse(&format!("{}/prod/", server.uri())).unwrap();
    let transport = TransportConfig {
        timeout: Some(Duration::from_millis(100)),
    };
    let client = OccupancyClient::new(endpoint, &transport).unwrap();

    match client.fetch().await {
        Err(Error::Transport(e)) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got: {other:?}"),
    }
}

#[test]
fn test_from_url_rejects_garbage() {
    let result = OccupancyClient::from_url("not a url");
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}
