#![allow(clippy::unwrap_used)]
// Tests for the empty-on-failure fetchers.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meraki_api::{Config, fetch_access_points, fetch_essids};

const API_KEY: &str = "f00dfeedf00dfeedf00dfeedf00dfeedf00dfeed";

// ── Helpers ─────────────────────────────────────────────────────────

fn api_key() -> SecretString {
    SecretString::from(API_KEY.to_string())
}

fn config_for(server: &MockServer) -> Config {
    Config::new(format!("{}/api/v0", server.uri()), api_key(), "N_77")
}

// ── ESSIDs ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_essids_decodes_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/networks/N_77/ssids"))
        .and(header("X-Cisco-Meraki-API-Key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "number": 0, "name": "Staff", "enabled": true, "authMode": "psk" },
            { "number": 1, "name": "Visitors", "enabled": true, "authMode": "open" }
        ])))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let ssids = fetch_essids(&config, &api_key(), "N_77").await;

    assert_eq!(ssids.len(), 2);
    assert_eq!(
        (ssids[0].number, ssids[0].name.as_str(), ssids[0].enabled, ssids[0].auth_mode.as_str()),
        (0, "Staff", true, "psk")
    );
    assert_eq!(
        (ssids[1].number, ssids[1].name.as_str(), ssids[1].enabled, ssids[1].auth_mode.as_str()),
        (1, "Visitors", true, "open")
    );
}

#[tokio::test]
async fn test_fetch_essids_non_200_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "errors": ["Forbidden"] })),
        )
        .mount(&server)
        .await;

    let config = config_for(&server);
    assert!(fetch_essids(&config, &api_key(), "N_77").await.is_empty());
}

#[tokio::test]
async fn test_fetch_essids_malformed_json_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    assert!(fetch_essids(&config, &api_key(), "N_77").await.is_empty());
}

#[tokio::test]
async fn test_fetch_essids_transport_failure_is_empty() {
    // Nothing listens on port 1.
    let config = Config::new("http://127.0.0.1:1/api/v0", api_key(), "N_77");
    assert!(fetch_essids(&config, &api_key(), "N_77").await.is_empty());
}

#[tokio::test]
async fn test_fetch_essids_bad_base_url_is_empty() {
    let config = Config::new("::not a url::", api_key(), "N_77");
    assert!(fetch_essids(&config, &api_key(), "N_77").await.is_empty());
}

#[tokio::test]
async fn test_fetch_essids_empty_network_id_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server);
    assert!(fetch_essids(&config, &api_key(), "").await.is_empty());
}

// ── Access points ───────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_access_points_keeps_mr_models() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/networks/N_77/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "serial": "Q2AA-0001", "model": "MR33", "networkId": "N_77" },
            { "serial": "Q2AA-0002", "model": "MS120", "networkId": "N_77" },
            { "serial": "Q2AA-0003", "model": "MX64", "networkId": "N_77" },
            { "serial": "Q2AA-0004", "model": "M", "networkId": "N_77" },
            { "serial": "Q2AA-0005", "model": "", "networkId": "N_77" }
        ])))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let aps = fetch_access_points(&config, &api_key(), "N_77").await;

    assert_eq!(aps.len(), 1);
    assert_eq!(aps[0].model, "MR33");
    assert_eq!(aps[0].serial, "Q2AA-0001");
}

#[tokio::test]
async fn test_fetch_access_points_server_error_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = config_for(&server);
    assert!(fetch_access_points(&config, &api_key(), "N_77").await.is_empty());
}
