// Integration tests for `WledClient` and `FanOut` against a mocked WLED HTTP API.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lightfleet::{
    CatalogEntry, CatalogSource, Device, Error, FanOut, Outcome, PowerMode, StatePatch, WledApi,
    WledClient, WledIntent,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn strip(id: &str, server: &MockServer) -> Device {
    Device::new(id, &format!("WLED-{}", id.to_uppercase()), &server.address().to_string(), 60)
}

fn client() -> WledClient {
    WledClient::new(Duration::from_secs(2)).unwrap()
}

/// A device address nothing is listening on.
fn dead_strip(id: &str) -> Device {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();
    drop(listener);
    Device::new(id, &format!("WLED-{}", id.to_uppercase()), &address, 60)
}

// ── State ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_state_posts_sparse_patch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/json/state"))
        .and(body_json(json!({"on": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    client()
        .set_state(&strip("ap1", &server), &StatePatch::from(&PowerMode::Off))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_set_state_rejects_empty_patch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client()
        .set_state(&strip("ap1", &server), &StatePatch::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoAttribute));
}

#[tokio::test]
async fn test_set_state_http_error_is_device_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/json/state"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client()
        .set_state(&strip("ap1", &server), &StatePatch::from(&PowerMode::On))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DeviceError { ref device, .. } if device == "ap1"), "{err}");
}

#[tokio::test]
async fn test_set_state_success_false_is_device_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/json/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let err = client()
        .set_state(&strip("ap1", &server), &StatePatch::from(&PowerMode::On))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DeviceError { .. }));
}

#[tokio::test]
async fn test_malformed_state_is_device_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/state"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client().get_state(&strip("ap1", &server)).await.unwrap_err();
    assert!(err.to_string().contains("malformed response"), "{err}");
}

#[tokio::test]
async fn test_connection_refused_is_unreachable() {
    let device = dead_strip("ap2");
    let err = client()
        .set_state(&device, &StatePatch::from(&PowerMode::On))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DeviceUnreachable { ref device, .. } if device == "ap2"));
}

#[tokio::test]
async fn test_slow_device_times_out_as_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "WLED-AP1"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = WledClient::new(Duration::from_millis(100)).unwrap();
    let err = client.get_info(&strip("ap1", &server)).await.unwrap_err();
    assert!(matches!(err, Error::DeviceUnreachable { .. }));
    assert!(err.to_string().contains("timed out"), "{err}");
}

// ── Info and catalogs ───────────────────────────────────────────────

#[tokio::test]
async fn test_get_info_and_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ver": "0.14.4",
            "name": "WLED-AP2",
            "leds": {"count": 328, "fps": 40},
            "wifi": {"signal": 84, "rssi": -58}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/json/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "on": true,
            "bri": 180,
            "ps": -1,
            "seg": [
                {"id": 0, "fx": 113, "pal": 48},
                {"id": 1, "fx": 0},
                {"id": 2, "fx": 0},
                {"id": 3, "fx": 0}
            ]
        })))
        .mount(&server)
        .await;

    let device = strip("ap2", &server);
    let client = client();
    let info = client.get_info(&device).await.unwrap();
    assert_eq!(info.ver, "0.14.4");
    assert_eq!(info.leds.count, 328);
    assert_eq!(info.signal(), Some(84));

    let state = client.get_state(&device).await.unwrap();
    assert_eq!(state.bri, 180);
    assert_eq!(state.effect(), Some(113));
    assert_eq!(state.segment_count(), 4);
}

#[tokio::test]
async fn test_effect_catalog_from_device() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/effects"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!(["Solid", "Blink", "-", "Wipe"])),
        )
        .mount(&server)
        .await;

    let fleet = FanOut::new(client());
    let listing = fleet.effect_catalog(&strip("ap1", &server)).await;
    assert_eq!(listing.source, CatalogSource::Device);
    assert_eq!(
        listing.entries,
        vec![
            CatalogEntry::new(0, "Solid"),
            CatalogEntry::new(1, "Blink"),
            CatalogEntry::new(3, "Wipe"),
        ]
    );
}

#[tokio::test]
async fn test_palette_catalog_falls_back_when_offline() {
    let fleet = FanOut::new(client());
    let listing = fleet.palette_catalog(&dead_strip("ap1")).await;
    assert_eq!(listing.source, CatalogSource::Builtin);
    assert!(listing.entries.contains(&CatalogEntry::new(48, "sunset")));
}

// ── Fan-out ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fan_out_isolates_offline_strip() {
    let online = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/json/state"))
        .and(body_json(json!({
            "on": true,
            "bri": 200,
            "seg": [{"fx": 66, "pal": 35, "sx": 128, "ix": 128}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(2)
        .mount(&online)
        .await;

    let targets = vec![
        strip("ap1", &online),
        dead_strip("ap2"),
        strip("ap3", &online),
    ];

    let mut intent = WledIntent::new(66);
    intent.palette(35);

    let results = FanOut::new(client()).apply(&intent, &targets, None).await;
    let summary: Vec<_> = results
        .iter()
        .map(|r| (r.device_id.as_str(), r.outcome))
        .collect();
    assert_eq!(
        summary,
        [
            ("ap1", Outcome::Online),
            ("ap2", Outcome::Offline),
            ("ap3", Outcome::Online),
        ]
    );
}
