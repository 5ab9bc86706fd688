// Integration tests for the Home Assistant Hue adapter using wiremock.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lightfleet::{Error, HomeAssistant, HueAdapter, PowerMode};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, HomeAssistant) {
    let server = MockServer::start().await;
    let ha = HomeAssistant::from_reqwest(
        reqwest::Client::new(),
        &format!("{}/", server.uri()),
        "secret-token",
        Duration::from_secs(2),
    );
    (server, ha)
}

// ── Scenes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_activate_scene_posts_entity_with_bearer_token() {
    let (server, ha) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/services/scene/turn_on"))
        .and(header("authorization", "Bearer secret-token"))
        .and(body_json(json!({"entity_id": "scene.living_room_relax"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    ha.activate_scene("scene.living_room_relax").await.unwrap();
}

#[tokio::test]
async fn test_unknown_scene_is_scene_not_found() {
    let (server, ha) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/services/scene/turn_on"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let err = ha.activate_scene("scene.living_room_disco").await.unwrap_err();
    assert!(matches!(err, Error::SceneNotFound(ref id) if id == "scene.living_room_disco"));
}

#[tokio::test]
async fn test_server_error_is_hue_call_failed() {
    let (server, ha) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/services/scene/turn_on"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = ha.activate_scene("scene.living_room_relax").await.unwrap_err();
    assert!(matches!(err, Error::HueCallFailed(_)), "{err}");
}

#[tokio::test]
async fn test_unauthorized_is_hue_call_failed() {
    let (server, ha) = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = ha.set_power("light.living_room", PowerMode::On).await.unwrap_err();
    assert!(err.to_string().contains("401"), "{err}");
}

// ── Power ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_power_off_uses_light_domain() {
    let (server, ha) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/services/light/turn_off"))
        .and(body_json(json!({"entity_id": "light.living_room"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    ha.set_power("light.living_room", PowerMode::Off).await.unwrap();
}

// ── States ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_light_states_are_filtered() {
    let (server, ha) = setup().await;
    let ha = ha.with_status_filter(&["living".to_string(), "tv_".to_string()]);
    Mock::given(method("GET"))
        .and(path("/api/states"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "entity_id": "light.living_room_1",
                "state": "on",
                "attributes": {"friendly_name": "Living 1"}
            },
            {"entity_id": "light.tv_backlight", "state": "off", "attributes": {}},
            {"entity_id": "light.bedroom", "state": "on", "attributes": {}},
            {"entity_id": "switch.living_room_fan", "state": "on", "attributes": {}},
            {"entity_id": "scene.living_room_relax", "state": "scening"}
        ])))
        .mount(&server)
        .await;

    let lights = ha.light_states().await.unwrap();
    let ids: Vec<_> = lights.iter().map(|l| l.entity_id.as_str()).collect();
    assert_eq!(ids, ["light.living_room_1", "light.tv_backlight"]);
    assert_eq!(lights[0].friendly_name.as_deref(), Some("Living 1"));
    assert_eq!(lights[1].state, "off");
}
