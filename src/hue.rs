//! The Hue leg, reached through a Home Assistant instance.

use std::future::Future;
use std::time::Duration;

use log::debug;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::errors::Error;
use crate::runtime;
use crate::types::PowerMode;

type Result<T> = std::result::Result<T, Error>;

/// What the orchestrator needs from the smart-home service driving the Hue
/// bridge.
pub trait HueAdapter: Send + Sync {
    /// Activate a scene by its service-level identifier.
    ///
    /// Fails with [`Error::SceneNotFound`] when the service has no such scene
    /// and [`Error::HueCallFailed`] for any other failure.
    fn activate_scene(&self, scene: &str) -> impl Future<Output = Result<()>> + Send;

    /// Switch a light group on or off.
    fn set_power(&self, group: &str, power: PowerMode) -> impl Future<Output = Result<()>> + Send;

    /// Current state of the Hue-controlled lights.
    fn light_states(&self) -> impl Future<Output = Result<Vec<HueLight>>> + Send;
}

/// The Hue group scenes are scoped to.
///
/// Scene references such as `Relax` become group-scoped identifiers such as
/// `scene.living_room_relax`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HueGroup {
    group: String,
    scene_prefix: String,
}

impl Default for HueGroup {
    fn default() -> Self {
        HueGroup::new("light.living_room", "scene.living_room_")
    }
}

impl HueGroup {
    pub fn new(group: &str, scene_prefix: &str) -> Self {
        HueGroup {
            group: group.to_string(),
            scene_prefix: scene_prefix.to_string(),
        }
    }

    /// The light group entity, e.g. `light.living_room`.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Synthesize the group-scoped identifier of a scene reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use lightfleet::HueGroup;
    ///
    /// assert_eq!(HueGroup::default().scene_id("Relax"), "scene.living_room_relax");
    /// ```
    pub fn scene_id(&self, hue_ref: &str) -> String {
        format!("{}{}", self.scene_prefix, hue_ref.to_lowercase())
    }
}

/// A light entity as reported by the smart-home service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HueLight {
    pub entity_id: String,
    pub state: String,
    pub friendly_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EntityState {
    entity_id: String,
    state: String,
    #[serde(default)]
    attributes: Value,
}

/// [`HueAdapter`] over the Home Assistant REST API.
#[derive(Debug, Clone)]
pub struct HomeAssistant {
    http: reqwest::Client,
    base_url: String,
    token: String,
    status_filter: Vec<String>,
    timeout: Duration,
}

impl HomeAssistant {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(|e| Error::ConfigurationInvalid(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::from_reqwest(http, base_url, token, timeout))
    }

    pub fn from_reqwest(
        http: reqwest::Client,
        base_url: &str,
        token: &str,
        timeout: Duration,
    ) -> Self {
        HomeAssistant {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            status_filter: Vec::new(),
            timeout,
        }
    }

    /// Only report lights whose entity id contains one of `patterns`.
    ///
    /// An empty filter reports every light.
    pub fn with_status_filter(mut self, patterns: &[String]) -> Self {
        self.status_filter = patterns.to_vec();
        self
    }

    async fn call_service(&self, domain: &str, service: &str, entity_id: &str) -> Result<()> {
        let url = format!("{}/api/services/{domain}/{service}", self.base_url);
        debug!("POST {url} entity_id={entity_id}");

        let request = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "entity_id": entity_id }));

        let response = runtime::timeout(self.timeout, request.send())
            .await
            .map_err(|e| Error::HueCallFailed(e.to_string()))?
            .map_err(|e| Error::HueCallFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if domain == "scene"
            && (status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND)
        {
            return Err(Error::SceneNotFound(entity_id.to_string()));
        }
        Err(Error::HueCallFailed(format!("{service} {entity_id}: HTTP {status}")))
    }

    fn wanted(&self, entity_id: &str) -> bool {
        entity_id.starts_with("light.")
            && (self.status_filter.is_empty()
                || self.status_filter.iter().any(|p| entity_id.contains(p.as_str())))
    }
}

impl HueAdapter for HomeAssistant {
    async fn activate_scene(&self, scene: &str) -> Result<()> {
        self.call_service("scene", "turn_on", scene).await
    }

    async fn set_power(&self, group: &str, power: PowerMode) -> Result<()> {
        let domain = group.split('.').next().unwrap_or("light");
        let service = if power.is_on() { "turn_on" } else { "turn_off" };
        self.call_service(domain, service, group).await
    }

    async fn light_states(&self) -> Result<Vec<HueLight>> {
        let url = format!("{}/api/states", self.base_url);
        debug!("GET {url}");

        let call = async {
            let response = self
                .http
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?
                .error_for_status()?;
            response.json::<Vec<EntityState>>().await
        };
        let states = runtime::timeout(self.timeout, call)
            .await
            .map_err(|e| Error::HueCallFailed(e.to_string()))?
            .map_err(|e| Error::HueCallFailed(e.to_string()))?;

        Ok(states
            .into_iter()
            .filter(|s| self.wanted(&s.entity_id))
            .map(|s| HueLight {
                friendly_name: s
                    .attributes
                    .get("friendly_name")
                    .and_then(Value::as_str)
                    .map(String::from),
                entity_id: s.entity_id,
                state: s.state,
            })
            .collect())
    }
}
