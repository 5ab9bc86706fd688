//! Application configuration, read from a JSON file.

use std::path::Path;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::client::WledClient;
use crate::errors::Error;
use crate::hue::{HomeAssistant, HueGroup};
use crate::registry::{Device, DeviceRegistry};

type Result<T> = std::result::Result<T, Error>;

/// Where the binary looks for its configuration when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = ".config/lightfleet.json";

/// Top-level configuration.
///
/// Every section is optional. Without `fleet` the built-in household
/// registry is used; without `home_assistant` only WLED commands work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub home_assistant: Option<HomeAssistantConfig>,
    #[serde(default)]
    pub fleet: Option<FleetConfig>,
    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Connection to the Home Assistant instance that drives the Hue bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeAssistantConfig {
    pub url: String,
    pub token: String,
    #[serde(default = "default_light_group")]
    pub light_group: String,
    #[serde(default = "default_scene_prefix")]
    pub scene_prefix: String,
    /// Substrings selecting which lights `status` reports.
    #[serde(default = "default_status_filter")]
    pub status_filter: Vec<String>,
}

fn default_light_group() -> String {
    "light.living_room".into()
}

fn default_scene_prefix() -> String {
    "scene.living_room_".into()
}

fn default_status_filter() -> Vec<String> {
    ["living", "dining", "pantry", "tv_"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// A custom WLED fleet replacing the built-in one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    pub devices: Vec<Device>,
    #[serde(default)]
    pub excluded: Vec<String>,
    #[serde(default)]
    pub emergency_device: Option<String>,
}

impl Config {
    /// Read the configuration at `path`.
    ///
    /// A missing file is not an error and yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no configuration at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigurationInvalid(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(raw).map_err(Error::JsonLoad)?;
        if config.timeout_secs == Some(0) {
            return Err(Error::ConfigurationInvalid(
                "timeout_secs must be at least 1".into(),
            ));
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(WledClient::DEFAULT_TIMEOUT)
    }

    /// The device registry, validated.
    pub fn registry(&self) -> Result<DeviceRegistry> {
        match &self.fleet {
            None => Ok(DeviceRegistry::home()),
            Some(fleet) => DeviceRegistry::new(
                fleet.devices.clone(),
                fleet.excluded.iter().map(String::as_str),
                fleet.emergency_device.as_deref(),
            ),
        }
    }

    pub fn hue_group(&self) -> HueGroup {
        match &self.home_assistant {
            Some(ha) => HueGroup::new(&ha.light_group, &ha.scene_prefix),
            None => HueGroup::default(),
        }
    }

    /// Client for the Home Assistant section.
    ///
    /// Fails with [`Error::ConfigurationMissing`] when the section is absent.
    pub fn home_assistant(&self) -> Result<HomeAssistant> {
        let ha = self.home_assistant.as_ref().ok_or_else(|| {
            Error::ConfigurationMissing(String::from(
                "home_assistant section with url and token is required for Hue commands",
            ))
        })?;
        if ha.url.trim().is_empty() || ha.token.trim().is_empty() {
            return Err(Error::ConfigurationMissing(String::from(
                "home_assistant url and token must not be empty",
            )));
        }
        let adapter = HomeAssistant::new(&ha.url, &ha.token, self.timeout())?;
        Ok(adapter.with_status_filter(&ha.status_filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_every_section() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.registry().unwrap().ids(), vec!["ap1", "ap2", "ap4"]);
        assert_eq!(config.hue_group(), HueGroup::default());
    }

    #[test]
    fn test_require_home_assistant_for_hue() {
        let err = Config::default().home_assistant().unwrap_err();
        assert!(matches!(err, Error::ConfigurationMissing(_)));

        let config =
            Config::from_json(r#"{"home_assistant": {"url": "", "token": "t"}}"#).unwrap();
        assert!(matches!(
            config.home_assistant(),
            Err(Error::ConfigurationMissing(_))
        ));
    }

    #[test]
    fn test_parse_full_configuration() {
        let config = Config::from_json(
            r#"{
                "home_assistant": {
                    "url": "http://homeassistant.local:8123",
                    "token": "secret",
                    "light_group": "light.den",
                    "scene_prefix": "scene.den_"
                },
                "fleet": {
                    "devices": [
                        {"id": "desk", "name": "WLED-DESK", "address": "10.0.0.5", "leds": 60},
                        {
                            "id": "shelf",
                            "name": "WLED-SHELF",
                            "address": "10.0.0.6:8080",
                            "leds": 120,
                            "segments": 2
                        }
                    ],
                    "excluded": ["shelf"],
                    "emergency_device": "desk"
                },
                "timeout_secs": 2
            }"#,
        )
        .unwrap();

        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.hue_group().scene_id("Relax"), "scene.den_relax");
        assert_eq!(
            config.home_assistant.as_ref().unwrap().status_filter,
            default_status_filter()
        );

        let registry = config.registry().unwrap();
        assert_eq!(registry.safety_override(), Some("desk"));
        assert!(registry.is_excluded("shelf"));
        assert_eq!(registry.resolve("shelf").unwrap().segment_count(), 2);
        assert!(config.home_assistant().is_ok());
    }

    #[test]
    fn test_reject_unknown_excluded_device() {
        let config = Config::from_json(
            r#"{"fleet": {
                "devices": [{"id": "a", "name": "A", "address": "10.0.0.1", "leds": 1}],
                "excluded": ["b"]
            }}"#,
        )
        .unwrap();
        assert!(matches!(config.registry(), Err(Error::UnknownDevice { .. })));
    }

    #[test]
    fn test_fail_on_malformed_json() {
        assert!(matches!(Config::from_json("{"), Err(Error::JsonLoad(_))));
    }

    #[test]
    fn test_reject_zero_timeout() {
        let err = Config::from_json(r#"{"timeout_secs": 0}"#).unwrap_err();
        assert!(matches!(err, Error::ConfigurationInvalid(_)), "{err}");
        assert!(Config::from_json(r#"{"timeout_secs": 1}"#).is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("lightfleet-does-not-exist.json");
        let config = Config::load(&path).unwrap();
        assert!(config.home_assistant.is_none());
    }
}
