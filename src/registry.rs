//! The static registry of addressable WLED strips.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// A WLED strip reachable over HTTP.
///
/// # Example
///
/// ```
/// use lightfleet::Device;
///
/// let strip = Device::new("ap2", "WLED-AP2", "192.168.1.144", 328).with_segments(4);
/// assert_eq!(strip.base_url(), "http://192.168.1.144");
/// assert_eq!(strip.segment_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    id: String,
    name: String,
    address: String,
    #[serde(rename = "leds")]
    led_count: u32,
    #[serde(rename = "segments", default = "default_segments")]
    segment_count: u16,
}

fn default_segments() -> u16 {
    1
}

impl Device {
    pub fn new(id: &str, name: &str, address: &str, led_count: u32) -> Self {
        Device {
            id: id.to_lowercase(),
            name: name.to_string(),
            address: address.to_string(),
            led_count,
            segment_count: default_segments(),
        }
    }

    pub fn with_segments(mut self, segment_count: u16) -> Self {
        self.segment_count = segment_count;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `host` or `host:port` of the JSON API.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn led_count(&self) -> u32 {
        self.led_count
    }

    pub fn segment_count(&self) -> u16 {
        self.segment_count
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }
}

/// The fixed set of devices, plus the subset kept out of routine fan-out.
///
/// The registry is built once and never mutated. The safety-override device
/// is always part of the exclusion set, so no routine command can reach it.
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
    excluded: BTreeSet<String>,
    safety_override: Option<String>,
}

impl DeviceRegistry {
    /// Build a registry.
    ///
    /// `excluded` lists ids kept out of scene, all-on and all-off commands.
    /// `safety_override` names the device reserved for emergency commands; it
    /// is excluded implicitly.
    pub fn new<'a>(
        devices: Vec<Device>,
        excluded: impl IntoIterator<Item = &'a str>,
        safety_override: Option<&str>,
    ) -> Result<Self> {
        let mut devices = devices;
        let mut seen = BTreeSet::new();
        for device in &mut devices {
            device.id = normalize(&device.id);
            if !seen.insert(device.id.clone()) {
                return Err(Error::DuplicateDevice(device.id.clone()));
            }
        }

        let mut registry = DeviceRegistry {
            devices,
            excluded: BTreeSet::new(),
            safety_override: None,
        };

        for id in excluded {
            let id = registry.resolve(id)?.id.clone();
            registry.excluded.insert(id);
        }
        if let Some(id) = safety_override {
            let id = registry.resolve(id)?.id.clone();
            registry.excluded.insert(id.clone());
            registry.safety_override = Some(id);
        }
        Ok(registry)
    }

    /// The household fleet: two living-room strips and the kitchen strip,
    /// which only answers to emergency commands.
    pub fn home() -> Self {
        DeviceRegistry {
            devices: vec![
                Device::new("ap1", "WLED-AP1", "192.168.1.143", 78),
                Device::new("ap2", "WLED-AP2", "192.168.1.144", 328).with_segments(4),
                Device::new("ap4", "WLED-AP4", "192.168.1.140", 254),
            ],
            excluded: BTreeSet::from([String::from("ap4")]),
            safety_override: Some(String::from("ap4")),
        }
    }

    /// All devices, in registration order.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn ids(&self) -> Vec<&str> {
        self.devices.iter().map(Device::id).collect()
    }

    /// Look up a device by id (case-insensitive, `wled-` prefix tolerated).
    ///
    /// # Example
    ///
    /// ```
    /// use lightfleet::DeviceRegistry;
    ///
    /// let registry = DeviceRegistry::home();
    /// assert_eq!(registry.resolve("WLED-AP1").unwrap().id(), "ap1");
    /// assert!(registry.resolve("ap3").is_err());
    /// ```
    pub fn resolve(&self, id: &str) -> Result<&Device> {
        let wanted = normalize(id);
        self.devices
            .iter()
            .find(|device| device.id == wanted)
            .ok_or_else(|| Error::unknown_device(id, &self.ids()))
    }

    pub fn is_excluded(&self, id: &str) -> bool {
        self.excluded.contains(&normalize(id))
    }

    /// Id of the device reserved for emergency commands, if any.
    pub fn safety_override(&self) -> Option<&str> {
        self.safety_override.as_deref()
    }

    /// Resolve a CLI device token.
    ///
    /// `None` and `all` select the routine targets; an explicit id selects
    /// exactly that device, excluded or not.
    pub fn select(&self, token: Option<&str>) -> Result<Vec<Device>> {
        match token {
            None => Ok(crate::policy::routine_targets(self)),
            Some(token) if token.eq_ignore_ascii_case("all") => {
                Ok(crate::policy::routine_targets(self))
            }
            Some(token) => self.resolve(token).map(|device| vec![device.clone()]),
        }
    }
}

fn normalize(id: &str) -> String {
    let id = id.trim().to_lowercase();
    match id.strip_prefix("wled-") {
        Some(rest) => rest.to_string(),
        None => id,
    }
}
