/// All error types that can occur while orchestrating the light fleet.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to serialize data to JSON.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// Failed to deserialize JSON data.
    #[error("failed to load json: {0:?}")]
    JsonLoad(serde_json::Error),

    /// Attempted to send a [`crate::StatePatch`] with no attributes set.
    #[error("invalid patch; no attributes set")]
    NoAttribute,

    /// The requested scene is not in the scene catalog.
    #[error("unknown scene {name}; available scenes: {known}")]
    UnknownScene { name: String, known: String },

    /// The requested device is not in the registry.
    #[error("unknown device {id}; available devices: {known}")]
    UnknownDevice { id: String, known: String },

    /// Two devices were registered under the same id.
    #[error("device {0} is registered more than once")]
    DuplicateDevice(String),

    /// The token is neither a known effect name nor a numeric id.
    #[error("invalid effect reference: {0}")]
    InvalidEffectReference(String),

    /// The token is neither a known palette name nor a numeric id.
    #[error("invalid palette reference: {0}")]
    InvalidPaletteReference(String),

    /// Failed to parse a [`crate::ColorRGBW`] from a string.
    #[error("invalid color string: {0}")]
    InvalidColorString(String),

    /// A raw segment description could not be used.
    #[error("invalid segment: {0}")]
    InvalidSegment(String),

    /// The device could not be reached (connection failure or timeout).
    #[error("device {device} unreachable: {reason}")]
    DeviceUnreachable { device: String, reason: String },

    /// The device answered, but with an error or a malformed payload.
    #[error("device {device} returned an error: {reason}")]
    DeviceError { device: String, reason: String },

    /// The smart-home service has no scene with this identifier.
    #[error("hue scene not found: {0}")]
    SceneNotFound(String),

    /// A call to the smart-home service failed.
    #[error("hue call failed: {0}")]
    HueCallFailed(String),

    /// Required configuration is absent.
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),

    /// The configuration was found but could not be used.
    #[error("invalid configuration: {0}")]
    ConfigurationInvalid(String),
}

impl Error {
    /// Create a new unknown device error
    pub fn unknown_device(id: &str, known: &[&str]) -> Self {
        Error::UnknownDevice {
            id: id.to_string(),
            known: known.join(", "),
        }
    }

    /// Create a new unknown scene error
    pub fn unknown_scene(name: &str, known: &[&str]) -> Self {
        Error::UnknownScene {
            name: name.to_string(),
            known: known.join(", "),
        }
    }

    /// Create a new device unreachable error
    pub fn unreachable(device: &str, reason: impl ToString) -> Self {
        Error::DeviceUnreachable {
            device: device.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a new device error
    pub fn device(device: &str, reason: impl ToString) -> Self {
        Error::DeviceError {
            device: device.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
