//! Per-device outcomes of a fan-out.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::registry::Device;

/// How a single device fared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The device accepted the command.
    Online,
    /// The device could not be reached.
    Offline,
    /// The device answered with an error or a malformed payload.
    Error,
}

/// The result of sending one command to one device.
///
/// A fan-out returns one of these per target, in target order, so callers
/// can always line result `i` up with target `i`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanOutResult {
    pub device_id: String,
    pub outcome: Outcome,
    pub detail: Option<String>,
}

impl FanOutResult {
    pub fn online(device_id: &str) -> Self {
        FanOutResult {
            device_id: device_id.to_string(),
            outcome: Outcome::Online,
            detail: None,
        }
    }

    /// Fold a device call's result into an outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use lightfleet::{Device, Error, FanOutResult, Outcome};
    ///
    /// let strip = Device::new("ap1", "WLED-AP1", "192.168.1.143", 78);
    /// let err = Error::unreachable("ap1", "timed out");
    /// let res = FanOutResult::from_result(&strip, Err::<(), _>(err));
    /// assert_eq!(res.outcome, Outcome::Offline);
    /// assert_eq!(res.detail.as_deref(), Some("timed out"));
    /// ```
    pub fn from_result<T>(device: &Device, result: Result<T, Error>) -> Self {
        let (outcome, detail) = match result {
            Ok(_) => (Outcome::Online, None),
            Err(Error::DeviceUnreachable { reason, .. }) => (Outcome::Offline, Some(reason)),
            Err(Error::DeviceError { reason, .. }) => (Outcome::Error, Some(reason)),
            Err(other) => (Outcome::Error, Some(other.to_string())),
        };
        FanOutResult {
            device_id: device.id().to_string(),
            outcome,
            detail,
        }
    }

    pub fn is_online(&self) -> bool {
        self.outcome == Outcome::Online
    }
}

impl fmt::Display for FanOutResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.device_id.to_uppercase();
        match (self.outcome, &self.detail) {
            (Outcome::Online, _) => write!(f, "  ok       WLED-{label}"),
            (Outcome::Offline, Some(detail)) => write!(f, "  offline  WLED-{label} ({detail})"),
            (Outcome::Offline, None) => write!(f, "  offline  WLED-{label}"),
            (Outcome::Error, Some(detail)) => write!(f, "  error    WLED-{label}: {detail}"),
            (Outcome::Error, None) => write!(f, "  error    WLED-{label}"),
        }
    }
}
