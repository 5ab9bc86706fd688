//! State and info documents reported by WLED strips.

use serde::{Deserialize, Serialize};

/// Current state as reported by `GET /json/state`.
///
/// Only the fields this crate displays are modelled; everything else the
/// device reports is ignored.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DeviceState {
    #[serde(default)]
    pub on: bool,
    #[serde(default)]
    pub bri: u8,
    /// Active preset, `-1` when none.
    #[serde(default)]
    pub ps: Option<i32>,
    #[serde(default)]
    pub seg: Vec<SegmentState>,
}

impl DeviceState {
    /// Effect id of the first segment.
    pub fn effect(&self) -> Option<u16> {
        self.seg.first().and_then(|seg| seg.fx)
    }

    /// Number of segments, at least one.
    pub fn segment_count(&self) -> usize {
        self.seg.len().max(1)
    }
}

/// One segment in a [`DeviceState`].
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SegmentState {
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub fx: Option<u16>,
    #[serde(default)]
    pub pal: Option<u16>,
    #[serde(default)]
    pub sx: Option<u8>,
    #[serde(default)]
    pub ix: Option<u8>,
}

/// Device description as reported by `GET /json/info`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DeviceInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ver: String,
    #[serde(default)]
    pub leds: LedInfo,
    #[serde(default)]
    pub wifi: Option<WifiInfo>,
}

impl DeviceInfo {
    /// Wi-Fi signal quality in percent, if reported.
    pub fn signal(&self) -> Option<u8> {
        self.wifi.as_ref().and_then(|wifi| wifi.signal)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct LedInfo {
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct WifiInfo {
    #[serde(default)]
    pub signal: Option<u8>,
}
