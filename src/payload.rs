//! Sparse state patches for the WLED `/json/state` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::Error;
use crate::types::{Brightness, ColorRGBW, PowerMode, Speed};

/// A sparse patch sent to a strip's `/json/state` endpoint.
///
/// Only the attributes that were set are serialized; the device merges the
/// patch into its current state itself, so no read-modify-write is needed.
///
/// # Creating Patches
///
/// 1. **From a single attribute** using the [`From`] trait:
///    ```
///    use lightfleet::{StatePatch, PowerMode};
///    let patch = StatePatch::from(&PowerMode::Off);
///    assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"on":false}"#);
///    ```
///
/// 2. **Builder pattern** for combining multiple attributes:
///    ```
///    use lightfleet::{StatePatch, SegmentPatch, Brightness, ColorRGBW};
///    let mut seg = SegmentPatch::new();
///    seg.color(ColorRGBW::new(255, 107, 53, 0));
///
///    let mut patch = StatePatch::new();
///    patch.brightness(&Brightness::create(80));
///    patch.segment(Some(1), seg);
///    assert_eq!(
///        serde_json::to_string(&patch).unwrap(),
///        r#"{"bri":80,"seg":[{"id":1,"col":[[255,107,53,0]]}]}"#
///    );
///    ```
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StatePatch {
    pub(crate) on: Option<bool>,
    pub(crate) bri: Option<u8>,
    pub(crate) ps: Option<u16>,
    pub(crate) udpn: Option<UdpSync>,
    pub(crate) seg: Option<Vec<SegmentPatch>>,
}

impl StatePatch {
    /// Create a new empty patch.
    ///
    /// # Examples
    ///
    /// ```
    /// use lightfleet::StatePatch;
    ///
    /// assert!(!StatePatch::new().is_valid());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this patch changes at least one attribute.
    pub fn is_valid(&self) -> bool {
        self.on.is_some()
            || self.bri.is_some()
            || self.ps.is_some()
            || self.udpn.is_some()
            || self.seg.as_ref().is_some_and(|seg| !seg.is_empty())
    }

    pub fn power(&mut self, power: &PowerMode) {
        self.on = Some(power.is_on());
    }

    pub fn brightness(&mut self, brightness: &Brightness) {
        self.bri = Some(brightness.value);
    }

    /// Load a preset stored on the device.
    pub fn preset(&mut self, preset: u16) {
        self.ps = Some(preset);
    }

    /// Configure UDP notifier sync with other WLED devices.
    pub fn sync(&mut self, send: bool, recv: bool) {
        self.udpn = Some(UdpSync {
            send: Some(send),
            recv: Some(recv),
        });
    }

    /// Target a single logical segment.
    ///
    /// The patch becomes a one-element `seg` list tagged with `id`. Without an
    /// id the device applies it to segment 0 and its configured group.
    pub fn segment(&mut self, id: Option<u16>, mut segment: SegmentPatch) {
        if id.is_some() {
            segment.id = id;
        }
        self.seg = Some(vec![segment]);
    }

    pub fn on(&self) -> Option<bool> {
        self.on
    }

    pub fn bri(&self) -> Option<u8> {
        self.bri
    }

    pub fn ps(&self) -> Option<u16> {
        self.ps
    }

    pub fn segments(&self) -> &[SegmentPatch] {
        self.seg.as_deref().unwrap_or_default()
    }
}

impl From<&PowerMode> for StatePatch {
    fn from(power: &PowerMode) -> Self {
        let mut p = StatePatch::new();
        p.power(power);
        p
    }
}

impl From<&Brightness> for StatePatch {
    fn from(brightness: &Brightness) -> Self {
        let mut p = StatePatch::new();
        p.brightness(brightness);
        p
    }
}

/// UDP notifier settings (`udpn`).
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UdpSync {
    pub send: Option<bool>,
    pub recv: Option<bool>,
}

/// One entry of the `seg` array.
///
/// Keys this crate does not model (`start`, `stop`, `grp`, ...) are kept in
/// `extra` and sent as-is.
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmentPatch {
    pub(crate) id: Option<u16>,
    pub(crate) fx: Option<u16>,
    pub(crate) pal: Option<u16>,
    pub(crate) sx: Option<u8>,
    pub(crate) ix: Option<u8>,
    pub(crate) col: Option<Vec<ColorRGBW>>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

impl SegmentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a raw segment object, e.g. `{"fx":66,"pal":35}`.
    ///
    /// Apart from `id`, keys are not interpreted: the object is sent to the
    /// device exactly as given, whatever value types it uses.
    ///
    /// # Examples
    ///
    /// ```
    /// use lightfleet::SegmentPatch;
    /// use serde_json::json;
    ///
    /// let seg = SegmentPatch::from_json(r#"{"fx":"~","col":["FF0000"],"grp":2}"#).unwrap();
    /// assert_eq!(seg.get("fx"), Some(&json!("~")));
    /// assert!(SegmentPatch::from_json("[1,2]").is_err());
    /// ```
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| Error::InvalidSegment(e.to_string()))?;
        let Value::Object(mut extra) = value else {
            return Err(Error::InvalidSegment(format!("expected an object, got {raw}")));
        };
        let id = match extra.remove("id") {
            None => None,
            Some(id) => Some(
                id.as_u64()
                    .and_then(|id| u16::try_from(id).ok())
                    .ok_or_else(|| Error::InvalidSegment(format!("invalid segment id {id}")))?,
            ),
        };
        Ok(SegmentPatch {
            id,
            extra,
            ..Self::default()
        })
    }

    /// A key passed through untyped, as given to [`SegmentPatch::from_json`].
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn effect(&mut self, effect: u16) {
        self.fx = Some(effect);
    }

    pub fn palette(&mut self, palette: u16) {
        self.pal = Some(palette);
    }

    pub fn speed(&mut self, speed: &Speed) {
        self.sx = Some(speed.value);
    }

    pub fn intensity(&mut self, intensity: &Speed) {
        self.ix = Some(intensity.value);
    }

    /// Set the primary color only.
    pub fn color(&mut self, color: ColorRGBW) {
        self.col = Some(vec![color]);
    }

    /// Set primary, secondary and tertiary colors in order.
    pub fn colors(&mut self, colors: &[ColorRGBW]) {
        self.col = Some(colors.to_vec());
    }

    pub fn id(&self) -> Option<u16> {
        self.id
    }

    pub fn fx(&self) -> Option<u16> {
        self.fx
    }

    pub fn pal(&self) -> Option<u16> {
        self.pal
    }

    pub fn sx(&self) -> Option<u8> {
        self.sx
    }

    pub fn ix(&self) -> Option<u8> {
        self.ix
    }

    pub fn col(&self) -> Option<&[ColorRGBW]> {
        self.col.as_deref()
    }
}
