//! The WLED half of a scene.

use crate::payload::{SegmentPatch, StatePatch};
use crate::types::{Brightness, ColorRGBW, PowerMode, Speed};

/// What a scene asks of every WLED strip.
///
/// Omitted fields fall back to defaults (palette 0, brightness 200, speed and
/// intensity 128), so every intent yields a complete device patch. An
/// explicit zero is kept as zero.
///
/// # Example
///
/// ```
/// use lightfleet::{WledIntent, ColorRGBW, Brightness, Speed};
///
/// let mut intent = WledIntent::new(0);
/// intent.colors(&[ColorRGBW::new(50, 30, 80, 0)]);
/// intent.brightness(&Brightness::create(40));
/// intent.speed(&Speed::create(0));
///
/// let patch = intent.to_patch(None);
/// assert_eq!(
///     serde_json::to_value(&patch).unwrap(),
///     serde_json::json!({
///         "on": true,
///         "bri": 40,
///         "seg": [{"fx": 0, "pal": 0, "sx": 0, "ix": 128, "col": [[50, 30, 80, 0]]}]
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WledIntent {
    pub(crate) effect: u16,
    pub(crate) palette: u16,
    pub(crate) colors: Option<Vec<ColorRGBW>>,
    pub(crate) brightness: Brightness,
    pub(crate) speed: Speed,
    pub(crate) intensity: Option<Speed>,
}

impl WledIntent {
    /// Create an intent running `effect` with every other field defaulted.
    pub fn new(effect: u16) -> Self {
        WledIntent {
            effect,
            ..Self::default()
        }
    }

    pub fn palette(&mut self, palette: u16) {
        self.palette = palette;
    }

    pub fn colors(&mut self, colors: &[ColorRGBW]) {
        self.colors = Some(colors.to_vec());
    }

    pub fn brightness(&mut self, brightness: &Brightness) {
        self.brightness = *brightness;
    }

    pub fn speed(&mut self, speed: &Speed) {
        self.speed = *speed;
    }

    pub fn intensity(&mut self, intensity: &Speed) {
        self.intensity = Some(*intensity);
    }

    pub fn effect_id(&self) -> u16 {
        self.effect
    }

    pub fn palette_id(&self) -> u16 {
        self.palette
    }

    pub fn color_list(&self) -> Option<&[ColorRGBW]> {
        self.colors.as_deref()
    }

    pub fn brightness_level(&self) -> u8 {
        self.brightness.value()
    }

    pub fn speed_level(&self) -> u8 {
        self.speed.value()
    }

    /// Build the complete device patch, optionally aimed at one segment.
    pub fn to_patch(&self, segment: Option<u16>) -> StatePatch {
        let mut seg = SegmentPatch::new();
        seg.effect(self.effect);
        seg.palette(self.palette);
        seg.speed(&self.speed);
        seg.intensity(&self.intensity.unwrap_or_default());
        if let Some(colors) = &self.colors {
            seg.colors(colors);
        }

        let mut patch = StatePatch::from(&PowerMode::On);
        patch.brightness(&self.brightness);
        patch.segment(segment, seg);
        patch
    }
}
