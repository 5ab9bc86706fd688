//! Brightness control for WLED strips.

use serde::{Deserialize, Serialize};

/// Master brightness from 0 to 255.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct Brightness {
    pub(crate) value: u8,
}

impl Default for Brightness {
    fn default() -> Self {
        Self::new()
    }
}

impl Brightness {
    const DEFAULT: u8 = 200;

    /// Create a brightness at the scene default (200).
    ///
    /// # Examples
    ///
    /// ```
    /// use lightfleet::Brightness;
    ///
    /// assert_eq!(Brightness::new().value(), 200);
    /// ```
    pub fn new() -> Self {
        Brightness {
            value: Self::DEFAULT,
        }
    }

    pub fn create(value: u8) -> Self {
        Brightness { value }
    }

    /// Clamp an arbitrary user level into 0-255.
    ///
    /// # Examples
    ///
    /// ```
    /// use lightfleet::Brightness;
    ///
    /// assert_eq!(Brightness::clamped(-4).value(), 0);
    /// assert_eq!(Brightness::clamped(128).value(), 128);
    /// assert_eq!(Brightness::clamped(900).value(), 255);
    /// ```
    pub fn clamped(level: i64) -> Self {
        let value = u8::try_from(level.clamp(0, i64::from(u8::MAX))).unwrap_or(u8::MAX);
        Brightness { value }
    }

    pub fn value(&self) -> u8 {
        self.value
    }
}
