//! Effect speed and intensity.

use serde::{Deserialize, Serialize};

/// Relative effect parameter from 0 to 255, used for both `sx` (speed) and
/// `ix` (intensity).
///
/// A value of 128 is mid-scale and the default; lower values slow the
/// animation (or soften it, for intensity), higher values speed it up.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct Speed {
    pub(crate) value: u8,
}

impl Default for Speed {
    fn default() -> Self {
        Self::new()
    }
}

impl Speed {
    const DEFAULT: u8 = 128;

    /// Create a new Speed with the mid-scale value.
    ///
    /// # Examples
    ///
    /// ```
    /// use lightfleet::Speed;
    ///
    /// assert_eq!(Speed::new().value(), 128);
    /// assert_eq!(Speed::create(0).value(), 0);
    /// ```
    pub fn new() -> Self {
        Speed {
            value: Self::DEFAULT,
        }
    }

    pub fn create(value: u8) -> Self {
        Speed { value }
    }

    pub fn value(&self) -> u8 {
        self.value
    }
}
