//! RGBW color representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// An RGBW color (RGB + white channel, 0-255 each).
///
/// On the wire this is the `[r, g, b, w]` quadruple WLED expects inside a
/// segment's `col` array.
///
/// # Example
///
/// ```
/// use std::str::FromStr;
/// use lightfleet::ColorRGBW;
///
/// let color = ColorRGBW::from_str("#FF6B35").unwrap();
/// assert_eq!(color, ColorRGBW::new(255, 107, 53, 0));
/// assert_eq!(color.to_hex(), "FF6B3500");
/// ```
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct ColorRGBW {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub white: u8,
}

impl ColorRGBW {
    pub fn new(red: u8, green: u8, blue: u8, white: u8) -> Self {
        Self {
            red,
            green,
            blue,
            white,
        }
    }

    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 0)
    }

    /// Encode as an eight digit `RRGGBBWW` hex string.
    pub fn to_hex(&self) -> String {
        format!(
            "{:02X}{:02X}{:02X}{:02X}",
            self.red, self.green, self.blue, self.white
        )
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return None;
        }
        let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
        let white = if hex.len() == 8 { channel(6)? } else { 0 };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, white))
    }

    fn from_quad(s: &str) -> Option<Self> {
        let parts = s
            .split(',')
            .map(|c| c.trim().parse::<u8>().ok())
            .collect::<Option<Vec<u8>>>()?;
        match parts.as_slice() {
            [r, g, b] => Some(Self::rgb(*r, *g, *b)),
            [r, g, b, w] => Some(Self::new(*r, *g, *b, *w)),
            _ => None,
        }
    }
}

impl FromStr for ColorRGBW {
    type Err = Error;

    /// Parse `RRGGBB`, `RRGGBBWW` (optionally `#`-prefixed) or `r,g,b[,w]`.
    fn from_str(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        let parsed = if s.contains(',') {
            Self::from_quad(s)
        } else {
            Self::from_hex(s.strip_prefix('#').unwrap_or(s))
        };
        parsed.ok_or_else(|| Error::InvalidColorString(s.to_string()))
    }
}

impl fmt::Display for ColorRGBW {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl From<[u8; 4]> for ColorRGBW {
    fn from([red, green, blue, white]: [u8; 4]) -> Self {
        Self::new(red, green, blue, white)
    }
}

impl From<ColorRGBW> for [u8; 4] {
    fn from(color: ColorRGBW) -> Self {
        [color.red, color.green, color.blue, color.white]
    }
}
