//! Effect and palette catalogs of the WLED effect engine.
//!
//! Commands accept either a known name or a raw numeric id. Numeric ids are
//! passed through untouched: the device, not this crate, decides which ids
//! exist, and silently ignores the ones it does not know.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Commonly used WLED effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Effect {
    Solid = 0,
    Blink = 1,
    Breathe = 2,
    Wipe = 3,
    Rainbow = 9,
    Scan = 10,
    Chase = 28,
    Colorful = 37,
    Fire = 66,
    Sparkle = 71,
    Twinkle = 74,
    Fireworks = 90,
    Meteor = 94,
    Glitter = 98,
    Pacifica = 101,
    Flow = 109,
    Aurora = 113,
}

impl Effect {
    pub fn create(value: u16) -> Option<Self> {
        Effect::iter().find(|effect| effect.id() == value)
    }

    pub fn id(&self) -> u16 {
        *self as u16
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Commonly used WLED color palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Palette {
    Default = 0,
    Random = 1,
    Rainbow = 5,
    Party = 6,
    Ocean = 7,
    Forest = 8,
    Heat = 35,
    Lava = 36,
    Sunset = 48,
}

impl Palette {
    pub fn create(value: u16) -> Option<Self> {
        Palette::iter().find(|palette| palette.id() == value)
    }

    pub fn id(&self) -> u16 {
        *self as u16
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Resolve an effect name or numeric id.
///
/// # Examples
///
/// ```
/// use lightfleet::resolve_effect;
///
/// assert_eq!(resolve_effect("fire").unwrap(), 66);
/// assert_eq!(resolve_effect("FIRE").unwrap(), 66);
/// assert_eq!(resolve_effect("66").unwrap(), 66);
/// assert!(resolve_effect("not-a-thing").is_err());
/// ```
pub fn resolve_effect(token: &str) -> Result<u16> {
    let token = token.trim();
    Effect::from_str(token)
        .map(|effect| effect.id())
        .or_else(|_| token.parse::<u16>())
        .map_err(|_| Error::InvalidEffectReference(token.to_string()))
}

/// Resolve a palette name or numeric id.
///
/// # Examples
///
/// ```
/// use lightfleet::resolve_palette;
///
/// assert_eq!(resolve_palette("Lava").unwrap(), 36);
/// assert_eq!(resolve_palette("200").unwrap(), 200);
/// assert!(resolve_palette("plaid").is_err());
/// ```
pub fn resolve_palette(token: &str) -> Result<u16> {
    let token = token.trim();
    Palette::from_str(token)
        .map(|palette| palette.id())
        .or_else(|_| token.parse::<u16>())
        .map_err(|_| Error::InvalidPaletteReference(token.to_string()))
}

/// One `(id, name)` row of an effect or palette listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u16,
    pub name: String,
}

impl CatalogEntry {
    pub fn new(id: u16, name: &str) -> Self {
        CatalogEntry {
            id,
            name: name.to_string(),
        }
    }

    /// Build entries from a list reported by a device, where the index is
    /// the id and `"-"` or empty names mark unused slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use lightfleet::CatalogEntry;
    ///
    /// let names = vec!["Solid".to_string(), "-".to_string(), "".to_string(), "Wipe".to_string()];
    /// let entries = CatalogEntry::from_device_list(&names);
    /// assert_eq!(entries, vec![CatalogEntry::new(0, "Solid"), CatalogEntry::new(3, "Wipe")]);
    /// ```
    pub fn from_device_list(names: &[String]) -> Vec<Self> {
        names
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty() && name.as_str() != "-")
            .filter_map(|(idx, name)| Some(CatalogEntry::new(u16::try_from(idx).ok()?, name)))
            .collect()
    }
}

/// Built-in effects, in ascending id order.
pub fn effects() -> impl Iterator<Item = CatalogEntry> {
    Effect::iter().map(|effect| CatalogEntry::new(effect.id(), effect.name()))
}

/// Built-in palettes, in ascending id order.
pub fn palettes() -> impl Iterator<Item = CatalogEntry> {
    Palette::iter().map(|palette| CatalogEntry::new(palette.id(), palette.name()))
}

/// Where a displayed catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// Reported live by a device.
    Device,
    /// The built-in table, used when no device answered.
    Builtin,
}

/// A catalog ready for display.
#[derive(Debug, Clone)]
pub struct CatalogListing {
    pub source: CatalogSource,
    pub entries: Vec<CatalogEntry>,
}
