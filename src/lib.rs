//! # lightfleet
//!
//! Scene orchestration for a Philips Hue group and a fleet of WLED LED strips.
//!
//! A named scene describes what both backends should do: the Hue group either
//! activates one of its scenes (through Home Assistant) or powers off, and
//! every routine WLED strip receives the same effect, palette, color and
//! brightness. Both legs run concurrently, and every strip is driven
//! independently, so one unreachable device never holds up the rest.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::time::Duration;
//! use lightfleet::{
//!     DeviceRegistry, FanOut, HomeAssistant, HueGroup, Orchestrator, SceneCatalog, WledClient,
//! };
//!
//! async fn movie_night() -> Result<(), lightfleet::Error> {
//!     let timeout = Duration::from_secs(5);
//!     let hue = HomeAssistant::new("http://homeassistant.local:8123", "token", timeout)?;
//!     let orchestrator = Orchestrator::new(
//!         DeviceRegistry::home(),
//!         SceneCatalog::builtin(),
//!         hue,
//!         HueGroup::default(),
//!         FanOut::new(WledClient::new(timeout)?),
//!     );
//!
//!     let report = orchestrator.activate_scene("movie").await?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Scenes**: a fixed [`SceneCatalog`] of named scenes spanning both backends
//! - **Fan-out**: concurrent per-strip commands with per-device outcomes via [`FanOut`]
//! - **Safety exclusion**: strips kept out of routine commands, see [`routine_targets`]
//! - **Emergency light**: a dedicated path to the safety-override strip
//! - **Effects and palettes**: by name or numeric id, see [`resolve_effect`]
//! - **Segments**: address a single segment of a multi-segment strip
//!
//! ## Communication
//!
//! WLED strips are driven over their HTTP JSON API (`/json/state`,
//! `/json/info`, `/json/effects`, `/json/palettes`). The Hue group is driven
//! through the Home Assistant REST API.

mod catalog;
mod client;
mod config;
mod errors;
mod fleet;
mod hue;
mod intent;
mod orchestrator;
mod payload;
mod policy;
mod registry;
mod response;
pub mod runtime;
mod scenes;
mod status;
mod types;

// Re-export public API
pub use catalog::{
    CatalogEntry, CatalogListing, CatalogSource, Effect, Palette, effects, palettes,
    resolve_effect, resolve_palette,
};
pub use client::{WledApi, WledClient};
pub use config::{Config, DEFAULT_CONFIG_PATH, FleetConfig, HomeAssistantConfig};
pub use errors::Error;
pub use fleet::{DEMO_STEPS, DemoStep, FanOut, StripStatus};
pub use hue::{HomeAssistant, HueAdapter, HueGroup, HueLight};
pub use intent::WledIntent;
pub use orchestrator::{
    ActivationReport, EMERGENCY_ALERT_PRESET, EMERGENCY_RESTORE_PRESET, FleetStatus, HueOutcome,
    Orchestrator,
};
pub use payload::{SegmentPatch, StatePatch, UdpSync};
pub use policy::{emergency_target, routine_targets};
pub use registry::{Device, DeviceRegistry};
pub use response::{FanOutResult, Outcome};
pub use scenes::{HueLeg, SceneCatalog, SceneDefinition};
pub use status::{DeviceInfo, DeviceState, LedInfo, SegmentState, WifiInfo};
pub use types::{Brightness, ColorRGBW, PowerMode, Speed};
