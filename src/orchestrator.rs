//! Scene activation across the Hue group and the WLED fleet.

use std::fmt;

use log::{info, warn};

use crate::client::WledApi;
use crate::errors::Error;
use crate::fleet::{FanOut, StripStatus};
use crate::hue::{HueAdapter, HueGroup, HueLight};
use crate::payload::StatePatch;
use crate::policy::{emergency_target, routine_targets};
use crate::registry::DeviceRegistry;
use crate::response::FanOutResult;
use crate::scenes::{HueLeg, SceneCatalog};
use crate::types::PowerMode;

type Result<T> = std::result::Result<T, Error>;

/// Preset the override device runs while an emergency is active.
pub const EMERGENCY_ALERT_PRESET: u16 = 10;
/// Preset restoring the override device's normal light.
pub const EMERGENCY_RESTORE_PRESET: u16 = 9;

/// Hue scene used by [`Orchestrator::all_on`].
const ALL_ON_SCENE: &str = "Relax";

/// What happened on the Hue side of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HueOutcome {
    SceneActivated(String),
    PoweredOff,
    SceneNotFound(String),
    Failed(String),
}

impl HueOutcome {
    fn from_call(result: Result<()>, success: HueOutcome) -> Self {
        match result {
            Ok(()) => success,
            Err(Error::SceneNotFound(id)) => HueOutcome::SceneNotFound(id),
            Err(e) => {
                warn!("hue: {e}");
                HueOutcome::Failed(e.to_string())
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, HueOutcome::SceneActivated(_) | HueOutcome::PoweredOff)
    }
}

impl fmt::Display for HueOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HueOutcome::SceneActivated(id) => write!(f, "  ok       Hue {id}"),
            HueOutcome::PoweredOff => write!(f, "  ok       Hue off"),
            HueOutcome::SceneNotFound(id) => write!(f, "  missing  Hue scene {id}"),
            HueOutcome::Failed(reason) => write!(f, "  error    Hue: {reason}"),
        }
    }
}

/// Combined result of a command touching both backends.
///
/// Both legs are always reported; one failing never hides the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationReport {
    pub scene: Option<String>,
    pub hue: HueOutcome,
    pub wled: Vec<FanOutResult>,
}

impl ActivationReport {
    /// Number of strips that accepted the command.
    pub fn strips_online(&self) -> usize {
        self.wled.iter().filter(|r| r.is_online()).count()
    }
}

impl fmt::Display for ActivationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scene) = &self.scene {
            writeln!(f, "scene {scene}")?;
        }
        write!(f, "{}", self.hue)?;
        for result in &self.wled {
            write!(f, "\n{result}")?;
        }
        Ok(())
    }
}

/// Hue lights and WLED strips as seen right now.
#[derive(Debug)]
pub struct FleetStatus {
    pub hue: Result<Vec<HueLight>>,
    pub strips: Vec<StripStatus>,
}

/// Entry point for every command that touches the whole household.
pub struct Orchestrator<H, C> {
    registry: DeviceRegistry,
    scenes: SceneCatalog,
    hue: H,
    group: HueGroup,
    fleet: FanOut<C>,
}

impl<H, C: WledApi> Orchestrator<H, C> {
    pub fn new(
        registry: DeviceRegistry,
        scenes: SceneCatalog,
        hue: H,
        group: HueGroup,
        fleet: FanOut<C>,
    ) -> Self {
        Orchestrator {
            registry,
            scenes,
            hue,
            group,
            fleet,
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn scenes(&self) -> &SceneCatalog {
        &self.scenes
    }

    pub fn fleet(&self) -> &FanOut<C> {
        &self.fleet
    }

    /// Raise or clear the emergency light on the safety-override device.
    ///
    /// This is the only command that reaches the override device.
    pub async fn emergency(&self, on: bool) -> Result<FanOutResult> {
        let id = self.registry.safety_override().ok_or_else(|| {
            Error::ConfigurationMissing(String::from("no emergency device configured"))
        })?;
        let device = emergency_target(&self.registry, id)?.clone();

        let mut patch = StatePatch::new();
        patch.preset(if on {
            EMERGENCY_ALERT_PRESET
        } else {
            EMERGENCY_RESTORE_PRESET
        });
        info!("emergency {} on {}", if on { "on" } else { "off" }, device.id());

        let mut results = self.fleet.send(&patch, std::slice::from_ref(&device)).await;
        results
            .pop()
            .ok_or_else(|| Error::device(device.id(), "no result"))
    }
}

impl<H: HueAdapter, C: WledApi> Orchestrator<H, C> {
    /// Activate a named scene on both backends.
    ///
    /// Fails only when `name` is not in the catalog, and then before any
    /// device is contacted. Per-backend failures are part of the report.
    pub async fn activate_scene(&self, name: &str) -> Result<ActivationReport> {
        let scene = self.scenes.lookup(name)?;
        info!("activating scene {}", scene.name());

        let targets = routine_targets(&self.registry);
        let hue_leg = async {
            match scene.hue() {
                HueLeg::Scene(hue_ref) => {
                    let id = self.group.scene_id(hue_ref);
                    let result = self.hue.activate_scene(&id).await;
                    HueOutcome::from_call(result, HueOutcome::SceneActivated(id))
                }
                HueLeg::PowerOff => {
                    let result = self.hue.set_power(self.group.group(), PowerMode::Off).await;
                    HueOutcome::from_call(result, HueOutcome::PoweredOff)
                }
            }
        };
        let wled_leg = self.fleet.apply(scene.wled(), &targets, None);
        let (hue, wled) = futures::join!(hue_leg, wled_leg);

        Ok(ActivationReport {
            scene: Some(scene.name().to_string()),
            hue,
            wled,
        })
    }

    /// Switch the Hue group and every routine strip off.
    pub async fn all_off(&self) -> ActivationReport {
        let targets = routine_targets(&self.registry);
        let (hue, wled) = futures::join!(
            self.hue.set_power(self.group.group(), PowerMode::Off),
            self.fleet.power_all(&targets, false)
        );
        ActivationReport {
            scene: None,
            hue: HueOutcome::from_call(hue, HueOutcome::PoweredOff),
            wled,
        }
    }

    /// Bring the Hue group up on its relax scene and switch every routine
    /// strip on.
    pub async fn all_on(&self) -> ActivationReport {
        let targets = routine_targets(&self.registry);
        let id = self.group.scene_id(ALL_ON_SCENE);
        let (hue, wled) = futures::join!(
            self.hue.activate_scene(&id),
            self.fleet.power_all(&targets, true)
        );
        ActivationReport {
            scene: None,
            hue: HueOutcome::from_call(hue, HueOutcome::SceneActivated(id)),
            wled,
        }
    }

    /// Current Hue light states and the status of every routine strip.
    pub async fn status(&self) -> FleetStatus {
        let targets = routine_targets(&self.registry);
        let (hue, strips) = futures::join!(self.hue.light_states(), self.fleet.status(&targets));
        FleetStatus { hue, strips }
    }
}
