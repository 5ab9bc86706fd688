//! The scene catalog: what each named scene means for both backends.
//!
//! The catalog is plain data. Looking a scene up never touches the network.

use std::fmt;

use crate::errors::Error;
use crate::intent::WledIntent;
use crate::types::{Brightness, ColorRGBW, Speed};

type Result<T> = std::result::Result<T, Error>;

/// What a scene does to the Hue group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HueLeg {
    /// Activate the group-scoped Hue scene with this reference.
    Scene(String),
    /// Switch the Hue group off instead of activating a scene.
    PowerOff,
}

impl fmt::Display for HueLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HueLeg::Scene(name) => write!(f, "Hue:{name}"),
            HueLeg::PowerOff => write!(f, "Hue:off"),
        }
    }
}

/// A named scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDefinition {
    name: String,
    hue: HueLeg,
    wled: WledIntent,
    description: String,
}

impl SceneDefinition {
    pub fn new(name: &str, hue: HueLeg, wled: WledIntent, description: &str) -> Self {
        SceneDefinition {
            name: name.to_lowercase(),
            hue,
            wled,
            description: description.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hue(&self) -> &HueLeg {
        &self.hue
    }

    pub fn wled(&self) -> &WledIntent {
        &self.wled
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// An ordered, immutable set of scenes keyed by case-insensitive name.
#[derive(Debug, Clone)]
pub struct SceneCatalog {
    scenes: Vec<SceneDefinition>,
}

impl SceneCatalog {
    /// Build a catalog. Later definitions with an already used name are
    /// rejected.
    pub fn new(scenes: Vec<SceneDefinition>) -> Result<Self> {
        let mut catalog = SceneCatalog { scenes: Vec::new() };
        for scene in scenes {
            if catalog.find(&scene.name).is_some() {
                return Err(Error::ConfigurationInvalid(format!(
                    "scene {} is defined more than once",
                    scene.name
                )));
            }
            catalog.scenes.push(scene);
        }
        Ok(catalog)
    }

    /// The household scenes.
    pub fn builtin() -> Self {
        let hue = |name: &str| HueLeg::Scene(name.to_string());
        SceneCatalog {
            scenes: vec![
                SceneDefinition::new(
                    "relax",
                    hue("Relax"),
                    solid([255, 180, 100, 50], 150),
                    "warm relaxing light",
                ),
                SceneDefinition::new(
                    "energize",
                    hue("Energize"),
                    solid([200, 220, 255, 100], 255),
                    "cool energizing light",
                ),
                SceneDefinition::new(
                    "concentrate",
                    hue("Concentrate"),
                    solid([255, 255, 255, 128], 255),
                    "bright light for focused work",
                ),
                SceneDefinition::new(
                    "nightlight",
                    hue("Nightlight"),
                    solid([255, 100, 50, 0], 30),
                    "dim night light",
                ),
                SceneDefinition::new(
                    "miami",
                    hue("Miami"),
                    animated(9, 5, 200, 100),
                    "colorful rainbow",
                ),
                SceneDefinition::new(
                    "movie",
                    HueLeg::PowerOff,
                    solid([50, 30, 80, 0], 40),
                    "movie night",
                ),
                SceneDefinition::new(
                    "party",
                    HueLeg::PowerOff,
                    animated(90, 6, 255, 200),
                    "party fireworks",
                ),
                SceneDefinition::new(
                    "aurora",
                    hue("Relax"),
                    animated(113, 48, 180, 60),
                    "aurora ambience",
                ),
                SceneDefinition::new(
                    "fire",
                    HueLeg::PowerOff,
                    animated(66, 35, 200, 150),
                    "fireplace flames",
                ),
                SceneDefinition::new(
                    "ocean",
                    hue("Relax"),
                    animated(101, 7, 180, 80),
                    "ocean waves",
                ),
            ],
        }
    }

    /// Look up a scene by name, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use lightfleet::SceneCatalog;
    ///
    /// let catalog = SceneCatalog::builtin();
    /// assert_eq!(catalog.lookup("Movie").unwrap(), catalog.lookup("movie").unwrap());
    /// assert!(catalog.lookup("disco").is_err());
    /// ```
    pub fn lookup(&self, name: &str) -> Result<&SceneDefinition> {
        self.find(name)
            .ok_or_else(|| Error::unknown_scene(name, &self.names()))
    }

    /// Scenes in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneDefinition> {
        self.scenes.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.scenes.iter().map(SceneDefinition::name).collect()
    }

    fn find(&self, name: &str) -> Option<&SceneDefinition> {
        let name = name.trim();
        self.scenes
            .iter()
            .find(|scene| scene.name.eq_ignore_ascii_case(name))
    }
}

fn solid(color: [u8; 4], brightness: u8) -> WledIntent {
    let mut intent = WledIntent::new(0);
    intent.colors(&[ColorRGBW::from(color)]);
    intent.brightness(&Brightness::create(brightness));
    intent.speed(&Speed::create(0));
    intent
}

fn animated(effect: u16, palette: u16, brightness: u8, speed: u8) -> WledIntent {
    let mut intent = WledIntent::new(effect);
    intent.palette(palette);
    intent.brightness(&Brightness::create(brightness));
    intent.speed(&Speed::create(speed));
    intent
}
