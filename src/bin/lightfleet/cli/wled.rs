//! `wled` subcommands: direct control of one strip or all routine strips.

use std::str::FromStr;
use std::time::Duration;

use clap::{Subcommand, ValueEnum};
use lightfleet::{
    Brightness, CatalogListing, CatalogSource, ColorRGBW, Orchestrator, PowerMode, SegmentPatch,
    StatePatch, WledClient, resolve_effect, resolve_palette,
};

use super::{Result, print_results, print_strip_status};

#[derive(Subcommand)]
pub enum WledCommand {
    /// Show version, LEDs, signal and current state
    Status {
        /// Device id, or `all` for every routine strip
        device: Option<String>,
    },

    /// Switch strips on
    On { device: Option<String> },

    /// Switch strips off
    Off { device: Option<String> },

    /// Set brightness (clamped to 0-255)
    Brightness {
        #[arg(allow_negative_numbers = true)]
        level: i64,
        device: Option<String>,
    },

    /// Run an effect, by name or numeric id
    Effect {
        effect: String,
        device: Option<String>,
        /// Palette name or numeric id
        #[arg(long)]
        palette: Option<String>,
        /// Only change this segment
        #[arg(long)]
        segment: Option<u16>,
    },

    /// Set a solid color (RRGGBB, RRGGBBWW or r,g,b,w)
    Color {
        color: String,
        device: Option<String>,
        /// Only change this segment
        #[arg(long)]
        segment: Option<u16>,
    },

    /// Load a preset stored on the strip
    Preset { id: u16, device: Option<String> },

    /// List effects
    Effects { device: Option<String> },

    /// List palettes
    Palettes { device: Option<String> },

    /// Send a raw segment object, e.g. '{"fx": 66, "grp": 2}'
    Segment {
        id: u16,
        json: String,
        device: Option<String>,
    },

    /// Enable UDP sync between strips
    Sync { device: Option<String> },

    /// Cycle through a few showcase effects
    Demo {
        device: Option<String>,
        /// Seconds to hold each effect
        #[arg(long, default_value_t = 5)]
        dwell: u64,
    },

    /// Raise or clear the emergency light on the kitchen strip
    Emergency {
        #[arg(value_enum, default_value_t = Switch::On)]
        state: Switch,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

pub async fn run(cmd: WledCommand, orchestrator: &Orchestrator<(), WledClient>) -> Result<()> {
    let registry = orchestrator.registry();
    let fleet = orchestrator.fleet();

    match cmd {
        WledCommand::Status { device } => {
            let targets = registry.select(device.as_deref())?;
            for strip in fleet.status(&targets).await {
                print_strip_status(&strip);
            }
        }
        WledCommand::On { device } => {
            let targets = registry.select(device.as_deref())?;
            print_results(&fleet.power_all(&targets, true).await);
        }
        WledCommand::Off { device } => {
            let targets = registry.select(device.as_deref())?;
            print_results(&fleet.power_all(&targets, false).await);
        }
        WledCommand::Brightness { level, device } => {
            let targets = registry.select(device.as_deref())?;
            let patch = StatePatch::from(&Brightness::clamped(level));
            print_results(&fleet.send(&patch, &targets).await);
        }
        WledCommand::Effect {
            effect,
            device,
            palette,
            segment,
        } => {
            let mut seg = SegmentPatch::new();
            seg.effect(resolve_effect(&effect)?);
            if let Some(palette) = palette {
                seg.palette(resolve_palette(&palette)?);
            }
            let targets = registry.select(device.as_deref())?;
            print_results(&fleet.send(&powered(segment, seg), &targets).await);
        }
        WledCommand::Color {
            color,
            device,
            segment,
        } => {
            let mut seg = SegmentPatch::new();
            seg.color(ColorRGBW::from_str(&color)?);
            let targets = registry.select(device.as_deref())?;
            print_results(&fleet.send(&powered(segment, seg), &targets).await);
        }
        WledCommand::Preset { id, device } => {
            let targets = registry.select(device.as_deref())?;
            let mut patch = StatePatch::new();
            patch.preset(id);
            print_results(&fleet.send(&patch, &targets).await);
        }
        WledCommand::Effects { device } => {
            if let Some(first) = registry.select(device.as_deref())?.first() {
                print_listing(&fleet.effect_catalog(first).await);
            } else {
                print_listing(&CatalogListing {
                    source: CatalogSource::Builtin,
                    entries: lightfleet::effects().collect(),
                });
            }
        }
        WledCommand::Palettes { device } => {
            if let Some(first) = registry.select(device.as_deref())?.first() {
                print_listing(&fleet.palette_catalog(first).await);
            } else {
                print_listing(&CatalogListing {
                    source: CatalogSource::Builtin,
                    entries: lightfleet::palettes().collect(),
                });
            }
        }
        WledCommand::Segment { id, json, device } => {
            let seg = SegmentPatch::from_json(&json)?;
            let targets = registry.select(device.as_deref())?;
            let mut patch = StatePatch::new();
            patch.segment(Some(id), seg);
            print_results(&fleet.send(&patch, &targets).await);
        }
        WledCommand::Sync { device } => {
            let targets = registry.select(device.as_deref())?;
            let mut patch = StatePatch::new();
            patch.sync(true, true);
            print_results(&fleet.send(&patch, &targets).await);
        }
        WledCommand::Demo { device, dwell } => {
            let targets = registry.select(device.as_deref())?;
            fleet
                .demo(&targets, Duration::from_secs(dwell), |step, results| {
                    println!("{} (fx {}, pal {})", step.name, step.effect, step.palette);
                    print_results(results);
                })
                .await;
        }
        WledCommand::Emergency { state } => {
            let result = orchestrator.emergency(state == Switch::On).await?;
            print_results(std::slice::from_ref(&result));
        }
    }
    Ok(())
}

/// A patch that switches the strip on and applies `seg`.
fn powered(segment: Option<u16>, seg: SegmentPatch) -> StatePatch {
    let mut patch = StatePatch::from(&PowerMode::On);
    patch.segment(segment, seg);
    patch
}

fn print_listing(listing: &CatalogListing) {
    let source = match listing.source {
        CatalogSource::Device => "device",
        CatalogSource::Builtin => "built-in",
    };
    println!("({source} list)");
    for entry in &listing.entries {
        println!("  {:>3}  {}", entry.id, entry.name);
    }
}
