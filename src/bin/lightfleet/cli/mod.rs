//! CLI subcommands: scenes, household-wide power, and per-strip WLED control.

mod wled;

use std::path::Path;

use clap::Subcommand;
use lightfleet::{
    ActivationReport, Config, Error, FanOut, FanOutResult, HomeAssistant, Orchestrator,
    SceneCatalog, StripStatus, WledClient,
};

pub(super) type Result<T> = std::result::Result<T, Error>;

#[derive(Subcommand)]
pub enum Command {
    /// Activate a scene on the Hue group and the WLED strips
    Scene {
        /// Scene name (see `scenes`)
        #[arg(default_value = "relax")]
        name: String,
    },

    /// List available scenes
    Scenes,

    /// Show Hue lights and WLED strips
    Status,

    /// Switch the Hue group and all routine strips off
    #[command(alias = "off")]
    AllOff,

    /// Switch the Hue group and all routine strips on
    #[command(alias = "on")]
    AllOn,

    /// Control WLED strips directly
    Wled {
        #[command(subcommand)]
        command: wled::WledCommand,
    },
}

pub async fn run(cmd: Command, config_path: &Path) -> Result<()> {
    match cmd {
        Command::Scenes => {
            print_scenes(&SceneCatalog::builtin());
            Ok(())
        }
        Command::Wled { command } => {
            let config = Config::load(config_path)?;
            let orchestrator = wled_orchestrator(&config)?;
            wled::run(command, &orchestrator).await
        }
        Command::Scene { name } => {
            // unknown names fail before any configuration is required
            SceneCatalog::builtin().lookup(&name)?;
            let config = Config::load(config_path)?;
            let report = household(&config)?.activate_scene(&name).await?;
            print_report(&report);
            Ok(())
        }
        Command::AllOff => {
            let config = Config::load(config_path)?;
            print_report(&household(&config)?.all_off().await);
            Ok(())
        }
        Command::AllOn => {
            let config = Config::load(config_path)?;
            print_report(&household(&config)?.all_on().await);
            Ok(())
        }
        Command::Status => {
            let config = Config::load(config_path)?;
            let status = household(&config)?.status().await;
            println!("Hue");
            match status.hue {
                Ok(lights) if lights.is_empty() => println!("  (no matching lights)"),
                Ok(lights) => {
                    for light in lights {
                        let name = light.friendly_name.as_deref().unwrap_or(&light.entity_id);
                        println!("  {:<8} {name}", light.state);
                    }
                }
                Err(e) => println!("  error    {e}"),
            }
            println!("WLED");
            for strip in &status.strips {
                print_strip_status(strip);
            }
            Ok(())
        }
    }
}

fn household(config: &Config) -> Result<Orchestrator<HomeAssistant, WledClient>> {
    // registry first, so an invalid fleet is reported before missing Hue settings
    let registry = config.registry()?;
    Ok(Orchestrator::new(
        registry,
        SceneCatalog::builtin(),
        config.home_assistant()?,
        config.hue_group(),
        FanOut::new(WledClient::new(config.timeout())?),
    ))
}

fn wled_orchestrator(config: &Config) -> Result<Orchestrator<(), WledClient>> {
    Ok(Orchestrator::new(
        config.registry()?,
        SceneCatalog::builtin(),
        (),
        config.hue_group(),
        FanOut::new(WledClient::new(config.timeout())?),
    ))
}

fn print_scenes(catalog: &SceneCatalog) {
    let width = catalog.names().iter().map(|n| n.len()).max().unwrap_or(0) + 2;
    for scene in catalog.iter() {
        println!(
            "  {:<width$}{:<16}{}",
            scene.name(),
            scene.hue().to_string(),
            scene.description(),
            width = width
        );
    }
}

fn print_report(report: &ActivationReport) {
    println!("{report}");
    let online = report.strips_online();
    if online < report.wled.len() {
        println!("{online}/{} strips updated", report.wled.len());
    }
}

pub(super) fn print_results(results: &[FanOutResult]) {
    for result in results {
        println!("{result}");
    }
}

pub(super) fn print_strip_status(strip: &StripStatus) {
    let label = strip.device.name();
    match &strip.report {
        Ok((info, state)) => {
            let signal = info
                .signal()
                .map(|s| format!("{s}%"))
                .unwrap_or_else(|| String::from("n/a"));
            let effect = state
                .effect()
                .map(|fx| match lightfleet::Effect::create(fx) {
                    Some(known) => format!("{fx} ({})", known.name()),
                    None => fx.to_string(),
                })
                .unwrap_or_else(|| String::from("n/a"));
            println!(
                "  {:<8} {label}  v{}  {} LEDs  signal {signal}  bri {}  {} seg  fx {effect}",
                if state.on { "on" } else { "off" },
                info.ver,
                info.leds.count,
                state.bri,
                state.segment_count(),
            );
        }
        Err(Error::DeviceUnreachable { reason, .. }) => {
            println!("  offline  {label} ({reason})")
        }
        Err(e) => println!("  error    {label}: {e}"),
    }
}
