//! lightfleet: scene control for the Hue group and the WLED strips.

use std::path::PathBuf;

use clap::Parser;
use lightfleet::DEFAULT_CONFIG_PATH;

mod cli;

#[derive(Parser)]
#[command(
    name = "lightfleet",
    version,
    about = "Scene control for a Hue group and a fleet of WLED strips"
)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(long, global = true, env = "LIGHTFLEET_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: cli::Command,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let args = Args::parse();

    if let Err(e) = cli::run(args.command, &args.config).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
