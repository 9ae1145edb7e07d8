//! Rigscope CLI - inspect guitar rig configurations snapshot by snapshot.

mod commands;
mod settings;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use settings::Settings;

#[derive(Parser)]
#[command(name = "rigscope")]
#[command(author, version, about = "Rig configuration resolution CLI", long_about = None)]
struct Cli {
    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the chain for one snapshot
    Resolve(commands::resolve::ResolveArgs),

    /// List the snapshots of a rig
    Snapshots(commands::snapshots::SnapshotsArgs),

    /// Show the DSP budget of a rig
    Budget(commands::budget::BudgetArgs),

    /// Decode instrument model ids into names
    Decode(commands::decode::DecodeArgs),

    /// Check a rig for structural problems
    Validate(commands::validate::ValidateArgs),

    /// Show or initialize the settings file
    Settings(commands::settings::SettingsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings_path = Settings::location(cli.settings.as_deref());
    let settings = Settings::load(&settings_path)?;

    match cli.command {
        Commands::Resolve(args) => commands::resolve::run(args, &settings),
        Commands::Snapshots(args) => commands::snapshots::run(args),
        Commands::Budget(args) => commands::budget::run(args, &settings),
        Commands::Decode(args) => commands::decode::run(args, &settings),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Settings(args) => commands::settings::run(args, &settings, &settings_path),
    }
}
