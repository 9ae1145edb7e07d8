//! Settings inspection and initialization.

use crate::settings::Settings;
use clap::Args;
use rigscope_config::paths;
use std::path::Path;

#[derive(Args)]
pub struct SettingsArgs {
    /// Write a settings file with the current values
    #[arg(long)]
    init: bool,

    /// Overwrite an existing settings file
    #[arg(long)]
    force: bool,
}

pub fn run(args: SettingsArgs, settings: &Settings, path: &Path) -> anyhow::Result<()> {
    if args.init {
        if path.exists() && !args.force {
            anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
        }
        if path.starts_with(paths::user_config_dir()) {
            paths::ensure_user_config_dir()?;
        }
        settings.save(path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    println!("Settings file: {}", path.display());
    if !path.exists() {
        println!("  (not found, using defaults)");
    }
    println!("  instrument_family = {}", settings.instrument_family);
    println!("  platform_ceiling  = {:.1}", settings.platform_ceiling);
    println!("  default_snapshot  = {}", settings.default_snapshot);
    Ok(())
}
