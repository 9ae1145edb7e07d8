//! Rig validation command.

use clap::Args;
use rigscope_config::RigConfiguration;
use std::path::PathBuf;

#[derive(Args)]
pub struct ValidateArgs {
    /// Rig configuration file (.json or .toml)
    #[arg(value_name = "RIG")]
    rig: PathBuf,

    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,
}

pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let (rig, report) = RigConfiguration::load_validated(&args.rig)
        .map_err(|e| anyhow::anyhow!("{}: {}", args.rig.display(), e))?;

    if report.is_clean() {
        println!(
            "{}: ok ({} blocks, {} snapshots)",
            args.rig.display(),
            rig.block_count(),
            rig.snapshots.len()
        );
        return Ok(());
    }

    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    if args.strict {
        anyhow::bail!("{} warning(s) in {}", report.warnings.len(), args.rig.display());
    }
    Ok(())
}
