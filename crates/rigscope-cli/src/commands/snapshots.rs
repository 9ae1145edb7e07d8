//! Snapshot listing command.

use super::common::{RigArgs, load_rig};
use clap::Args;
use rigscope_config::SnapshotOverride;

#[derive(Args)]
pub struct SnapshotsArgs {
    #[command(flatten)]
    rig: RigArgs,
}

pub fn run(args: SnapshotsArgs) -> anyhow::Result<()> {
    let rig = load_rig(&args.rig)?;

    println!("Snapshots:");
    if rig.snapshots.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for (index, snapshot) in rig.snapshots.iter().enumerate() {
        println!("  {index:2}  {:20}  {}", snapshot.name, sources(snapshot));
        if let Some(hint) = &snapshot.hint
            && !hint.active_blocks.is_empty()
        {
            println!("      active: {}", hint.active_blocks.join(", "));
        }
    }
    Ok(())
}

fn sources(snapshot: &SnapshotOverride) -> &'static str {
    match (snapshot.has_technical_data(), snapshot.hint.is_some()) {
        (true, true) => "device + design",
        (true, false) => "device",
        (false, true) => "design",
        (false, false) => "stored state",
    }
}
