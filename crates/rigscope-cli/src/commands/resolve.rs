//! Resolve and print the chain for one snapshot.

use super::common::{RigArgs, format_cost, load_rig};
use crate::settings::Settings;
use clap::Args;
use rigscope_core::{EnabledSource, ResolvedBlock, RigEngine, RigView};

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    rig: RigArgs,

    /// Snapshot index (zero-based, defaults to the settings value)
    #[arg(short, long)]
    snapshot: Option<usize>,

    /// Print parameter values under each block
    #[arg(short, long)]
    params: bool,

    /// Print the resolved view as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ResolveArgs, settings: &Settings) -> anyhow::Result<()> {
    let rig = load_rig(&args.rig)?;
    let index = args.snapshot.unwrap_or(settings.default_snapshot);
    let view = RigEngine::new()
        .with_ceiling(settings.platform_ceiling)
        .resolve(&rig, index)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let title = rig.name.as_deref().unwrap_or("(unnamed rig)");
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    match &view.chain.snapshot {
        Some(snapshot) => println!("Snapshot {}: {}", snapshot.index, snapshot.name),
        None => println!("Snapshot {index}: (none, stored state)"),
    }
    println!();

    print_chain(&view, args.params);

    println!();
    println!(
        "DSP: {:.1} / {:.1} ({})",
        view.budget.total,
        view.budget.ceiling,
        view.level
    );
    Ok(())
}

fn print_chain(view: &RigView, with_params: bool) {
    println!(
        "  {:3}  {:4}  {:28}  {:3}  {:9}  {:6}  {}",
        "#", "Type", "Block", "On", "Source", "DSP", "Channel"
    );
    for (i, block) in view.chain.iter().enumerate() {
        let marker = if block.design_shift { "*" } else { "" };
        println!(
            "  {:3}  {:4}  {:28}  {:3}  {:9}  {}  {}",
            i,
            block.category.label(),
            format!("{}{marker}", block.display_name),
            if block.enabled { "on" } else { "off" },
            source_label(block.enabled_source),
            format_cost(block.dsp_cost),
            block.channel_label(),
        );
        if with_params {
            print_params(block);
        }
    }
}

fn print_params(block: &ResolvedBlock) {
    for (name, value) in &block.params {
        let controlled = if block.snapshot_controlled.contains(name) {
            " (snapshot)"
        } else {
            ""
        };
        println!("         {name} = {value}{controlled}");
    }
}

fn source_label(source: EnabledSource) -> &'static str {
    match source {
        EnabledSource::Technical => "device",
        EnabledSource::Hint => "design",
        EnabledSource::Stored => "stored",
    }
}
