//! DSP budget report.

use super::common::{RigArgs, format_cost, load_rig};
use crate::settings::Settings;
use clap::Args;
use rigscope_core::RigEngine;

#[derive(Args)]
pub struct BudgetArgs {
    #[command(flatten)]
    rig: RigArgs,

    /// Classify against this ceiling instead of the settings value
    #[arg(long)]
    ceiling: Option<f64>,
}

pub fn run(args: BudgetArgs, settings: &Settings) -> anyhow::Result<()> {
    let ceiling = args.ceiling.unwrap_or(settings.platform_ceiling);
    if !(ceiling.is_finite() && ceiling > 0.0) {
        anyhow::bail!("ceiling must be a positive number, got {ceiling}");
    }

    let rig = load_rig(&args.rig)?;
    // The budget is static, so any snapshot index gives the same total.
    let view = RigEngine::new().with_ceiling(ceiling).resolve(&rig, 0)?;
    let budget = &view.budget;

    println!("  {:28}  {:6}  {:>6}", "Block", "DSP", "Share");
    for block in view.chain.iter() {
        println!(
            "  {:28}  {}  {:5.1}%",
            block.display_name,
            format_cost(block.dsp_cost),
            budget.share(&block.id) * 100.0
        );
    }
    println!();
    println!("Total:       {:.1}", budget.total);
    println!("Ceiling:     {:.1}", budget.ceiling);
    println!("Utilization: {:.0}%", budget.utilization() * 100.0);
    println!("Level:       {}", budget.level());
    Ok(())
}
