//! Shared CLI helpers used across multiple commands.

use clap::Args;
use rigscope_config::{CostTable, DesignDescription, InstrumentFamily, RigConfiguration, validate};
use std::path::PathBuf;

/// Options for locating a rig and its companion files.
#[derive(Args)]
pub struct RigArgs {
    /// Rig configuration file (.json or .toml)
    #[arg(value_name = "RIG")]
    pub rig: PathBuf,

    /// Abstract design whose snapshots become hints
    #[arg(short, long, value_name = "FILE")]
    pub design: Option<PathBuf>,

    /// Model catalog used to fill in DSP costs
    #[arg(short, long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Decode the instrument with this family (jtv, shuriken)
    #[arg(long, value_parser = parse_family)]
    pub family: Option<InstrumentFamily>,
}

/// Load a rig with its optional design and catalog applied.
///
/// Catalog costs fill in models the rig's own cost table does not list.
/// Validation warnings are logged; structural errors are returned.
pub fn load_rig(args: &RigArgs) -> anyhow::Result<RigConfiguration> {
    let mut rig = RigConfiguration::load(&args.rig)
        .map_err(|e| anyhow::anyhow!("{}: {}", args.rig.display(), e))?;

    if let Some(path) = &args.design {
        let design = DesignDescription::load(path)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
        tracing::debug!(snapshots = design.snapshots.len(), "attaching design");
        rig = rig.with_design(&design);
    }

    if let Some(path) = &args.catalog {
        let mut costs = CostTable::load_catalog(path)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
        costs.extend(&rig.costs);
        tracing::debug!(models = costs.len(), "loaded catalog");
        rig.costs = costs;
    }

    if let (Some(family), Some(instrument)) = (args.family, rig.instrument.as_mut()) {
        instrument.family = family;
    }

    let report = validate(&rig)?;
    for warning in &report.warnings {
        tracing::warn!("{warning}");
    }

    Ok(rig)
}

/// Parse an instrument family for clap's `value_parser`.
pub fn parse_family(s: &str) -> Result<InstrumentFamily, String> {
    s.parse()
}

/// Format a cost for tables.
pub fn format_cost(cost: f64) -> String {
    format!("{cost:6.1}")
}
