//! One-call resolution of a rig: validate, assemble, resolve, budget.

use rigscope_config::{RigConfiguration, ValidationReport, validate};
use serde::Serialize;

use crate::assemble::assemble;
use crate::budget::{BudgetLevel, DspBudget, PLATFORM_CEILING, budget};
use crate::error::Result;
use crate::matching::{BlockMatcher, SubstringMatcher};
use crate::resolve::{ResolvedChain, SnapshotResolver};

/// Everything a renderer needs for one snapshot of a rig.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RigView {
    /// The resolved chain.
    pub chain: ResolvedChain,
    /// DSP budget of the chain.
    pub budget: DspBudget,
    /// Utilization class of [`RigView::budget`].
    pub level: BudgetLevel,
    /// Non-fatal validation findings.
    #[serde(skip)]
    pub report: ValidationReport,
}

/// Resolution pipeline with a configurable matcher and DSP ceiling.
///
/// ```rust
/// use rigscope_config::{AbstractSnapshotHint, Block, PathId, RigConfiguration, SnapshotOverride};
/// use rigscope_core::RigEngine;
///
/// let rig = RigConfiguration::new()
///     .with_block(PathId::Path0, "blockA", Block::new("BassBoost"))
///     .with_snapshot(SnapshotOverride::new("Boost").with_hint(AbstractSnapshotHint::active(["boost"])));
///
/// let view = RigEngine::new().resolve(&rig, 0).unwrap();
/// assert!(view.chain.blocks[0].enabled);
/// ```
#[derive(Debug, Clone)]
pub struct RigEngine<M = SubstringMatcher> {
    resolver: SnapshotResolver<M>,
    ceiling: f64,
}

impl Default for RigEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RigEngine {
    /// Engine with the substring matcher and the platform ceiling.
    pub fn new() -> Self {
        Self {
            resolver: SnapshotResolver::new(),
            ceiling: PLATFORM_CEILING,
        }
    }
}

impl<M: BlockMatcher> RigEngine<M> {
    /// Engine with a custom matcher and the platform ceiling.
    pub fn with_matcher(matcher: M) -> Self {
        Self {
            resolver: SnapshotResolver::with_matcher(matcher),
            ceiling: PLATFORM_CEILING,
        }
    }

    /// Classify budgets against `ceiling`.
    pub fn with_ceiling(mut self, ceiling: f64) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// The ceiling budgets are classified against.
    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Resolve the snapshot at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Malformed`] when the configuration fails
    /// validation.
    pub fn resolve(&self, config: &RigConfiguration, index: usize) -> Result<RigView> {
        let report = validate(config)?;
        let assembled = assemble(config)?;
        let chain = self.resolver.resolve(&assembled, config, index);
        let budget = budget(chain.blocks(), &config.costs).with_ceiling(self.ceiling);
        Ok(RigView {
            chain,
            level: budget.level(),
            budget,
            report,
        })
    }
}

/// Resolve the snapshot at `index` with default settings.
///
/// # Errors
///
/// Returns [`crate::EngineError::Malformed`] when the configuration fails
/// validation.
pub fn resolve_rig(config: &RigConfiguration, index: usize) -> Result<RigView> {
    RigEngine::new().resolve(config, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use rigscope_config::{Block, CostTable, PathId, ValidationError, ValidationWarning};

    #[test]
    fn invalid_costs_degrade_to_zero() {
        let rig = RigConfiguration::new()
            .with_block(PathId::Path0, "a", Block::new("X"))
            .with_costs(CostTable::new().with_cost("X", -1.0).with_cost("Y", f64::NAN));
        let view = resolve_rig(&rig, 0).unwrap();
        assert_eq!(view.chain.blocks[0].dsp_cost, 0.0);
        assert_eq!(view.budget.total, 0.0);
        assert!(matches!(
            view.report.warnings.as_slice(),
            [ValidationWarning::InvalidCost { .. }, ValidationWarning::InvalidCost { .. }]
        ));
    }

    #[test]
    fn missing_paths_fail_fast() {
        assert!(matches!(
            resolve_rig(&RigConfiguration::default(), 0),
            Err(EngineError::Malformed(ValidationError::MissingDspPaths))
        ));
    }

    #[test]
    fn view_carries_budget_against_engine_ceiling() {
        let rig = RigConfiguration::new()
            .with_block(PathId::Path0, "a", Block::new("HD2_AmpUSDeluxe").with_type(1))
            .with_costs(CostTable::new().with_cost("HD2_AmpUSDeluxe", 60.0));

        let view = resolve_rig(&rig, 0).unwrap();
        assert_eq!(view.budget.total, 60.0);
        assert_eq!(view.budget.level(), BudgetLevel::Nominal);
        assert!(view.report.is_clean());

        let tight = RigEngine::new().with_ceiling(50.0).resolve(&rig, 0).unwrap();
        assert_eq!(tight.budget.level(), BudgetLevel::Elevated);
        assert_eq!(tight.level, BudgetLevel::Elevated);

        let json = serde_json::to_value(&tight).unwrap();
        assert_eq!(json["level"], "elevated");
        assert_eq!(json["budget"]["ceiling"], 50.0);
    }

    #[test]
    fn duplicate_positions_are_reported_not_fatal() {
        let rig = RigConfiguration::new()
            .with_block(PathId::Path0, "a", Block::new("X"))
            .with_block(PathId::Path0, "b", Block::new("Y"));
        let view = resolve_rig(&rig, 0).unwrap();
        assert_eq!(view.chain.len(), 2);
        assert!(!view.report.is_clean());
    }
}
