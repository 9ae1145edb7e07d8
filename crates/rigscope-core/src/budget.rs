//! DSP budget of a resolved chain.
//!
//! The budget is a static allocation: every block counts whether or not the
//! selected snapshot enables it, since the device reserves DSP for bypassed
//! blocks too.

use rigscope_config::CostTable;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

use crate::block::BlockId;
use crate::resolve::ResolvedBlock;

/// Declared DSP ceiling of the platform.
pub const PLATFORM_CEILING: f64 = 100.0;

/// Fraction of the ceiling from which utilization is elevated.
pub const ELEVATED_THRESHOLD: f64 = 0.9;

/// Fraction of the ceiling above which the chain is over budget.
pub const OVER_BUDGET_THRESHOLD: f64 = 1.5;

/// Utilization class of a budget total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetLevel {
    /// Below 90% of the ceiling.
    Nominal,
    /// From 90% up to 150% of the ceiling.
    Elevated,
    /// Above 150% of the ceiling.
    OverBudget,
}

impl BudgetLevel {
    /// Classify `total` against `ceiling`.
    pub fn classify(total: f64, ceiling: f64) -> Self {
        if total < ceiling * ELEVATED_THRESHOLD {
            BudgetLevel::Nominal
        } else if total <= ceiling * OVER_BUDGET_THRESHOLD {
            BudgetLevel::Elevated
        } else {
            BudgetLevel::OverBudget
        }
    }

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            BudgetLevel::Nominal => "nominal",
            BudgetLevel::Elevated => "elevated",
            BudgetLevel::OverBudget => "over-budget",
        }
    }
}

impl fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Total and per-block DSP cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DspBudget {
    /// Sum of all block costs.
    pub total: f64,
    /// Cost per block.
    pub per_block: BTreeMap<BlockId, f64>,
    /// Ceiling the level is classified against.
    pub ceiling: f64,
}

impl Default for DspBudget {
    fn default() -> Self {
        Self {
            total: 0.0,
            per_block: BTreeMap::new(),
            ceiling: PLATFORM_CEILING,
        }
    }
}

impl DspBudget {
    /// Classify against a different ceiling.
    pub fn with_ceiling(mut self, ceiling: f64) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Utilization class of the total.
    pub fn level(&self) -> BudgetLevel {
        BudgetLevel::classify(self.total, self.ceiling)
    }

    /// Total as a fraction of the ceiling.
    pub fn utilization(&self) -> f64 {
        if self.ceiling > 0.0 {
            self.total / self.ceiling
        } else {
            0.0
        }
    }

    /// A block's cost as a fraction of the total, 0 when the total is 0.
    pub fn share(&self, id: &BlockId) -> f64 {
        match self.per_block.get(id) {
            Some(cost) if self.total > 0.0 => cost / self.total,
            _ => 0.0,
        }
    }
}

impl Add for DspBudget {
    type Output = DspBudget;

    /// Combine the budgets of two chains. The left-hand ceiling is kept.
    fn add(mut self, rhs: DspBudget) -> DspBudget {
        self.total += rhs.total;
        for (id, cost) in rhs.per_block {
            *self.per_block.entry(id).or_insert(0.0) += cost;
        }
        self
    }
}

/// Sum model costs across a resolved chain.
///
/// Costs are looked up by raw model identifier; unknown models cost 0.
pub fn budget(blocks: &[ResolvedBlock], costs: &CostTable) -> DspBudget {
    let mut out = DspBudget::default();
    for block in blocks {
        let cost = costs.cost_of(&block.block.model);
        out.total += cost;
        *out.per_block.entry(block.id.clone()).or_insert(0.0) += cost;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(total = out.total, level = %out.level(), "dsp budget");

    out
}
