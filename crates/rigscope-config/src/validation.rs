//! Structural validation of rig configurations.
//!
//! Two levels of findings are reported:
//!
//! - [`ValidationError`]: the record cannot be resolved at all (e.g. both DSP
//!   paths are missing) and must be fixed upstream.
//! - [`ValidationWarning`]: the record resolves, but something looks off
//!   (duplicate positions, overrides that point at blocks that do not exist,
//!   unusable costs). Resolution degrades gracefully around these.
//!
//! # Example
//!
//! ```rust
//! use rigscope_config::{validate, RigConfiguration, ValidationError};
//!
//! let empty = RigConfiguration::default();
//! assert_eq!(validate(&empty), Err(ValidationError::MissingDspPaths));
//!
//! let report = validate(&RigConfiguration::new()).expect("both paths present");
//! assert!(report.is_clean());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::catalog::CostTable;
use crate::rig::{PathId, RigConfiguration};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Neither DSP path is present.
    #[error("rig configuration has neither path0 nor path1")]
    MissingDspPaths,

}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Non-fatal irregularities found in a configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    /// Several blocks on one path share a position.
    DuplicatePosition {
        /// Path containing the blocks.
        path: PathId,
        /// Shared position.
        position: i32,
        /// Keys of the colliding blocks, in key order.
        keys: Vec<String>,
    },
    /// A snapshot override targets a block that does not exist.
    UnknownSnapshotBlock {
        /// Snapshot name.
        snapshot: String,
        /// Path named by the override.
        path: PathId,
        /// Block key named by the override.
        key: String,
    },
    /// A controller entry targets a block that does not exist.
    UnknownControllerBlock {
        /// Path named by the entry.
        path: PathId,
        /// Block key named by the entry.
        key: String,
    },
    /// A cost table entry is negative or not a finite number; it counts as 0.
    InvalidCost {
        /// Model identifier of the entry.
        model: String,
        /// The unusable cost.
        cost: f64,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::DuplicatePosition {
                path,
                position,
                keys,
            } => write!(
                f,
                "{path}: blocks {} share position {position}",
                keys.join(", ")
            ),
            ValidationWarning::UnknownSnapshotBlock {
                snapshot,
                path,
                key,
            } => write!(f, "snapshot '{snapshot}' overrides unknown block {path}/{key}"),
            ValidationWarning::UnknownControllerBlock { path, key } => {
                write!(f, "controller table references unknown block {path}/{key}")
            }
            ValidationWarning::InvalidCost { model, cost } => {
                write!(f, "model '{model}' has invalid DSP cost {cost}, counted as 0")
            }
        }
    }
}

/// Warnings collected by [`validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Non-fatal findings, in discovery order.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Whether nothing was flagged.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Fail-fast structural check: the minimum needed to assemble a chain.
pub fn check_structure(config: &RigConfiguration) -> ValidationResult<()> {
    if config.path0.is_none() && config.path1.is_none() {
        return Err(ValidationError::MissingDspPaths);
    }
    Ok(())
}

/// Full validation: the structural check plus non-fatal warnings.
pub fn validate(config: &RigConfiguration) -> ValidationResult<ValidationReport> {
    check_structure(config)?;

    let mut report = ValidationReport::default();
    check_positions(config, &mut report);
    check_snapshot_targets(config, &mut report);
    check_controller_targets(config, &mut report);
    check_costs(config, &mut report);
    Ok(report)
}

fn check_positions(config: &RigConfiguration, report: &mut ValidationReport) {
    for path in PathId::ALL {
        let Some(blocks) = config.path(path) else {
            continue;
        };
        let mut by_position: BTreeMap<i32, Vec<String>> = BTreeMap::new();
        for (key, block) in blocks.iter() {
            by_position
                .entry(block.position)
                .or_default()
                .push(key.to_string());
        }
        for (position, keys) in by_position {
            if keys.len() > 1 {
                report.warnings.push(ValidationWarning::DuplicatePosition {
                    path,
                    position,
                    keys,
                });
            }
        }
    }
}

fn check_snapshot_targets(config: &RigConfiguration, report: &mut ValidationReport) {
    for snapshot in &config.snapshots {
        let enabled_targets = snapshot.blocks.iter().flat_map(|m| m.iter().map(|(p, k, _)| (p, k)));
        let param_targets = snapshot.params.iter().flat_map(|m| m.iter().map(|(p, k, _)| (p, k)));
        let mut seen = Vec::new();
        for (path, key) in enabled_targets.chain(param_targets) {
            if config.block(path, key).is_none() && !seen.contains(&(path, key)) {
                seen.push((path, key));
                report.warnings.push(ValidationWarning::UnknownSnapshotBlock {
                    snapshot: snapshot.name.clone(),
                    path,
                    key: key.to_string(),
                });
            }
        }
    }
}

fn check_controller_targets(config: &RigConfiguration, report: &mut ValidationReport) {
    for (path, key, _) in config.controllers.blocks.iter() {
        if config.block(path, key).is_none() {
            report.warnings.push(ValidationWarning::UnknownControllerBlock {
                path,
                key: key.to_string(),
            });
        }
    }
}

fn check_costs(config: &RigConfiguration, report: &mut ValidationReport) {
    for (model, cost) in config.costs.iter() {
        if !CostTable::is_usable(cost) {
            report.warnings.push(ValidationWarning::InvalidCost {
                model: model.to_string(),
                cost,
            });
        }
    }
}
