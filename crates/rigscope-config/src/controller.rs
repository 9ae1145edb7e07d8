//! Parameter controller assignments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rig::{PathId, PathMap};

/// Device code for the snapshot controller.
pub const SNAPSHOT_CONTROLLER_CODE: u32 = 9;

/// What drives a parameter on the device.
///
/// Only [`ControllerKind::Snapshot`] matters to resolution; every other code is
/// carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum ControllerKind {
    /// Value varies per snapshot (device code 9).
    Snapshot,
    /// Any other controller (expression pedal, footswitch, MIDI CC, ...).
    Other(u32),
}

impl From<u32> for ControllerKind {
    fn from(code: u32) -> Self {
        if code == SNAPSHOT_CONTROLLER_CODE {
            ControllerKind::Snapshot
        } else {
            ControllerKind::Other(code)
        }
    }
}

impl From<ControllerKind> for u32 {
    fn from(kind: ControllerKind) -> Self {
        match kind {
            ControllerKind::Snapshot => SNAPSHOT_CONTROLLER_CODE,
            ControllerKind::Other(code) => code,
        }
    }
}

/// Assignment of one parameter to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerAssignment {
    /// Controller kind, stored as the device's numeric code.
    #[serde(rename = "controller")]
    pub kind: ControllerKind,

    /// Lower bound of the controlled range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Upper bound of the controlled range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ControllerAssignment {
    /// Assignment with no range.
    pub fn new(kind: ControllerKind) -> Self {
        Self {
            kind,
            min: None,
            max: None,
        }
    }

    /// Snapshot-controller assignment.
    pub fn snapshot() -> Self {
        Self::new(ControllerKind::Snapshot)
    }

    /// Set the controlled range.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Whether this parameter varies per snapshot.
    pub fn is_snapshot(&self) -> bool {
        self.kind == ControllerKind::Snapshot
    }
}

/// Controller assignments for one block, by parameter name.
pub type BlockControllers = BTreeMap<String, ControllerAssignment>;

/// Controller table for a whole rig.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerTable {
    /// Assignments for DSP-path blocks, keyed by path then block key.
    #[serde(default)]
    pub blocks: PathMap<BlockControllers>,

    /// Assignments for modeled-instrument parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub instrument: BlockControllers,
}

impl ControllerTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a block parameter to a controller.
    pub fn with_block_param(
        mut self,
        path: PathId,
        key: impl Into<String>,
        param: impl Into<String>,
        assignment: ControllerAssignment,
    ) -> Self {
        self.blocks
            .get_mut(path)
            .entry(key.into())
            .or_default()
            .insert(param.into(), assignment);
        self
    }

    /// Assign an instrument parameter to a controller.
    pub fn with_instrument_param(
        mut self,
        param: impl Into<String>,
        assignment: ControllerAssignment,
    ) -> Self {
        self.instrument.insert(param.into(), assignment);
        self
    }

    /// All assignments for one block.
    pub fn block(&self, path: PathId, key: &str) -> Option<&BlockControllers> {
        self.blocks.entry(path, key)
    }

    /// Assignment for an exact (path, key, parameter) triple.
    pub fn get(&self, path: PathId, key: &str, param: &str) -> Option<&ControllerAssignment> {
        self.block(path, key)?.get(param)
    }

    /// Whether the exact triple is assigned to the snapshot controller.
    pub fn is_snapshot_controlled(&self, path: PathId, key: &str, param: &str) -> bool {
        self.get(path, key, param)
            .is_some_and(ControllerAssignment::is_snapshot)
    }

    /// Whether any instrument parameter has a controller entry.
    pub fn has_instrument_entries(&self) -> bool {
        !self.instrument.is_empty()
    }
}
