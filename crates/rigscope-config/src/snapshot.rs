//! Snapshot override records.
//!
//! A snapshot can carry two kinds of information:
//!
//! - **Technical overrides** exported by the device itself: exact enabled
//!   flags, exact parameter values and instrument controller values.
//! - An **abstract hint** authored alongside a design: free-text block and
//!   parameter references that only approximate what the snapshot changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::instrument::InstrumentOverride;
use crate::rig::{PathId, PathMap};

/// Free-text description of what a snapshot changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbstractSnapshotHint {
    /// Names or models of the blocks that should be active.
    #[serde(default)]
    pub active_blocks: Vec<String>,

    /// Block references mapped to arbitrary parameter descriptions.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, serde_json::Value>,

    /// Suggested guitar model for this snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guitar_model: Option<String>,

    /// Suggested tuning for this snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuning: Option<String>,
}

impl AbstractSnapshotHint {
    /// Hint naming the active blocks.
    pub fn active<I, S>(blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            active_blocks: blocks.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add a parameter reference.
    pub fn with_param(mut self, reference: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(reference.into(), value);
        self
    }
}

/// One selectable snapshot of a rig.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotOverride {
    /// Display name.
    pub name: String,

    /// Exact enabled flags per block. Present only for device-sourced rigs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<PathMap<bool>>,

    /// Exact parameter values per block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<PathMap<BTreeMap<String, f64>>>,

    /// Instrument values from the device's snapshot controller table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_controllers: Option<InstrumentOverride>,

    /// Legacy instrument override record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument: Option<InstrumentOverride>,

    /// Abstract hint from a design description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<AbstractSnapshotHint>,
}

impl SnapshotOverride {
    /// Snapshot with a name and nothing else.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the exact enabled flag of one block.
    pub fn with_block_enabled(mut self, path: PathId, key: impl Into<String>, enabled: bool) -> Self {
        self.blocks
            .get_or_insert_with(PathMap::new)
            .insert(path, key, enabled);
        self
    }

    /// Set the exact value of one block parameter.
    pub fn with_param_value(
        mut self,
        path: PathId,
        key: impl Into<String>,
        param: impl Into<String>,
        value: f64,
    ) -> Self {
        self.params
            .get_or_insert_with(PathMap::new)
            .get_mut(path)
            .entry(key.into())
            .or_default()
            .insert(param.into(), value);
        self
    }

    /// Set the instrument controller values.
    pub fn with_instrument_controllers(mut self, over: InstrumentOverride) -> Self {
        self.instrument_controllers = Some(over);
        self
    }

    /// Set the legacy instrument override.
    pub fn with_instrument(mut self, over: InstrumentOverride) -> Self {
        self.instrument = Some(over);
        self
    }

    /// Attach an abstract hint.
    pub fn with_hint(mut self, hint: AbstractSnapshotHint) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Exact enabled flag for (path, key), if the device recorded one.
    pub fn block_enabled(&self, path: PathId, key: &str) -> Option<bool> {
        self.blocks.as_ref()?.entry(path, key).copied()
    }

    /// Exact parameter value for (path, key, param), if the device recorded one.
    pub fn param_value(&self, path: PathId, key: &str, param: &str) -> Option<f64> {
        self.params.as_ref()?.entry(path, key)?.get(param).copied()
    }

    /// Whether any technical (device-sourced) data is present.
    pub fn has_technical_data(&self) -> bool {
        self.blocks.is_some() || self.params.is_some() || self.instrument_controllers.is_some()
    }
}
