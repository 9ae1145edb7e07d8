//! Abstract rig designs authored outside the device.
//!
//! A design describes a rig in natural language: a chain of real-world gear
//! names and a list of snapshots naming which of those components are active.
//! Attaching a design to a [`RigConfiguration`] turns its snapshots into
//! [`AbstractSnapshotHint`]s on the matching snapshot indices.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::document::load_document;
use crate::error::ConfigError;
use crate::rig::RigConfiguration;
use crate::snapshot::{AbstractSnapshotHint, SnapshotOverride};

/// One component of a design chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignComponent {
    /// Component type as written by the author (amp, cab, pedal, delay, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Real-world name, e.g. "Tube Screamer".
    pub name: String,
    /// Why the component is in the chain.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Abstract settings, e.g. "high gain, low mids".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub settings: String,
}

/// One snapshot of a design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignSnapshot {
    /// Snapshot name.
    pub name: String,
    /// Names of the components enabled in this snapshot.
    #[serde(default)]
    pub active_blocks: Vec<String>,
    /// Guitar model for this snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guitar_model: Option<String>,
    /// Tuning for this snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuning: Option<String>,
    /// Component name mapped to parameter descriptions.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl DesignSnapshot {
    /// Convert to the hint form consumed by resolution.
    pub fn to_hint(&self) -> AbstractSnapshotHint {
        AbstractSnapshotHint {
            active_blocks: self.active_blocks.clone(),
            params: self.params.clone(),
            guitar_model: self.guitar_model.clone(),
            tuning: self.tuning.clone(),
        }
    }
}

/// A complete abstract design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignDescription {
    /// Short preset name suggestion.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suggested_name: String,
    /// Prose explanation of the design.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub explanation: String,
    /// Guitar model for the whole rig.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guitar_model: Option<String>,
    /// Tuning for the whole rig.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuning: Option<String>,
    /// Components in signal order.
    #[serde(default)]
    pub chain: Vec<DesignComponent>,
    /// Snapshots in selection order.
    #[serde(default)]
    pub snapshots: Vec<DesignSnapshot>,
}

impl DesignDescription {
    /// Load a design from a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_document(path)
    }
}

impl RigConfiguration {
    /// Attach a design's snapshots as abstract hints, by index.
    ///
    /// Existing snapshots keep their name and technical data and receive the
    /// hint of the design snapshot at the same index. Design snapshots beyond
    /// the rig's own list are appended as hint-only snapshots.
    pub fn with_design(mut self, design: &DesignDescription) -> Self {
        for (index, snap) in design.snapshots.iter().enumerate() {
            let hint = snap.to_hint();
            match self.snapshots.get_mut(index) {
                Some(existing) => existing.hint = Some(hint),
                None => self
                    .snapshots
                    .push(SnapshotOverride::new(snap.name.clone()).with_hint(hint)),
            }
        }
        self
    }
}
