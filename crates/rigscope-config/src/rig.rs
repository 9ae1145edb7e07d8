//! Rig configuration records: DSP paths, blocks and parameter values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::catalog::CostTable;
use crate::controller::ControllerTable;
use crate::document::{DocumentFormat, load_document, save_document};
use crate::error::ConfigError;
use crate::instrument::InstrumentConfig;
use crate::snapshot::SnapshotOverride;
use crate::validation::{ValidationReport, validate};

/// One of the two parallel DSP paths a block can live on.
///
/// Ordering follows the signal flow: `Path0` feeds `Path1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathId {
    /// First DSP path.
    Path0,
    /// Second DSP path.
    Path1,
}

impl PathId {
    /// Both paths in signal order.
    pub const ALL: [PathId; 2] = [PathId::Path0, PathId::Path1];

    /// Zero-based path index.
    pub const fn index(self) -> usize {
        match self {
            PathId::Path0 => 0,
            PathId::Path1 => 1,
        }
    }

    /// Key used in serialized records.
    pub const fn as_str(self) -> &'static str {
        match self {
            PathId::Path0 => "path0",
            PathId::Path1 => "path1",
        }
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block parameter value.
///
/// Device records mix numeric knob positions with enumerated string settings;
/// the synthesized instrument stage also carries flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Numeric value (knob position, time, level).
    Number(f64),
    /// Boolean switch.
    Flag(bool),
    /// Free-form string setting.
    Text(String),
}

impl ParamValue {
    /// Numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// String value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(v) => write!(f, "{v:.2}"),
            ParamValue::Flag(b) => write!(f, "{b}"),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Number(f64::from(v))
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Flag(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

fn default_enabled() -> bool {
    true
}

/// A single processing block on a DSP path.
///
/// The block's identity (path, key) is given by where it is stored; the block
/// itself only carries its model, flags, position and parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Raw device model identifier (e.g. `HD2_AmpUSDeluxe`).
    pub model: String,

    /// Numeric block type code from the device record.
    #[serde(rename = "type", default)]
    pub type_code: i32,

    /// Stored enabled state.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Chain order within the block's path.
    #[serde(default)]
    pub position: i32,

    /// Whether the block runs in stereo.
    #[serde(default)]
    pub stereo: bool,

    /// Parameter values by parameter name.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

impl Block {
    /// Create an enabled mono block at position 0 with no parameters.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            type_code: 0,
            enabled: true,
            position: 0,
            stereo: false,
            params: BTreeMap::new(),
        }
    }

    /// Set the numeric type code.
    pub fn with_type(mut self, type_code: i32) -> Self {
        self.type_code = type_code;
        self
    }

    /// Set the position within the path.
    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    /// Set the stored enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the stereo flag.
    pub fn with_stereo(mut self, stereo: bool) -> Self {
        self.stereo = stereo;
        self
    }

    /// Add or replace a parameter value.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Look up a parameter value.
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }
}

/// Blocks of one DSP path keyed by their path-local key (e.g. `block3`).
///
/// The map itself carries no order; chain order comes from [`Block::position`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DspPath {
    blocks: BTreeMap<String, Block>,
}

impl DspPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block under `key`.
    pub fn with_block(mut self, key: impl Into<String>, block: Block) -> Self {
        self.blocks.insert(key.into(), block);
        self
    }

    /// Insert or replace a block, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, block: Block) -> Option<Block> {
        self.blocks.insert(key.into(), block)
    }

    /// Look up a block by key.
    pub fn get(&self, key: &str) -> Option<&Block> {
        self.blocks.get(key)
    }

    /// Whether a block exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.blocks.contains_key(key)
    }

    /// Iterate `(key, block)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Block)> {
        self.blocks.iter().map(|(k, b)| (k.as_str(), b))
    }

    /// Number of blocks on the path.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the path has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Per-path map from block key to a value, as used by the controller table and
/// snapshot override tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathMap<T> {
    /// Entries for blocks on path 0.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub path0: BTreeMap<String, T>,
    /// Entries for blocks on path 1.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub path1: BTreeMap<String, T>,
}

impl<T> Default for PathMap<T> {
    fn default() -> Self {
        Self {
            path0: BTreeMap::new(),
            path1: BTreeMap::new(),
        }
    }
}

impl<T> PathMap<T> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries for one path.
    pub fn get(&self, path: PathId) -> &BTreeMap<String, T> {
        match path {
            PathId::Path0 => &self.path0,
            PathId::Path1 => &self.path1,
        }
    }

    /// Mutable entries for one path.
    pub fn get_mut(&mut self, path: PathId) -> &mut BTreeMap<String, T> {
        match path {
            PathId::Path0 => &mut self.path0,
            PathId::Path1 => &mut self.path1,
        }
    }

    /// Entry for an exact (path, key).
    pub fn entry(&self, path: PathId, key: &str) -> Option<&T> {
        self.get(path).get(key)
    }

    /// Insert an entry for (path, key), returning the previous one.
    pub fn insert(&mut self, path: PathId, key: impl Into<String>, value: T) -> Option<T> {
        self.get_mut(path).insert(key.into(), value)
    }

    /// Builder form of [`PathMap::insert`].
    pub fn with(mut self, path: PathId, key: impl Into<String>, value: T) -> Self {
        self.insert(path, key, value);
        self
    }

    /// Iterate `(path, key, value)` across both paths in signal order.
    pub fn iter(&self) -> impl Iterator<Item = (PathId, &str, &T)> {
        PathId::ALL
            .into_iter()
            .flat_map(move |path| self.get(path).iter().map(move |(k, v)| (path, k.as_str(), v)))
    }

    /// Whether both paths are empty.
    pub fn is_empty(&self) -> bool {
        self.path0.is_empty() && self.path1.is_empty()
    }
}

/// A parsed rig configuration: the immutable input of the resolution engine.
///
/// At least one of `path0`/`path1` must be present for the record to be
/// structurally valid; an absent path on its own is treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RigConfiguration {
    /// Optional preset name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Blocks on the first DSP path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path0: Option<DspPath>,

    /// Blocks on the second DSP path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path1: Option<DspPath>,

    /// Parameter-to-controller assignments.
    #[serde(default)]
    pub controllers: ControllerTable,

    /// Snapshots in selection order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub snapshots: Vec<SnapshotOverride>,

    /// Modeled instrument input, if the rig uses one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument: Option<InstrumentConfig>,

    /// DSP cost per model identifier.
    #[serde(default)]
    pub costs: CostTable,
}

impl RigConfiguration {
    /// Create a configuration with both paths present and empty.
    pub fn new() -> Self {
        Self {
            path0: Some(DspPath::new()),
            path1: Some(DspPath::new()),
            ..Self::default()
        }
    }

    /// Set the preset name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace one DSP path.
    pub fn with_path(mut self, path: PathId, blocks: DspPath) -> Self {
        match path {
            PathId::Path0 => self.path0 = Some(blocks),
            PathId::Path1 => self.path1 = Some(blocks),
        }
        self
    }

    /// Add a block to a path, creating the path if it is absent.
    pub fn with_block(mut self, path: PathId, key: impl Into<String>, block: Block) -> Self {
        let slot = match path {
            PathId::Path0 => &mut self.path0,
            PathId::Path1 => &mut self.path1,
        };
        slot.get_or_insert_with(DspPath::new).insert(key, block);
        self
    }

    /// Replace the controller table.
    pub fn with_controllers(mut self, controllers: ControllerTable) -> Self {
        self.controllers = controllers;
        self
    }

    /// Append a snapshot.
    pub fn with_snapshot(mut self, snapshot: SnapshotOverride) -> Self {
        self.snapshots.push(snapshot);
        self
    }

    /// Set the modeled instrument.
    pub fn with_instrument(mut self, instrument: InstrumentConfig) -> Self {
        self.instrument = Some(instrument);
        self
    }

    /// Replace the cost table.
    pub fn with_costs(mut self, costs: CostTable) -> Self {
        self.costs = costs;
        self
    }

    /// A DSP path, if present in the record.
    pub fn path(&self, path: PathId) -> Option<&DspPath> {
        match path {
            PathId::Path0 => self.path0.as_ref(),
            PathId::Path1 => self.path1.as_ref(),
        }
    }

    /// Look up a block by (path, key).
    pub fn block(&self, path: PathId, key: &str) -> Option<&Block> {
        self.path(path)?.get(key)
    }

    /// The snapshot at `index`, or `None` when out of range.
    pub fn snapshot(&self, index: usize) -> Option<&SnapshotOverride> {
        self.snapshots.get(index)
    }

    /// Total number of blocks across both paths.
    pub fn block_count(&self) -> usize {
        PathId::ALL
            .into_iter()
            .filter_map(|p| self.path(p))
            .map(DspPath::len)
            .sum()
    }

    /// Load a configuration from a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_document(path)
    }

    /// Load a configuration and run [`validate`] on it.
    ///
    /// Structural failures surface as [`ConfigError::Validation`]; warnings
    /// come back in the report.
    pub fn load_validated(path: impl AsRef<Path>) -> Result<(Self, ValidationReport), ConfigError> {
        let config = Self::load(path)?;
        let report = validate(&config)?;
        Ok((config, report))
    }

    /// Save the configuration to a `.json` or `.toml` file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        save_document(self, path)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        DocumentFormat::Json.parse(json)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        DocumentFormat::Toml.parse(toml_str)
    }

    /// Render the configuration as pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        DocumentFormat::Json.render(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_defaults_from_minimal_json() {
        let block: Block = serde_json::from_str(r#"{ "model": "HD2_ReverbHall" }"#).unwrap();
        assert_eq!(block.model, "HD2_ReverbHall");
        assert_eq!(block.type_code, 0);
        assert!(block.enabled);
        assert_eq!(block.position, 0);
        assert!(!block.stereo);
        assert!(block.params.is_empty());
    }

    #[test]
    fn param_values_keep_their_kind() {
        let block: Block = serde_json::from_str(
            r#"{ "model": "HD2_DelaySimple", "params": { "Time": 0.5, "Sync": true, "Note": "1/8" } }"#,
        )
        .unwrap();
        assert_eq!(block.param("Time"), Some(&ParamValue::Number(0.5)));
        assert_eq!(block.param("Sync"), Some(&ParamValue::Flag(true)));
        assert_eq!(block.param("Note").and_then(ParamValue::as_text), Some("1/8"));
    }

    #[test]
    fn param_value_display() {
        assert_eq!(ParamValue::Number(0.5).to_string(), "0.50");
        assert_eq!(ParamValue::from("Bright").to_string(), "Bright");
        assert_eq!(ParamValue::Flag(false).to_string(), "false");
    }

    #[test]
    fn path_id_order_and_names() {
        assert!(PathId::Path0 < PathId::Path1);
        assert_eq!(PathId::Path1.to_string(), "path1");
        assert_eq!(PathId::Path1.index(), 1);
        let parsed: PathId = serde_json::from_str("\"path0\"").unwrap();
        assert_eq!(parsed, PathId::Path0);
    }

    #[test]
    fn path_map_lookup_and_iteration() {
        let map = PathMap::new()
            .with(PathId::Path1, "block0", 1)
            .with(PathId::Path0, "block2", 2);
        assert_eq!(map.entry(PathId::Path0, "block2"), Some(&2));
        assert_eq!(map.entry(PathId::Path1, "block2"), None);
        let keys: Vec<_> = map.iter().map(|(p, k, _)| (p, k.to_string())).collect();
        assert_eq!(
            keys,
            vec![
                (PathId::Path0, "block2".to_string()),
                (PathId::Path1, "block0".to_string())
            ]
        );
    }

    #[test]
    fn with_block_creates_missing_path() {
        let rig = RigConfiguration::default().with_block(PathId::Path1, "block0", Block::new("X"));
        assert!(rig.path0.is_none());
        assert_eq!(rig.path(PathId::Path1).map(DspPath::len), Some(1));
        assert_eq!(rig.block_count(), 1);
    }

    #[test]
    fn snapshot_out_of_range_is_none() {
        let rig = RigConfiguration::new();
        assert!(rig.snapshot(0).is_none());
    }

    #[test]
    fn json_roundtrip_preserves_blocks() {
        let rig = RigConfiguration::new().with_name("Blues").with_block(
            PathId::Path0,
            "block0",
            Block::new("HD2_AmpUSDeluxe")
                .with_type(1)
                .with_param("Drive", 0.4),
        );
        let json = rig.to_json().unwrap();
        let parsed = RigConfiguration::from_json(&json).unwrap();
        assert_eq!(parsed, rig);
    }
}
