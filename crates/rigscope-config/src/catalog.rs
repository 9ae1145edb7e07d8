//! DSP cost lookup and the model catalog it can be built from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::document::load_document;
use crate::error::ConfigError;

/// Cost assumed for catalog models that do not declare a mono cost.
pub const DEFAULT_CATALOG_COST: f64 = 3.0;

/// One entry of the device model catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Device model identifier.
    #[serde(rename = "InternalName")]
    pub internal_name: String,
    /// Marketing name of the model.
    #[serde(rename = "Name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Real-world gear the model is based on.
    #[serde(rename = "BasedOn", default, skip_serializing_if = "String::is_empty")]
    pub based_on: String,
    /// DSP cost of a mono instance.
    #[serde(rename = "DSP_Mono", default)]
    pub dsp_mono: f64,
    /// DSP cost of a stereo instance.
    #[serde(rename = "DSP_Stereo", default)]
    pub dsp_stereo: f64,
}

/// Model identifier → DSP cost.
///
/// Missing models cost nothing: many utility blocks have negligible cost and
/// are simply left out of the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostTable {
    costs: BTreeMap<String, f64>,
}

impl CostTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from catalog entries using their mono cost.
    ///
    /// Entries with a zero mono cost get [`DEFAULT_CATALOG_COST`].
    pub fn from_catalog<'a>(entries: impl IntoIterator<Item = &'a CatalogEntry>) -> Self {
        let costs = entries
            .into_iter()
            .map(|e| {
                let cost = if e.dsp_mono == 0.0 {
                    DEFAULT_CATALOG_COST
                } else {
                    e.dsp_mono
                };
                (e.internal_name.clone(), cost)
            })
            .collect();
        Self { costs }
    }

    /// Load a JSON/TOML catalog (a list of [`CatalogEntry`]) and build a table.
    pub fn load_catalog(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let entries: Vec<CatalogEntry> = load_document(path)?;
        Ok(Self::from_catalog(&entries))
    }

    /// Add or replace a model's cost.
    pub fn with_cost(mut self, model: impl Into<String>, cost: f64) -> Self {
        self.costs.insert(model.into(), cost);
        self
    }

    /// Add or replace a model's cost.
    pub fn insert(&mut self, model: impl Into<String>, cost: f64) -> Option<f64> {
        self.costs.insert(model.into(), cost)
    }

    /// Merge another table in; its entries win.
    pub fn extend(&mut self, other: &CostTable) {
        self.costs
            .extend(other.costs.iter().map(|(k, v)| (k.clone(), *v)));
    }

    /// Declared cost of a model, if any.
    pub fn get(&self, model: &str) -> Option<f64> {
        self.costs.get(model).copied()
    }

    /// Cost of a model, 0 when unknown or unusable.
    pub fn cost_of(&self, model: &str) -> f64 {
        self.get(model).filter(|&c| Self::is_usable(c)).unwrap_or(0.0)
    }

    /// Whether a declared cost is finite and non-negative.
    pub fn is_usable(cost: f64) -> bool {
        cost.is_finite() && cost >= 0.0
    }

    /// Iterate `(model, cost)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.costs.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of models in the table.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}
