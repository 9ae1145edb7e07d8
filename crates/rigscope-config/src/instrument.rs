//! Modeled-instrument (Variax) input configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of strings on a modeled instrument.
pub const STRING_COUNT: usize = 6;

/// Instrument family; selects the bank-name table used to decode model ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentFamily {
    /// JTV / standard Variax guitars.
    #[default]
    Jtv,
    /// Shuriken Variax.
    Shuriken,
}

impl InstrumentFamily {
    /// Lowercase tag used in records and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            InstrumentFamily::Jtv => "jtv",
            InstrumentFamily::Shuriken => "shuriken",
        }
    }
}

impl fmt::Display for InstrumentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InstrumentFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jtv" => Ok(InstrumentFamily::Jtv),
            "shuriken" => Ok(InstrumentFamily::Shuriken),
            other => Err(format!("unknown instrument family '{other}' (expected jtv or shuriken)")),
        }
    }
}

/// Base modeled-instrument settings of a rig.
///
/// `string_tunings[0]` is string 1 (high E), `string_tunings[5]` is string 6
/// (low E). Values are semitone offsets from standard tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Encoded model id; 0 means "no model selected".
    #[serde(default)]
    pub model_id: u32,

    /// Instrument family.
    #[serde(default)]
    pub family: InstrumentFamily,

    /// Whether the per-string tunings are in effect.
    #[serde(default)]
    pub custom_tuning: bool,

    /// Per-string tuning offsets, high E first.
    #[serde(default)]
    pub string_tunings: [i32; STRING_COUNT],
}

impl InstrumentConfig {
    /// Instrument of `family` with model id `model_id` and standard tuning.
    pub fn new(model_id: u32, family: InstrumentFamily) -> Self {
        Self {
            model_id,
            family,
            ..Self::default()
        }
    }

    /// Enable custom tuning with the given offsets.
    pub fn with_tunings(mut self, string_tunings: [i32; STRING_COUNT]) -> Self {
        self.custom_tuning = true;
        self.string_tunings = string_tunings;
        self
    }

    /// Apply the fields an override carries; absent fields keep the base value.
    pub fn merged(&self, over: &InstrumentOverride) -> Self {
        Self {
            model_id: over.model_id.unwrap_or(self.model_id),
            family: self.family,
            custom_tuning: over.custom_tuning.unwrap_or(self.custom_tuning),
            string_tunings: over.string_tunings.unwrap_or(self.string_tunings),
        }
    }
}

/// Per-snapshot instrument fields. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentOverride {
    /// Replacement model id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<u32>,

    /// Replacement custom-tuning flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_tuning: Option<bool>,

    /// Replacement per-string tunings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_tunings: Option<[i32; STRING_COUNT]>,
}

impl InstrumentOverride {
    /// Override that only switches the model.
    pub fn model(model_id: u32) -> Self {
        Self {
            model_id: Some(model_id),
            ..Self::default()
        }
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.model_id.is_none() && self.custom_tuning.is_none() && self.string_tunings.is_none()
    }
}
