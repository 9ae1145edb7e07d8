//! Display names and functional categories for chain blocks.
//!
//! Device model identifiers look like `HD2_AmpUSDeluxe` or `VIC_ReverbPlate`.
//! [`display_name`] turns them into readable labels and [`category_for`]
//! sorts them into a small set of functional groups used for rendering and
//! for matching free-text references.

use serde::Serialize;

use crate::block::ChainBlock;

/// Vendor prefixes stripped from model identifiers before display.
const VENDOR_PREFIXES: &[&str] = &["HD2_", "VIC_", "L6SPB_", "L6C_"];

/// Functional category of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockCategory {
    /// Amplifier models
    Amp,
    /// Cabinet and impulse-response blocks
    Cab,
    /// Overdrive, distortion and fuzz
    Distortion,
    /// Delays
    Delay,
    /// Reverbs
    Reverb,
    /// Compressors and other dynamics processors
    Dynamics,
    /// Chorus, tremolo, phaser and other modulation
    Modulation,
    /// The modeled-instrument input stage
    Instrument,
    /// Anything else
    Effect,
}

impl BlockCategory {
    /// Returns a human-readable name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            BlockCategory::Amp => "Amp",
            BlockCategory::Cab => "Cab",
            BlockCategory::Distortion => "Distortion",
            BlockCategory::Delay => "Delay",
            BlockCategory::Reverb => "Reverb",
            BlockCategory::Dynamics => "Dynamics",
            BlockCategory::Modulation => "Modulation",
            BlockCategory::Instrument => "Instrument",
            BlockCategory::Effect => "Effect",
        }
    }

    /// Short badge label shown on a block.
    pub const fn label(&self) -> &'static str {
        match self {
            BlockCategory::Amp => "AMP",
            BlockCategory::Cab => "CAB",
            BlockCategory::Distortion => "DIST",
            BlockCategory::Delay => "DLY",
            BlockCategory::Reverb => "REV",
            BlockCategory::Dynamics => "DYN",
            BlockCategory::Modulation => "MOD",
            BlockCategory::Instrument => "VARX",
            BlockCategory::Effect => "FX",
        }
    }
}

/// Keyword rules tried in order against the lowercased model identifier.
const KEYWORD_RULES: &[(&[&str], BlockCategory)] = &[
    (&["cab", "micir"], BlockCategory::Cab),
    (&["dist", "kinky", "scream", "deez"], BlockCategory::Distortion),
    (&["delay"], BlockCategory::Delay),
    (&["reverb"], BlockCategory::Reverb),
    (&["comp", "dynamics"], BlockCategory::Dynamics),
    (&["mod", "chorus", "tremolo", "poly"], BlockCategory::Modulation),
];

/// Display name and category of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Readable block name.
    pub display_name: String,
    /// Functional category.
    pub category: BlockCategory,
}

/// Classify an assembled chain block.
///
/// The instrument stage keeps its resolved model name verbatim and is always
/// [`BlockCategory::Instrument`].
pub fn classify(block: &ChainBlock) -> Classification {
    if block.is_instrument() {
        return Classification {
            display_name: block.block.model.clone(),
            category: BlockCategory::Instrument,
        };
    }
    Classification {
        display_name: display_name(&block.block.model),
        category: category_for(&block.block.model, block.block.type_code),
    }
}

/// Category from a type code, falling back to model keywords.
///
/// Type codes 1–3 are amps and 4 is a cab; otherwise the first matching
/// keyword rule wins and unmatched models are [`BlockCategory::Effect`].
pub fn category_for(model: &str, type_code: i32) -> BlockCategory {
    match type_code {
        1..=3 => return BlockCategory::Amp,
        4 => return BlockCategory::Cab,
        _ => {}
    }
    let model = model.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| model.contains(k)))
        .map_or(BlockCategory::Effect, |(_, category)| *category)
}

/// Readable name for a raw model identifier.
///
/// Strips vendor prefixes, turns underscores into spaces and splits
/// camel-case words. Runs of capitals stay together (`USDeluxe` becomes
/// `US Deluxe`).
pub fn display_name(model: &str) -> String {
    let mut stripped = model.trim();
    while let Some(rest) = VENDOR_PREFIXES
        .iter()
        .find_map(|prefix| stripped.strip_prefix(prefix))
    {
        stripped = rest;
    }

    let chars: Vec<char> = stripped.replace('_', " ").chars().collect();
    let mut out = String::with_capacity(chars.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let starts_word = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if starts_word {
                out.push(' ');
            }
        }
        out.push(c);
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockId;
    use rigscope_config::{Block, PathId};

    #[test]
    fn display_name_strips_prefix_and_splits_words() {
        assert_eq!(display_name("HD2_AmpUSDeluxe"), "Amp US Deluxe");
        assert_eq!(display_name("VIC_ReverbPlate"), "Reverb Plate");
        assert_eq!(display_name("L6C_Cab_4x12"), "Cab 4x12");
        assert_eq!(display_name("BassBoost"), "Bass Boost");
        assert_eq!(display_name("T-Rex Distortion Pro"), "T-Rex Distortion Pro");
    }

    #[test]
    fn display_name_keeps_capital_runs_together() {
        assert_eq!(display_name("HD2_DistKWB"), "Dist KWB");
        assert_eq!(display_name("HD2_AmpUSDeluxe"), "Amp US Deluxe");
        assert_eq!(display_name("HD2_DelayAdriaticSwell"), "Delay Adriatic Swell");
        assert!(display_name("HD2_AmpUSDeluxe").to_lowercase().contains("us deluxe"));
    }

    #[test]
    fn display_name_of_empty_model_is_empty() {
        assert_eq!(display_name(""), "");
        assert_eq!(display_name("HD2_"), "");
    }

    #[test]
    fn type_codes_take_precedence() {
        assert_eq!(category_for("HD2_ReverbPlate", 1), BlockCategory::Amp);
        assert_eq!(category_for("HD2_Whatever", 3), BlockCategory::Amp);
        assert_eq!(category_for("HD2_DelaySimple", 4), BlockCategory::Cab);
    }

    #[test]
    fn keyword_rules_in_order() {
        assert_eq!(category_for("HD2_Cab4x12Greenback", 0), BlockCategory::Cab);
        assert_eq!(category_for("HD2_ImpulseMicIR", 0), BlockCategory::Cab);
        assert_eq!(category_for("T-Rex Distortion Pro", 0), BlockCategory::Distortion);
        assert_eq!(category_for("HD2_DistScream808", 0), BlockCategory::Distortion);
        assert_eq!(category_for("HD2_DelayCompulsive", 0), BlockCategory::Delay);
        assert_eq!(category_for("HD2_ReverbHall", 0), BlockCategory::Reverb);
        assert_eq!(category_for("HD2_CompressorDeluxeComp", 0), BlockCategory::Dynamics);
        assert_eq!(category_for("HD2_Chorus70sChorus", 0), BlockCategory::Modulation);
        assert_eq!(category_for("HD2_PolyCapo", 0), BlockCategory::Modulation);
        assert_eq!(category_for("HD2_VolPanGain", 0), BlockCategory::Effect);
    }

    #[test]
    fn instrument_block_is_always_instrument() {
        let block = ChainBlock::new(BlockId::Instrument, Block::new("Lester 3").with_type(1));
        let c = classify(&block);
        assert_eq!(c.category, BlockCategory::Instrument);
        assert_eq!(c.display_name, "Lester 3");
    }

    #[test]
    fn classify_path_block() {
        let block = ChainBlock::new(
            BlockId::path(PathId::Path0, "block0"),
            Block::new("HD2_DelaySimple"),
        );
        let c = classify(&block);
        assert_eq!(c.display_name, "Delay Simple");
        assert_eq!(c.category, BlockCategory::Delay);
        assert_eq!(c.category.label(), "DLY");
    }
}
