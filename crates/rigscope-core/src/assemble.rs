//! Flattening the two DSP paths into one ordered chain.

use rigscope_config::{
    Block, ControllerTable, InstrumentConfig, PathId, RigConfiguration, STRING_COUNT,
    check_structure,
};

use crate::block::{BlockId, ChainBlock};
use crate::error::Result;
use crate::variax::resolve_instrument_name;

/// Parameter carrying the resolved instrument model name.
pub const INSTRUMENT_MODEL_PARAM: &str = "Model";

/// Parameter labels of the six string tunings, high string first.
pub const STRING_LABELS: [&str; STRING_COUNT] = [
    "Str 1 (High E)",
    "Str 2 (B)",
    "Str 3 (G)",
    "Str 4 (D)",
    "Str 5 (A)",
    "Str 6 (Low E)",
];

/// Assemble the unresolved chain of a configuration.
///
/// Every path0 block precedes every path1 block; within a path blocks are
/// sorted by position, then by key. When the rig has a modeled instrument
/// that is in use, a synthesized instrument block is placed first.
///
/// # Errors
///
/// Returns [`crate::EngineError::Malformed`] when both DSP paths are absent.
pub fn assemble(config: &RigConfiguration) -> Result<Vec<ChainBlock>> {
    check_structure(config)?;

    let mut chain = Vec::with_capacity(config.block_count() + 1);
    if let Some(instrument) = config.instrument
        && instrument_in_use(&instrument, &config.controllers)
    {
        chain.push(instrument_block(&instrument));
    }

    for path in PathId::ALL {
        let Some(blocks) = config.path(path) else {
            continue;
        };
        let mut entries: Vec<(&str, &Block)> = blocks.iter().collect();
        entries.sort_by(|(ka, a), (kb, b)| a.position.cmp(&b.position).then_with(|| ka.cmp(kb)));
        chain.extend(
            entries
                .into_iter()
                .map(|(key, block)| ChainBlock::new(BlockId::path(path, key), block.clone())),
        );
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        blocks = chain.len(),
        instrument = chain.first().is_some_and(ChainBlock::is_instrument),
        "assembled chain"
    );

    Ok(chain)
}

/// Whether the instrument stage should appear in the chain.
fn instrument_in_use(instrument: &InstrumentConfig, controllers: &ControllerTable) -> bool {
    instrument.model_id != 0 || controllers.has_instrument_entries()
}

/// Synthesize the instrument input block.
///
/// The block's model is the resolved instrument name. It always starts
/// enabled and exposes the name under [`INSTRUMENT_MODEL_PARAM`], plus the
/// string tunings when custom tuning is on.
pub fn instrument_block(instrument: &InstrumentConfig) -> ChainBlock {
    let name = resolve_instrument_name(instrument.model_id, instrument.family);
    let mut block = Block::new(name.clone()).with_param(INSTRUMENT_MODEL_PARAM, name);
    if instrument.custom_tuning {
        for (label, tuning) in STRING_LABELS.iter().zip(instrument.string_tunings) {
            block = block.with_param(*label, tuning);
        }
    }
    ChainBlock::new(BlockId::Instrument, block)
}
