//! Rigscope Core - snapshot resolution for multi-DSP guitar rigs
//!
//! Takes a parsed [`RigConfiguration`](rigscope_config::RigConfiguration) and
//! produces, for one selected snapshot, a flat ordered view of the signal chain
//! with each block's effective state and derived metadata.
//!
//! # Pipeline
//!
//! - [`assemble`] - flatten path0 and path1 into one ordered chain, with the
//!   synthesized instrument stage first when the rig uses one
//! - [`resolve`] / [`SnapshotResolver`] - effective enabled state and
//!   parameters per block, technical overrides first, abstract hints second
//! - [`budget`] - static DSP cost of the chain and its [`BudgetLevel`]
//! - [`resolve_rig`] / [`RigEngine`] - all of the above in one call
//!
//! # Building Blocks
//!
//! - [`classify`] - display name and [`BlockCategory`] of a block
//! - [`BlockMatcher`] - free-text reference matching ([`SubstringMatcher`] by
//!   default)
//! - [`resolve_instrument_name`] - Variax model id to bank and variant label
//!
//! # Tracing
//!
//! Enable the `tracing` feature to emit debug events for assembly, per-block
//! resolution and budget classification.
//!
//! # Example
//!
//! ```rust
//! use rigscope_config::{
//!     AbstractSnapshotHint, Block, PathId, RigConfiguration, SnapshotOverride,
//! };
//! use rigscope_core::{EnabledSource, resolve_rig};
//!
//! let rig = RigConfiguration::new()
//!     .with_block(PathId::Path0, "blockA", Block::new("BassBoost"))
//!     .with_snapshot(
//!         SnapshotOverride::new("Clean")
//!             .with_block_enabled(PathId::Path0, "blockA", false)
//!             .with_hint(AbstractSnapshotHint::active(["boost"])),
//!     );
//!
//! let view = resolve_rig(&rig, 0).unwrap();
//! let block = &view.chain.blocks[0];
//! assert!(!block.enabled);
//! assert_eq!(block.enabled_source, EnabledSource::Technical);
//! ```

pub mod assemble;
pub mod block;
pub mod budget;
pub mod classify;
pub mod error;
pub mod matching;
pub mod resolve;
pub mod rig;
pub mod variax;

pub use assemble::{INSTRUMENT_MODEL_PARAM, STRING_LABELS, assemble, instrument_block};
pub use block::{BlockId, ChainBlock};
pub use budget::{
    BudgetLevel, DspBudget, ELEVATED_THRESHOLD, OVER_BUDGET_THRESHOLD, PLATFORM_CEILING, budget,
};
pub use classify::{BlockCategory, Classification, category_for, classify, display_name};
pub use error::{EngineError, Result};
pub use matching::{BlockMatcher, ExactMatcher, SubstringMatcher};
pub use resolve::{
    EnabledSource, ResolvedBlock, ResolvedChain, SnapshotResolver, SnapshotSummary, resolve,
};
pub use rig::{RigEngine, RigView, resolve_rig};
pub use variax::{
    BANK_COUNT, BANK_SIZE, GENERIC_INSTRUMENT_LABEL, ModelSlot, bank_names, decode_model_id,
    resolve_instrument_name,
};
