//! Per-snapshot resolution of an assembled chain.
//!
//! Two sources can say what a snapshot does to a block:
//!
//! - **Technical** overrides from the device's own snapshot tables. These are
//!   exact and always win for the block they name.
//! - **Abstract** hints from a design description. These name blocks in free
//!   text and are matched with a [`BlockMatcher`]. They decide enabled state
//!   only when the snapshot has no technical enabled map at all, and never
//!   change parameter values.
//!
//! With a technical enabled map present, blocks it does not name keep their
//! stored state. Resolution is
//! a pure function of the chain, the configuration and the snapshot index.

use rigscope_config::{
    AbstractSnapshotHint, Block, InstrumentConfig, ParamValue, RigConfiguration, SnapshotOverride,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::assemble::instrument_block;
use crate::block::{BlockId, ChainBlock};
use crate::classify::{BlockCategory, classify};
use crate::matching::{BlockMatcher, SubstringMatcher};
use crate::variax::GENERIC_INSTRUMENT_LABEL;

/// Which source decided a block's enabled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnabledSource {
    /// The snapshot's technical enabled map named this block.
    Technical,
    /// The snapshot's abstract hint decided.
    Hint,
    /// The block's own stored flag.
    Stored,
}

/// A block with its effective state for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedBlock {
    /// Block identity.
    pub id: BlockId,
    /// The underlying block as stored (or synthesized).
    pub block: Block,
    /// Effective enabled state.
    pub enabled: bool,
    /// Source of [`ResolvedBlock::enabled`].
    pub enabled_source: EnabledSource,
    /// Effective parameter values with technical overrides applied.
    pub params: BTreeMap<String, ParamValue>,
    /// Parameters the controller table routes through snapshot state.
    pub snapshot_controlled: BTreeSet<String>,
    /// Whether the snapshot implies a change on this block.
    pub design_shift: bool,
    /// Readable name.
    pub display_name: String,
    /// Functional category.
    pub category: BlockCategory,
    /// DSP cost of the block's model.
    pub dsp_cost: f64,
    /// Names of every snapshot whose hint references this block.
    pub active_in_snapshots: Vec<String>,
}

impl ResolvedBlock {
    /// Whether the block runs in stereo.
    pub fn is_stereo(&self) -> bool {
        self.block.stereo
    }

    /// `"Stereo"` or `"Mono"`.
    pub fn channel_label(&self) -> &'static str {
        if self.is_stereo() { "Stereo" } else { "Mono" }
    }

    /// Whether this is the synthesized instrument stage.
    pub fn is_instrument(&self) -> bool {
        self.id.is_instrument()
    }
}

/// Index and name of the snapshot a chain was resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    /// Zero-based snapshot index.
    pub index: usize,
    /// Snapshot name.
    pub name: String,
}

/// The resolved, ordered chain for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedChain {
    /// Selected snapshot, `None` when the index was out of range.
    pub snapshot: Option<SnapshotSummary>,
    /// Blocks in chain order.
    pub blocks: Vec<ResolvedBlock>,
}

impl ResolvedChain {
    /// Blocks in chain order.
    pub fn blocks(&self) -> &[ResolvedBlock] {
        &self.blocks
    }

    /// Iterate blocks in chain order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedBlock> {
        self.blocks.iter()
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the chain has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Look up a block by identity.
    pub fn get(&self, id: &BlockId) -> Option<&ResolvedBlock> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    /// The synthesized instrument stage, if present.
    pub fn instrument(&self) -> Option<&ResolvedBlock> {
        self.blocks.iter().find(|b| b.is_instrument())
    }

    /// Blocks that are effectively enabled.
    pub fn enabled_blocks(&self) -> impl Iterator<Item = &ResolvedBlock> {
        self.blocks.iter().filter(|b| b.enabled)
    }
}

impl<'a> IntoIterator for &'a ResolvedChain {
    type Item = &'a ResolvedBlock;
    type IntoIter = std::slice::Iter<'a, ResolvedBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Resolves assembled chains against snapshots.
#[derive(Debug, Clone, Default)]
pub struct SnapshotResolver<M = SubstringMatcher> {
    matcher: M,
}

impl SnapshotResolver {
    /// Resolver using [`SubstringMatcher`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: BlockMatcher> SnapshotResolver<M> {
    /// Resolver using a custom matcher.
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// The matcher used for abstract hints.
    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Resolve `chain` for the snapshot at `index`.
    ///
    /// An out-of-range index resolves as if no snapshot were selected: stored
    /// enabled flags, stored parameters, nothing flagged.
    pub fn resolve(
        &self,
        chain: &[ChainBlock],
        config: &RigConfiguration,
        index: usize,
    ) -> ResolvedChain {
        let snapshot = config.snapshot(index);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            index,
            selected = snapshot.map(|s| s.name.as_str()),
            blocks = chain.len(),
            "resolving snapshot"
        );

        let blocks = chain
            .iter()
            .map(|entry| match (&entry.id, config.instrument) {
                (BlockId::Instrument, Some(base)) => {
                    let merged = merged_instrument(base, snapshot);
                    self.resolve_block(&instrument_block(&merged), config, snapshot)
                }
                _ => self.resolve_block(entry, config, snapshot),
            })
            .collect();

        ResolvedChain {
            snapshot: snapshot.map(|s| SnapshotSummary {
                index,
                name: s.name.clone(),
            }),
            blocks,
        }
    }

    fn resolve_block(
        &self,
        entry: &ChainBlock,
        config: &RigConfiguration,
        snapshot: Option<&SnapshotOverride>,
    ) -> ResolvedBlock {
        let classification = classify(entry);
        let candidates = match_candidates(entry, &classification.display_name);

        let (enabled, enabled_source) = self.resolve_enabled(entry, &candidates, snapshot);
        let params = resolved_params(entry, snapshot);
        let snapshot_controlled = if snapshot.is_some() {
            snapshot_controlled(entry, config)
        } else {
            BTreeSet::new()
        };
        let hinted = snapshot
            .and_then(|s| s.hint.as_ref())
            .is_some_and(|hint| self.hint_params_reference(hint, &candidates));
        let design_shift = !snapshot_controlled.is_empty() || hinted;

        let active_in_snapshots = config
            .snapshots
            .iter()
            .filter(|s| {
                s.hint
                    .as_ref()
                    .is_some_and(|hint| self.hint_activates(hint, &candidates))
            })
            .map(|s| s.name.clone())
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(block = %entry.id, enabled, source = ?enabled_source, design_shift, "resolved block");

        ResolvedBlock {
            id: entry.id.clone(),
            block: entry.block.clone(),
            enabled,
            enabled_source,
            params,
            snapshot_controlled,
            design_shift,
            display_name: classification.display_name,
            category: classification.category,
            dsp_cost: config.costs.cost_of(&entry.block.model),
            active_in_snapshots,
        }
    }

    fn resolve_enabled(
        &self,
        entry: &ChainBlock,
        candidates: &[&str],
        snapshot: Option<&SnapshotOverride>,
    ) -> (bool, EnabledSource) {
        let stored = (entry.block.enabled, EnabledSource::Stored);
        let Some(snapshot) = snapshot else {
            return stored;
        };
        // The input stage cannot be switched off by a snapshot.
        let BlockId::Path { path, key } = &entry.id else {
            return stored;
        };

        if snapshot.blocks.is_some() {
            return match snapshot.block_enabled(*path, key) {
                Some(enabled) => (enabled, EnabledSource::Technical),
                None => stored,
            };
        }
        match &snapshot.hint {
            Some(hint) if !hint.active_blocks.is_empty() => {
                (self.hint_activates(hint, candidates), EnabledSource::Hint)
            }
            _ => stored,
        }
    }

    fn hint_activates(&self, hint: &AbstractSnapshotHint, candidates: &[&str]) -> bool {
        hint.active_blocks
            .iter()
            .any(|reference| self.matcher.matches_any(reference, candidates))
    }

    fn hint_params_reference(&self, hint: &AbstractSnapshotHint, candidates: &[&str]) -> bool {
        hint.params
            .keys()
            .any(|reference| self.matcher.matches_any(reference, candidates))
    }
}

/// Resolve `chain` for the snapshot at `index` with the default matcher.
pub fn resolve(chain: &[ChainBlock], config: &RigConfiguration, index: usize) -> ResolvedChain {
    SnapshotResolver::new().resolve(chain, config, index)
}

/// Names a free-text reference may use for a block.
fn match_candidates<'a>(entry: &'a ChainBlock, display_name: &'a str) -> Vec<&'a str> {
    if entry.is_instrument() {
        vec![display_name, GENERIC_INSTRUMENT_LABEL]
    } else {
        vec![display_name, entry.block.model.as_str()]
    }
}

/// Instrument settings in effect for a snapshot.
///
/// Technical instrument controllers win; a non-empty legacy override is used
/// otherwise. Only fields present in the override replace base fields.
fn merged_instrument(base: InstrumentConfig, snapshot: Option<&SnapshotOverride>) -> InstrumentConfig {
    let Some(snapshot) = snapshot else {
        return base;
    };
    if let Some(over) = &snapshot.instrument_controllers {
        return base.merged(over);
    }
    match &snapshot.instrument {
        Some(over) if !over.is_empty() => base.merged(over),
        _ => base,
    }
}

fn resolved_params(
    entry: &ChainBlock,
    snapshot: Option<&SnapshotOverride>,
) -> BTreeMap<String, ParamValue> {
    let mut params = entry.block.params.clone();
    let (Some(snapshot), BlockId::Path { path, key }) = (snapshot, &entry.id) else {
        return params;
    };
    for (name, value) in &mut params {
        if let Some(over) = snapshot.param_value(*path, key, name) {
            *value = ParamValue::Number(over);
        }
    }
    params
}

fn snapshot_controlled(entry: &ChainBlock, config: &RigConfiguration) -> BTreeSet<String> {
    let controllers = match &entry.id {
        BlockId::Instrument => Some(&config.controllers.instrument),
        BlockId::Path { path, key } => config.controllers.block(*path, key),
    };
    controllers
        .into_iter()
        .flatten()
        .filter(|(_, assignment)| assignment.is_snapshot())
        .map(|(param, _)| param.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use crate::matching::ExactMatcher;
    use rigscope_config::{
        ControllerAssignment, ControllerKind, ControllerTable, CostTable, InstrumentFamily,
        InstrumentOverride, PathId,
    };
    use serde_json::json;

    fn boost_rig() -> RigConfiguration {
        RigConfiguration::new().with_block(
            PathId::Path0,
            "blockA",
            Block::new("BassBoost").with_position(0).with_param("Gain", 0.5),
        )
    }

    fn resolve_rig(rig: &RigConfiguration, index: usize) -> ResolvedChain {
        resolve(&assemble(rig).unwrap(), rig, index)
    }

    #[test]
    fn hint_enables_matching_block() {
        let rig = boost_rig().with_snapshot(
            SnapshotOverride::new("Boost").with_hint(AbstractSnapshotHint::active(["boost"])),
        );
        let chain = resolve_rig(&rig, 0);
        assert!(chain.blocks[0].enabled);
        assert_eq!(chain.blocks[0].enabled_source, EnabledSource::Hint);
        assert_eq!(chain.blocks[0].active_in_snapshots, ["Boost"]);
    }

    #[test]
    fn hint_disables_unreferenced_block() {
        let rig = boost_rig().with_snapshot(
            SnapshotOverride::new("Ambient").with_hint(AbstractSnapshotHint::active(["reverb"])),
        );
        let chain = resolve_rig(&rig, 0);
        assert!(!chain.blocks[0].enabled);
        assert_eq!(chain.blocks[0].enabled_source, EnabledSource::Hint);
        assert!(chain.blocks[0].active_in_snapshots.is_empty());
    }

    #[test]
    fn technical_override_beats_hint() {
        let rig = boost_rig().with_snapshot(
            SnapshotOverride::new("Clean")
                .with_block_enabled(PathId::Path0, "blockA", false)
                .with_hint(AbstractSnapshotHint::active(["boost"])),
        );
        let chain = resolve_rig(&rig, 0);
        assert!(!chain.blocks[0].enabled);
        assert_eq!(chain.blocks[0].enabled_source, EnabledSource::Technical);
    }

    #[test]
    fn technical_map_without_entry_keeps_stored_flag() {
        let rig = boost_rig()
            .with_block(PathId::Path0, "blockB", Block::new("HD2_ReverbPlate").with_position(1))
            .with_snapshot(
                SnapshotOverride::new("Mixed")
                    .with_block_enabled(PathId::Path0, "blockA", true)
                    .with_hint(AbstractSnapshotHint::active(["boost"])),
            );
        let chain = resolve_rig(&rig, 0);
        assert!(chain.blocks[0].enabled);
        assert_eq!(chain.blocks[0].enabled_source, EnabledSource::Technical);
        assert!(chain.blocks[1].enabled);
        assert_eq!(chain.blocks[1].enabled_source, EnabledSource::Stored);
    }

    #[test]
    fn params_only_snapshot_still_uses_hint() {
        let rig = boost_rig()
            .with_block(PathId::Path0, "blockB", Block::new("HD2_ReverbPlate").with_position(1))
            .with_snapshot(
                SnapshotOverride::new("Hot")
                    .with_param_value(PathId::Path0, "blockA", "Gain", 0.9)
                    .with_hint(AbstractSnapshotHint::active(["plate"])),
            );
        let chain = resolve_rig(&rig, 0);
        assert!(!chain.blocks[0].enabled);
        assert_eq!(chain.blocks[0].enabled_source, EnabledSource::Hint);
        assert_eq!(chain.blocks[0].params["Gain"], ParamValue::Number(0.9));
        assert!(chain.blocks[1].enabled);
        assert_eq!(chain.blocks[1].enabled_source, EnabledSource::Hint);
    }

    #[test]
    fn empty_hint_list_keeps_stored_flag() {
        let rig = RigConfiguration::new()
            .with_block(PathId::Path0, "b", Block::new("HD2_DelaySimple").with_enabled(false))
            .with_snapshot(SnapshotOverride::new("S").with_hint(AbstractSnapshotHint::default()));
        let chain = resolve_rig(&rig, 0);
        assert!(!chain.blocks[0].enabled);
        assert_eq!(chain.blocks[0].enabled_source, EnabledSource::Stored);
    }

    #[test]
    fn out_of_range_index_is_no_snapshot() {
        let rig = boost_rig()
            .with_controllers(ControllerTable::new().with_block_param(
                PathId::Path0,
                "blockA",
                "Gain",
                ControllerAssignment::snapshot(),
            ))
            .with_snapshot(
                SnapshotOverride::new("Off")
                    .with_block_enabled(PathId::Path0, "blockA", false)
                    .with_param_value(PathId::Path0, "blockA", "Gain", 0.9),
            );
        let chain = resolve_rig(&rig, 3);
        let block = &chain.blocks[0];
        assert!(chain.snapshot.is_none());
        assert!(block.enabled);
        assert_eq!(block.params["Gain"], ParamValue::Number(0.5));
        assert!(block.snapshot_controlled.is_empty());
        assert!(!block.design_shift);
    }

    #[test]
    fn technical_params_replace_existing_values_only() {
        let rig = boost_rig().with_snapshot(
            SnapshotOverride::new("Hot")
                .with_param_value(PathId::Path0, "blockA", "Gain", 0.9)
                .with_param_value(PathId::Path0, "blockA", "Missing", 1.0),
        );
        let chain = resolve_rig(&rig, 0);
        let params = &chain.blocks[0].params;
        assert_eq!(params["Gain"], ParamValue::Number(0.9));
        assert!(!params.contains_key("Missing"));
        assert_eq!(chain.blocks[0].block.params["Gain"], ParamValue::Number(0.5));
    }

    #[test]
    fn hint_params_flag_shift_without_changing_values() {
        let rig = boost_rig().with_snapshot(
            SnapshotOverride::new("Hint")
                .with_hint(AbstractSnapshotHint::default().with_param("Bass Boost", json!({ "Gain": 1.0 }))),
        );
        let block = &resolve_rig(&rig, 0).blocks[0];
        assert!(block.design_shift);
        assert!(block.snapshot_controlled.is_empty());
        assert_eq!(block.params["Gain"], ParamValue::Number(0.5));
    }

    #[test]
    fn snapshot_controllers_flag_shift() {
        let rig = boost_rig()
            .with_controllers(
                ControllerTable::new()
                    .with_block_param(PathId::Path0, "blockA", "Gain", ControllerAssignment::snapshot())
                    .with_block_param(
                        PathId::Path0,
                        "blockA",
                        "Level",
                        ControllerAssignment::new(ControllerKind::Other(2)),
                    ),
            )
            .with_snapshot(SnapshotOverride::new("S"));
        let block = &resolve_rig(&rig, 0).blocks[0];
        assert_eq!(block.snapshot_controlled.iter().collect::<Vec<_>>(), ["Gain"]);
        assert!(block.design_shift);
    }

    #[test]
    fn instrument_merge_prefers_technical_controllers() {
        let rig = RigConfiguration::new()
            .with_instrument(InstrumentConfig::new(18, InstrumentFamily::Jtv))
            .with_snapshot(
                SnapshotOverride::new("Acoustic")
                    .with_instrument_controllers(InstrumentOverride::model(50))
                    .with_instrument(InstrumentOverride::model(6)),
            )
            .with_snapshot(SnapshotOverride::new("Legacy").with_instrument(InstrumentOverride::model(6)))
            .with_snapshot(
                SnapshotOverride::new("Empty").with_instrument(InstrumentOverride::default()),
            );

        let name_at = |i| resolve_rig(&rig, i).instrument().unwrap().display_name.clone();
        assert_eq!(name_at(0), "Acoustic 1");
        assert_eq!(name_at(1), "T-Model 5");
        assert_eq!(name_at(2), "Lester 3");
        assert_eq!(name_at(9), "Lester 3");
    }

    #[test]
    fn instrument_is_first_enabled_and_matched_as_variax() {
        let rig = boost_rig()
            .with_instrument(InstrumentConfig::new(1, InstrumentFamily::Shuriken))
            .with_snapshot(
                SnapshotOverride::new("Lead").with_hint(AbstractSnapshotHint::active(["variax"])),
            );
        let chain = resolve_rig(&rig, 0);
        let instrument = &chain.blocks[0];
        assert!(instrument.is_instrument());
        assert!(instrument.enabled);
        assert_eq!(instrument.category, BlockCategory::Instrument);
        assert_eq!(instrument.active_in_snapshots, ["Lead"]);
        assert!(!chain.blocks[1].enabled);
    }

    #[test]
    fn costs_and_channel_labels() {
        let rig = boost_rig()
            .with_block(PathId::Path1, "b", Block::new("HD2_ReverbPlate").with_stereo(true))
            .with_costs(CostTable::new().with_cost("BassBoost", 4.5));
        let chain = resolve_rig(&rig, 0);
        assert_eq!(chain.blocks[0].dsp_cost, 4.5);
        assert_eq!(chain.blocks[0].channel_label(), "Mono");
        assert_eq!(chain.blocks[1].dsp_cost, 0.0);
        assert_eq!(chain.blocks[1].channel_label(), "Stereo");
    }

    #[test]
    fn custom_matcher_changes_tolerance() {
        let rig = boost_rig().with_snapshot(
            SnapshotOverride::new("Boost").with_hint(AbstractSnapshotHint::active(["boost"])),
        );
        let chain = assemble(&rig).unwrap();
        let strict = SnapshotResolver::with_matcher(ExactMatcher).resolve(&chain, &rig, 0);
        assert!(!strict.blocks[0].enabled);
        let exact = rig.clone().with_snapshot(
            SnapshotOverride::new("Exact").with_hint(AbstractSnapshotHint::active(["bass boost"])),
        );
        let strict = SnapshotResolver::with_matcher(ExactMatcher).resolve(&chain, &exact, 1);
        assert!(strict.blocks[0].enabled);
    }

    #[test]
    fn lookup_helpers() {
        let rig = boost_rig().with_snapshot(SnapshotOverride::new("Only"));
        let chain = resolve_rig(&rig, 0);
        assert_eq!(
            chain.snapshot,
            Some(SnapshotSummary {
                index: 0,
                name: "Only".to_string()
            })
        );
        let id = BlockId::path(PathId::Path0, "blockA");
        assert_eq!(chain.get(&id).map(|b| b.display_name.as_str()), Some("Bass Boost"));
        assert!(chain.instrument().is_none());
        assert_eq!(chain.enabled_blocks().count(), 1);
        assert_eq!((&chain).into_iter().count(), chain.len());
    }
}
