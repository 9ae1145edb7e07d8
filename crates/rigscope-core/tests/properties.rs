//! Property-based tests for rigscope-core resolution.
//!
//! Tests chain ordering, instrument placement, technical priority, Variax
//! numbering, budget additivity and idempotence over randomized rigs.

use proptest::prelude::*;
use rigscope_config::{
    AbstractSnapshotHint, Block, CostTable, InstrumentConfig, InstrumentFamily, PathId,
    RigConfiguration, SnapshotOverride,
};
use rigscope_core::{
    BlockId, EnabledSource, assemble, budget, decode_model_id, resolve, resolve_instrument_name,
};

const MODELS: &[&str] = &[
    "HD2_AmpUSDeluxe",
    "HD2_Cab4x12Greenback",
    "HD2_DistScream808",
    "HD2_DelaySimple",
    "HD2_ReverbPlate",
    "HD2_Chorus70sChorus",
    "BassBoost",
    "Unknown",
];

fn family() -> impl Strategy<Value = InstrumentFamily> {
    prop_oneof![Just(InstrumentFamily::Jtv), Just(InstrumentFamily::Shuriken)]
}

/// Blocks as (path, key suffix, model index, position, enabled).
fn blocks() -> impl Strategy<Value = Vec<(bool, u8, usize, i32, bool)>> {
    prop::collection::vec(
        (any::<bool>(), 0u8..16, 0..MODELS.len(), -4i32..8, any::<bool>()),
        0..12,
    )
}

fn build_rig(blocks: &[(bool, u8, usize, i32, bool)]) -> RigConfiguration {
    blocks
        .iter()
        .fold(RigConfiguration::new(), |rig, &(on_path1, key, model, position, enabled)| {
            let path = if on_path1 { PathId::Path1 } else { PathId::Path0 };
            rig.with_block(
                path,
                format!("block{key}"),
                Block::new(MODELS[model])
                    .with_position(position)
                    .with_enabled(enabled),
            )
        })
}

fn costs() -> CostTable {
    CostTable::new()
        .with_cost("HD2_AmpUSDeluxe", 30.0)
        .with_cost("HD2_Cab4x12Greenback", 10.0)
        .with_cost("HD2_DistScream808", 4.0)
        .with_cost("HD2_ReverbPlate", 15.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// path0 blocks precede path1 blocks, and positions never decrease within
    /// a path.
    #[test]
    fn assembled_order(spec in blocks()) {
        let rig = build_rig(&spec);
        let chain = assemble(&rig).unwrap();
        prop_assert_eq!(chain.len(), rig.block_count());

        let mut last: Option<(PathId, i32)> = None;
        for entry in &chain {
            let path = entry.id.path_id().unwrap();
            if let Some((last_path, last_position)) = last {
                prop_assert!(last_path <= path, "{} after {}", path, last_path);
                if last_path == path {
                    prop_assert!(last_position <= entry.block.position);
                }
            }
            last = Some((path, entry.block.position));
        }
    }

    /// A synthesized instrument is always first, for every snapshot index.
    #[test]
    fn instrument_always_first(
        spec in blocks(),
        model_id in 1u32..80,
        family in family(),
        index in 0usize..3,
    ) {
        let rig = build_rig(&spec)
            .with_instrument(InstrumentConfig::new(model_id, family))
            .with_snapshot(SnapshotOverride::new("A").with_hint(AbstractSnapshotHint::active(["reverb"])));
        let resolved = resolve(&assemble(&rig).unwrap(), &rig, index);
        prop_assert_eq!(&resolved.blocks[0].id, &BlockId::Instrument);
        prop_assert_eq!(resolved.blocks.iter().filter(|b| b.is_instrument()).count(), 1);
    }

    /// A technical enabled value wins over a hint saying the opposite.
    #[test]
    fn technical_value_wins(spec in blocks(), technical in any::<bool>()) {
        let rig = build_rig(&spec);
        let chain = assemble(&rig).unwrap();
        prop_assume!(!chain.is_empty());

        let target = chain[0].id.clone();
        let (path, key) = (target.path_id().unwrap(), target.key().unwrap().to_string());
        // Reference every block when the technical value is off, none when on.
        let references: Vec<String> = if technical {
            vec!["no such block".to_string()]
        } else {
            MODELS.iter().map(|m| (*m).to_string()).collect()
        };
        let rig = rig.with_snapshot(
            SnapshotOverride::new("S")
                .with_block_enabled(path, key, technical)
                .with_hint(AbstractSnapshotHint::active(references)),
        );

        let resolved = resolve(&chain, &rig, 0);
        let block = resolved.get(&target).unwrap();
        prop_assert_eq!(block.enabled, technical);
        prop_assert_eq!(block.enabled_source, EnabledSource::Technical);
    }

    /// Variants count down from 5 within each bank of five ids.
    #[test]
    fn variant_numbering(model_id in 1u32..1000, family in family()) {
        let slot = decode_model_id(model_id).unwrap();
        prop_assert!((1..=5).contains(&slot.variant));
        prop_assert_eq!(slot.bank * 5 + (5 - slot.variant) + 1, model_id);

        let name = resolve_instrument_name(model_id, family);
        let suffix = format!(" {}", slot.variant);
        prop_assert!(name.ends_with(&suffix), "{} does not end with {}", name, suffix);
    }

    /// The budget of two disjoint chains is the sum of their budgets, and
    /// unknown models contribute nothing.
    #[test]
    fn budget_is_additive(a in blocks(), b in blocks()) {
        let rig_a = build_rig(&a);
        let rig_b = build_rig(&b);
        let table = costs();
        let left = resolve(&assemble(&rig_a).unwrap(), &rig_a, 0).blocks;
        let mut right = resolve(&assemble(&rig_b).unwrap(), &rig_b, 0).blocks;
        // Keep the chains disjoint by moving the right-hand keys.
        for block in &mut right {
            if let BlockId::Path { key, .. } = &mut block.id {
                key.insert_str(0, "r_");
            }
        }
        let joined: Vec<_> = left.iter().chain(&right).cloned().collect();

        let whole = budget(&joined, &table);
        let parts = budget(&left, &table) + budget(&right, &table);
        prop_assert!((whole.total - parts.total).abs() < 1e-9);
        prop_assert_eq!(&whole.per_block, &parts.per_block);

        for block in joined.iter().filter(|b| b.block.model == "Unknown") {
            prop_assert_eq!(whole.per_block[&block.id], 0.0);
        }
    }

    /// Resolving twice gives deep-equal chains.
    #[test]
    fn resolution_is_idempotent(spec in blocks(), index in 0usize..2, hint_model in 0..MODELS.len()) {
        let rig = build_rig(&spec)
            .with_snapshot(SnapshotOverride::new("S").with_hint(AbstractSnapshotHint::active([MODELS[hint_model]])));
        let chain = assemble(&rig).unwrap();
        prop_assert_eq!(resolve(&chain, &rig, index), resolve(&chain, &rig, index));
    }
}
