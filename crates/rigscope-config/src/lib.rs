//! Typed rig configuration records for the rigscope resolution engine.
//!
//! This crate holds the immutable input side of rigscope: the parsed rig
//! (two DSP paths, a controller table, snapshots, an optional modeled
//! instrument and a DSP cost table), the abstract design descriptions that can
//! be attached to it, and the structural validation that runs before
//! resolution.
//!
//! # Features
//!
//! - **Rig records**: [`RigConfiguration`], [`DspPath`], [`Block`] with a typed
//!   [`ParamValue`] map
//! - **Snapshots**: technical overrides and [`AbstractSnapshotHint`]s
//! - **Designs**: [`DesignDescription`] attached by snapshot index
//! - **Costs**: [`CostTable`], optionally built from a model catalog
//! - **Loading**: JSON or TOML, picked by file extension
//! - **Validation**: fail-fast errors plus non-fatal warnings
//!
//! # Example
//!
//! ```rust
//! use rigscope_config::{
//!     AbstractSnapshotHint, Block, PathId, RigConfiguration, SnapshotOverride,
//! };
//!
//! let rig = RigConfiguration::new()
//!     .with_block(PathId::Path0, "block0", Block::new("BassBoost").with_position(0))
//!     .with_snapshot(
//!         SnapshotOverride::new("Boosted").with_hint(AbstractSnapshotHint::active(["boost"])),
//!     );
//!
//! assert_eq!(rig.block_count(), 1);
//! assert!(rig.snapshot(0).is_some_and(|s| !s.has_technical_data()));
//! ```

mod catalog;
mod controller;
mod design;
mod document;
mod error;
mod instrument;
mod rig;
mod snapshot;

/// Platform-specific configuration paths.
pub mod paths;

/// Structural validation.
pub mod validation;

pub use catalog::{CatalogEntry, CostTable, DEFAULT_CATALOG_COST};
pub use controller::{
    BlockControllers, ControllerAssignment, ControllerKind, ControllerTable,
    SNAPSHOT_CONTROLLER_CODE,
};
pub use design::{DesignComponent, DesignDescription, DesignSnapshot};
pub use document::{DocumentFormat, load_document, save_document};
pub use error::ConfigError;
pub use instrument::{InstrumentConfig, InstrumentFamily, InstrumentOverride, STRING_COUNT};
pub use rig::{Block, DspPath, ParamValue, PathId, PathMap, RigConfiguration};
pub use snapshot::{AbstractSnapshotHint, SnapshotOverride};
pub use validation::{
    ValidationError, ValidationReport, ValidationResult, ValidationWarning, check_structure,
    validate,
};
