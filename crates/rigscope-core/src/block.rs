//! Block identity within an assembled chain.

use rigscope_config::{Block, PathId};
use serde::{Serialize, Serializer};
use std::fmt;

/// Identity of a block in the flattened chain.
///
/// DSP-path blocks are identified by (path, key); the synthesized instrument
/// stage has its own identity since it lives on neither path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlockId {
    /// The synthesized modeled-instrument input stage.
    Instrument,
    /// A block stored on a DSP path.
    Path {
        /// DSP path holding the block.
        path: PathId,
        /// Path-local key.
        key: String,
    },
}

impl BlockId {
    /// Identity of a DSP-path block.
    pub fn path(path: PathId, key: impl Into<String>) -> Self {
        BlockId::Path {
            path,
            key: key.into(),
        }
    }

    /// DSP path of the block, `None` for the instrument stage.
    pub fn path_id(&self) -> Option<PathId> {
        match self {
            BlockId::Instrument => None,
            BlockId::Path { path, .. } => Some(*path),
        }
    }

    /// Path-local key, `None` for the instrument stage.
    pub fn key(&self) -> Option<&str> {
        match self {
            BlockId::Instrument => None,
            BlockId::Path { key, .. } => Some(key),
        }
    }

    /// Whether this is the synthesized instrument stage.
    pub fn is_instrument(&self) -> bool {
        matches!(self, BlockId::Instrument)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Instrument => f.write_str("instrument"),
            BlockId::Path { path, key } => write!(f, "{path}/{key}"),
        }
    }
}

impl Serialize for BlockId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A block placed in the assembled chain, before snapshot resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainBlock {
    /// Where the block came from.
    pub id: BlockId,
    /// The stored (or synthesized) block.
    pub block: Block,
}

impl ChainBlock {
    /// Place a stored block.
    pub fn new(id: BlockId, block: Block) -> Self {
        Self { id, block }
    }

    /// Whether this is the synthesized instrument stage.
    pub fn is_instrument(&self) -> bool {
        self.id.is_instrument()
    }
}
