//! Error types for chain resolution.

use rigscope_config::ValidationError;
use thiserror::Error;

/// Errors surfaced by the resolution engine.
///
/// Only structural problems are errors. Unknown models, cost misses,
/// out-of-range snapshot indices and unmatched hints all resolve to defaults.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// The configuration failed structural validation.
    #[error("malformed rig configuration: {0}")]
    Malformed(#[from] ValidationError),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
