//! CLI command implementations.

pub mod budget;
pub mod common;
pub mod decode;
pub mod resolve;
pub mod settings;
pub mod snapshots;
pub mod validate;
