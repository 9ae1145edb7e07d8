//! JSON/TOML document loading shared by every record type.
//!
//! The format is picked from the file extension: `.json` goes through
//! `serde_json`, `.toml` through `toml`. Anything else is rejected with
//! [`ConfigError::UnsupportedFormat`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Serialization format of a document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `serde_json`
    Json,
    /// `toml`
    Toml,
}

impl DocumentFormat {
    /// Pick the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else {
            None
        }
    }

    /// Parse a document from a string in this format.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, ConfigError> {
        match self {
            Self::Json => Ok(serde_json::from_str(content)?),
            Self::Toml => Ok(toml::from_str(content)?),
        }
    }

    /// Render a value as a document string in this format.
    pub fn render<T: Serialize>(self, value: &T) -> Result<String, ConfigError> {
        match self {
            Self::Json => Ok(serde_json::to_string_pretty(value)?),
            Self::Toml => Ok(toml::to_string_pretty(value)?),
        }
    }
}

/// Load and deserialize a document, choosing the format from the extension.
pub fn load_document<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    format.parse(&content)
}

/// Serialize and write a document, creating parent directories as needed.
pub fn save_document<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
    }

    let content = format.render(value)?;
    std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
    Ok(())
}
