//! Platform-specific configuration paths.
//!
//! - **User config**: `~/.config/rigscope/` (Linux),
//!   `~/Library/Application Support/rigscope/` (macOS), `%APPDATA%\rigscope\` (Windows)

use std::path::PathBuf;

use crate::error::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "rigscope";

/// File name of the settings file inside the user config directory.
pub const SETTINGS_FILE_NAME: &str = "rigscope.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default location of the settings file.
pub fn default_settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE_NAME)
}

/// Ensures the user config directory exists, creating it if necessary.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}
