//! User settings loaded from `rigscope.toml`.

use rigscope_config::{InstrumentFamily, load_document, paths, save_document};
use rigscope_core::PLATFORM_CEILING;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI defaults that can be set once per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Family used to decode instrument ids when a command does not name one.
    pub instrument_family: InstrumentFamily,
    /// DSP ceiling budgets are classified against.
    pub platform_ceiling: f64,
    /// Snapshot resolved when `--snapshot` is not given.
    pub default_snapshot: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            instrument_family: InstrumentFamily::default(),
            platform_ceiling: PLATFORM_CEILING,
            default_snapshot: 0,
        }
    }
}

impl Settings {
    /// Settings file to use: the explicit path, or the user config dir.
    pub fn location(explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(paths::default_settings_path, Path::to_path_buf)
    }

    /// Load settings, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let settings: Self = load_document(path)?;
        if !(settings.platform_ceiling.is_finite() && settings.platform_ceiling > 0.0) {
            anyhow::bail!(
                "{}: platform_ceiling must be a positive number, got {}",
                path.display(),
                settings.platform_ceiling
            );
        }
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        save_document(self, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("rigscope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.platform_ceiling, 100.0);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rigscope.toml");
        std::fs::write(&path, "instrument_family = \"shuriken\"\n").unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.instrument_family, InstrumentFamily::Shuriken);
        assert_eq!(settings.default_snapshot, 0);
    }

    #[test]
    fn rejects_non_positive_ceiling() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rigscope.toml");
        std::fs::write(&path, "platform_ceiling = 0.0\n").unwrap();
        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("rigscope.toml");
        let settings = Settings {
            platform_ceiling: 80.0,
            default_snapshot: 2,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn explicit_location_wins() {
        let explicit = Path::new("/tmp/custom.toml");
        assert_eq!(Settings::location(Some(explicit)), explicit);
        assert!(Settings::location(None).ends_with(paths::SETTINGS_FILE_NAME));
    }
}
