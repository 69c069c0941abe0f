//! Generator settings (`config.toml`)
//!
//! Settings are stored in TOML format in the platform-specific config
//! directory. Every key is optional; missing keys take their defaults.
//!
//! ```toml
//! output_root = "./generated_games"
//! default_complexity = "intermediate"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use aigamedev_shared::DEFAULT_COMPLEXITY;

use crate::generation::DEFAULT_OUTPUT_ROOT;

/// File name of the settings file inside [`config_dir`].
pub const SETTINGS_FILE: &str = "config.toml";

/// User-configurable generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory that output directories are placed under (default: `./generated_games`)
    #[serde(default = "default_output_root")]
    pub output_root: String,
    /// Complexity used when a request doesn't name one (default: `intermediate`)
    #[serde(default = "default_complexity")]
    pub default_complexity: String,
}

fn default_output_root() -> String {
    DEFAULT_OUTPUT_ROOT.to_string()
}

fn default_complexity() -> String {
    DEFAULT_COMPLEXITY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            default_complexity: default_complexity(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Returns the platform-specific configuration directory.
///
/// On Linux: `~/.config/ai-game-dev`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "ai-game-dev", "ai-game-dev")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Loads settings from the platform configuration directory.
///
/// Returns defaults if the file doesn't exist or cannot be parsed.
pub fn load() -> Settings {
    let Some(path) = config_dir().map(|dir| dir.join(SETTINGS_FILE)) else {
        return Settings::default();
    };
    if !path.exists() {
        return Settings::default();
    }
    match load_from(&path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("{e}; using default settings");
            Settings::default()
        }
    }
}

/// Loads settings from an explicit file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from(path: &Path) -> Result<Settings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Saves settings to an explicit file, creating parent directories.
pub fn save_to(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    let io_err = |source: std::io::Error| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let content = toml::to_string_pretty(settings)?;
    std::fs::write(path, content).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.output_root, "./generated_games");
        assert_eq!(settings.default_complexity, "intermediate");
    }

    #[test]
    fn test_settings_deserialize_empty() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let settings: Settings = toml::from_str(r#"output_root = "/srv/games""#).unwrap();
        assert_eq!(settings.output_root, "/srv/games");
        assert_eq!(settings.default_complexity, "intermediate"); // default
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let settings = Settings {
            output_root: "out".to_string(),
            default_complexity: "simple".to_string(),
        };

        save_to(&settings, &path).unwrap();
        assert_eq!(load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "output_root = [").unwrap();

        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }
}
