//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CutlineError, CutlineResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default editing parameters.
    pub editing: EditingDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Defaults applied to timeline operations when the caller leaves them unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingDefaults {
    /// Smallest gap (seconds) reported by per-track gap listing.
    pub min_track_gap_secs: f64,

    /// Reframe anchor name (e.g. "center", "top-left").
    pub anchor: String,

    /// Raise scale to the cover scale before panning.
    pub ensure_cover: bool,

    /// Keep the pan inside the safe range so no frame edge is exposed.
    pub clamp_to_fill: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "cutline=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for EditingDefaults {
    fn default() -> Self {
        Self {
            min_track_gap_secs: 0.1,
            anchor: "center".to_string(),
            ensure_cover: true,
            clamp_to_fill: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> CutlineResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CutlineError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no operation can work with.
    pub fn validate(&self) -> CutlineResult<()> {
        let min_gap = self.editing.min_track_gap_secs;
        if !min_gap.is_finite() || min_gap < 0.0 {
            return Err(CutlineError::config(format!(
                "min_track_gap_secs must be a non-negative number, got {min_gap}"
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(CutlineError::config("logging.level must not be empty"));
        }
        Ok(())
    }

    /// Validate and write config as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> CutlineResult<()> {
        self.validate()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("cutline").join("config.json")
}
