// Paste settings
// Loaded from ~/.config/pastegrid/settings.toml

use pastegrid_engine::DateBasis;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Destination grid extents used when the caller does not give any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            rows: 1_000_000,
            cols: 16_384,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateSettings {
    /// Zone Excel's naive `DateTime` values are read in
    pub basis: DateBasis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default log filter (`RUST_LOG` wins when set)
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "warn".to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid: GridSettings,
    pub dates: DateSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pastegrid");
        config_dir.join("settings.toml")
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(ConfigError::Validation(format!(
                "grid must have at least one row and column, got {}x{}",
                self.grid.rows, self.grid.cols
            )));
        }
        Ok(())
    }

    /// Read `path`. A missing file is not an error and yields defaults.
    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Save current settings to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let text = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        fs::write(path, text).map_err(|e| ConfigError::Io(e.to_string()))
    }
}
