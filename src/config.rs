use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color;
use crate::compositor::{DEFAULT_EXPORT_FILE_NAME, DEFAULT_EXPORT_SCALE};
use crate::error::ConfigError;
use crate::grid::DEFAULT_GRID_SIZE;

/// Largest canvas side accepted from configuration
pub const MAX_GRID_SIZE: usize = 256;
/// Largest export scale accepted from configuration
pub const MAX_EXPORT_SCALE: u32 = 64;

/// Editor settings. Missing fields take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Cells per canvas side
    pub grid_size: usize,
    /// Output pixels per cell when exporting
    pub export_scale: u32,
    pub export_file_name: String,
    /// `#rrggbb` color selected at startup
    pub default_color: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            export_scale: DEFAULT_EXPORT_SCALE,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_owned(),
            default_color: color::to_hex(color::DEFAULT_COLOR),
        }
    }
}

impl EditorConfig {
    /// Parses and validates a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads `path` if given, falling back to the defaults on any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be between 1 and {MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if !(1..=MAX_EXPORT_SCALE).contains(&self.export_scale) {
            return Err(ConfigError::Invalid(format!(
                "export_scale must be between 1 and {MAX_EXPORT_SCALE}, got {}",
                self.export_scale
            )));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(ConfigError::Invalid("export_file_name is empty".to_owned()));
        }
        color::parse_hex(&self.default_color).map_err(|err| ConfigError::Invalid(err.to_string()))?;
        Ok(())
    }
}
