//! Configuration file support for strokecanvas.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/strokecanvas/config.toml`. Settings include stroke defaults,
//! input filtering, eraser tuning, and surface scaling.
//!
//! If no config file exists, defaults are used.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{DrawingConfig, EraserConfig, InputConfig, SurfaceConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All sections are optional in the file; missing fields use their defaults.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "blue"
/// default_width = 4.0
///
/// [input]
/// stylus_only = true
/// owner = "alice"
///
/// [eraser]
/// threshold = 12.0
///
/// [surface]
/// pixel_density = 2.0
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Stroke defaults (color, width, path limit)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Which gestures draw
    #[serde(default)]
    pub input: InputConfig,

    /// Eraser hit-test tuning
    #[serde(default)]
    pub eraser: EraserConfig,

    /// Device scale resolution
    #[serde(default)]
    pub surface: SurfaceConfig,
}

/// Clamps `value` into `min..=max`, warning when it was out of range.
///
/// Non-finite values fall back to `fallback`.
fn clamp_field(name: &str, value: &mut f64, min: f64, max: f64, fallback: f64) {
    if !value.is_finite() {
        warn!("Invalid {name} {value}, using {fallback:.1}");
        *value = fallback;
    } else if !(min..=max).contains(value) {
        warn!("Invalid {name} {value:.1}, clamping to {min:.1}-{max:.1} range");
        *value = value.clamp(min, max);
    }
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `drawing.default_width`: 0.0 - 100.0
    /// - `eraser.threshold`: 1.0 - 200.0
    /// - `eraser.sampling_interval`: 1.0 - 200.0
    /// - `surface.pixel_density`: 0.5 - 8.0
    pub fn validate_and_clamp(&mut self) {
        clamp_field("default_width", &mut self.drawing.default_width, 0.0, 100.0, 3.0);
        clamp_field("eraser threshold", &mut self.eraser.threshold, 1.0, 200.0, 10.0);
        clamp_field(
            "eraser sampling_interval",
            &mut self.eraser.sampling_interval,
            1.0,
            200.0,
            10.0,
        );
        clamp_field("pixel_density", &mut self.surface.pixel_density, 0.5, 8.0, 1.0);

        if let Some(owner) = &self.input.owner
            && owner.trim().is_empty()
        {
            warn!("Empty input owner, treating as unset");
            self.input.owner = None;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/strokecanvas/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("strokecanvas");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the configuration as TOML, creating the parent directory if needed.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config cannot be
    /// serialized, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
