//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::erase::{DEFAULT_SAMPLING_INTERVAL, DEFAULT_THRESHOLD};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the appearance of newly drawn strokes. Hosts can change the
/// style at runtime through the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default pen color - a named color, a hex string like `"#ff0000"`,
    /// or an RGB array like `[255, 0, 0]`
    #[serde(default)]
    pub default_color: ColorSpec,

    /// Default pen width in logical units (valid range: 0.0 - 100.0)
    #[serde(default = "default_width")]
    pub default_width: f64,

    /// Maximum number of committed paths; 0 means unlimited
    #[serde(default)]
    pub max_paths: usize,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: ColorSpec::default(),
            default_width: default_width(),
            max_paths: 0,
        }
    }
}

/// Input handling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InputConfig {
    /// Whether gestures draw at all
    #[serde(default = "default_true")]
    pub touch_enabled: bool,

    /// Only qualifying devices (e.g. a stylus) draw; other pointers are ignored
    #[serde(default)]
    pub stylus_only: bool,

    /// Owner tag attached to strokes drawn locally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            touch_enabled: true,
            stylus_only: false,
            owner: None,
        }
    }
}

/// Eraser hit-test tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EraserConfig {
    /// Maximum distance, in logical units, at which a path is erased
    /// (valid range: 1.0 - 200.0)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Spacing of interpolated samples on sparse paths (valid range: 1.0 - 200.0)
    #[serde(default = "default_sampling_interval")]
    pub sampling_interval: f64,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            sampling_interval: default_sampling_interval(),
        }
    }
}

/// Host surface settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurfaceConfig {
    /// The host already delivers points in pixels; use a device scale of 1
    #[serde(default)]
    pub pre_scaled_input: bool,

    /// Pixels per logical unit when input is not pre-scaled (valid range: 0.5 - 8.0)
    #[serde(default = "default_pixel_density")]
    pub pixel_density: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            pre_scaled_input: false,
            pixel_density: default_pixel_density(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_width() -> f64 {
    3.0
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_sampling_interval() -> f64 {
    DEFAULT_SAMPLING_INTERVAL
}

fn default_pixel_density() -> f64 {
    1.0
}
