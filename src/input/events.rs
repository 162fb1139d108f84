//! Pointer/gesture samples delivered by the host's input source.

use crate::draw::Point;
use serde::{Deserialize, Serialize};

/// Phase of a continuous gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GesturePhase {
    /// Pointer went down / gesture began
    Start,
    /// Pointer moved
    Update,
    /// Pointer went up / gesture ended
    End,
}

/// One input sample in logical (pre-scale) coordinates.
///
/// Gesture sources that also track panning fill in `translation_y` (total
/// vertical translation since the gesture began) and `velocity_y` (on `End`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub phase: GesturePhase,
    pub x: f64,
    pub y: f64,
    /// Whether the sample came from a qualifying device (e.g. a stylus)
    #[serde(default = "default_qualifying")]
    pub qualifying_device: bool,
    #[serde(default)]
    pub translation_y: f64,
    #[serde(default)]
    pub velocity_y: f64,
}

fn default_qualifying() -> bool {
    true
}

impl InputEvent {
    fn new(phase: GesturePhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            x,
            y,
            qualifying_device: true,
            translation_y: 0.0,
            velocity_y: 0.0,
        }
    }

    pub fn start(x: f64, y: f64) -> Self {
        Self::new(GesturePhase::Start, x, y)
    }

    pub fn update(x: f64, y: f64) -> Self {
        Self::new(GesturePhase::Update, x, y)
    }

    pub fn end(x: f64, y: f64) -> Self {
        Self::new(GesturePhase::End, x, y)
    }

    /// Marks whether the sample came from a qualifying device.
    pub fn with_device(mut self, qualifying: bool) -> Self {
        self.qualifying_device = qualifying;
        self
    }

    /// Attaches pan information for drag forwarding.
    pub fn with_pan(mut self, translation_y: f64, velocity_y: f64) -> Self {
        self.translation_y = translation_y;
        self.velocity_y = velocity_y;
        self
    }

    /// Logical position rounded to two decimals.
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y).rounded()
    }
}

/// Which devices may draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceFilter {
    /// Any pointer draws
    #[default]
    Any,
    /// Only qualifying devices (e.g. stylus) draw
    QualifyingOnly,
}

impl DeviceFilter {
    pub fn accepts(self, event: &InputEvent) -> bool {
        match self {
            DeviceFilter::Any => true,
            DeviceFilter::QualifyingOnly => event.qualifying_device,
        }
    }
}
