//! Stroke data model and the render backend seam.
//!
//! This module defines the core drawing types:
//! - [`Point`]: a stroke sample with a two-decimal text form
//! - [`Path`] and [`PathStyle`]: one stroke and its appearance
//! - [`StrokeRecord`]: a committed path plus the surface size it was captured on
//! - [`PathStore`]: committed and pending records for one surface
//! - [`RenderBackend`]: fire-and-forget commands to whatever paints pixels

pub mod backend;
pub mod color;
pub mod error;
pub mod path;
pub mod point;
pub mod store;

// Re-export commonly used types at module level
pub use backend::{
    NullBackend, RecordingBackend, RenderBackend, RenderCommand, TextCommand, TextCoordinate,
    TextItem,
};
pub use color::{ArgbEncoder, Color, ColorEncoder};
pub use error::ModelError;
pub use path::{Path, PathId, PathStyle, StrokeRecord, SurfaceSize, WirePath, WireRecord};
pub use point::Point;
pub use store::{AddOutcome, PathStore};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
