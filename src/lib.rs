//! Stroke capture and eraser engine for resolution-independent drawing surfaces.
//!
//! The engine turns pointer gestures into committed paths, keeps those paths in
//! the logical units of the surface they were captured on, replays them onto
//! surfaces of any size, and erases them by nearest-path hit testing. Pixels
//! are produced by a host [`draw::RenderBackend`]; the engine only decides what
//! to draw.

pub mod config;
pub mod draw;
pub mod erase;
pub mod export;
pub mod input;
pub mod surface;

pub use config::Config;
pub use input::StrokeEngine;
