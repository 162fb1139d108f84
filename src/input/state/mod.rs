mod actions;
mod core;
mod pointer;

pub use self::core::{DrawingState, EngineSettings, StrokeEngine};
