//! Input handling and the stroke lifecycle state machine.
//!
//! This module turns a stream of gesture samples into committed strokes,
//! drives the render backend while a stroke is being drawn, and routes
//! samples to the eraser or a drag target depending on the current mode.

pub mod events;
pub mod observer;
pub mod state;

// Re-export commonly used types at module level
pub use events::{DeviceFilter, GesturePhase, InputEvent};
pub use observer::{
    DragTarget, NoopObserver, ObserverError, RecordingObserver, StrokeEvent, StrokeObserver,
};
pub use state::{DrawingState, EngineSettings, StrokeEngine};
