//! Render backend seam.
//!
//! The engine decides *what* to draw and issues fire-and-forget commands in
//! pixel coordinates; a backend turns them into pixels. Nothing is ever read
//! back from the backend.

use super::color::Color;
use super::path::PathId;
use super::point::Point;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// How a text item's position is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextCoordinate {
    /// Position is in logical units.
    #[default]
    Absolute,
    /// Position is a fraction of the surface size.
    Ratio,
}

/// Text overlay supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub text: String,
    #[serde(default)]
    pub font: Option<String>,
    pub font_size: f64,
    pub color: Color,
    pub anchor: Point,
    pub position: Point,
    #[serde(default)]
    pub coordinate: TextCoordinate,
}

/// Text overlay as handed to the backend, with its color already encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub item: TextItem,
    pub color: u32,
}

/// Commands the engine issues to the surface that paints strokes.
pub trait RenderBackend {
    /// Starts an incremental path. `width` is already in pixels.
    fn new_path(&mut self, id: PathId, color: u32, width: f64);
    /// Appends a pixel-space point to the path started by `new_path`.
    fn add_point(&mut self, x: f64, y: f64);
    /// Finishes the incremental path.
    fn end_path(&mut self);
    /// Draws a complete path in one go.
    fn add_path(&mut self, id: PathId, color: u32, width: f64, points: &[Point]);
    fn delete_path(&mut self, id: PathId);
    fn clear(&mut self);
    fn render_text(&mut self, items: &[TextCommand]);
}

/// Backend that discards every command.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl RenderBackend for NullBackend {
    fn new_path(&mut self, _id: PathId, _color: u32, _width: f64) {}
    fn add_point(&mut self, _x: f64, _y: f64) {}
    fn end_path(&mut self) {}
    fn add_path(&mut self, _id: PathId, _color: u32, _width: f64, _points: &[Point]) {}
    fn delete_path(&mut self, _id: PathId) {}
    fn clear(&mut self) {}
    fn render_text(&mut self, _items: &[TextCommand]) {}
}

/// A single recorded backend command.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    NewPath { id: PathId, color: u32, width: f64 },
    AddPoint { x: f64, y: f64 },
    EndPath,
    AddPath {
        id: PathId,
        color: u32,
        width: f64,
        points: Vec<Point>,
    },
    DeletePath { id: PathId },
    Clear,
    RenderText { items: Vec<TextCommand> },
}

impl fmt::Display for RenderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderCommand::NewPath { id, color, width } => {
                write!(f, "new_path {id} {color:#010x} {width:.2}")
            }
            RenderCommand::AddPoint { x, y } => write!(f, "add_point {x:.2},{y:.2}"),
            RenderCommand::EndPath => f.write_str("end_path"),
            RenderCommand::AddPath {
                id,
                color,
                width,
                points,
            } => {
                write!(f, "add_path {id} {color:#010x} {width:.2} [")?;
                for (i, point) in points.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{point}")?;
                }
                f.write_str("]")
            }
            RenderCommand::DeletePath { id } => write!(f, "delete_path {id}"),
            RenderCommand::Clear => f.write_str("clear"),
            RenderCommand::RenderText { items } => write!(f, "render_text {}", items.len()),
        }
    }
}

/// Backend that records every command into a shared log.
///
/// Clone the handle returned by [`RecordingBackend::log`] before boxing the
/// backend to inspect the commands afterwards.
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    log: Rc<RefCell<Vec<RenderCommand>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded commands.
    pub fn log(&self) -> Rc<RefCell<Vec<RenderCommand>>> {
        Rc::clone(&self.log)
    }

    /// Snapshot of the commands recorded so far.
    pub fn commands(&self) -> Vec<RenderCommand> {
        self.log.borrow().clone()
    }

    fn push(&self, command: RenderCommand) {
        self.log.borrow_mut().push(command);
    }
}

impl RenderBackend for RecordingBackend {
    fn new_path(&mut self, id: PathId, color: u32, width: f64) {
        self.push(RenderCommand::NewPath { id, color, width });
    }

    fn add_point(&mut self, x: f64, y: f64) {
        self.push(RenderCommand::AddPoint { x, y });
    }

    fn end_path(&mut self) {
        self.push(RenderCommand::EndPath);
    }

    fn add_path(&mut self, id: PathId, color: u32, width: f64, points: &[Point]) {
        self.push(RenderCommand::AddPath {
            id,
            color,
            width,
            points: points.to_vec(),
        });
    }

    fn delete_path(&mut self, id: PathId) {
        self.push(RenderCommand::DeletePath { id });
    }

    fn clear(&mut self) {
        self.push(RenderCommand::Clear);
    }

    fn render_text(&mut self, items: &[TextCommand]) {
        self.push(RenderCommand::RenderText {
            items: items.to_vec(),
        });
    }
}
