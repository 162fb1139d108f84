//! Host notification seams: lifecycle callbacks and drag forwarding.
//!
//! Notifications are fire-and-forget. An observer that returns an error is
//! logged and otherwise ignored; engine state is never rolled back.

use crate::draw::{Point, StrokeRecord};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Failure reported by a host callback.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ObserverError(pub String);

/// Receives stroke lifecycle notifications.
///
/// Every method defaults to a no-op so hosts implement only what they need.
pub trait StrokeObserver {
    /// A stroke began at the given logical point.
    fn stroke_started(&mut self, _point: Point) -> Result<(), ObserverError> {
        Ok(())
    }

    /// The gesture moved to the given logical point (drawing or erasing).
    fn stroke_changed(&mut self, _point: Point) -> Result<(), ObserverError> {
        Ok(())
    }

    /// A stroke was committed, or an eraser gesture ended (sentinel record).
    fn stroke_ended(&mut self, _record: &StrokeRecord) -> Result<(), ObserverError> {
        Ok(())
    }

    /// The committed path set changed; `count` is the new number of paths.
    fn paths_changed(&mut self, _count: usize) -> Result<(), ObserverError> {
        Ok(())
    }
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StrokeObserver for NoopObserver {}

/// Receives pan deltas when a gesture is not drawing, e.g. a scroll container.
pub trait DragTarget {
    /// Scroll by `delta_y` logical units.
    fn scroll_by(&mut self, delta_y: f64);
    /// The pan ended with the given vertical velocity.
    fn fling(&mut self, velocity_y: f64);
}

/// A notification captured by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeEvent {
    Started(Point),
    Changed(Point),
    Ended(StrokeRecord),
    PathsChanged(usize),
}

/// Observer that appends every notification to a shared list.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<StrokeEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded notifications.
    pub fn events(&self) -> Rc<RefCell<Vec<StrokeEvent>>> {
        Rc::clone(&self.events)
    }

    fn push(&self, event: StrokeEvent) -> Result<(), ObserverError> {
        self.events.borrow_mut().push(event);
        Ok(())
    }
}

impl StrokeObserver for RecordingObserver {
    fn stroke_started(&mut self, point: Point) -> Result<(), ObserverError> {
        self.push(StrokeEvent::Started(point))
    }

    fn stroke_changed(&mut self, point: Point) -> Result<(), ObserverError> {
        self.push(StrokeEvent::Changed(point))
    }

    fn stroke_ended(&mut self, record: &StrokeRecord) -> Result<(), ObserverError> {
        self.push(StrokeEvent::Ended(record.clone()))
    }

    fn paths_changed(&mut self, count: usize) -> Result<(), ObserverError> {
        self.push(StrokeEvent::PathsChanged(count))
    }
}
