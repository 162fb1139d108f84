use crate::draw::{AddOutcome, Path, StrokeRecord};
use crate::input::events::{GesturePhase, InputEvent};
use log::{debug, warn};

use super::{DrawingState, StrokeEngine};

impl StrokeEngine {
    /// Dispatches one gesture sample to the matching phase handler.
    pub fn on_event(&mut self, event: &InputEvent) {
        match event.phase {
            GesturePhase::Start => self.on_start(event),
            GesturePhase::Update => self.on_update(event),
            GesturePhase::End => self.on_end(event),
        }
    }

    /// Whether this sample may draw or erase.
    fn accepts(&self, event: &InputEvent) -> bool {
        self.touch_enabled && self.device_filter.accepts(event)
    }

    /// Processes a gesture start.
    ///
    /// # Behavior
    /// - Ignored in eraser mode, while input is disabled, or for a
    ///   non-qualifying device
    /// - Otherwise opens a new path with a fresh id, starts it on the backend
    ///   with its first point, and notifies "stroke started"
    /// - A start while a path is still open commits that path first
    pub fn on_start(&mut self, event: &InputEvent) {
        if self.eraser_active || !self.accepts(event) {
            return;
        }
        if self.is_capturing() {
            debug!("Gesture start while capturing; committing the open path first");
            self.commit_open_path();
        }

        let id = self.ids.next(&self.store);
        let point = event.point();
        let mut path = Path::open(id, self.style, self.owner.clone());
        path.push(point);

        let color = self.encode(self.style.color());
        let width = self.surface.pixel_width(self.style.width());
        let pixel = self.surface.live_pixels(point);
        self.backend.new_path(id, color, width);
        self.backend.add_point(pixel.x, pixel.y);

        self.state = DrawingState::Capturing { path };
        debug!("Opened path {id} at {point}");
        self.notify("stroke start", |o| o.stroke_started(point));
    }

    /// Processes a gesture update.
    ///
    /// # Behavior
    /// - Eraser mode: erases the paths under the point and notifies "stroke changed"
    /// - Capturing: appends the point, forwards it to the backend, and notifies
    ///   "stroke changed"; every sample is kept regardless of how little it moved
    /// - Idle with a drag target: forwards the pan delta instead of drawing
    pub fn on_update(&mut self, event: &InputEvent) {
        let accepted = self.accepts(event);
        let point = event.point();

        if self.eraser_active {
            if accepted {
                self.erase_at(point);
                self.notify("stroke change", |o| o.stroke_changed(point));
            }
            return;
        }

        if let DrawingState::Capturing { path } = &mut self.state {
            if !accepted {
                return;
            }
            path.push(point);
            let pixel = self.surface.live_pixels(point);
            self.backend.add_point(pixel.x, pixel.y);
            self.notify("stroke change", |o| o.stroke_changed(point));
            return;
        }

        if let Some(target) = self.drag_target.as_mut() {
            let delta = self.last_translation_y - event.translation_y;
            self.last_translation_y = event.translation_y;
            target.scroll_by(delta);
        }
    }

    /// Processes a gesture end.
    ///
    /// # Behavior
    /// - Eraser mode: notifies "stroke ended" with a sentinel record
    /// - Capturing: closes and commits the open path
    /// - Idle with a drag target: forwards the fling velocity and resets the pan
    /// - Idle otherwise: no-op (duplicate or out-of-order end)
    pub fn on_end(&mut self, event: &InputEvent) {
        if self.eraser_active {
            let sentinel = StrokeRecord::sentinel(self.style);
            self.notify("stroke end", |o| o.stroke_ended(&sentinel));
            return;
        }

        if self.is_capturing() {
            self.commit_open_path();
            return;
        }

        if let Some(target) = self.drag_target.as_mut() {
            target.fling(event.velocity_y);
            self.last_translation_y = 0.0;
        }
    }

    /// Closes the open path, commits it, and notifies "stroke ended".
    ///
    /// Returns the committed record, or `None` when nothing was open or the
    /// path limit discarded it.
    pub(crate) fn commit_open_path(&mut self) -> Option<StrokeRecord> {
        let DrawingState::Capturing { mut path } = std::mem::take(&mut self.state) else {
            return None;
        };
        path.close();
        self.backend.end_path();

        let id = path.id();
        let record = StrokeRecord::new(path, self.surface.size());
        match self.store.add(record.clone()) {
            AddOutcome::Added => {
                debug!("Committed path {id} ({} points)", record.path.points().len());
                self.notify("stroke end", |o| o.stroke_ended(&record));
                self.notify_paths_changed();
                Some(record)
            }
            AddOutcome::LimitReached => {
                warn!("Path limit reached; discarding path {id}");
                self.backend.delete_path(id);
                None
            }
            AddOutcome::Duplicate => {
                warn!("Path {id} already committed; discarding the new copy");
                None
            }
        }
    }
}
