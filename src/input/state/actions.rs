use crate::draw::{AddOutcome, PathId, Point, StrokeRecord, SurfaceSize, TextCommand, TextItem};
use crate::erase;
use log::{debug, info, warn};

use super::{DrawingState, StrokeEngine};

impl StrokeEngine {
    /// Records a layout report from the host surface.
    ///
    /// The first non-empty layout makes the surface ready and commits every
    /// pending record in its original order. A later size change commits any
    /// open stroke against the old size and redraws every committed stroke
    /// rescaled to the new one.
    pub fn on_layout(&mut self, width: f64, height: f64) {
        let previous = self.surface.size();
        let was_ready = self.surface.is_ready();
        let resized = previous != SurfaceSize::new(width, height);

        if was_ready && resized && self.is_capturing() {
            debug!("Surface resized mid-stroke; committing the open path");
            self.commit_open_path();
        }

        let became_ready = self.surface.set_layout(width, height);
        if was_ready && resized && self.surface.is_ready() && !self.store.is_empty() {
            self.redraw();
        }
        if !became_ready {
            return;
        }

        let pending = self.store.take_pending();
        if !pending.is_empty() {
            info!("Surface ready; committing {} pending path(s)", pending.len());
        }
        for record in pending {
            self.commit_external(record);
        }
    }

    /// Clears the backend and replays every committed stroke at the current size.
    fn redraw(&mut self) {
        let paths: Vec<_> = self.store.all().iter().map(|r| self.replay_path(r)).collect();
        debug!("Redrawing {} path(s) at {:?}", paths.len(), self.surface.size());
        self.backend.clear();
        for (id, color, width, points) in paths {
            self.backend.add_path(id, color, width, &points);
        }
    }

    /// Backend arguments that draw `record` on the surface as it is now.
    fn replay_path(&self, record: &StrokeRecord) -> (PathId, u32, f64, Vec<Point>) {
        let style = record.path.style();
        let points = record
            .path
            .points()
            .iter()
            .map(|&p| self.surface.replay_pixels(p, record.size))
            .collect();
        (
            record.id(),
            self.encode(style.color()),
            self.surface.pixel_width(style.width()),
            points,
        )
    }

    /// Adds a stroke received from outside the gesture stream.
    ///
    /// Before the surface is ready the record is queued; afterwards it is
    /// committed and replayed on the backend. Duplicate ids are ignored.
    pub fn add_stroke(&mut self, record: StrokeRecord) {
        if record.is_sentinel() {
            debug!("Ignoring sentinel stroke record");
            return;
        }
        if self.open_path().is_some_and(|p| p.id() == record.id()) {
            warn!("Ignoring stroke {} that collides with the open path", record.id());
            return;
        }

        if !self.surface.is_ready() {
            if self.store.queue_pending(record) {
                debug!("Surface not ready; queued stroke");
            }
            return;
        }
        self.commit_external(record);
    }

    fn commit_external(&mut self, record: StrokeRecord) {
        let (id, color, width, points) = self.replay_path(&record);

        match self.store.add(record) {
            AddOutcome::Added => {
                self.backend.add_path(id, color, width, &points);
                self.notify_paths_changed();
            }
            AddOutcome::Duplicate => debug!("Stroke {id} already committed"),
            AddOutcome::LimitReached => warn!("Path limit reached; discarding stroke {id}"),
        }
    }

    /// Deletes a committed (or pending) stroke. Unknown ids are ignored.
    pub fn delete_stroke(&mut self, id: PathId) {
        if self.store.delete_by_id(id).is_some() {
            self.backend.delete_path(id);
            self.notify_paths_changed();
        }
    }

    /// Removes the most recent committed stroke attributed to `owner`.
    ///
    /// Returns its id, or `None` when the owner has no committed strokes.
    pub fn undo_last(&mut self, owner: Option<&str>) -> Option<PathId> {
        let id = self.store.latest_for_owner(owner)?;
        self.delete_stroke(id);
        Some(id)
    }

    /// Removes every stroke, pending record, and the open path.
    pub fn clear(&mut self) {
        self.store.clear();
        self.state = DrawingState::Idle;
        self.backend.clear();
        self.notify_paths_changed();
    }

    /// Enables or disables drawing input.
    ///
    /// Disabling while a stroke is open commits that stroke.
    pub fn set_touch_enabled(&mut self, enabled: bool) {
        if !enabled && self.is_capturing() {
            debug!("Input disabled mid-stroke; committing the open path");
            self.commit_open_path();
        }
        self.touch_enabled = enabled;
    }

    /// Switches eraser mode. Entering it while a stroke is open commits that stroke.
    pub fn set_eraser_mode(&mut self, active: bool) {
        if active && self.is_capturing() {
            self.commit_open_path();
        }
        self.eraser_active = active;
    }

    /// Closes and commits the open stroke, e.g. on focus loss or teardown.
    pub fn finish_open_stroke(&mut self) -> Option<StrokeRecord> {
        self.commit_open_path()
    }

    /// Erases every committed stroke within the eraser threshold of `point`.
    ///
    /// Strokes are removed nearest first and returned in that order; a miss
    /// returns an empty list.
    pub fn erase_at(&mut self, point: Point) -> Vec<StrokeRecord> {
        let current = self.surface.is_ready().then(|| self.surface.size());
        let hits = erase::find_hits(self.store.all(), point, &self.eraser, current);

        let mut erased = Vec::with_capacity(hits.len());
        for hit in hits {
            if let Some(record) = self.store.delete_by_id(hit.id) {
                debug!("Eraser hit path {} at distance {:.2}", hit.id, hit.distance);
                self.backend.delete_path(hit.id);
                erased.push(record);
            }
        }

        if !erased.is_empty() {
            self.notify_paths_changed();
        }
        erased
    }

    /// Passes text overlays through to the backend with encoded colors.
    pub fn render_text(&mut self, items: &[TextItem]) {
        let commands: Vec<TextCommand> = items
            .iter()
            .map(|item| TextCommand {
                item: item.clone(),
                color: self.encode(item.color),
            })
            .collect();
        self.backend.render_text(&commands);
    }
}
