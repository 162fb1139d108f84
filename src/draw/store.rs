//! Committed and pending stroke collections for a surface.

use super::path::{PathId, StrokeRecord};

/// Result of [`PathStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The record was committed.
    Added,
    /// A record with the same id is already present; nothing changed.
    Duplicate,
    /// The store is at its configured capacity; the record was discarded.
    LimitReached,
}

/// Container for all strokes of one drawing surface.
///
/// Committed records are kept in insertion order (first = bottom layer).
/// Records that arrive before the surface has a size wait in the pending
/// queue until the owner drains it with [`PathStore::take_pending`].
#[derive(Debug, Clone, Default)]
pub struct PathStore {
    committed: Vec<StrokeRecord>,
    pending: Vec<StrokeRecord>,
    /// Maximum number of committed records (0 = unlimited)
    max_paths: usize,
}

impl PathStore {
    /// Creates an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that commits at most `max_paths` records (0 = unlimited).
    pub fn with_limit(max_paths: usize) -> Self {
        Self {
            max_paths,
            ..Self::default()
        }
    }

    /// Returns true when `id` is committed or pending.
    pub fn contains(&self, id: PathId) -> bool {
        self.committed.iter().any(|r| r.id() == id) || self.pending.iter().any(|r| r.id() == id)
    }

    /// Commits a record unless its id is already committed or the limit is reached.
    pub fn add(&mut self, record: StrokeRecord) -> AddOutcome {
        if self.committed.iter().any(|r| r.id() == record.id()) {
            return AddOutcome::Duplicate;
        }
        if self.max_paths > 0 && self.committed.len() >= self.max_paths {
            return AddOutcome::LimitReached;
        }
        self.committed.push(record);
        AddOutcome::Added
    }

    /// Queues a record for commit once the surface is ready.
    ///
    /// Returns `false` if a record with the same id is already committed or queued.
    pub fn queue_pending(&mut self, record: StrokeRecord) -> bool {
        if self.contains(record.id()) {
            return false;
        }
        self.pending.push(record);
        true
    }

    /// Drains the pending queue in original insertion order.
    pub fn take_pending(&mut self) -> Vec<StrokeRecord> {
        std::mem::take(&mut self.pending)
    }

    /// Removes the record with `id` from both committed and pending collections.
    ///
    /// Returns the committed record if there was one. Unknown ids are ignored.
    pub fn delete_by_id(&mut self, id: PathId) -> Option<StrokeRecord> {
        self.pending.retain(|r| r.id() != id);
        let index = self.committed.iter().position(|r| r.id() == id)?;
        Some(self.committed.remove(index))
    }

    /// Removes every committed and pending record.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.pending.clear();
    }

    /// Committed records in insertion order.
    pub fn all(&self) -> &[StrokeRecord] {
        &self.committed
    }

    /// Records still waiting for the surface to become ready.
    pub fn pending(&self) -> &[StrokeRecord] {
        &self.pending
    }

    /// Id of the most recently committed record attributed to `owner`.
    pub fn latest_for_owner(&self, owner: Option<&str>) -> Option<PathId> {
        self.committed
            .iter()
            .rev()
            .find(|r| r.owner() == owner)
            .map(StrokeRecord::id)
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;
    use crate::draw::path::{Path, PathStyle, SurfaceSize};
    use crate::draw::point::Point;

    fn record(id: i64, owner: Option<&str>) -> StrokeRecord {
        let style = PathStyle::new(RED, 3.0).unwrap();
        let path = Path::closed(
            PathId(id),
            style,
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            owner.map(str::to_string),
        );
        StrokeRecord::new(path, SurfaceSize::new(100.0, 100.0))
    }

    #[test]
    fn add_is_idempotent_by_id() {
        let mut store = PathStore::new();
        assert_eq!(store.add(record(1, None)), AddOutcome::Added);
        assert_eq!(store.add(record(1, None)), AddOutcome::Duplicate);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn deleting_unknown_id_leaves_store_unchanged() {
        let mut store = PathStore::new();
        store.add(record(1, None));
        store.add(record(2, None));

        assert!(store.delete_by_id(PathId(99)).is_none());
        let ids: Vec<_> = store.all().iter().map(StrokeRecord::id).collect();
        assert_eq!(ids, vec![PathId(1), PathId(2)]);
    }

    #[test]
    fn limit_discards_new_records() {
        let mut store = PathStore::with_limit(1);
        assert_eq!(store.add(record(1, None)), AddOutcome::Added);
        assert_eq!(store.add(record(2, None)), AddOutcome::LimitReached);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn pending_queue_preserves_order_and_dedupes() {
        let mut store = PathStore::new();
        assert!(store.queue_pending(record(3, None)));
        assert!(store.queue_pending(record(1, None)));
        assert!(!store.queue_pending(record(3, None)));
        assert!(store.contains(PathId(1)));
        assert!(store.is_empty());

        let drained: Vec<_> = store.take_pending().iter().map(StrokeRecord::id).collect();
        assert_eq!(drained, vec![PathId(3), PathId(1)]);
        assert!(store.pending().is_empty());
    }

    #[test]
    fn delete_also_drops_pending_copy() {
        let mut store = PathStore::new();
        store.queue_pending(record(5, None));
        assert!(store.delete_by_id(PathId(5)).is_none());
        assert!(store.pending().is_empty());
    }

    #[test]
    fn latest_for_owner_picks_most_recent_match() {
        let mut store = PathStore::new();
        store.add(record(1, Some("u1")));
        store.add(record(2, Some("u2")));
        store.add(record(3, Some("u1")));
        store.add(record(4, None));

        assert_eq!(store.latest_for_owner(Some("u1")), Some(PathId(3)));
        assert_eq!(store.latest_for_owner(Some("u2")), Some(PathId(2)));
        assert_eq!(store.latest_for_owner(None), Some(PathId(4)));
        assert_eq!(store.latest_for_owner(Some("u3")), None);
    }

    #[test]
    fn clear_empties_both_collections() {
        let mut store = PathStore::new();
        store.add(record(1, None));
        store.queue_pending(record(2, None));
        store.clear();
        assert!(store.is_empty());
        assert!(store.pending().is_empty());
    }
}
