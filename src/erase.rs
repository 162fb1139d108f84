//! Nearest-path hit testing for the eraser.
//!
//! Recorded strokes can be sparse (fast gestures produce widely spaced
//! samples), so each path is first densified into an *enhanced* point
//! sequence by linear interpolation. The hit distance of a path is the
//! minimum distance from the query point to any enhanced point.

use crate::draw::{PathId, Point, StrokeRecord, SurfaceSize};
use crate::surface;

/// Default maximum hit distance, in logical units.
pub const DEFAULT_THRESHOLD: f64 = 10.0;
/// Default spacing of interpolated samples, in logical units.
pub const DEFAULT_SAMPLING_INTERVAL: f64 = 10.0;

/// Eraser tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EraserSettings {
    /// Paths whose hit distance is strictly below this value are erased
    pub threshold: f64,
    /// Consecutive points farther apart than this get interpolated samples
    pub sampling_interval: f64,
}

impl Default for EraserSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            sampling_interval: DEFAULT_SAMPLING_INTERVAL,
        }
    }
}

/// A path and its distance from a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub id: PathId,
    pub distance: f64,
}

/// Upper bound on the sub-segments [`enhanced_points`] materializes per segment.
pub const MAX_SEGMENT_SAMPLES: usize = 4096;

/// Number of equal sub-segments a segment of length `distance` is split into,
/// or `None` when no interpolation applies.
fn segment_samples(distance: f64, interval: f64) -> Option<f64> {
    let interpolate = interval.is_finite() && interval > 0.0;
    (interpolate && distance.is_finite() && distance > interval).then(|| (distance / interval).ceil())
}

/// Densifies `points` so no two consecutive samples are more than `interval` apart.
///
/// Between a pair at distance `d > interval`, `ceil(d / interval) - 1` evenly
/// spaced points are inserted, capped at [`MAX_SEGMENT_SAMPLES`] sub-segments.
/// A non-positive interval disables interpolation.
pub fn enhanced_points(points: &[Point], interval: f64) -> Vec<Point> {
    let Some(&last) = points.last() else {
        return Vec::new();
    };

    let mut enhanced = Vec::with_capacity(points.len());
    for pair in points.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        enhanced.push(current);

        if let Some(samples) = segment_samples(current.distance_to(next), interval) {
            let samples = samples.min(MAX_SEGMENT_SAMPLES as f64) as usize;
            for j in 1..samples {
                enhanced.push(current.lerp(next, j as f64 / samples as f64));
            }
        }
    }
    enhanced.push(last);
    enhanced
}

/// Distance from `query` to the nearest enhanced sample on segment `a`-`b`.
///
/// The samples are evenly spaced along the segment, so the nearest one is the
/// sample index closest to the query's projection.
fn segment_distance(a: Point, b: Point, query: Point, interval: f64) -> f64 {
    let Some(samples) = segment_samples(a.distance_to(b), interval) else {
        return a.distance_to(query).min(b.distance_to(query));
    };

    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let t = ((query.x - a.x) * dx + (query.y - a.y) * dy) / (dx * dx + dy * dy);
    if t.is_nan() {
        return a.distance_to(query).min(b.distance_to(query));
    }
    let t = t.clamp(0.0, 1.0);
    let index = (t * samples).round().clamp(0.0, samples);
    a.lerp(b, index / samples).distance_to(query)
}

/// Minimum distance from `query` to the enhanced sequence of `points`.
///
/// Computed per segment without materializing the sequence. Returns `None`
/// for an empty path.
pub fn hit_distance(points: &[Point], query: Point, interval: f64) -> Option<f64> {
    match points {
        [] => None,
        [only] => Some(only.distance_to(query)),
        _ => points
            .windows(2)
            .map(|pair| segment_distance(pair[0], pair[1], query, interval))
            .min_by(f64::total_cmp),
    }
}

/// Ranks every record by hit distance, nearest first; ties go to the lower id.
///
/// When `current` is given, records captured on a differently sized surface are
/// rescaled into `current`'s logical units before measuring. Empty paths are skipped.
pub fn rank_paths(
    records: &[StrokeRecord],
    query: Point,
    settings: &EraserSettings,
    current: Option<SurfaceSize>,
) -> Vec<Hit> {
    let mut hits: Vec<Hit> = records
        .iter()
        .filter_map(|record| {
            let points = normalized_points(record, current);
            hit_distance(&points, query, settings.sampling_interval).map(|distance| Hit {
                id: record.id(),
                distance,
            })
        })
        .collect();

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.id.cmp(&b.id)));
    hits
}

/// Ranked hits whose distance is strictly below the threshold.
pub fn find_hits(
    records: &[StrokeRecord],
    query: Point,
    settings: &EraserSettings,
    current: Option<SurfaceSize>,
) -> Vec<Hit> {
    rank_paths(records, query, settings, current)
        .into_iter()
        .take_while(|hit| hit.distance < settings.threshold)
        .collect()
}

fn normalized_points(record: &StrokeRecord, current: Option<SurfaceSize>) -> Vec<Point> {
    match current {
        Some(current) if !record.size.is_empty() && record.size != current => record
            .path
            .points()
            .iter()
            .map(|&p| surface::rescale_logical(p, record.size, current))
            .collect(),
        _ => record.path.points().to_vec(),
    }
}
