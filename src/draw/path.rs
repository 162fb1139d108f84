//! Path, style, and stroke record definitions.

use super::ModelError;
use super::color::{BLACK, Color};
use super::point::Point;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a path, unique among the live paths of one surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathId(pub i64);

impl PathId {
    /// Id carried by the placeholder record emitted when an eraser gesture ends.
    pub const SENTINEL: PathId = PathId(-1);
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stroke appearance, fixed for the lifetime of a path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathStyle {
    color: Color,
    width: f64,
}

impl PathStyle {
    /// Validates and builds a style. `width` is in logical units.
    pub fn new(color: Color, width: f64) -> Result<Self, ModelError> {
        if !color.is_valid() {
            return Err(ModelError::InvalidColor(format!("{color:?}")));
        }
        if !width.is_finite() || width < 0.0 {
            return Err(ModelError::InvalidWidth(width));
        }
        Ok(Self { color, width })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }
}

impl Default for PathStyle {
    /// Black, 3 units wide.
    fn default() -> Self {
        Self {
            color: BLACK,
            width: 3.0,
        }
    }
}

/// One continuous stroke: an ordered point sequence plus style.
///
/// Points are appended while the path is open and frozen once [`Path::close`]
/// has been called.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    id: PathId,
    style: PathStyle,
    points: Vec<Point>,
    owner: Option<String>,
    closed: bool,
}

impl Path {
    /// Opens an empty path awaiting its first sample.
    pub fn open(id: PathId, style: PathStyle, owner: Option<String>) -> Self {
        Self {
            id,
            style,
            points: Vec::new(),
            owner,
            closed: false,
        }
    }

    /// Builds an already-closed path from existing points.
    pub fn closed(id: PathId, style: PathStyle, points: Vec<Point>, owner: Option<String>) -> Self {
        Self {
            id,
            style,
            points,
            owner,
            closed: true,
        }
    }

    /// Appends a sample. Returns `false` (and drops the sample) once the path is closed.
    pub fn push(&mut self, point: Point) -> bool {
        if self.closed {
            debug!("Ignoring point appended to closed path {}", self.id);
            return false;
        }
        self.points.push(point);
        true
    }

    /// Freezes the point sequence.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn id(&self) -> PathId {
        self.id
    }

    pub fn style(&self) -> PathStyle {
        self.style
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}

/// Surface dimensions in logical units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative, or not finite.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// A committed path together with the surface size it was captured against.
///
/// Points are only meaningful relative to `size`; replaying the record on a
/// surface of another size rescales by `current / size`.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeRecord {
    pub path: Path,
    pub size: SurfaceSize,
}

impl StrokeRecord {
    pub fn new(path: Path, size: SurfaceSize) -> Self {
        Self { path, size }
    }

    /// Placeholder record reported when an eraser gesture ends.
    pub fn sentinel(style: PathStyle) -> Self {
        Self {
            path: Path::closed(PathId::SENTINEL, style, Vec::new(), None),
            size: SurfaceSize::default(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.path.id() == PathId::SENTINEL
    }

    pub fn id(&self) -> PathId {
        self.path.id()
    }

    pub fn owner(&self) -> Option<&str> {
        self.path.owner()
    }
}

// ============================================================================
// Wire Form
// ============================================================================

/// Path as exchanged with other clients: color as text, points as `"x,y"` strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WirePath {
    pub id: i64,
    pub color: String,
    pub width: f64,
    #[serde(default)]
    pub data: Vec<String>,
}

/// Stroke record as exchanged with other clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireRecord {
    pub path: WirePath,
    pub size: SurfaceSize,
    #[serde(default)]
    pub drawer: Option<String>,
}

impl From<&StrokeRecord> for WireRecord {
    fn from(record: &StrokeRecord) -> Self {
        let style = record.path.style();
        WireRecord {
            path: WirePath {
                id: record.id().0,
                color: style.color().to_hex(),
                width: style.width(),
                data: record.path.points().iter().map(Point::to_string).collect(),
            },
            size: record.size,
            drawer: record.owner().map(str::to_string),
        }
    }
}

impl TryFrom<WireRecord> for StrokeRecord {
    type Error = ModelError;

    /// Converts a wire record, dropping any point that fails to parse.
    ///
    /// Only an invalid color or width rejects the whole record.
    fn try_from(wire: WireRecord) -> Result<Self, Self::Error> {
        let color: Color = wire.path.color.parse()?;
        let style = PathStyle::new(color, wire.path.width)?;

        let total = wire.path.data.len();
        let points: Vec<Point> = wire
            .path
            .data
            .iter()
            .filter_map(|raw| match raw.parse::<Point>() {
                Ok(point) => Some(point),
                Err(err) => {
                    warn!("Path {}: dropping point: {err}", wire.path.id);
                    None
                }
            })
            .collect();
        if points.len() != total {
            debug!(
                "Path {}: kept {} of {} points",
                wire.path.id,
                points.len(),
                total
            );
        }

        let path = Path::closed(PathId(wire.path.id), style, points, wire.drawer);
        Ok(StrokeRecord::new(path, wire.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLUE;

    fn wire(data: &[&str]) -> WireRecord {
        WireRecord {
            path: WirePath {
                id: 42,
                color: "blue".into(),
                width: 2.0,
                data: data.iter().map(|s| s.to_string()).collect(),
            },
            size: SurfaceSize::new(300.0, 600.0),
            drawer: Some("u1".into()),
        }
    }

    #[test]
    fn style_rejects_negative_width() {
        assert_eq!(
            PathStyle::new(BLACK, -1.0),
            Err(ModelError::InvalidWidth(-1.0))
        );
        assert!(PathStyle::new(BLACK, 0.0).is_ok());
    }

    #[test]
    fn closed_path_ignores_new_points() {
        let style = PathStyle::new(BLACK, 3.0).unwrap();
        let mut path = Path::open(PathId(1), style, None);
        assert!(path.points().is_empty());
        assert!(path.push(Point::new(1.0, 1.0)));

        path.close();
        assert!(!path.push(Point::new(2.0, 2.0)));
        assert_eq!(path.points(), &[Point::new(1.0, 1.0)]);
    }

    #[test]
    fn wire_conversion_drops_malformed_points() {
        let record = StrokeRecord::try_from(wire(&["1,2", "oops", "3.456,4"])).unwrap();
        assert_eq!(record.id(), PathId(42));
        assert_eq!(record.owner(), Some("u1"));
        assert_eq!(record.path.style().color(), BLUE);
        assert_eq!(
            record.path.points(),
            &[Point::new(1.0, 2.0), Point::new(3.46, 4.0)]
        );
        assert!(record.path.is_closed());
    }

    #[test]
    fn wire_conversion_rejects_bad_color() {
        let mut bad = wire(&["1,2"]);
        bad.path.color = "not-a-color".into();
        assert!(matches!(
            StrokeRecord::try_from(bad),
            Err(ModelError::InvalidColor(_))
        ));
    }

    #[test]
    fn record_serializes_points_with_two_decimals() {
        let style = PathStyle::new(BLUE, 2.0).unwrap();
        let path = Path::closed(PathId(7), style, vec![Point::new(0.5, 10.0)], None);
        let wire = WireRecord::from(&StrokeRecord::new(path, SurfaceSize::new(10.0, 10.0)));
        assert_eq!(wire.path.data, vec!["0.50,10.00".to_string()]);
        assert_eq!(wire.path.color, "#0000ff");
        assert_eq!(wire.drawer, None);
    }

    #[test]
    fn empty_surface_detection() {
        assert!(SurfaceSize::default().is_empty());
        assert!(SurfaceSize::new(100.0, 0.0).is_empty());
        assert!(!SurfaceSize::new(100.0, 50.0).is_empty());
    }
}
