//! Surface state and coordinate normalization.
//!
//! Stored points are logical: expressed in the units of the surface they were
//! captured on. Render commands use pixels: logical units rescaled to the
//! current surface size and multiplied by the device scale.

use crate::draw::{Point, SurfaceSize};
use log::{debug, warn};

/// Resolves the device scale for a surface once.
///
/// Platforms that already deliver pre-scaled points use `1`; others use the
/// platform pixel density. Non-positive or non-finite densities fall back to `1`.
pub fn resolve_device_scale(pre_scaled_input: bool, pixel_density: f64) -> f64 {
    if pre_scaled_input {
        return 1.0;
    }
    if pixel_density.is_finite() && pixel_density > 0.0 {
        pixel_density
    } else {
        warn!("Invalid pixel density {pixel_density}, using 1.0");
        1.0
    }
}

fn usable_scale(device_scale: f64) -> bool {
    device_scale.is_finite() && device_scale > 0.0
}

/// Converts a logical point captured against `captured` into pixels for `current`.
///
/// `pixel.x = point.x * device_scale * current.width / captured.width` (same for y).
/// Returns the point unchanged when either size is empty or the scale is unusable.
pub fn to_pixels(point: Point, captured: SurfaceSize, current: SurfaceSize, device_scale: f64) -> Point {
    if captured.is_empty() || current.is_empty() || !usable_scale(device_scale) {
        warn!(
            "Cannot scale point {point}: captured {}x{}, current {}x{}, scale {device_scale}",
            captured.width, captured.height, current.width, current.height
        );
        return point;
    }
    Point::new(
        point.x * device_scale * current.width / captured.width,
        point.y * device_scale * current.height / captured.height,
    )
}

/// Inverse of [`to_pixels`]: converts a pixel point on `current` back into the
/// logical units of `captured`.
///
/// Passing `captured == current` gives the single-surface inverse, which only
/// divides out `device_scale`.
pub fn to_logical(pixel: Point, captured: SurfaceSize, current: SurfaceSize, device_scale: f64) -> Point {
    if captured.is_empty() || current.is_empty() || !usable_scale(device_scale) {
        warn!(
            "Cannot unscale point {pixel}: captured {}x{}, current {}x{}, scale {device_scale}",
            captured.width, captured.height, current.width, current.height
        );
        return pixel;
    }
    Point::new(
        pixel.x * captured.width / (device_scale * current.width),
        pixel.y * captured.height / (device_scale * current.height),
    )
}

/// Rescales a logical point from the `captured` surface into the logical units of `current`.
pub fn rescale_logical(point: Point, captured: SurfaceSize, current: SurfaceSize) -> Point {
    to_pixels(point, captured, current, 1.0)
}

/// Converts a logical stroke width into pixels.
pub fn scale_width(width: f64, device_scale: f64) -> f64 {
    if usable_scale(device_scale) {
        width * device_scale
    } else {
        width
    }
}

/// Laid-out size and scale of the host surface.
///
/// No size-dependent transform is computed until the host reports a
/// non-empty layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceState {
    size: SurfaceSize,
    device_scale: f64,
    ready: bool,
}

impl SurfaceState {
    pub fn new(device_scale: f64) -> Self {
        Self {
            size: SurfaceSize::default(),
            device_scale: if usable_scale(device_scale) {
                device_scale
            } else {
                1.0
            },
            ready: false,
        }
    }

    /// Records a layout report from the host.
    ///
    /// Returns `true` when this report made a not-yet-ready surface ready.
    pub fn set_layout(&mut self, width: f64, height: f64) -> bool {
        let was_ready = self.ready;
        self.size = SurfaceSize::new(width, height);
        self.ready = !self.size.is_empty();
        debug!(
            "Surface layout {width}x{height} (ready: {} -> {})",
            was_ready, self.ready
        );
        !was_ready && self.ready
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn device_scale(&self) -> f64 {
        self.device_scale
    }

    /// Pixel position of a point captured on this surface as it is now.
    ///
    /// Only the device scale applies, so live strokes can be drawn before layout.
    pub fn live_pixels(&self, point: Point) -> Point {
        Point::new(point.x * self.device_scale, point.y * self.device_scale)
    }

    /// Pixel position of a point from a record captured against `captured`.
    pub fn replay_pixels(&self, point: Point, captured: SurfaceSize) -> Point {
        to_pixels(point, captured, self.size, self.device_scale)
    }

    pub fn pixel_width(&self, width: f64) -> f64 {
        scale_width(width, self.device_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        a.rounded() == b.rounded()
    }

    #[test]
    fn round_trip_on_same_surface() {
        let size = SurfaceSize::new(300.0, 600.0);
        for scale in [1.0, 2.0, 2.625] {
            for p in [Point::new(0.0, 0.0), Point::new(12.34, 567.89), Point::new(299.99, 0.01)] {
                let pixel = to_pixels(p, size, size, scale);
                assert!(close(to_pixels(to_logical(pixel, size, size, scale), size, size, scale), pixel));
                assert!(close(to_logical(pixel, size, size, scale), p));
            }
        }
    }

    #[test]
    fn rescales_between_surface_sizes() {
        let captured = SurfaceSize::new(100.0, 200.0);
        let current = SurfaceSize::new(200.0, 100.0);
        let pixel = to_pixels(Point::new(10.0, 40.0), captured, current, 2.0);
        assert_eq!(pixel, Point::new(40.0, 40.0));
    }

    #[test]
    fn empty_sizes_yield_identity() {
        let p = Point::new(5.0, 6.0);
        let size = SurfaceSize::new(10.0, 10.0);
        assert_eq!(to_pixels(p, SurfaceSize::new(0.0, 10.0), size, 2.0), p);
        assert_eq!(to_pixels(p, size, SurfaceSize::default(), 2.0), p);
        assert_eq!(to_logical(p, size, SurfaceSize::default(), 2.0), p);
        assert_eq!(to_pixels(p, size, size, 0.0), p);
    }

    #[test]
    fn device_scale_resolution() {
        assert_eq!(resolve_device_scale(true, 3.0), 1.0);
        assert_eq!(resolve_device_scale(false, 3.0), 3.0);
        assert_eq!(resolve_device_scale(false, 0.0), 1.0);
        assert_eq!(scale_width(3.0, 2.0), 6.0);
    }

    #[test]
    fn surface_becomes_ready_once() {
        let mut surface = SurfaceState::new(2.0);
        assert!(!surface.is_ready());
        assert!(!surface.set_layout(0.0, 0.0));
        assert!(surface.set_layout(300.0, 600.0));
        assert!(surface.is_ready());
        assert!(!surface.set_layout(320.0, 600.0));
        assert_eq!(surface.size(), SurfaceSize::new(320.0, 600.0));
        assert_eq!(surface.live_pixels(Point::new(1.5, 2.0)), Point::new(3.0, 4.0));
    }
}
