//! Sample points and their two-decimal text form.

use super::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single stroke sample.
///
/// Logical points are kept at full precision; [`Point::rounded`] and the
/// `"x,y"` text form fix them to two decimal places.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the point with both coordinates rounded to two decimals.
    pub fn rounded(self) -> Self {
        Self {
            x: round2(self.x),
            y: round2(self.y),
        }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation toward `other`; `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2},{:.2}", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = ModelError;

    /// Parses `"x,y"`; the result is rounded to two decimals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidPoint(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x: f64 = x.trim().parse().map_err(|_| invalid())?;
        let y: f64 = y.trim().parse().map_err(|_| invalid())?;
        let point = Point::new(x, y);
        if !point.is_finite() {
            return Err(invalid());
        }
        Ok(point.rounded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form_uses_two_decimals() {
        assert_eq!(Point::new(1.0, 2.346).to_string(), "1.00,2.35");
        assert_eq!(Point::new(-0.004, 10.0).rounded(), Point::new(-0.0, 10.0));
    }

    #[test]
    fn parses_and_rounds() {
        let point: Point = " 12.3456 , 7 ".parse().unwrap();
        assert_eq!(point, Point::new(12.35, 7.0));
    }

    #[test]
    fn rejects_unparsable_text() {
        for bad in ["", "1", "1,", "a,b", "1;2", "NaN,1", "inf,2"] {
            assert!(bad.parse::<Point>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn distance_and_lerp() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(a.lerp(b, 0.5), Point::new(1.5, 2.0));
    }
}
