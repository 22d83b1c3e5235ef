//! City coordinates and their bounding box.

use std::fmt;

/// A city on the integer grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = *points.first()?;
        let (mut min, mut max) = (first, first);
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    pub fn width(&self) -> f64 {
        f64::from(self.max.x) - f64::from(self.min.x)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.max.y) - f64::from(self.min.y)
    }

    /// `max(width, height)`.
    pub fn extent(&self) -> f64 {
        self.width().max(self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_pythagorean() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance(&a) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_distance_extreme_coordinates() {
        let a = Point::new(i32::MIN, 0);
        let b = Point::new(i32::MAX, 0);
        let expected = f64::from(i32::MAX) - f64::from(i32::MIN);
        assert!((a.distance(&b) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_bounds_of_points() {
        let pts = [Point::new(3, -1), Point::new(-2, 7), Point::new(5, 2)];
        let b = Bounds::of(&pts).unwrap();
        assert_eq!(b.min, Point::new(-2, -1));
        assert_eq!(b.max, Point::new(5, 7));
        assert!((b.width() - 7.0).abs() < 1e-12);
        assert!((b.height() - 8.0).abs() < 1e-12);
        assert!((b.extent() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_of_empty() {
        assert!(Bounds::of(&[]).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(-3, 12).to_string(), "(-3,12)");
    }
}
