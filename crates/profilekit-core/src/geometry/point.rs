//! Planar point / vector type.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Represents a 2D point (or free vector) with X and Y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    /// Creates a new point with the given X and Y coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// True when both coordinates are within `tolerance` of `other`.
    pub fn approx_eq(&self, other: &Point2, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }

    pub fn add(&self, other: &Point2) -> Point2 {
        Point2::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: &Point2) -> Point2 {
        Point2::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(&self, factor: f64) -> Point2 {
        Point2::new(self.x * factor, self.y * factor)
    }

    pub fn dot(&self, other: &Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    pub fn cross(&self, other: &Point2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Midpoint between `self` and `other`.
    pub fn midpoint(&self, other: &Point2) -> Point2 {
        Point2::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Left-hand unit normal of this vector, or `None` for the zero vector.
    pub fn left_normal(&self) -> Option<Point2> {
        let len = self.length();
        if len <= crate::EPSILON {
            return None;
        }
        Some(Point2::new(-self.y / len, self.x / len))
    }

    /// Angle of this vector measured from the positive X axis, in radians.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vector2<f64>> for Point2 {
    fn from(v: Vector2<f64>) -> Self {
        Point2::new(v.x, v.y)
    }
}

impl From<Point2> for Vector2<f64> {
    fn from(p: Point2) -> Self {
        Vector2::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Point2::new(x, y)
    }
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_midpoint() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(a.midpoint(&b), Point2::new(1.5, 2.0));
    }

    #[test]
    fn test_left_normal() {
        let n = Point2::new(2.0, 0.0).left_normal().unwrap();
        assert!(n.approx_eq(&Point2::new(0.0, 1.0), 1e-12));
        assert!(Point2::new(0.0, 0.0).left_normal().is_none());
    }

    #[test]
    fn test_nalgebra_conversion() {
        let v: Vector2<f64> = Point2::new(1.0, -2.0).into();
        assert_eq!(v, Vector2::new(1.0, -2.0));
        assert_eq!(Point2::from(v), Point2::new(1.0, -2.0));
    }
}
