//! Bulge arcs.
//!
//! A polyline vertex may carry a *bulge*: the tangent of a quarter of the
//! included angle of the circular arc running to the next vertex. Positive
//! bulges turn counter-clockwise, negative bulges clockwise, and a bulge of
//! exactly `1.0` is a semicircle.

use crate::error::{GeometryError, Result};
use crate::geometry::point::Point2;
use crate::EPSILON;
use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

/// Bulges smaller than this are straight edges.
pub const BULGE_EPSILON: f64 = 1e-12;

/// Direction in which an arc is swept from its start point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationSense {
    Clockwise,
    CounterClockwise,
}

/// A circular arc recovered from a chord and a bulge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSpec {
    /// Chord start (A); the arc begins here.
    pub start: Point2,
    /// Chord end (B); the arc finishes here.
    pub end: Point2,
    pub center: Point2,
    pub radius: f64,
    /// Angle of `start` measured from `center`, radians.
    pub start_angle: f64,
    /// Angle of `end` measured from `center`, radians, in `(-PI, PI]`.
    pub end_angle: f64,
    /// Signed included angle; positive when counter-clockwise.
    pub sweep: f64,
}

impl ArcSpec {
    pub fn sense(&self) -> RotationSense {
        if self.sweep < 0.0 {
            RotationSense::Clockwise
        } else {
            RotationSense::CounterClockwise
        }
    }

    /// Point on the circle at `angle` (radians from the center).
    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        Point2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    /// Point on the arc at the midpoint of the sweep.
    pub fn midpoint(&self) -> Point2 {
        let radial: Vector2<f64> = self.start.sub(&self.center).into();
        let rotated = Rotation2::new(self.sweep * 0.5) * radial;
        self.center.add(&Point2::from(rotated))
    }

    /// Splits the arc into two halves of equal included angle.
    pub fn split_at_midpoint(&self) -> (ArcSpec, ArcSpec) {
        let mid = self.midpoint();
        let mid_angle = mid.sub(&self.center).angle();
        let half = self.sweep * 0.5;
        let first = ArcSpec {
            start: self.start,
            end: mid,
            center: self.center,
            radius: self.radius,
            start_angle: self.start_angle,
            end_angle: mid_angle,
            sweep: half,
        };
        let second = ArcSpec {
            start: mid,
            end: self.end,
            center: self.center,
            radius: self.radius,
            start_angle: mid_angle,
            end_angle: self.end_angle,
            sweep: half,
        };
        (first, second)
    }
}

/// Recovers the arc through `a` and `b` described by `bulge`.
///
/// Straight edges (`bulge == 0`) and coincident endpoints are rejected; the
/// caller is expected to treat both as straight segments.
pub fn bulge_to_arc(a: Point2, b: Point2, bulge: f64) -> Result<ArcSpec> {
    if !bulge.is_finite() {
        return Err(GeometryError::NonFiniteBulge(bulge));
    }
    if bulge.abs() < BULGE_EPSILON {
        return Err(GeometryError::StraightSegment);
    }

    let chord = b.sub(&a);
    let chord_len = chord.length();
    let normal = match chord.left_normal() {
        Some(n) if chord_len > EPSILON => n,
        _ => return Err(GeometryError::ZeroLengthChord { x: a.x, y: a.y }),
    };

    // Signed distance from the chord midpoint to the center along the left
    // normal is (c / 2) * cot(theta / 2), with theta = 4 * atan(bulge).
    let b2 = bulge * bulge;
    let center_offset = chord_len * (1.0 - b2) / (4.0 * bulge);
    let center = a.midpoint(&b).add(&normal.scale(center_offset));
    let radius = chord_len * (1.0 + b2) / (4.0 * bulge.abs());

    Ok(ArcSpec {
        start: a,
        end: b,
        center,
        radius,
        start_angle: a.sub(&center).angle(),
        end_angle: b.sub(&center).angle(),
        sweep: 4.0 * bulge.atan(),
    })
}

/// Samples `step_count` points along the arc, from A to B inclusive.
///
/// Points are evenly spaced in angle and walk in the arc's own rotation
/// sense, so the sequence passes through A and B in the original edge order.
pub fn tessellate_arc(arc: &ArcSpec, step_count: usize) -> Result<Vec<Point2>> {
    if step_count < 2 {
        return Err(GeometryError::TooFewSamples(step_count));
    }

    let last = step_count - 1;
    let mut points = Vec::with_capacity(step_count);
    points.push(arc.start);
    for i in 1..last {
        let t = i as f64 / last as f64;
        points.push(arc.point_at_angle(arc.start_angle + arc.sweep * t));
    }
    points.push(arc.end);
    Ok(points)
}
