//! Signed polygon buffering.
//!
//! The pipeline only decides the sign of each offset. The buffering itself
//! sits behind [`OffsetEngine`], with [`CavalierOffsetEngine`] as the stock
//! implementation on top of `cavalier_contours`.
//!
//! `cavalier_contours` always joins offset segments with arcs. Those join
//! arcs are rewritten afterwards according to the requested [`JoinStyle`].

use crate::error::OffsetError;
use crate::profile::Profile;
use cavalier_contours::polyline::{PlineSource, Polyline};
use profilekit_core::geometry::arc::BULGE_EPSILON;
use profilekit_core::{bulge_to_arc, polygon, tessellate_arc, ArcSampling, JoinStyle, Point2};
use std::panic;
use tracing::{debug, warn};

/// Rings produced by buffering one profile.
///
/// Empty when the profile eroded away completely. A shrink can split one
/// profile into several disjoint rings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffsetResult {
    pub rings: Vec<Vec<Point2>>,
}

impl OffsetResult {
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// The ring enclosing the largest area.
    pub fn exterior(&self) -> Option<&[Point2]> {
        self.rings
            .iter()
            .max_by(|a, b| {
                polygon::signed_area(a)
                    .abs()
                    .total_cmp(&polygon::signed_area(b).abs())
            })
            .map(Vec::as_slice)
    }
}

/// Polygon buffering collaborator.
pub trait OffsetEngine {
    /// Grows `profile` by `distance` (shrinks it when negative).
    fn buffer(&self, profile: &Profile, distance: f64) -> Result<OffsetResult, OffsetError>;
}

/// [`OffsetEngine`] backed by `cavalier_contours::Polyline::parallel_offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct CavalierOffsetEngine {
    pub join: JoinStyle,
    /// Longest allowed miter, as a multiple of the offset distance.
    pub miter_limit: f64,
    /// Sampling for round joins.
    pub sampling: ArcSampling,
    pub tolerance: f64,
}

impl Default for CavalierOffsetEngine {
    fn default() -> Self {
        Self {
            join: JoinStyle::Miter,
            miter_limit: 4.0,
            sampling: ArcSampling::default(),
            tolerance: profilekit_core::EPSILON,
        }
    }
}

impl CavalierOffsetEngine {
    pub fn new(join: JoinStyle) -> Self {
        Self {
            join,
            ..Self::default()
        }
    }

    pub fn with_miter_limit(mut self, miter_limit: f64) -> Self {
        self.miter_limit = miter_limit;
        self
    }

    pub fn with_sampling(mut self, sampling: ArcSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Flattens one offset polyline into a ring, replacing each join arc.
    fn flatten(&self, pline: &Polyline<f64>) -> Vec<Point2> {
        let count = pline.vertex_count();
        let mut ring = Vec::with_capacity(count * 2);

        for i in 0..count {
            let v1 = pline.at(i);
            let v2 = pline.at((i + 1) % count);
            let start = Point2::new(v1.x, v1.y);
            let end = Point2::new(v2.x, v2.y);
            ring.push(start);

            if v1.bulge.abs() < BULGE_EPSILON {
                continue;
            }
            match self.join {
                JoinStyle::Bevel => {}
                JoinStyle::Miter => {
                    if let Some(apex) = self.miter_apex(start, end, v1.bulge) {
                        ring.push(apex);
                    }
                }
                JoinStyle::Round => ring.extend(self.round_join(start, end, v1.bulge)),
            }
        }

        ring
    }

    /// Where the tangents at both ends of a join arc meet, or `None` when
    /// that point lies beyond the miter limit.
    fn miter_apex(&self, start: Point2, end: Point2, bulge: f64) -> Option<Point2> {
        if bulge.abs() >= 1.0 {
            return None;
        }
        let sweep = 4.0 * bulge.atan();
        let ratio = 1.0 / (sweep.abs() * 0.5).cos();
        if ratio > self.miter_limit {
            return None;
        }

        let chord = end.sub(&start);
        let length = chord.length();
        if length <= self.tolerance {
            return None;
        }
        let right = Point2::new(chord.y / length, -chord.x / length);
        let height = length * bulge / (1.0 - bulge * bulge);
        Some(start.midpoint(&end).add(&right.scale(height)))
    }

    /// Interior sample points of a join arc.
    fn round_join(&self, start: Point2, end: Point2, bulge: f64) -> Vec<Point2> {
        let Ok(arc) = bulge_to_arc(start, end, bulge) else {
            return Vec::new();
        };
        let count = self.sampling.sample_count(arc.radius, arc.sweep);
        match tessellate_arc(&arc, count) {
            Ok(points) if points.len() > 2 => points[1..points.len() - 1].to_vec(),
            _ => Vec::new(),
        }
    }
}

impl OffsetEngine for CavalierOffsetEngine {
    fn buffer(&self, profile: &Profile, distance: f64) -> Result<OffsetResult, OffsetError> {
        if !distance.is_finite() {
            return Err(OffsetError::InvalidDistance(distance));
        }
        if distance.abs() <= self.tolerance {
            return Ok(OffsetResult {
                rings: vec![profile.vertices().to_vec()],
            });
        }

        let pline = polygon::to_polyline(profile.vertices());
        // Positive cavalier offsets move left of each segment, which is
        // inward for a counter-clockwise ring.
        let offsets = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            pline.parallel_offset(-distance)
        }))
        .map_err(|_| {
            warn!(
                vertices = profile.vertex_count(),
                distance, "Panic during parallel offset"
            );
            OffsetError::EngineFailure("parallel offset panicked".to_string())
        })?;

        let mut rings = Vec::with_capacity(offsets.len());
        for offset in offsets.iter().filter(|p| p.is_closed()) {
            let mut ring = polygon::simplify_ring(&self.flatten(offset), self.tolerance);
            let area = polygon::signed_area(&ring);
            if ring.len() < 3 || area.abs() <= self.tolerance {
                debug!(vertices = ring.len(), area, "Dropping degenerate offset ring");
                continue;
            }
            if area < 0.0 {
                ring.reverse();
            }
            rings.push(ring);
        }

        Ok(OffsetResult { rings })
    }
}
