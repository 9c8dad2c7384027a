//! Closed polygonal profiles.

use crate::error::{ProfileError, ProfileResult};
use profilekit_core::polygon;
use profilekit_core::Point2;
use serde::{Deserialize, Serialize};

/// A closed, counter-clockwise polygon approximating one drawing element.
///
/// The first vertex connects back to the last; no closing duplicate is
/// stored. Self-intersection is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    vertices: Vec<Point2>,
    area: f64,
    /// Index of the entity this profile was built from, if known.
    source: Option<usize>,
}

impl Profile {
    /// Builds a profile from a raw vertex loop.
    ///
    /// Repeated positions (within `tolerance`), a closing duplicate and
    /// vertices in the middle of a straight run are removed, and clockwise
    /// input is reversed.
    pub fn new(vertices: Vec<Point2>, tolerance: f64) -> ProfileResult<Self> {
        if vertices.iter().any(|p| !p.is_finite()) {
            return Err(ProfileError::NonFinite);
        }

        let mut clean = polygon::simplify_ring(&vertices, tolerance);
        if clean.len() < 3 {
            return Err(ProfileError::TooFewVertices {
                vertices: clean.len(),
            });
        }

        let signed = polygon::signed_area(&clean);
        if signed.abs() <= tolerance * tolerance {
            return Err(ProfileError::ZeroArea { area: signed });
        }
        if signed < 0.0 {
            clean.reverse();
        }

        Ok(Self {
            vertices: clean,
            area: signed.abs(),
            source: None,
        })
    }

    pub fn with_source(mut self, source: usize) -> Self {
        self.source = Some(source);
        self
    }

    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Enclosed area (always positive).
    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn source(&self) -> Option<usize> {
        self.source
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn bounding_box(&self) -> (Point2, Point2) {
        // A constructed profile always has at least three vertices.
        polygon::bounding_box(&self.vertices).unwrap_or_default()
    }

    /// True if `other` lies entirely in this profile's closed region.
    pub fn covers(&self, other: &Profile, tolerance: f64) -> bool {
        polygon::ring_covers_ring(&self.vertices, &other.vertices, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn test_clockwise_input_is_reversed() {
        let cw = pts(&[(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0)]);
        let profile = Profile::new(cw, 1e-9).unwrap();
        assert!(polygon::is_counter_clockwise(profile.vertices()));
        assert_eq!(profile.area(), 16.0);
    }

    #[test]
    fn test_closing_duplicate_dropped() {
        let ring = pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 0.0)]);
        let profile = Profile::new(ring, 1e-9).unwrap();
        assert_eq!(profile.vertex_count(), 3);
    }

    #[test]
    fn test_degenerate_rejected() {
        let two = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0)]);
        assert_eq!(
            Profile::new(two, 1e-9),
            Err(ProfileError::TooFewVertices { vertices: 2 })
        );

        let collinear = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert!(matches!(
            Profile::new(collinear, 1e-9),
            Err(ProfileError::ZeroArea { .. } | ProfileError::TooFewVertices { .. })
        ));

        let nan = pts(&[(0.0, 0.0), (f64::NAN, 0.0), (2.0, 2.0)]);
        assert_eq!(Profile::new(nan, 1e-9), Err(ProfileError::NonFinite));
    }

    #[test]
    fn test_covers() {
        let outer = Profile::new(pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]), 1e-9)
            .unwrap();
        let inner = Profile::new(pts(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0)]), 1e-9).unwrap();
        assert!(outer.covers(&inner, 1e-9));
        assert!(!inner.covers(&outer, 1e-9));
    }

    #[test]
    fn test_collinear_run_collapsed() {
        let ring = pts(&[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let profile = Profile::new(ring, 1e-9).unwrap();
        assert_eq!(profile.vertex_count(), 4);
        assert_eq!(profile.area(), 16.0);
    }
}
