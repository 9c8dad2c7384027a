//! Measurements, clean-up and region predicates over closed rings.
//!
//! A ring is a slice of points where the last point implicitly connects back
//! to the first; no closing duplicate is stored. Area, orientation and
//! redundant-vertex removal run on `cavalier_contours` polylines; region
//! containment runs on `geo` polygons.

use crate::geometry::point::Point2;
use cavalier_contours::polyline::{PlineOrientation, PlineSource, PlineSourceMut, Polyline};
use geo::{Contains, Coord, LineString, Polygon};

/// Closed, straight-edged polyline through the ring's vertices.
pub fn to_polyline(ring: &[Point2]) -> Polyline<f64> {
    let mut pline = Polyline::new();
    for p in ring {
        pline.add(p.x, p.y, 0.0);
    }
    pline.set_is_closed(true);
    pline
}

/// Vertex positions of `pline`. Bulges are ignored.
pub fn ring_points(pline: &Polyline<f64>) -> Vec<Point2> {
    pline
        .iter_vertexes()
        .map(|v| Point2::new(v.x, v.y))
        .collect()
}

/// `geo` polygon with the ring as its exterior and no interiors.
pub fn to_geo_polygon(ring: &[Point2]) -> Polygon<f64> {
    let exterior: LineString<f64> = ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    Polygon::new(exterior, Vec::new())
}

/// Signed enclosed area. Positive for counter-clockwise rings.
pub fn signed_area(ring: &[Point2]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    to_polyline(ring).area()
}

pub fn is_counter_clockwise(ring: &[Point2]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let pline = to_polyline(ring);
    pline.area() != 0.0 && pline.orientation() == PlineOrientation::CounterClockwise
}

/// Axis-aligned bounds as `(min, max)`.
pub fn bounding_box(ring: &[Point2]) -> Option<(Point2, Point2)> {
    if ring.len() < 2 {
        return ring.first().map(|p| (*p, *p));
    }
    to_polyline(ring).extents().map(|aabb| {
        (
            Point2::new(aabb.min_x, aabb.min_y),
            Point2::new(aabb.max_x, aabb.max_y),
        )
    })
}

/// Drops repeated positions (including a closing duplicate of the first
/// point) and vertices in the middle of a straight run. Spikes that turn
/// back on themselves are kept.
pub fn simplify_ring(ring: &[Point2], tolerance: f64) -> Vec<Point2> {
    match to_polyline(ring).remove_redundant(tolerance) {
        Some(clean) => ring_points(&clean),
        None => ring.to_vec(),
    }
}

/// True if every point of `inner`, boundary included, lies in the closed
/// region bounded by `outer`.
///
/// `tolerance` only widens the bounding-box prefilter; the region test is
/// exact.
pub fn ring_covers_ring(outer: &[Point2], inner: &[Point2], tolerance: f64) -> bool {
    if outer.len() < 3 || inner.len() < 3 {
        return false;
    }
    let (Some((omin, omax)), Some((imin, imax))) = (bounding_box(outer), bounding_box(inner))
    else {
        return false;
    };
    if imin.x < omin.x - tolerance
        || imin.y < omin.y - tolerance
        || imax.x > omax.x + tolerance
        || imax.y > omax.y + tolerance
    {
        return false;
    }

    to_geo_polygon(outer).contains(&to_geo_polygon(inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(half: f64) -> Vec<Point2> {
        vec![
            Point2::new(-half, -half),
            Point2::new(half, -half),
            Point2::new(half, half),
            Point2::new(-half, half),
        ]
    }

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn test_signed_area_orientation() {
        let mut ring = square(5.0);
        assert_eq!(signed_area(&ring), 100.0);
        assert!(is_counter_clockwise(&ring));
        ring.reverse();
        assert_eq!(signed_area(&ring), -100.0);
        assert!(!is_counter_clockwise(&ring));
    }

    #[test]
    fn test_bounding_box() {
        let ring = pts(&[(1.0, -2.0), (4.0, 0.0), (-3.0, 5.0)]);
        let (min, max) = bounding_box(&ring).unwrap();
        assert_eq!(min, Point2::new(-3.0, -2.0));
        assert_eq!(max, Point2::new(4.0, 5.0));
        assert!(bounding_box(&[]).is_none());
    }

    #[test]
    fn test_ring_covers_ring() {
        assert!(ring_covers_ring(&square(5.0), &square(2.0), 1e-9));
        assert!(!ring_covers_ring(&square(2.0), &square(5.0), 1e-9));
        // Identical rings cover each other.
        assert!(ring_covers_ring(&square(5.0), &square(5.0), 1e-9));
    }

    #[test]
    fn test_inner_touching_boundary_is_covered() {
        let outer = square(5.0);
        let inner = pts(&[(-5.0, -1.0), (0.0, -1.0), (0.0, 1.0), (-5.0, 1.0)]);
        assert!(ring_covers_ring(&outer, &inner, 1e-9));
    }

    #[test]
    fn test_ring_covers_ring_rejects_notch_crossing() {
        // U shape: the inner bar spans the notch even though its corners sit inside.
        let u = pts(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (7.0, 10.0),
            (7.0, 3.0),
            (3.0, 3.0),
            (3.0, 10.0),
            (0.0, 10.0),
        ]);
        let bar = pts(&[(1.0, 5.0), (9.0, 5.0), (9.0, 6.0), (1.0, 6.0)]);
        assert!(!ring_covers_ring(&u, &bar, 1e-9));
    }

    #[test]
    fn test_ring_covers_ring_rejects_exit_through_vertices() {
        // V notch: the bar's top edge leaves the outline exactly at the two
        // reflex corners, so no edge crosses another at an interior point.
        let notched = pts(&[
            (0.0, 0.0),
            (20.0, 0.0),
            (20.0, 10.0),
            (7.0, 10.0),
            (7.0, 3.0),
            (5.0, 1.0),
            (3.0, 3.0),
            (3.0, 10.0),
            (0.0, 10.0),
        ]);
        let bar = pts(&[(1.0, 0.5), (19.0, 0.5), (19.0, 3.0), (1.0, 3.0)]);
        assert!(!ring_covers_ring(&notched, &bar, 1e-9));
        assert!(!ring_covers_ring(&bar, &notched, 1e-9));
    }

    #[test]
    fn test_simplify_ring() {
        let raw = pts(&[
            (0.0, 0.0),
            (0.0, 0.0),
            (5.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]);
        let simplified = simplify_ring(&raw, 1e-9);
        assert_eq!(simplified.len(), 4);
        assert_eq!(signed_area(&simplified), 100.0);
    }

    #[test]
    fn test_simplify_ring_keeps_clean_input() {
        let ring = square(1.0);
        assert_eq!(simplify_ring(&ring, 1e-9), ring);
    }
}
