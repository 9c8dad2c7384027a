//! SVG preview of profiles and their offsets.
//!
//! Drawing coordinates are Y-up, so the whole picture is flipped inside a
//! group transform rather than per point.

use profilekit_core::{polygon, Point2};
use profilekit_profiles::{OffsetReport, Region};
use std::fmt::Write as _;

const SOLID_STROKE: &str = "#1f77b4";
const HOLE_STROKE: &str = "#d62728";
const OFFSET_STROKE: &str = "#2ca02c";
const ORIGIN_STROKE: &str = "#e6c300";

/// Closed SVG path data for a ring.
fn ring_path(ring: &[Point2]) -> String {
    let mut path = String::new();
    for (i, p) in ring.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(path, "{} {:.4} {:.4} ", cmd, p.x, p.y);
    }
    path.push('Z');
    path
}

/// Crosshair through the world origin, one tenth of the view wide.
fn render_crosshair(size: f64) -> String {
    let h = size * 0.05;
    format!("M {} 0 L {} 0 M 0 {} L 0 {}", -h, h, -h, h)
}

/// Renders every profile (blue solids, red holes) and every offset ring
/// (dashed green) from a report.
pub fn render_svg(report: &OffsetReport) -> String {
    let all_points = report
        .profiles
        .iter()
        .flat_map(|p| p.vertices().iter())
        .chain(report.rings.iter().flat_map(|r| r.vertices.iter()))
        .copied()
        .collect::<Vec<_>>();

    let (min, max) = polygon::bounding_box(&all_points)
        .unwrap_or((Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0)));
    let size = (max.x - min.x).max(max.y - min.y).max(1.0);
    let margin = size * 0.05;
    let stroke = size / 500.0;

    let (x, y) = (min.x - margin, -(max.y + margin));
    let (w, h) = (max.x - min.x + 2.0 * margin, max.y - min.y + 2.0 * margin);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.4} {:.4} {:.4} {:.4}">"#,
        x, y, w, h
    );
    let _ = writeln!(
        svg,
        r#"<g transform="scale(1,-1)" fill="none" stroke-width="{:.4}">"#,
        stroke
    );
    let _ = writeln!(
        svg,
        r#"<path d="{}" stroke="{}"/>"#,
        render_crosshair(size),
        ORIGIN_STROKE
    );

    for (index, profile) in report.profiles.iter().enumerate() {
        let color = match report.classification.get(index) {
            Some(Region::Hole) => HOLE_STROKE,
            _ => SOLID_STROKE,
        };
        let _ = writeln!(
            svg,
            r#"<path d="{}" stroke="{}"/>"#,
            ring_path(profile.vertices()),
            color
        );
    }

    for ring in &report.rings {
        let _ = writeln!(
            svg,
            r#"<path d="{}" stroke="{}" stroke-dasharray="{:.4}"/>"#,
            ring_path(&ring.vertices),
            OFFSET_STROKE,
            stroke * 4.0
        );
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}
