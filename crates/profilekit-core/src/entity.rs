//! Reader-neutral drawing entities.
//!
//! Readers translate their container format into [`RawEntity`] values that
//! are already projected onto the 2D working plane.

use crate::geometry::point::Point2;
use serde::{Deserialize, Serialize};

/// One polyline vertex with the bulge of the edge leaving it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolyVertex {
    pub point: Point2,
    #[serde(default)]
    pub bulge: f64,
}

impl PolyVertex {
    pub fn new(x: f64, y: f64, bulge: f64) -> Self {
        Self {
            point: Point2::new(x, y),
            bulge,
        }
    }

    pub fn straight(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }
}

/// A drawing element in working-plane coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawEntity {
    Line {
        start: Point2,
        end: Point2,
        layer: Option<String>,
    },
    Polyline {
        vertices: Vec<PolyVertex>,
        /// Closed flag as stored in the drawing. Profiles are built
        /// cyclically regardless.
        closed: bool,
        layer: Option<String>,
    },
    Circle {
        center: Point2,
        radius: f64,
        layer: Option<String>,
    },
}

impl RawEntity {
    pub fn kind(&self) -> &'static str {
        match self {
            RawEntity::Line { .. } => "LINE",
            RawEntity::Polyline { .. } => "POLYLINE",
            RawEntity::Circle { .. } => "CIRCLE",
        }
    }

    pub fn layer(&self) -> Option<&str> {
        match self {
            RawEntity::Line { layer, .. }
            | RawEntity::Polyline { layer, .. }
            | RawEntity::Circle { layer, .. } => layer.as_deref(),
        }
    }

    /// Shorthand for a closed polyline without a layer.
    pub fn closed_polyline(vertices: Vec<PolyVertex>) -> Self {
        RawEntity::Polyline {
            vertices,
            closed: true,
            layer: None,
        }
    }

    pub fn circle(center: Point2, radius: f64) -> Self {
        RawEntity::Circle {
            center,
            radius,
            layer: None,
        }
    }

    pub fn line(start: Point2, end: Point2) -> Self {
        RawEntity::Line {
            start,
            end,
            layer: None,
        }
    }
}
