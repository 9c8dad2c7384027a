//! Shared configuration enums.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::str::FromStr;

/// Which two spatial axes are read as the 2D working coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    #[default]
    Xy,
    Yz,
    Zx,
}

impl Plane {
    /// Projects a 3D coordinate onto this plane.
    pub fn project(&self, x: f64, y: f64, z: f64) -> (f64, f64) {
        match self {
            Plane::Xy => (x, y),
            Plane::Yz => (y, z),
            Plane::Zx => (z, x),
        }
    }
}

impl std::fmt::Display for Plane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xy => write!(f, "xy"),
            Self::Yz => write!(f, "yz"),
            Self::Zx => write!(f, "zx"),
        }
    }
}

impl FromStr for Plane {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xy" => Ok(Plane::Xy),
            "yz" => Ok(Plane::Yz),
            "zx" => Ok(Plane::Zx),
            other => Err(format!("unknown plane '{}', expected xy, yz or zx", other)),
        }
    }
}

/// Corner treatment where offset edges meet around a convex vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinStyle {
    /// Extend both edges to a sharp point. A corner whose point would reach
    /// further than the miter limit (a multiple of the offset distance; 4.0
    /// by default, about a 29 degree corner) is beveled instead.
    #[default]
    Miter,
    /// Circular arc around the original vertex.
    Round,
    /// Straight chord between the two offset edge ends.
    Bevel,
}

impl std::fmt::Display for JoinStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Miter => write!(f, "miter"),
            Self::Round => write!(f, "round"),
            Self::Bevel => write!(f, "bevel"),
        }
    }
}

impl FromStr for JoinStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "miter" | "mitre" => Ok(JoinStyle::Miter),
            "round" => Ok(JoinStyle::Round),
            "bevel" => Ok(JoinStyle::Bevel),
            other => Err(format!(
                "unknown join style '{}', expected miter, round or bevel",
                other
            )),
        }
    }
}

/// What to do when two profiles each lie within the other (coincident
/// outlines). Either way, a profile's parent is its smallest-area container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentPolicy {
    /// Break the tie by (area, input order) so the larger-ranked profile wins.
    #[default]
    SmallestAreaWins,
    /// Reject the drawing.
    Strict,
}

/// How many points an arc is sampled with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ArcSampling {
    /// Constant point count per arc regardless of size.
    Fixed { steps: usize },
    /// Enough segments that no chord strays more than `tolerance` from the arc.
    ChordTolerance {
        tolerance: f64,
        min_segments: usize,
        max_segments: usize,
    },
}

impl Default for ArcSampling {
    fn default() -> Self {
        ArcSampling::ChordTolerance {
            tolerance: 0.01,
            min_segments: 4,
            max_segments: 1024,
        }
    }
}

impl ArcSampling {
    /// Fixed 64-point sampling.
    pub const fn reference() -> Self {
        ArcSampling::Fixed { steps: 64 }
    }

    /// Number of sample points (endpoints included) for an arc.
    pub fn sample_count(&self, radius: f64, sweep: f64) -> usize {
        match *self {
            ArcSampling::Fixed { steps } => steps.max(2),
            ArcSampling::ChordTolerance {
                tolerance,
                min_segments,
                max_segments,
            } => {
                let max_step = if tolerance <= 0.0 || radius <= 0.0 {
                    0.0
                } else if tolerance >= radius {
                    PI
                } else {
                    2.0 * (1.0 - tolerance / radius).acos()
                };
                let lo = min_segments.max(1);
                let hi = max_segments.max(lo);
                let segments = if max_step > 0.0 {
                    (sweep.abs() / max_step).ceil() as usize
                } else {
                    hi
                };
                segments.clamp(lo, hi) + 1
            }
        }
    }

    /// Sample points for one half of an arc that is split at its midpoint.
    pub fn half_arc_count(&self, radius: f64, sweep: f64) -> usize {
        match *self {
            ArcSampling::Fixed { steps } => (steps / 2).max(2),
            ArcSampling::ChordTolerance { .. } => self.sample_count(radius, sweep * 0.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_projection() {
        assert_eq!(Plane::Xy.project(1.0, 2.0, 3.0), (1.0, 2.0));
        assert_eq!(Plane::Yz.project(1.0, 2.0, 3.0), (2.0, 3.0));
        assert_eq!(Plane::Zx.project(1.0, 2.0, 3.0), (3.0, 1.0));
    }

    #[test]
    fn test_plane_parse() {
        assert_eq!("YZ".parse::<Plane>(), Ok(Plane::Yz));
        assert!("xz".parse::<Plane>().is_err());
    }

    #[test]
    fn test_join_style_parse() {
        assert_eq!("mitre".parse::<JoinStyle>(), Ok(JoinStyle::Miter));
        assert_eq!("round".parse::<JoinStyle>(), Ok(JoinStyle::Round));
        assert!("square".parse::<JoinStyle>().is_err());
    }

    #[test]
    fn test_fixed_sampling() {
        let s = ArcSampling::reference();
        assert_eq!(s.sample_count(1000.0, PI), 64);
        assert_eq!(s.half_arc_count(1000.0, PI), 32);
    }

    #[test]
    fn test_tolerance_sampling_scales_with_radius() {
        let s = ArcSampling::default();
        let small = s.sample_count(1.0, PI);
        let large = s.sample_count(100.0, PI);
        assert!(large > small);
        // Each chord's sagitta must stay within the tolerance.
        let segments = (large - 1) as f64;
        let sagitta = 100.0 * (1.0 - (PI / segments / 2.0).cos());
        assert!(sagitta <= 0.01 + 1e-12);
    }

    #[test]
    fn test_tolerance_sampling_clamps() {
        let s = ArcSampling::ChordTolerance {
            tolerance: 0.5,
            min_segments: 4,
            max_segments: 8,
        };
        assert_eq!(s.sample_count(0.1, 0.01), 5);
        assert_eq!(s.sample_count(1e6, 2.0 * PI), 9);
    }

    #[test]
    fn test_sampling_serde_roundtrip() {
        let json = serde_json::to_string(&ArcSampling::default()).unwrap();
        assert!(json.contains("\"mode\":\"chord_tolerance\""));
        let back: ArcSampling = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ArcSampling::default());
    }
}
