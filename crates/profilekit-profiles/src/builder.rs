//! Profile Builder.
//!
//! Converts closed drawing entities into [`Profile`]s:
//!
//! - polylines are walked cyclically; bulged edges are tessellated, split at
//!   the arc midpoint into two equal-angle halves
//! - circles become regular inscribed polygons (two semicircular bulges)
//! - loose lines are chained end to end into closed loops

use crate::error::{ProfileError, ProfileResult};
use crate::profile::Profile;
use profilekit_core::geometry::arc::BULGE_EPSILON;
use profilekit_core::{
    bulge_to_arc, tessellate_arc, ArcSampling, ArcSpec, GeometryError, Point2, PolyVertex,
    RawEntity, EPSILON,
};
use tracing::{debug, warn};

/// Profiles built from a batch of entities plus what had to be skipped.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub profiles: Vec<Profile>,
    /// `(entity index, reason)` for every element that produced no profile.
    pub skipped: Vec<(usize, ProfileError)>,
}

/// Builds profiles using a given arc sampling.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    sampling: ArcSampling,
    /// Distance under which points are merged.
    tolerance: f64,
    /// Endpoint snapping distance when chaining lines.
    chain_tolerance: f64,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new(ArcSampling::default())
    }
}

impl ProfileBuilder {
    pub fn new(sampling: ArcSampling) -> Self {
        Self {
            sampling,
            tolerance: EPSILON,
            chain_tolerance: 1e-6,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_chain_tolerance(mut self, chain_tolerance: f64) -> Self {
        self.chain_tolerance = chain_tolerance;
        self
    }

    pub fn sampling(&self) -> ArcSampling {
        self.sampling
    }

    /// Builds a profile from a polyline's vertex ring.
    ///
    /// The ring is always treated as closed: the last vertex connects back to
    /// the first, using the last vertex's bulge.
    pub fn build_polyline(&self, vertices: &[PolyVertex]) -> ProfileResult<Profile> {
        let n = vertices.len();
        let mut points = Vec::with_capacity(n);

        for (i, vertex) in vertices.iter().enumerate() {
            if vertex.bulge.abs() < BULGE_EPSILON {
                points.push(vertex.point);
                continue;
            }

            let next = vertices[(i + 1) % n].point;
            match bulge_to_arc(vertex.point, next, vertex.bulge) {
                Ok(arc) if arc.radius > self.tolerance => self.push_arc(&arc, &mut points)?,
                Ok(_) | Err(GeometryError::ZeroLengthChord { .. }) => {
                    debug!(vertex = i, "degenerate arc, using straight segment");
                    points.push(vertex.point);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Profile::new(points, self.tolerance)
    }

    /// Builds the inscribed polygon of a circle.
    pub fn build_circle(&self, center: Point2, radius: f64) -> ProfileResult<Profile> {
        if !radius.is_finite() || radius <= self.tolerance {
            return Err(ProfileError::InvalidCircle { radius });
        }
        let ring = [
            PolyVertex::new(center.x + radius, center.y, 1.0),
            PolyVertex::new(center.x - radius, center.y, 1.0),
        ];
        self.build_polyline(&ring)
    }

    /// Builds a profile from a single closed entity.
    pub fn build_entity(&self, entity: &RawEntity) -> ProfileResult<Profile> {
        match entity {
            RawEntity::Polyline { vertices, .. } => self.build_polyline(vertices),
            RawEntity::Circle { center, radius, .. } => self.build_circle(*center, *radius),
            RawEntity::Line { .. } => Err(ProfileError::NotClosable(entity.kind())),
        }
    }

    /// Builds every profile in an entity stream.
    ///
    /// Bad entities are skipped and recorded. Lines are collected and chained
    /// once the stream is exhausted; each closed chain becomes one profile
    /// whose source is the index of its first line.
    pub fn build_all<I>(&self, entities: I) -> BuildOutcome
    where
        I: IntoIterator<Item = RawEntity>,
    {
        let mut outcome = BuildOutcome::default();
        let mut lines: Vec<(usize, Point2, Point2)> = Vec::new();

        for (index, entity) in entities.into_iter().enumerate() {
            if let RawEntity::Line { start, end, .. } = entity {
                lines.push((index, start, end));
                continue;
            }
            match self.build_entity(&entity) {
                Ok(profile) => outcome.profiles.push(profile.with_source(index)),
                Err(e) => {
                    warn!(entity = index, kind = entity.kind(), "skipping entity: {}", e);
                    outcome.skipped.push((index, e));
                }
            }
        }

        for chain in chain_lines(&lines, self.chain_tolerance) {
            match chain {
                LineChain::Closed { first, points } => {
                    match Profile::new(points, self.tolerance) {
                        Ok(profile) => outcome.profiles.push(profile.with_source(first)),
                        Err(e) => {
                            warn!(entity = first, "skipping line loop: {}", e);
                            outcome.skipped.push((first, e));
                        }
                    }
                }
                LineChain::Open { first, segments } => {
                    let e = ProfileError::OpenChain { segments };
                    warn!(entity = first, "skipping lines: {}", e);
                    outcome.skipped.push((first, e));
                }
            }
        }

        outcome
    }

    /// Appends an arc's samples from its start up to, not including, its end.
    fn push_arc(&self, arc: &ArcSpec, points: &mut Vec<Point2>) -> ProfileResult<()> {
        let per_half = self.sampling.half_arc_count(arc.radius, arc.sweep);
        let (first, second) = arc.split_at_midpoint();
        for half in [first, second] {
            let samples = tessellate_arc(&half, per_half)?;
            points.extend_from_slice(&samples[..samples.len() - 1]);
        }
        Ok(())
    }
}

/// A run of lines joined end to end.
#[derive(Debug, Clone, PartialEq)]
enum LineChain {
    Closed { first: usize, points: Vec<Point2> },
    Open { first: usize, segments: usize },
}

/// Greedily joins segments whose endpoints meet (in either direction).
fn chain_lines(lines: &[(usize, Point2, Point2)], tolerance: f64) -> Vec<LineChain> {
    let mut used = vec![false; lines.len()];
    let mut chains = Vec::new();

    for seed in 0..lines.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;
        let (first, start, mut end) = lines[seed];
        let mut points = vec![start];
        let mut segments = 1;

        loop {
            if end.distance_to(&start) <= tolerance && segments > 1 {
                chains.push(LineChain::Closed { first, points });
                break;
            }
            points.push(end);

            let next = lines.iter().enumerate().find_map(|(k, &(_, a, b))| {
                if used[k] {
                    None
                } else if a.distance_to(&end) <= tolerance {
                    Some((k, b))
                } else if b.distance_to(&end) <= tolerance {
                    Some((k, a))
                } else {
                    None
                }
            });

            match next {
                Some((k, far)) => {
                    used[k] = true;
                    segments += 1;
                    end = far;
                }
                None => {
                    chains.push(LineChain::Open { first, segments });
                    break;
                }
            }
        }
    }

    chains
}
