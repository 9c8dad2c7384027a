//! Orchestration: build, nest, classify, offset.

use crate::builder::ProfileBuilder;
use crate::classify::{classify, Classification, Region};
use crate::containment::{ContainmentForest, ContainmentGraph};
use crate::error::{OffsetError, PipelineResult, ProfileError};
use crate::offset::{CavalierOffsetEngine, OffsetEngine};
use crate::profile::Profile;
use profilekit_core::{ArcSampling, ContainmentPolicy, JoinStyle, Point2, RawEntity, EPSILON};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Everything a run needs to know, passed explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Offset magnitude. Solids grow by it, holes shrink by it.
    pub distance: f64,
    pub sampling: ArcSampling,
    pub join: JoinStyle,
    pub miter_limit: f64,
    pub containment: ContainmentPolicy,
    pub chain_tolerance: f64,
    /// Point merge and containment tolerance.
    pub tolerance: f64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            distance: 1.0,
            sampling: ArcSampling::default(),
            join: JoinStyle::Miter,
            miter_limit: 4.0,
            containment: ContainmentPolicy::SmallestAreaWins,
            chain_tolerance: 1e-6,
            tolerance: EPSILON,
        }
    }
}

/// Nesting and labels for a set of profiles, before any offsetting.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub graph: ContainmentGraph,
    pub forest: ContainmentForest,
    pub classification: Classification,
}

/// One emitted boundary ring.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRing {
    /// Index of the profile this ring was offset from.
    pub profile: usize,
    /// Index of the drawing entity behind that profile.
    pub source: Option<usize>,
    pub region: Region,
    /// Counter-clockwise, no closing duplicate.
    pub vertices: Vec<Point2>,
}

/// Result of a full run.
#[derive(Debug, Clone, Default)]
pub struct OffsetReport {
    pub profiles: Vec<Profile>,
    pub forest: ContainmentForest,
    pub classification: Classification,
    pub rings: Vec<OutputRing>,
    /// Profiles that offset to nothing.
    pub eroded: Vec<usize>,
    /// Profiles the offset engine failed on.
    pub failed: Vec<(usize, OffsetError)>,
    /// Entities that never became profiles.
    pub skipped: Vec<(usize, ProfileError)>,
}

pub struct Pipeline<E: OffsetEngine = CavalierOffsetEngine> {
    options: PipelineOptions,
    engine: E,
}

impl Pipeline<CavalierOffsetEngine> {
    /// A pipeline using the `cavalier_contours` engine configured from `options`.
    pub fn new(options: PipelineOptions) -> Self {
        let engine = CavalierOffsetEngine {
            join: options.join,
            miter_limit: options.miter_limit,
            sampling: options.sampling,
            tolerance: options.tolerance,
        };
        Self { options, engine }
    }
}

impl<E: OffsetEngine> Pipeline<E> {
    pub fn with_engine(options: PipelineOptions, engine: E) -> Self {
        Self { options, engine }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn builder(&self) -> ProfileBuilder {
        ProfileBuilder::new(self.options.sampling)
            .with_tolerance(self.options.tolerance)
            .with_chain_tolerance(self.options.chain_tolerance)
    }

    /// Works out nesting and SOLID/HOLE labels.
    pub fn analyze(&self, profiles: &[Profile]) -> PipelineResult<Analysis> {
        let graph = ContainmentGraph::build(profiles, self.options.tolerance);
        let forest = ContainmentForest::build(profiles, &graph, self.options.containment)?;
        let classification = classify(&forest);
        Ok(Analysis {
            graph,
            forest,
            classification,
        })
    }

    /// Offsets already-built profiles.
    pub fn run(&self, profiles: Vec<Profile>) -> PipelineResult<OffsetReport> {
        let distance = self.options.distance;
        if !distance.is_finite() {
            return Err(OffsetError::InvalidDistance(distance).into());
        }

        let Analysis {
            forest,
            classification,
            ..
        } = self.analyze(&profiles)?;

        let mut rings = Vec::new();
        let mut eroded = Vec::new();
        let mut failed = Vec::new();

        for (index, region) in classification.iter() {
            let profile = &profiles[index];
            let signed = region.offset_sign() * distance;
            match self.engine.buffer(profile, signed) {
                Ok(result) if result.is_empty() => {
                    debug!(profile = index, %region, distance = signed, "Profile eroded away");
                    eroded.push(index);
                }
                Ok(result) => {
                    rings.extend(result.rings.into_iter().map(|vertices| OutputRing {
                        profile: index,
                        source: profile.source(),
                        region,
                        vertices,
                    }));
                }
                Err(e) => {
                    warn!(profile = index, "Offset failed: {}", e);
                    failed.push((index, e));
                }
            }
        }

        info!(
            profiles = profiles.len(),
            solids = classification.solids().len(),
            holes = classification.holes().len(),
            rings = rings.len(),
            eroded = eroded.len(),
            failed = failed.len(),
            "Offset run complete"
        );

        Ok(OffsetReport {
            profiles,
            forest,
            classification,
            rings,
            eroded,
            failed,
            skipped: Vec::new(),
        })
    }

    /// Builds profiles from drawing entities, then offsets them.
    pub fn run_entities<I>(&self, entities: I) -> PipelineResult<OffsetReport>
    where
        I: IntoIterator<Item = RawEntity>,
    {
        let outcome = self.builder().build_all(entities);
        if !outcome.skipped.is_empty() {
            info!(
                built = outcome.profiles.len(),
                skipped = outcome.skipped.len(),
                "Some entities did not form profiles"
            );
        }
        let mut report = self.run(outcome.profiles)?;
        report.skipped = outcome.skipped;
        Ok(report)
    }
}
