//! Error types for the profiles crate.
//!
//! Most of these describe a single bad element. The pipeline logs them and
//! skips that element instead of aborting the run.

use profilekit_core::GeometryError;
use thiserror::Error;

/// Errors raised while turning an entity into a [`crate::Profile`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// Fewer than three distinct vertices survived tessellation and clean-up.
    #[error("Degenerate profile: {vertices} distinct vertices (need at least 3)")]
    TooFewVertices { vertices: usize },

    /// The vertices are collinear or otherwise enclose no area.
    #[error("Degenerate profile: enclosed area {area} is zero")]
    ZeroArea { area: f64 },

    /// A coordinate is NaN or infinite.
    #[error("Profile has non-finite coordinates")]
    NonFinite,

    /// Circle radius is zero, negative or not finite.
    #[error("Invalid circle radius: {radius}")]
    InvalidCircle { radius: f64 },

    /// Loose lines that never return to their start point.
    #[error("Open line chain of {segments} segments does not close")]
    OpenChain { segments: usize },

    /// LINE entities cannot form a profile on their own.
    #[error("Entity kind {0} cannot form a profile by itself")]
    NotClosable(&'static str),

    /// An arc could not be recovered.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

/// Errors raised while building the containment hierarchy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainmentError {
    /// Two profiles each lie within the other.
    #[error("Profiles {first} and {second} contain each other")]
    MutualContainment { first: usize, second: usize },
}

/// Errors raised by an [`crate::OffsetEngine`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OffsetError {
    /// Offset distance is NaN or infinite.
    #[error("Invalid offset distance: {0}")]
    InvalidDistance(f64),

    /// The underlying polygon engine failed on this input.
    #[error("Offset engine failed: {0}")]
    EngineFailure(String),
}

/// Errors that abort a whole pipeline run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Containment could not be resolved.
    #[error("Containment error: {0}")]
    Containment(#[from] ContainmentError),

    /// The configured offset distance is unusable.
    #[error("Offset error: {0}")]
    Offset(#[from] OffsetError),
}

/// Result type alias for profile construction.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Result type alias for pipeline runs.
pub type PipelineResult<T> = Result<T, PipelineError>;
