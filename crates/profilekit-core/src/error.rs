//! Error types for the core geometry crate.

use thiserror::Error;

/// Errors raised by the geometry primitives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A bulge of zero describes a straight edge, not an arc.
    #[error("Bulge is zero: segment is straight")]
    StraightSegment,

    /// The chord endpoints coincide so no circle passes through them.
    #[error("Zero-length chord at ({x}, {y})")]
    ZeroLengthChord {
        /// X coordinate of the repeated point.
        x: f64,
        /// Y coordinate of the repeated point.
        y: f64,
    },

    /// The bulge value is NaN or infinite.
    #[error("Non-finite bulge value: {0}")]
    NonFiniteBulge(f64),

    /// Tessellation needs at least two samples.
    #[error("Arc tessellation needs at least 2 points, got {0}")]
    TooFewSamples(usize),
}

/// Result type alias for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;
