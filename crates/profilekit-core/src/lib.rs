//! # ProfileKit Core
//!
//! Core types and geometry shared by every ProfileKit crate.
//!
//! - **Geometry**: [`Point2`], bulge arcs ([`ArcSpec`]), arc tessellation and
//!   polygon predicates (area, orientation, closed-region containment)
//! - **Entities**: [`RawEntity`], the reader-neutral record of a drawing element
//! - **Types**: shared configuration enums ([`Plane`], [`ArcSampling`], [`JoinStyle`],
//!   [`ContainmentPolicy`])
//! - **Errors**: [`GeometryError`]

pub mod entity;
pub mod error;
pub mod geometry;
pub mod types;

pub use entity::{PolyVertex, RawEntity};
pub use error::{GeometryError, Result};
pub use geometry::arc::{bulge_to_arc, tessellate_arc, ArcSpec, RotationSense};
pub use geometry::point::Point2;
pub use geometry::polygon;
pub use types::{ArcSampling, ContainmentPolicy, JoinStyle, Plane};

/// Default distance under which two coordinates are treated as the same point.
pub const EPSILON: f64 = 1e-9;
