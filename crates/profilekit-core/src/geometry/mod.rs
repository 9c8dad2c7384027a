//! Geometry primitives: points, bulge arcs and ring predicates.

pub mod arc;
pub mod point;
pub mod polygon;
