//! # ProfileKit DXF
//!
//! DXF input and output for ProfileKit, built on the `dxf` crate.
//!
//! - [`DxfSource`] loads a drawing and yields [`profilekit_core::RawEntity`]
//!   records (LINE, LWPOLYLINE, POLYLINE, CIRCLE, and INSERT expanded one level)
//!   projected onto a working [`profilekit_core::Plane`].
//! - [`DxfWriter`] saves rings as closed LWPOLYLINE entities.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{DxfError, DxfResult};
pub use reader::{DxfSource, Entities};
pub use writer::{DxfWriter, DEFAULT_LAYER};
