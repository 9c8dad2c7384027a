//! # ProfileKit Profiles
//!
//! Turns drawing entities into closed profiles, works out which profiles are
//! solid material and which are holes, and offsets each one accordingly.
//!
//! ## Pipeline
//!
//! ```text
//! RawEntity ──► ProfileBuilder ──► Profile[]
//!                                     │
//!                     ContainmentGraph (pairwise "lies within")
//!                                     │
//!                     ContainmentForest (immediate parents only)
//!                                     │
//!                     Classification (SOLID / HOLE by depth parity)
//!                                     │
//!                     OffsetEngine (grow solids, shrink holes)
//!                                     │
//!                                OutputRing[]
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use profilekit_profiles::{Pipeline, PipelineOptions};
//!
//! let pipeline = Pipeline::new(PipelineOptions::default());
//! let report = pipeline.run_entities(entities)?;
//! for ring in &report.rings {
//!     println!("{:?}: {} vertices", ring.region, ring.vertices.len());
//! }
//! ```

pub mod builder;
pub mod classify;
pub mod containment;
pub mod error;
pub mod offset;
pub mod pipeline;
pub mod profile;

pub use builder::{BuildOutcome, ProfileBuilder};
pub use classify::{classify, classify_graph, Classification, Region};
pub use containment::{ContainmentForest, ContainmentGraph, ForestNode};
pub use error::{ContainmentError, OffsetError, PipelineError, ProfileError};
pub use offset::{CavalierOffsetEngine, OffsetEngine, OffsetResult};
pub use pipeline::{Analysis, OffsetReport, OutputRing, Pipeline, PipelineOptions};
pub use profile::Profile;
