//! # ProfileKit
//!
//! Reads a 2D DXF drawing, turns its closed elements into profiles, decides
//! which profiles are solid material and which are holes, and writes a
//! mitered offset of every profile back out as DXF.
//!
//! The work is split across the workspace crates:
//!
//! - [`profilekit_core`]: points, bulge arcs, tessellation and polygon predicates
//! - [`profilekit_profiles`]: profile building, containment, classification and offsetting
//! - [`profilekit_dxf`]: DXF reading and writing
//! - [`profilekit_settings`]: run configuration
//!
//! This crate adds the `profilekit` command line tool on top.

pub mod commands;
pub mod preview;

pub use profilekit_core;
pub use profilekit_dxf;
pub use profilekit_profiles;
pub use profilekit_settings;

pub use profilekit_core::{JoinStyle, Plane, Point2};
pub use profilekit_profiles::{OffsetReport, Pipeline, PipelineOptions, Region};
pub use profilekit_settings::{OffsetSettings, SettingsOverrides};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Version string shown by `--version`
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_DATE"),
    ")"
);

/// Initialize logging
///
/// Output goes to stderr so that command output on stdout stays clean.
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_logging(default_level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_ascii_lowercase()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
