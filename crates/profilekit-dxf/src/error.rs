//! Error types for DXF input and output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or saving a drawing.
#[derive(Error, Debug)]
pub enum DxfError {
    /// The input file is missing, unreadable or not a DXF drawing.
    #[error("Failed to read DXF file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: dxf::DxfError,
    },

    /// The output file could not be written.
    #[error("Failed to write DXF file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: dxf::DxfError,
    },

    /// A ring with fewer than three vertices was handed to the writer.
    #[error("Ring {index} has {vertices} vertices (need at least 3)")]
    DegenerateRing { index: usize, vertices: usize },
}

/// Result type alias for DXF operations.
pub type DxfResult<T> = Result<T, DxfError>;
