use std::path::PathBuf;

use thiserror::Error;

/// Error type for grid construction and geometry queries.
#[derive(Error, Debug)]
pub enum GridError {
    /// A grid identifier outside the four recognized families.
    #[error("unknown grid type: {0}")]
    UnknownGridType(String),
    /// A sub-grid selector outside the closed set of staggered positions.
    #[error("invalid sub-grid selector: '{0}'")]
    InvalidSubGrid(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Latitude-center and per-band longitude-count arrays must pair up.
    #[error("latitude centers and per-band longitude counts differ in length ({nlat} vs {nlon})")]
    LengthMismatch { nlat: usize, nlon: usize },
    #[error("missing dimension '{name}' in coordinate source {path:?}")]
    MissingDimension { name: String, path: PathBuf },
    #[error("missing variables in coordinate source {path:?}: {names:?}")]
    MissingVariables { names: Vec<String>, path: PathBuf },
    #[error("unrecognized grid signature (x={x}, y={y}, z={z}) in coordinate source {path:?}")]
    UnknownGridSignature {
        x: usize,
        y: usize,
        z: usize,
        path: PathBuf,
    },
    /// A query combination the engine deliberately does not serve.
    #[error("{capability} is not implemented for grid '{grid}'")]
    Unsupported { grid: String, capability: String },
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("invalid grid description: {0}")]
    InvalidDescription(String),
    #[error(transparent)]
    NetCdf(#[from] netcdf::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type for `Result<T, GridError>`.
pub type GridResult<T> = Result<T, GridError>;
