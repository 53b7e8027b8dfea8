//! Error types for the wind speed pipeline.

use thiserror::Error;

/// Result type alias using WindSpeedError.
pub type WindSpeedResult<T> = Result<T, WindSpeedError>;

/// Failures of the wind speed pipeline. All of them are fatal.
#[derive(Debug, Error)]
pub enum WindSpeedError {
    #[error(transparent)]
    NetCdf(#[from] netcdf_io::NetCdfError),

    #[error("Shape mismatch: {u_name} has shape {u_shape:?} but {v_name} has shape {v_shape:?}")]
    ShapeMismatch {
        u_name: String,
        u_shape: Vec<usize>,
        v_name: String,
        v_shape: Vec<usize>,
    },

    #[error("Input attributes have no 'history' entry to extend")]
    MissingHistory,

    #[error("Not a git repository (or no commits): {0}")]
    NotARepository(String),

    #[error("Invalid revision identifier: '{0}'")]
    InvalidRevision(String),

    #[error("Command execution failed: {0}")]
    CommandError(String),
}
