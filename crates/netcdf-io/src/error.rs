//! Error types for NetCDF field I/O.

use thiserror::Error;

/// Result type for NetCDF I/O operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF reading and writing.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File could not be opened or created
    #[error("Failed to open NetCDF file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: netcdf::Error,
    },

    /// Error reported by the NetCDF library
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// Missing required variable, dimension or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
