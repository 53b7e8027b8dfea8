//! NetCDF field I/O.
//!
//! This crate reads a single named variable (with its coordinate axes and
//! attributes) plus the global attributes of a NetCDF file, and writes fields
//! back out with an ordered set of global attributes.
//!
//! # Overview
//!
//! - [`read_field`] opens a file read-only, extracts one [`Field`] and the
//!   file's [`AttributeMap`], and closes the file.
//! - [`write_field`] creates a NetCDF-4 file containing one field, its axes
//!   and the given global attributes.
//! - [`write_time_lat_lon`] writes a `time × lat × lon` array with explicitly
//!   supplied coordinates, without any attribute propagation.
//!
//! # Missing values
//!
//! Elements flagged by `_FillValue` or `missing_value` are read as `NaN`.
//! When writing, `NaN` elements are stored as [`DEFAULT_FILL_VALUE`] and both
//! attributes are set on the variable.

pub mod attributes;
pub mod error;
pub mod field;
pub mod grid_writer;
pub mod native;
pub mod reader;
pub mod writer;

pub use attributes::AttributeMap;
pub use error::{NetCdfError, NetCdfResult};
pub use field::{Axis, Coordinate, Field, LONG_NAME, UNITS};
pub use grid_writer::{write_time_lat_lon, CoordinateGrid};
pub use native::{silence_hdf5_errors, DEFAULT_FILL_VALUE};
pub use reader::read_field;
pub use writer::write_field;

/// Typed attribute value, re-exported from the `netcdf` crate.
pub use netcdf::AttributeValue;
