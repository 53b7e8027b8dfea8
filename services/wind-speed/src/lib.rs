//! Wind speed calculation from gridded wind components.
//!
//! Reads an eastward (u) and a northward (v) wind component from NetCDF
//! files, computes `sqrt(u^2 + v^2)` and writes the result as variable `wsp`,
//! carrying the u file's global attributes forward with a new line prepended
//! to `history`.

pub mod calc;
pub mod config;
pub mod error;
pub mod history;
pub mod output;
pub mod pipeline;

pub use calc::{calc_wsp, WSP_ID, WSP_LONG_NAME, WSP_UNITS};
pub use config::{Args, RuntimeConfig};
pub use error::{WindSpeedError, WindSpeedResult};
pub use history::{chain_history, create_history, stamp, ProvenanceContext, Revision};
pub use output::{output_attributes, write_output};
pub use pipeline::run;
