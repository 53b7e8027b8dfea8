//! The read → combine → write pipeline.

use netcdf_io::read_field;
use tracing::info;

use crate::calc::calc_wsp;
use crate::config::Args;
use crate::error::WindSpeedResult;
use crate::history::{stamp, ProvenanceContext};
use crate::output::write_output;

/// Run one wind speed calculation.
///
/// Both inputs are read (and closed) before the output file is opened, so a
/// failure while reading never touches the output path.
pub fn run(args: &Args, provenance: &ProvenanceContext) -> WindSpeedResult<()> {
    let (u_data, u_attributes) = read_field(&args.u_file, &args.u_variable)?;
    info!(file = %args.u_file.display(), variable = %args.u_variable, shape = ?u_data.shape(), "Read u component");

    let (v_data, v_attributes) = read_field(&args.v_file, &args.v_variable)?;
    info!(
        file = %args.v_file.display(),
        variable = %args.v_variable,
        shape = ?v_data.shape(),
        global_attributes = v_attributes.len(),
        "Read v component"
    );

    let wsp = calc_wsp(&u_data, &v_data)?;

    write_output(&wsp, &u_attributes, &args.output_file, || stamp(provenance))
}
