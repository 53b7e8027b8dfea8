//! Reading a single variable and the global attributes of a NetCDF file.

use std::path::Path;

use tracing::debug;

use crate::attributes::AttributeMap;
use crate::error::{NetCdfError, NetCdfResult};
use crate::field::{Axis, Field};
use crate::native::{
    mask_fill, silence_hdf5_errors, unpack, ADD_OFFSET, FILL_VALUE, MISSING_VALUE, PACKED_ONLY,
    SCALE_FACTOR,
};

/// Read `variable` and the file's global attributes from the file at `path`.
///
/// The file is opened read-only and closed before returning, on success and
/// on every error path. Elements equal to the variable's `_FillValue` or
/// `missing_value` are returned as `NaN`. Packed variables (`scale_factor`
/// and/or `add_offset`) are unpacked after masking, and the attributes that
/// only describe the packed form are dropped from the field.
pub fn read_field<P: AsRef<Path>>(path: P, variable: &str) -> NetCdfResult<(Field, AttributeMap)> {
    let path = path.as_ref();
    silence_hdf5_errors();

    let file = netcdf::open(path).map_err(|source| NetCdfError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let global = AttributeMap::from_netcdf(file.attributes())?;

    let var = file.variable(variable).ok_or_else(|| {
        NetCdfError::MissingData(format!("variable '{}' in {}", variable, path.display()))
    })?;

    let mut attributes = AttributeMap::from_netcdf(var.attributes())?;

    let mut values: Vec<f32> = var.get_values(..).map_err(|e| {
        NetCdfError::InvalidFormat(format!("Failed to read {}: {}", variable, e))
    })?;
    // Fill values are stored in packed space
    for key in [FILL_VALUE, MISSING_VALUE] {
        if let Some(fill) = attributes.get_f64(key) {
            mask_fill(&mut values, fill as f32);
        }
    }

    let scale_factor = attributes.get_f64(SCALE_FACTOR);
    let add_offset = attributes.get_f64(ADD_OFFSET);
    if scale_factor.is_some() || add_offset.is_some() {
        let (scale_factor, add_offset) = (scale_factor.unwrap_or(1.0), add_offset.unwrap_or(0.0));
        unpack(&mut values, scale_factor, add_offset);
        for key in PACKED_ONLY {
            attributes.remove(key);
        }
        debug!(variable = %variable, scale_factor, add_offset, "Unpacked variable");
    }

    let axes = var
        .dimensions()
        .iter()
        .map(|dim| read_axis(&file, dim))
        .collect::<NetCdfResult<Vec<_>>>()?;

    debug!(
        file = %path.display(),
        variable = %variable,
        shape = ?axes.iter().map(|a| a.len).collect::<Vec<_>>(),
        global_attributes = global.len(),
        "Read variable"
    );

    let field = Field {
        name: variable.to_string(),
        values,
        axes,
        attributes,
    };

    Ok((field, global))
}

/// Describe a dimension, including its coordinate variable when present.
fn read_axis(file: &netcdf::File, dim: &netcdf::Dimension) -> NetCdfResult<Axis> {
    let name = dim.name();
    let mut axis = Axis::new(name.clone(), dim.len());
    axis.unlimited = dim.is_unlimited();

    if let Some(coord) = file.variable(&name) {
        // Only a 1-D variable over its own dimension is a coordinate variable
        let is_coordinate = matches!(coord.dimensions(), [only] if only.name() == name);
        if is_coordinate {
            match coord.get_values::<f64, _>(..) {
                Ok(values) => {
                    let attributes = AttributeMap::from_netcdf(coord.attributes())?;
                    axis = axis.with_coordinate(values, attributes);
                }
                // e.g. station names; the axis is kept without coordinate values
                Err(e) => debug!(axis = %name, error = %e, "Skipping non-numeric coordinate"),
            }
        }
    }

    Ok(axis)
}
