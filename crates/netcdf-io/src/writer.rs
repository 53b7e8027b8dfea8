//! Writing a field, its axes and global attributes to a new NetCDF file.

use std::path::Path;

use tracing::debug;

use netcdf::AttributeValue;

use crate::attributes::{to_double, to_float, AttributeMap};
use crate::error::{NetCdfError, NetCdfResult};
use crate::field::Field;
use crate::native::{
    full_extents, silence_hdf5_errors, ADD_OFFSET, DEFAULT_FILL_VALUE, FILL_VALUE, MISSING_VALUE,
    SCALE_FACTOR, VARIABLE_TYPED,
};

/// Write `field` to a new NetCDF-4 file at `path`, overwriting any existing file.
///
/// Global attributes are written in mapping order. Each axis becomes a
/// dimension (record axes stay unlimited) and, when it carries coordinate
/// values, a coordinate variable of the same name. The field is written as
/// single precision; if any element is missing, `_FillValue` and
/// `missing_value` are set to [`DEFAULT_FILL_VALUE`] and used in place of NaN.
/// Packing attributes are not written, and attributes that must share their
/// variable's type (`_FillValue`, `missing_value`, `valid_*`) are converted to
/// double for coordinates and to float for the field.
///
/// Output is uncompressed. If writing fails midway the partial file is left
/// on disk.
pub fn write_field<P: AsRef<Path>>(
    path: P,
    field: &Field,
    global: &AttributeMap,
) -> NetCdfResult<()> {
    let path = path.as_ref();
    let shape = field.shape();
    let expected: usize = shape.iter().product();
    if field.values.len() != expected {
        return Err(NetCdfError::InvalidFormat(format!(
            "{} has {} values but its axes {:?} need {}",
            field.name,
            field.values.len(),
            shape,
            expected
        )));
    }

    silence_hdf5_errors();

    let mut file = netcdf::create(path).map_err(|source| NetCdfError::Open {
        path: path.display().to_string(),
        source,
    })?;

    for (name, value) in global.iter() {
        file.add_attribute(name, value.clone())?;
    }

    for axis in &field.axes {
        if axis.unlimited {
            file.add_unlimited_dimension(&axis.name)?;
        } else {
            file.add_dimension(&axis.name, axis.len)?;
        }
    }

    for axis in &field.axes {
        let Some(coord) = &axis.coordinate else {
            continue;
        };
        if coord.values.len() != axis.len {
            return Err(NetCdfError::InvalidFormat(format!(
                "coordinate {} has {} values for a dimension of length {}",
                axis.name,
                coord.values.len(),
                axis.len
            )));
        }
        let mut var = file.add_variable::<f64>(&axis.name, &[axis.name.as_str()])?;
        for (name, value) in coord.attributes.iter() {
            match typed_attribute(name, value, to_double) {
                Some(value) => {
                    var.put_attribute(name, value)?;
                }
                None => debug!(variable = %axis.name, attribute = %name, "Skipping non-numeric attribute"),
            }
        }
        var.put_values(&coord.values, full_extents(&[axis.len]))?;
    }

    let dims: Vec<&str> = field.axes.iter().map(|axis| axis.name.as_str()).collect();
    let mut var = file.add_variable::<f32>(&field.name, &dims)?;

    let has_missing = field.has_missing();
    if has_missing {
        var.put_attribute(FILL_VALUE, DEFAULT_FILL_VALUE)?;
    }
    for (name, value) in field.attributes.iter() {
        if [FILL_VALUE, MISSING_VALUE, SCALE_FACTOR, ADD_OFFSET].contains(&name) {
            continue;
        }
        match typed_attribute(name, value, to_float) {
            Some(value) => {
                var.put_attribute(name, value)?;
            }
            None => debug!(variable = %field.name, attribute = %name, "Skipping non-numeric attribute"),
        }
    }
    if has_missing {
        var.put_attribute(MISSING_VALUE, DEFAULT_FILL_VALUE)?;
    }

    let filled: Vec<f32>;
    let values = if has_missing {
        filled = field
            .values
            .iter()
            .map(|&v| if v.is_nan() { DEFAULT_FILL_VALUE } else { v })
            .collect();
        &filled
    } else {
        &field.values
    };

    if shape.is_empty() {
        var.put_values(values, ..)?;
    } else {
        var.put_values(values, full_extents(&shape))?;
    }

    debug!(
        file = %path.display(),
        variable = %field.name,
        shape = ?shape,
        global_attributes = global.len(),
        "Wrote variable"
    );

    Ok(())
}

/// Convert `value` with `convert` if `name` has to match its variable's type.
fn typed_attribute(
    name: &str,
    value: &AttributeValue,
    convert: fn(&AttributeValue) -> Option<AttributeValue>,
) -> Option<AttributeValue> {
    if VARIABLE_TYPED.contains(&name) {
        convert(value)
    } else {
        Some(value.clone())
    }
}
