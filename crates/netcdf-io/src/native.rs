//! Helpers around the native netcdf/HDF5 libraries.

use std::sync::Once;

/// Attribute names that mark missing elements in a variable.
pub(crate) const FILL_VALUE: &str = "_FillValue";
pub(crate) const MISSING_VALUE: &str = "missing_value";

/// CF packing attributes: `unpacked = packed * scale_factor + add_offset`.
pub(crate) const SCALE_FACTOR: &str = "scale_factor";
pub(crate) const ADD_OFFSET: &str = "add_offset";

/// Attributes whose type has to match the type of their variable.
pub(crate) const VARIABLE_TYPED: [&str; 5] = [
    FILL_VALUE,
    MISSING_VALUE,
    "valid_min",
    "valid_max",
    "valid_range",
];

/// Attributes that only describe the packed representation.
pub(crate) const PACKED_ONLY: [&str; 7] = [
    SCALE_FACTOR,
    ADD_OFFSET,
    FILL_VALUE,
    MISSING_VALUE,
    "valid_min",
    "valid_max",
    "valid_range",
];

/// Fill value used when writing fields that contain missing elements.
pub const DEFAULT_FILL_VALUE: f32 = 1.0e20;

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This creates confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// Only needs to be called once per process, but is safe to call multiple times.
/// Call it early in `main()` before any HDF5/NetCDF operation occurs.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Extents covering `[0, len)` on every axis.
///
/// Record (unlimited) dimensions start at length zero, so writes must state
/// the extent explicitly rather than using `..`.
pub(crate) fn full_extents(shape: &[usize]) -> Vec<netcdf::Extent> {
    shape.iter().map(|&len| (0..len).into()).collect()
}

/// Replace elements equal to `fill` with NaN.
pub(crate) fn mask_fill(values: &mut [f32], fill: f32) {
    for value in values.iter_mut().filter(|v| **v == fill) {
        *value = f32::NAN;
    }
}

/// Apply `v * scale_factor + add_offset` to every element; NaN stays NaN.
pub(crate) fn unpack(values: &mut [f32], scale_factor: f64, add_offset: f64) {
    for value in values.iter_mut() {
        *value = (f64::from(*value) * scale_factor + add_offset) as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_is_idempotent() {
        silence_hdf5_errors();
        silence_hdf5_errors();
    }

    #[test]
    fn test_mask_fill() {
        let mut values = vec![1.0, DEFAULT_FILL_VALUE, 3.0, DEFAULT_FILL_VALUE];
        mask_fill(&mut values, DEFAULT_FILL_VALUE);
        assert_eq!(values[0], 1.0);
        assert!(values[1].is_nan());
        assert_eq!(values[2], 3.0);
        assert!(values[3].is_nan());
    }

    #[test]
    fn test_unpack_after_masking() {
        let mut values = vec![-394.0, -392.0, -32767.0];
        mask_fill(&mut values, -32767.0);
        unpack(&mut values, 0.5, 200.0);
        assert_eq!(values[0], 3.0);
        assert_eq!(values[1], 4.0);
        assert!(values[2].is_nan());
    }

    #[test]
    fn test_full_extents_rank() {
        assert_eq!(full_extents(&[1, 2, 3]).len(), 3);
        assert!(full_extents(&[]).is_empty());
    }
}
