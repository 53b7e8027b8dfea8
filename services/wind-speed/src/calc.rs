//! Wind speed from orthogonal wind components.

use netcdf_io::{AttributeMap, Field, LONG_NAME, UNITS};

use crate::error::{WindSpeedError, WindSpeedResult};

/// Identifier of the derived variable.
pub const WSP_ID: &str = "wsp";
/// Long name of the derived variable.
pub const WSP_LONG_NAME: &str = "Wind speed";
/// Units of the derived variable.
pub const WSP_UNITS: &str = "m s-1";

/// Calculate the wind speed `sqrt(u^2 + v^2)` element-wise.
///
/// Both fields must have the same shape; the result takes its axes from `u`.
/// The result is always named `wsp` with long name "Wind speed" and units
/// "m s-1", whatever the inputs carry. Missing (NaN) elements stay missing.
pub fn calc_wsp(u: &Field, v: &Field) -> WindSpeedResult<Field> {
    let (u_shape, v_shape) = (u.shape(), v.shape());
    if u_shape != v_shape || u.values.len() != v.values.len() {
        return Err(WindSpeedError::ShapeMismatch {
            u_name: u.name.clone(),
            u_shape,
            v_name: v.name.clone(),
            v_shape,
        });
    }

    let values = u
        .values
        .iter()
        .zip(&v.values)
        .map(|(&a, &b)| (a * a + b * b).sqrt())
        .collect();

    let mut attributes = AttributeMap::new();
    attributes.insert(LONG_NAME, WSP_LONG_NAME);
    attributes.insert(UNITS, WSP_UNITS);

    Ok(Field {
        name: WSP_ID.to_string(),
        values,
        axes: u.axes.clone(),
        attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use netcdf_io::Axis;
    use test_utils::{create_constant_grid, create_u_wind_grid, create_v_wind_grid};

    fn field(name: &str, values: Vec<f32>, nlat: usize, nlon: usize) -> Field {
        let axes = vec![Axis::new("lat", nlat), Axis::new("lon", nlon)];
        let mut field = Field::new(name, values, axes);
        field.attributes.insert(UNITS, "knots");
        field.attributes.insert(LONG_NAME, name);
        field
    }

    #[test]
    fn test_three_four_five() {
        let u = field("uwnd", create_constant_grid(2, 2, 3.0), 2, 2);
        let v = field("vwnd", create_constant_grid(2, 2, 4.0), 2, 2);

        let wsp = calc_wsp(&u, &v).unwrap();

        assert_eq!(wsp.values, vec![5.0; 4]);
        assert_eq!(wsp.shape(), vec![2, 2]);
    }

    #[test]
    fn test_matches_formula_and_commutes() {
        let u = field("uwnd", create_u_wind_grid(8, 6), 6, 8);
        let v = field("vwnd", create_v_wind_grid(8, 6), 6, 8);

        let uv = calc_wsp(&u, &v).unwrap();
        let vu = calc_wsp(&v, &u).unwrap();

        for ((&a, &b), &w) in u.values.iter().zip(&v.values).zip(&uv.values) {
            assert_eq!(w, (a * a + b * b).sqrt());
        }
        assert_eq!(uv.values, vu.values);
    }

    #[test]
    fn test_fixed_metadata() {
        let u = field("uwnd", vec![1.0; 4], 2, 2);
        let v = field("vwnd", vec![1.0; 4], 2, 2);

        let wsp = calc_wsp(&u, &v).unwrap();

        assert_eq!(wsp.name, WSP_ID);
        assert_eq!(wsp.long_name(), Some(WSP_LONG_NAME));
        assert_eq!(wsp.units(), Some(WSP_UNITS));
        assert_eq!(wsp.attributes.len(), 2);
    }

    #[test]
    fn test_shape_mismatch() {
        let u = field("uwnd", vec![1.0; 4], 2, 2);
        let v = field("vwnd", vec![1.0; 6], 2, 3);

        let result = calc_wsp(&u, &v);

        assert!(matches!(result, Err(WindSpeedError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_missing_values_propagate() {
        let u = field("uwnd", vec![3.0, f32::NAN, 3.0, 3.0], 2, 2);
        let v = field("vwnd", vec![4.0, 4.0, f32::NAN, 4.0], 2, 2);

        let wsp = calc_wsp(&u, &v).unwrap();

        assert_eq!(wsp.values[0], 5.0);
        assert!(wsp.values[1].is_nan());
        assert!(wsp.values[2].is_nan());
        assert_eq!(wsp.values[3], 5.0);
    }

    #[test]
    fn test_negative_components() {
        let u = field("uwnd", vec![-3.0], 1, 1);
        let v = field("vwnd", vec![-4.0], 1, 1);
        assert_eq!(calc_wsp(&u, &v).unwrap().values, vec![5.0]);
    }
}
