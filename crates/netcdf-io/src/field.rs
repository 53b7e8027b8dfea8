//! In-memory representation of a gridded variable.

use crate::attributes::AttributeMap;

/// Attribute holding the descriptive name of a variable.
pub const LONG_NAME: &str = "long_name";
/// Attribute holding the unit string of a variable.
pub const UNITS: &str = "units";

/// Values of a coordinate variable and its attributes.
#[derive(Debug, Clone)]
pub struct Coordinate {
    pub values: Vec<f64>,
    pub attributes: AttributeMap,
}

/// One dimension of a field, in storage order.
#[derive(Debug, Clone)]
pub struct Axis {
    /// Dimension name (e.g. "time", "lat", "lon")
    pub name: String,
    pub len: usize,
    /// Whether the dimension is the record (unlimited) dimension
    pub unlimited: bool,
    /// Coordinate variable sharing the dimension name, if the file has one
    pub coordinate: Option<Coordinate>,
}

impl Axis {
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        Self {
            name: name.into(),
            len,
            unlimited: false,
            coordinate: None,
        }
    }

    pub fn unlimited(mut self) -> Self {
        self.unlimited = true;
        self
    }

    pub fn with_coordinate(mut self, values: Vec<f64>, attributes: AttributeMap) -> Self {
        self.coordinate = Some(Coordinate { values, attributes });
        self
    }
}

/// A named N-dimensional array with its axes and variable attributes.
///
/// Values are stored row-major (last axis varies fastest). Missing values are
/// held as `NaN`.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub values: Vec<f32>,
    pub axes: Vec<Axis>,
    pub attributes: AttributeMap,
}

impl Field {
    pub fn new(name: impl Into<String>, values: Vec<f32>, axes: Vec<Axis>) -> Self {
        Self {
            name: name.into(),
            values,
            axes,
            attributes: AttributeMap::new(),
        }
    }

    /// Lengths of each axis.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(|axis| axis.len).collect()
    }

    pub fn long_name(&self) -> Option<&str> {
        self.attributes.get_str(LONG_NAME)
    }

    pub fn units(&self) -> Option<&str> {
        self.attributes.get_str(UNITS)
    }

    /// Whether any element is missing.
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_follows_axes() {
        let axes = vec![
            Axis::new("time", 1).unlimited(),
            Axis::new("lat", 2),
            Axis::new("lon", 3),
        ];
        let field = Field::new("uwnd", vec![0.0; 6], axes);

        assert_eq!(field.shape(), vec![1, 2, 3]);
        assert!(field.axes[0].unlimited);
        assert!(!field.axes[1].unlimited);
    }

    #[test]
    fn test_metadata_accessors() {
        let mut field = Field::new("uwnd", vec![1.0], vec![Axis::new("x", 1)]);
        assert_eq!(field.units(), None);

        field.attributes.insert(UNITS, "m s-1");
        field.attributes.insert(LONG_NAME, "Zonal wind");
        assert_eq!(field.units(), Some("m s-1"));
        assert_eq!(field.long_name(), Some("Zonal wind"));
    }

    #[test]
    fn test_has_missing() {
        let mut field = Field::new("v", vec![1.0, 2.0], vec![Axis::new("x", 2)]);
        assert!(!field.has_missing());
        field.values[1] = f32::NAN;
        assert!(field.has_missing());
    }
}
