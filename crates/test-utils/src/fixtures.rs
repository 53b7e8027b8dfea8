//! NetCDF fixture files for tests.
//!
//! Fixtures are written with the `netcdf` crate directly so that readers
//! under test are exercised against files they did not produce themselves.

use std::path::Path;

/// Global attributes carried by every fixture file unless overridden.
pub mod attrs {
    pub const HISTORY: &str = "Fri Jan 12 10:00:00 2024: ncks -v uwnd raw.nc uwnd.nc";
    pub const CONVENTIONS: &str = "CF-1.6";
    pub const TITLE: &str = "Monthly mean wind components";
    pub const INSTITUTION: &str = "NOAA/ESRL PSD";

    /// Default global attributes, in file order.
    pub const DEFAULT: [(&str, &str); 4] = [
        ("Conventions", CONVENTIONS),
        ("title", TITLE),
        ("history", HISTORY),
        ("institution", INSTITUTION),
    ];
}

/// Shape of a `time × lat × lon` fixture grid.
#[derive(Debug, Clone, Copy)]
pub struct GridSpec {
    pub ntime: usize,
    pub nlat: usize,
    pub nlon: usize,
}

impl GridSpec {
    pub const fn new(ntime: usize, nlat: usize, nlon: usize) -> Self {
        Self { ntime, nlat, nlon }
    }

    /// Total number of grid points.
    pub fn size(&self) -> usize {
        self.ntime * self.nlat * self.nlon
    }

    /// Time coordinate: one step per day.
    pub fn times(&self) -> Vec<f64> {
        (0..self.ntime).map(|i| i as f64).collect()
    }

    /// Latitudes at 2.5 degree spacing starting at the equator.
    pub fn lats(&self) -> Vec<f64> {
        (0..self.nlat).map(|i| i as f64 * 2.5).collect()
    }

    /// Longitudes at 2.5 degree spacing starting at the prime meridian.
    pub fn lons(&self) -> Vec<f64> {
        (0..self.nlon).map(|i| i as f64 * 2.5).collect()
    }
}

/// Single time step over a 2x2 grid.
pub const GRID_2X2: GridSpec = GridSpec::new(1, 2, 2);

/// Description of a single-variable fixture file.
#[derive(Debug, Clone)]
pub struct ComponentFile<'a> {
    pub variable: &'a str,
    pub long_name: &'a str,
    pub values: &'a [f32],
    pub grid: GridSpec,
    pub global_attributes: &'a [(&'a str, &'a str)],
    pub fill_value: Option<f32>,
    /// `(scale_factor, add_offset)`; stores the variable as packed `i16`.
    pub packing: Option<(f32, f32)>,
    /// Store `lat`/`lon` as `f32` with float `_FillValue` and `valid_range`.
    pub float_coordinates: bool,
}

impl<'a> ComponentFile<'a> {
    pub fn new(variable: &'a str, values: &'a [f32], grid: GridSpec) -> Self {
        Self {
            variable,
            long_name: variable,
            values,
            grid,
            global_attributes: &attrs::DEFAULT,
            fill_value: None,
            packing: None,
            float_coordinates: false,
        }
    }

    pub fn with_global_attributes(mut self, attributes: &'a [(&'a str, &'a str)]) -> Self {
        self.global_attributes = attributes;
        self
    }

    pub fn with_fill_value(mut self, fill_value: f32) -> Self {
        self.fill_value = Some(fill_value);
        self
    }

    pub fn with_long_name(mut self, long_name: &'a str) -> Self {
        self.long_name = long_name;
        self
    }

    pub fn with_packing(mut self, scale_factor: f32, add_offset: f32) -> Self {
        self.packing = Some((scale_factor, add_offset));
        self
    }

    pub fn with_float_coordinates(mut self) -> Self {
        self.float_coordinates = true;
        self
    }
}

/// Write a fixture file with `time` (unlimited), `lat` and `lon` dimensions,
/// their coordinate variables and one data variable in m s-1, stored as `f32`
/// or as packed `i16` when [`ComponentFile::packing`] is set.
pub fn write_component_file(path: &Path, fixture: &ComponentFile<'_>) -> Result<(), netcdf::Error> {
    let grid = fixture.grid;
    assert_eq!(
        fixture.values.len(),
        grid.size(),
        "fixture values do not match grid size"
    );

    let mut file = netcdf::create(path)?;
    for (name, value) in fixture.global_attributes {
        file.add_attribute(name, *value)?;
    }

    file.add_unlimited_dimension("time")?;
    file.add_dimension("lat", grid.nlat)?;
    file.add_dimension("lon", grid.nlon)?;

    {
        let mut time = file.add_variable::<f64>("time", &["time"])?;
        time.put_attribute("units", "days since 2024-01-01 00:00:00")?;
        time.put_attribute("calendar", "standard")?;
        let extents: Vec<netcdf::Extent> = vec![(0..grid.ntime).into()];
        time.put_values(&grid.times(), extents)?;
    }
    write_horizontal(&mut file, "lat", &grid.lats(), "degrees_north", "Latitude", fixture)?;
    write_horizontal(&mut file, "lon", &grid.lons(), "degrees_east", "Longitude", fixture)?;

    let dims = ["time", "lat", "lon"];
    let extents: Vec<netcdf::Extent> = vec![
        (0..grid.ntime).into(),
        (0..grid.nlat).into(),
        (0..grid.nlon).into(),
    ];
    match fixture.packing {
        Some((scale_factor, add_offset)) => {
            let mut var = file.add_variable::<i16>(fixture.variable, &dims)?;
            let fill = fixture.fill_value.map(|f| f as i16);
            if let Some(fill) = fill {
                var.put_attribute("_FillValue", fill)?;
            }
            var.put_attribute("scale_factor", scale_factor)?;
            var.put_attribute("add_offset", add_offset)?;
            var.put_attribute("long_name", fixture.long_name)?;
            var.put_attribute("units", "m s-1")?;
            let packed: Vec<i16> = fixture
                .values
                .iter()
                .map(|&v| match fill {
                    Some(fill) if v.is_nan() => fill,
                    _ => ((v - add_offset) / scale_factor).round() as i16,
                })
                .collect();
            var.put_values(&packed, extents)?;
        }
        None => {
            let mut var = file.add_variable::<f32>(fixture.variable, &dims)?;
            if let Some(fill) = fixture.fill_value {
                var.put_attribute("_FillValue", fill)?;
            }
            var.put_attribute("long_name", fixture.long_name)?;
            var.put_attribute("units", "m s-1")?;
            let values: Vec<f32> = fixture
                .values
                .iter()
                .map(|&v| match fixture.fill_value {
                    Some(fill) if v.is_nan() => fill,
                    _ => v,
                })
                .collect();
            var.put_values(&values, extents)?;
        }
    }

    Ok(())
}

fn write_horizontal(
    file: &mut netcdf::FileMut,
    name: &str,
    values: &[f64],
    units: &str,
    long_name: &str,
    fixture: &ComponentFile<'_>,
) -> Result<(), netcdf::Error> {
    if fixture.float_coordinates {
        let mut var = file.add_variable::<f32>(name, &[name])?;
        var.put_attribute("_FillValue", f32::NAN)?;
        var.put_attribute("valid_range", vec![-360.0f32, 360.0])?;
        var.put_attribute("units", units)?;
        var.put_attribute("long_name", long_name)?;
        let values: Vec<f32> = values.iter().map(|&v| v as f32).collect();
        var.put_values(&values, ..)?;
    } else {
        let mut var = file.add_variable::<f64>(name, &[name])?;
        var.put_attribute("units", units)?;
        var.put_attribute("long_name", long_name)?;
        var.put_values(values, ..)?;
    }
    Ok(())
}
