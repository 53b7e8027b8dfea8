//! Direct writer for `time × lat × lon` fields.
//!
//! Unlike [`write_field`](crate::write_field), which reproduces the axes of a
//! source field, this writer builds the dimensions and coordinate variables
//! itself from plain coordinate vectors. It does not copy global attributes.

use std::path::Path;

use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};
use crate::native::{full_extents, silence_hdf5_errors};

/// Coordinates of a regular `time × lat × lon` grid.
#[derive(Debug, Clone)]
pub struct CoordinateGrid {
    /// Time values, in `time_units`
    pub time: Vec<f64>,
    /// CF time units, e.g. "days since 1-01-01 00:00:00"
    pub time_units: String,
    /// CF calendar, e.g. "proleptic_gregorian"
    pub calendar: String,
    /// Latitudes (degrees north)
    pub lats: Vec<f32>,
    /// Longitudes (degrees east)
    pub lons: Vec<f32>,
}

impl CoordinateGrid {
    /// Number of grid points, `time * lat * lon`.
    pub fn size(&self) -> usize {
        self.time.len() * self.lats.len() * self.lons.len()
    }
}

/// Write `data` as variable `varname` on the grid described by `grid`.
///
/// Creates dimensions `time` (unlimited), `lat` and `lon`, and variables
/// `time`, `latitude`, `longitude` and `varname`. `data` is row-major with
/// longitude varying fastest and must hold exactly [`CoordinateGrid::size`]
/// values; this is checked before the file is created.
pub fn write_time_lat_lon<P: AsRef<Path>>(
    path: P,
    varname: &str,
    data: &[f32],
    grid: &CoordinateGrid,
) -> NetCdfResult<()> {
    let path = path.as_ref();
    if data.len() != grid.size() {
        return Err(NetCdfError::InvalidFormat(format!(
            "{} has {} values, grid {}x{}x{} needs {}",
            varname,
            data.len(),
            grid.time.len(),
            grid.lats.len(),
            grid.lons.len(),
            grid.size()
        )));
    }

    silence_hdf5_errors();

    let mut file = netcdf::create(path).map_err(|source| NetCdfError::Open {
        path: path.display().to_string(),
        source,
    })?;

    file.add_unlimited_dimension("time")?;
    file.add_dimension("lat", grid.lats.len())?;
    file.add_dimension("lon", grid.lons.len())?;

    {
        let mut times = file.add_variable::<f64>("time", &["time"])?;
        times.put_attribute("units", grid.time_units.as_str())?;
        times.put_attribute("calendar", grid.calendar.as_str())?;
        times.put_values(&grid.time, full_extents(&[grid.time.len()]))?;
    }

    {
        let mut latitudes = file.add_variable::<f32>("latitude", &["lat"])?;
        latitudes.put_attribute("units", "degrees_north")?;
        latitudes.put_values(&grid.lats, ..)?;
    }

    {
        let mut longitudes = file.add_variable::<f32>("longitude", &["lon"])?;
        longitudes.put_attribute("units", "degrees_east")?;
        longitudes.put_values(&grid.lons, ..)?;
    }

    let shape = [grid.time.len(), grid.lats.len(), grid.lons.len()];
    let mut var = file.add_variable::<f32>(varname, &["time", "lat", "lon"])?;
    var.put_values(data, full_extents(&shape))?;

    debug!(file = %path.display(), variable = %varname, shape = ?shape, "Wrote gridded variable");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> CoordinateGrid {
        CoordinateGrid {
            time: vec![0.0, 1.0],
            time_units: "days since 1-01-01 00:00:00".to_string(),
            calendar: "proleptic_gregorian".to_string(),
            lats: vec![-10.0, 0.0, 10.0],
            lons: vec![100.0, 110.0],
        }
    }

    #[test]
    fn test_grid_size() {
        assert_eq!(grid().size(), 12);
    }

    #[test]
    fn test_rejects_mismatched_data_before_creating_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.nc");

        let result = write_time_lat_lon(&path, "wind_speed", &[1.0; 5], &grid());

        assert!(matches!(result, Err(NetCdfError::InvalidFormat(_))));
        assert!(!path.exists());
    }
}
