//! Test data generators for creating synthetic wind-like data.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite.

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50); // 10 * 5
/// assert_eq!(grid[0], 0.0);   // col=0, row=0 -> 0*1000 + 0
/// assert_eq!(grid[1], 1000.0); // col=1, row=0 -> 1*1000 + 0
/// assert_eq!(grid[10], 1.0);  // col=0, row=1 -> 0*1000 + 1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Creates a U-component wind grid (west-east component).
///
/// Values vary by row from -20 to +20 m/s, simulating a trade winds pattern.
pub fn create_u_wind_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for _col in 0..width {
            let lat_factor = (row as f32 / height as f32 - 0.5) * 2.0; // -1 to 1
            data.push(lat_factor * 20.0);
        }
    }
    data
}

/// Creates a V-component wind grid (south-north component).
///
/// Values vary by column from -15 to +15 m/s.
pub fn create_v_wind_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            let lon_factor = (col as f32 / width as f32 - 0.5) * 2.0; // -1 to 1
            data.push(lon_factor * 15.0);
        }
    }
    data
}

/// Creates a grid filled with a constant value.
pub fn create_constant_grid(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}

/// Creates a grid with NaN values at specified `(col, row)` positions, zeros elsewhere.
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    nan_positions: &[(usize, usize)],
) -> Vec<f32> {
    let mut data = vec![0.0f32; width * height];
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[row * width + col] = f32::NAN;
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_grid() {
        let grid = create_test_grid(10, 5);
        assert_eq!(grid.len(), 50);
        assert_eq!(grid[0], 0.0); // col=0, row=0
        assert_eq!(grid[1], 1000.0); // col=1, row=0
        assert_eq!(grid[10], 1.0); // col=0, row=1
        assert_eq!(grid[11], 1001.0); // col=1, row=1
    }

    #[test]
    fn test_wind_component_ranges() {
        let u = create_u_wind_grid(20, 10);
        let v = create_v_wind_grid(20, 10);
        assert_eq!(u.len(), 200);
        assert!(u.iter().all(|&x| (-20.0..=20.0).contains(&x)));
        assert!(v.iter().all(|&x| (-15.0..=15.0).contains(&x)));
        // u is constant along a row, v along a column
        assert_eq!(u[0], u[19]);
        assert_eq!(v[0], v[20]);
    }

    #[test]
    fn test_create_constant_grid() {
        let grid = create_constant_grid(10, 10, 42.0);
        assert_eq!(grid.len(), 100);
        assert!(grid.iter().all(|&v| v == 42.0));
    }

    #[test]
    fn test_create_grid_with_nans() {
        let grid = create_grid_with_nans(10, 10, &[(5, 5), (0, 0)]);
        assert!(grid[0].is_nan()); // (0, 0)
        assert!(grid[55].is_nan()); // (5, 5) = row 5 * 10 + col 5
        assert!(!grid[1].is_nan()); // (1, 0) should be 0.0
    }
}
