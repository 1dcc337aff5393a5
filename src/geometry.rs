//! Pure latitude/longitude band geometry.
//!
//! These functions are the single source of truth for pole handling and
//! periodic longitude wraparound; every grid variant delegates its
//! border and area math here instead of re-deriving it.
//!
//! Latitude conventions: cell centers run north to south, strictly
//! inside (-90°, 90°); band borders are anchored at the poles, so the
//! outermost bands always reach ±90° exactly and the bands tile the
//! sphere with no gap or overlap.

use std::f64::consts::PI;

use ndarray::Array1;

use crate::earth::RADIUS;
use crate::errors::{GridError, GridResult};

/// Border latitudes of `N` latitude bands given their `N` centers.
///
/// Returns `N + 1` values: `border[0] = 90°`, `border[N] = -90°`, and
/// each interior border is the arithmetic midpoint of the adjacent
/// centers. This midpoint convention is the contract; downstream area
/// computation must use exactly these borders.
pub fn latband_borders(centers: &[f64]) -> GridResult<Array1<f64>> {
    check_latitude_centers(centers)?;
    let n = centers.len();
    let mut borders = Array1::zeros(n + 1);
    borders[0] = 90.0;
    for i in 1..n {
        borders[i] = 0.5 * (centers[i - 1] + centers[i]);
    }
    borders[n] = -90.0;
    Ok(borders)
}

/// Surface area of each zonal band, in m².
///
/// Band area is `2·π·R²·(sin(border[i]) - sin(border[i+1]))` with the
/// borders from [`latband_borders`]. The sum over all bands telescopes
/// to the full sphere area for any number of bands.
pub fn latband_areas(centers: &[f64]) -> GridResult<Array1<f64>> {
    let borders = latband_borders(centers)?;
    let areas = (0..centers.len())
        .map(|i| {
            2.0 * PI * RADIUS * RADIUS
                * (borders[i].to_radians().sin() - borders[i + 1].to_radians().sin())
        })
        .collect();
    Ok(areas)
}

/// `n` equidistant longitude centers in degrees east, starting at the
/// prime meridian: `0, 360/n, 2·360/n, …`.
///
/// `n` must be at least 1.
pub fn equidistant_longitudes(n: usize) -> Array1<f64> {
    assert!(n > 0, "longitude band needs at least one cell");
    (0..n).map(|i| i as f64 * 360.0 / n as f64).collect()
}

/// `n + 1` longitude borders, each offset half a cell width from the
/// centers of [`equidistant_longitudes`].
///
/// `border[i]` for `i < n` is the east border of cell `i`; the closing
/// `border[n]` is the west border of cell 0, wrapped across the prime
/// meridian, so `border[0] == -border[n]` exactly and the wrapping band
/// spans `[-Δ/2, +Δ/2)`.
pub fn longitude_borders(n: usize) -> Array1<f64> {
    assert!(n > 0, "longitude band needs at least one cell");
    let delta = 360.0 / n as f64;
    let mut borders = Array1::zeros(n + 1);
    for i in 0..n {
        borders[i] = (i as f64 + 0.5) * delta;
    }
    borders[n] = -0.5 * delta;
    borders
}

fn check_latitude_centers(centers: &[f64]) -> GridResult<()> {
    if centers.is_empty() {
        return Err(GridError::InvalidArgument(
            "latitude centers must not be empty".to_string(),
        ));
    }
    if let Some(&bad) = centers.iter().find(|c| !(-90.0 < **c && **c < 90.0)) {
        return Err(GridError::InvalidArgument(format!(
            "latitude center {bad} outside the open interval (-90, 90)"
        )));
    }
    if centers.windows(2).any(|w| w[1] >= w[0]) {
        return Err(GridError::InvalidArgument(
            "latitude centers must decrease strictly from north to south".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::earth::SURFACE_AREA;
    use is_close::is_close;

    #[test]
    fn borders_are_pole_anchored_and_monotonic() {
        let borders = latband_borders(&[75.0, 30.0, -15.0, -70.0]).unwrap();
        assert_eq!(borders.len(), 5);
        assert_eq!(borders[0], 90.0);
        assert_eq!(borders[4], -90.0);
        assert_eq!(borders[1], 52.5);
        assert_eq!(borders[2], 7.5);
        assert_eq!(borders[3], -42.5);
        assert!(borders.to_vec().windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn borders_reject_ascending_centers() {
        assert!(matches!(
            latband_borders(&[-60.0, 0.0, 60.0]),
            Err(GridError::InvalidArgument(_))
        ));
    }

    #[test]
    fn borders_reject_out_of_range_centers() {
        assert!(latband_borders(&[90.0, 0.0]).is_err());
        assert!(latband_borders(&[]).is_err());
    }

    #[test]
    fn band_areas_tile_the_sphere() {
        for centers in [
            vec![0.0],
            vec![45.0, -45.0],
            vec![80.0, 40.0, 10.0, -30.0, -85.0],
        ] {
            let total: f64 = latband_areas(&centers).unwrap().sum();
            assert!(is_close!(total, SURFACE_AREA));
        }
    }

    #[test]
    fn longitudes_start_at_prime_meridian() {
        let lons = equidistant_longitudes(4);
        assert_eq!(lons.to_vec(), vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn longitude_borders_wrap_across_prime_meridian() {
        let n = 4;
        let borders = longitude_borders(n);
        assert_eq!(borders.to_vec(), vec![45.0, 135.0, 225.0, 315.0, -45.0]);
        assert_eq!(borders[0], -borders[n]);
    }

    #[test]
    fn longitude_border_pairs_bracket_their_centers() {
        for n in [1, 4, 5, 96] {
            let centers = equidistant_longitudes(n);
            let borders = longitude_borders(n);
            for i in 0..n {
                let east = borders[i];
                let west = if i == 0 { borders[n] } else { borders[i - 1] };
                assert!(west < centers[i] && centers[i] < east);
                assert!(is_close!(east - west, 360.0 / n as f64));
            }
        }
    }
}
