//! Global latitude/longitude grids with one shared longitude circle:
//! the regular equidistant grid and the full Gaussian grid.
//!
//! Both variants broadcast 1-D center arrays into matching 2-D fields
//! with rows as latitude bands and columns as longitude cells.

use ndarray::{Array1, Array2, Array3};

use crate::errors::{GridError, GridResult};
use crate::geometry::{
    equidistant_longitudes, latband_areas, latband_borders, longitude_borders,
};
use crate::grid::{CellCorners, GridCells};

/// Regular latitude-longitude grid with equidistant centers.
///
/// Rows are equidistant latitude centers north to south; columns are
/// equidistant longitudes over the full circle.
#[derive(Debug, Clone)]
pub struct RegularLatLonGrid {
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl RegularLatLonGrid {
    /// Create a grid with `nlat` rows and `nlon` columns.
    ///
    /// Row centers are the midpoints of `nlat` equal subdivisions of
    /// the closed interval [f, -f], where `f` is `first_lat` (requires
    /// `0 < f < 90`) or 90° when absent, so centers never sit on the
    /// interval endpoints.
    pub fn new(nlat: usize, nlon: usize, first_lat: Option<f64>) -> GridResult<Self> {
        if nlat == 0 || nlon == 0 {
            return Err(GridError::InvalidArgument(format!(
                "grid resolution must be positive, got {nlat}x{nlon}"
            )));
        }
        let f = match first_lat {
            None => 90.0,
            Some(f) if 0.0 < f && f < 90.0 => f,
            Some(f) => {
                return Err(GridError::InvalidArgument(format!(
                    "first latitude {f} outside the open interval (0, 90)"
                )))
            }
        };
        let step = 2.0 * f / nlat as f64;
        let lats = (0..nlat).map(|i| f - (i as f64 + 0.5) * step).collect();
        Ok(Self {
            lats,
            lons: equidistant_longitudes(nlon).to_vec(),
        })
    }

    pub fn nlat(&self) -> usize {
        self.lats.len()
    }

    pub fn nlon(&self) -> usize {
        self.lons.len()
    }
}

impl GridCells for RegularLatLonGrid {
    fn grid_name(&self) -> &str {
        "Regular"
    }

    fn size(&self) -> usize {
        self.lats.len() * self.lons.len()
    }

    fn cell_latitudes(&self) -> GridResult<ndarray::ArrayD<f64>> {
        Ok(center_latitudes(&self.lats, self.lons.len()).into_dyn())
    }

    fn cell_longitudes(&self) -> GridResult<ndarray::ArrayD<f64>> {
        Ok(center_longitudes(&self.lons, self.lats.len()).into_dyn())
    }

    fn cell_corners(&self) -> GridResult<CellCorners> {
        corners(&self.lats, &self.lons)
    }

    fn cell_areas(&self) -> GridResult<ndarray::ArrayD<f64>> {
        Ok(areas(&self.lats, self.lons.len())?.into_dyn())
    }
}

/// Full Gaussian grid: explicit Gaussian quadrature latitude bands with
/// twice as many equidistant longitude cells as latitude bands.
#[derive(Debug, Clone)]
pub struct FullGaussianGrid {
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl FullGaussianGrid {
    /// Create a grid from explicit latitude-band centers, north to
    /// south. The longitude count is fixed at twice the band count.
    pub fn new(lats: Vec<f64>) -> GridResult<Self> {
        // Validates ordering and range; the borders are recomputed on
        // demand by the queries.
        latband_borders(&lats)?;
        let lons = equidistant_longitudes(2 * lats.len()).to_vec();
        Ok(Self { lats, lons })
    }

    pub fn nlat(&self) -> usize {
        self.lats.len()
    }

    pub fn nlon(&self) -> usize {
        self.lons.len()
    }
}

impl GridCells for FullGaussianGrid {
    fn grid_name(&self) -> &str {
        "FullGaussian"
    }

    fn size(&self) -> usize {
        self.lats.len() * self.lons.len()
    }

    fn cell_latitudes(&self) -> GridResult<ndarray::ArrayD<f64>> {
        Ok(center_latitudes(&self.lats, self.lons.len()).into_dyn())
    }

    fn cell_longitudes(&self) -> GridResult<ndarray::ArrayD<f64>> {
        Ok(center_longitudes(&self.lons, self.lats.len()).into_dyn())
    }

    fn cell_corners(&self) -> GridResult<CellCorners> {
        corners(&self.lats, &self.lons)
    }

    fn cell_areas(&self) -> GridResult<ndarray::ArrayD<f64>> {
        Ok(areas(&self.lats, self.lons.len())?.into_dyn())
    }
}

/// Broadcast latitude centers over the columns: shape `(nlat, nlon)`.
fn center_latitudes(lats: &[f64], nlon: usize) -> Array2<f64> {
    let mut field = Array2::zeros((lats.len(), nlon));
    for (row, &lat) in field.outer_iter_mut().zip(lats) {
        let mut row = row;
        row.fill(lat);
    }
    field
}

/// Broadcast longitude centers over the rows: shape `(nlat, nlon)`.
fn center_longitudes(lons: &[f64], nlat: usize) -> Array2<f64> {
    let row = Array1::from_iter(lons.iter().copied());
    let mut field = Array2::zeros((nlat, lons.len()));
    for mut r in field.outer_iter_mut() {
        r.assign(&row);
    }
    field
}

/// Corner vertices for a grid with shared longitude columns.
///
/// Corner layout per cell (counter-clockwise from north-east):
///
/// ```text
///   1 ---------- 0
///   |            |
///   |            |
///   3 ---------- 2   -> corners (0, 1, 2, 3) = (NE, NW, SW, SE)
/// ```
///
/// North/south vertices sit on the pole-anchored band borders;
/// east/west vertices come from the shared longitude borders, so the
/// column wrapping the prime meridian spans `[-Δ/2, +Δ/2)`.
fn corners(lats: &[f64], lons: &[f64]) -> GridResult<CellCorners> {
    let lat_borders = latband_borders(lats)?;
    let (nlat, nlon) = (lats.len(), lons.len());
    let lon_borders = longitude_borders(nlon);
    let mut cla = Array3::zeros((4, nlat, nlon));
    let mut clo = Array3::zeros((4, nlat, nlon));
    for i in 0..nlat {
        let north = lat_borders[i];
        let south = lat_borders[i + 1];
        for j in 0..nlon {
            let east = lon_borders[j];
            let west = if j == 0 {
                lon_borders[nlon]
            } else {
                lon_borders[j - 1]
            };
            cla[[0, i, j]] = north;
            cla[[1, i, j]] = north;
            cla[[2, i, j]] = south;
            cla[[3, i, j]] = south;
            clo[[0, i, j]] = east;
            clo[[1, i, j]] = west;
            clo[[2, i, j]] = west;
            clo[[3, i, j]] = east;
        }
    }
    Ok(CellCorners {
        lat: cla.into_dyn(),
        lon: clo.into_dyn(),
    })
}

/// Zonal band area divided evenly among the band's longitude cells.
fn areas(lats: &[f64], nlon: usize) -> GridResult<Array2<f64>> {
    let band_areas = latband_areas(lats)?;
    let mut field = Array2::zeros((lats.len(), nlon));
    for (mut row, &band) in field.outer_iter_mut().zip(band_areas.iter()) {
        row.fill(band / nlon as f64);
    }
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::earth::SURFACE_AREA;
    use is_close::is_close;

    #[test]
    fn regular_two_by_four_centers() {
        let grid = RegularLatLonGrid::new(2, 4, None).unwrap();
        let lats = grid.cell_latitudes().unwrap();
        let lons = grid.cell_longitudes().unwrap();
        assert_eq!(lats.shape(), &[2, 4]);
        for j in 0..4 {
            assert_eq!(lats[[0, j]] + lats[[1, j]], 0.0);
            assert_eq!(lats[[0, j]], 45.0);
        }
        for i in 0..2 {
            let row: Vec<f64> = (0..4).map(|j| lons[[i, j]]).collect();
            assert_eq!(row, vec![0.0, 90.0, 180.0, 270.0]);
        }
    }

    #[test]
    fn regular_explicit_first_latitude_gives_subdivision_midpoints() {
        // Midpoints of 3 equal subdivisions of [60, -60], never the
        // interval endpoints themselves.
        let grid = RegularLatLonGrid::new(3, 8, Some(60.0)).unwrap();
        let lats = grid.cell_latitudes().unwrap();
        assert_eq!(lats[[0, 0]], 40.0);
        assert_eq!(lats[[1, 0]], 0.0);
        assert_eq!(lats[[2, 0]], -40.0);

        let single = RegularLatLonGrid::new(1, 4, Some(45.0)).unwrap();
        assert_eq!(single.cell_latitudes().unwrap()[[0, 0]], 0.0);
    }

    #[test]
    fn regular_first_latitude_defaults_to_the_pole() {
        // `None` is the f = 90 case of the same midpoint scheme.
        let implicit = RegularLatLonGrid::new(4, 8, None).unwrap();
        let lats = implicit.cell_latitudes().unwrap();
        assert_eq!(lats[[0, 0]], 67.5);
        assert_eq!(lats[[3, 0]], -67.5);
    }

    #[test]
    fn regular_rejects_degenerate_parameters() {
        assert!(RegularLatLonGrid::new(0, 4, None).is_err());
        assert!(RegularLatLonGrid::new(2, 0, None).is_err());
        assert!(RegularLatLonGrid::new(2, 4, Some(90.0)).is_err());
        assert!(RegularLatLonGrid::new(2, 4, Some(0.0)).is_err());
        assert!(RegularLatLonGrid::new(2, 4, Some(-30.0)).is_err());
    }

    #[test]
    fn regular_areas_tile_the_sphere() {
        for (nlat, nlon) in [(2, 4), (16, 32), (45, 90)] {
            let grid = RegularLatLonGrid::new(nlat, nlon, None).unwrap();
            let total = grid.cell_areas().unwrap().sum();
            assert!(is_close!(total, SURFACE_AREA, rel_tol = 1e-6));
        }
    }

    #[test]
    fn regular_corner_averages_stay_inside_the_cell() {
        let grid = RegularLatLonGrid::new(4, 8, None).unwrap();
        let lats = grid.cell_latitudes().unwrap();
        let lons = grid.cell_longitudes().unwrap();
        let corners = grid.cell_corners().unwrap();
        for i in 0..4 {
            for j in 0..8 {
                let lat_avg = (0..4).map(|k| corners.lat[[k, i, j]]).sum::<f64>() / 4.0;
                let lon_avg = (0..4).map(|k| corners.lon[[k, i, j]]).sum::<f64>() / 4.0;
                assert!(is_close!(lat_avg, lats[[i, j]]));
                assert!(is_close!(lon_avg, lons[[i, j]]));
            }
        }
    }

    #[test]
    fn corner_winding_is_consistent() {
        let grid = RegularLatLonGrid::new(2, 4, None).unwrap();
        let corners = grid.cell_corners().unwrap();
        // NE and NW share the north border, NE and SE share the east border.
        assert_eq!(corners.lat[[0, 0, 1]], corners.lat[[1, 0, 1]]);
        assert_eq!(corners.lat[[2, 0, 1]], corners.lat[[3, 0, 1]]);
        assert_eq!(corners.lon[[0, 0, 1]], corners.lon[[3, 0, 1]]);
        assert_eq!(corners.lon[[1, 0, 1]], corners.lon[[2, 0, 1]]);
        // Pole-adjacent bands reach the pole exactly.
        assert_eq!(corners.lat[[0, 0, 0]], 90.0);
        assert_eq!(corners.lat[[2, 1, 0]], -90.0);
    }

    #[test]
    fn corner_meridians_come_from_the_shared_longitude_borders() {
        let nlon = 5;
        let grid = RegularLatLonGrid::new(2, nlon, None).unwrap();
        let corners = grid.cell_corners().unwrap();
        let borders = longitude_borders(nlon);
        for j in 0..nlon {
            let west = if j == 0 { borders[nlon] } else { borders[j - 1] };
            for i in 0..2 {
                assert_eq!(corners.lon[[0, i, j]], borders[j]);
                assert_eq!(corners.lon[[3, i, j]], borders[j]);
                assert_eq!(corners.lon[[1, i, j]], west);
                assert_eq!(corners.lon[[2, i, j]], west);
            }
        }
        // Column 0 wraps: its west border is the shared closing border.
        assert_eq!(corners.lon[[1, 0, 0]], -borders[0]);
    }

    #[test]
    fn full_gaussian_doubles_the_longitude_count() {
        let grid = FullGaussianGrid::new(vec![45.0, 15.0, -15.0, -45.0]).unwrap();
        assert_eq!(grid.nlon(), 8);
        assert_eq!(grid.size(), 32);
        let total = grid.cell_areas().unwrap().sum();
        assert!(is_close!(total, SURFACE_AREA, rel_tol = 1e-6));
    }

    #[test]
    fn full_gaussian_rejects_unsorted_latitudes() {
        assert!(FullGaussianGrid::new(vec![-45.0, 45.0]).is_err());
    }

    #[test]
    fn masks_are_an_unimplemented_capability() {
        let grid = RegularLatLonGrid::new(2, 4, None).unwrap();
        assert!(matches!(
            grid.cell_mask(),
            Err(crate::errors::GridError::Unsupported { .. })
        ));
    }
}
