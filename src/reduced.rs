//! Reduced Gaussian grid: Gaussian latitude bands with a per-band
//! longitude count, stored as a flat cell list.
//!
//! Because each band carries a different number of cells there is no
//! rectangular layout; all queries return 1-D arrays ordered band by
//! band from the north, west to east within a band.

use ndarray::{Array1, Array2};

use crate::errors::{GridError, GridResult};
use crate::geometry::{
    equidistant_longitudes, latband_areas, latband_borders, longitude_borders,
};
use crate::grid::{CellCorners, GridCells};

#[derive(Debug, Clone)]
pub struct ReducedGaussianGrid {
    lats: Vec<f64>,
    nlons: Vec<usize>,
    size: usize,
}

impl ReducedGaussianGrid {
    /// Create a grid from latitude-band centers (north to south) and
    /// the number of longitude cells in each band.
    pub fn new(lats: Vec<f64>, nlons: Vec<usize>) -> GridResult<Self> {
        if lats.len() != nlons.len() {
            return Err(GridError::LengthMismatch {
                nlat: lats.len(),
                nlon: nlons.len(),
            });
        }
        latband_borders(&lats)?;
        if nlons.iter().any(|&n| n == 0) {
            return Err(GridError::InvalidArgument(
                "every latitude band needs at least one longitude cell".to_string(),
            ));
        }
        let size = nlons.iter().sum();
        Ok(Self { lats, nlons, size })
    }

    pub fn nlat(&self) -> usize {
        self.lats.len()
    }

    /// Longitude cells per band, north to south.
    pub fn longitude_counts(&self) -> &[usize] {
        &self.nlons
    }
}

impl GridCells for ReducedGaussianGrid {
    fn grid_name(&self) -> &str {
        "ReducedGaussian"
    }

    fn size(&self) -> usize {
        self.size
    }

    fn cell_latitudes(&self) -> GridResult<ndarray::ArrayD<f64>> {
        let mut lats = Vec::with_capacity(self.size);
        for (&lat, &nlon) in self.lats.iter().zip(&self.nlons) {
            lats.extend(std::iter::repeat(lat).take(nlon));
        }
        Ok(Array1::from_vec(lats).into_dyn())
    }

    fn cell_longitudes(&self) -> GridResult<ndarray::ArrayD<f64>> {
        let mut lons = Vec::with_capacity(self.size);
        for &nlon in &self.nlons {
            lons.extend(equidistant_longitudes(nlon));
        }
        Ok(Array1::from_vec(lons).into_dyn())
    }

    fn cell_corners(&self) -> GridResult<CellCorners> {
        let lat_borders = latband_borders(&self.lats)?;
        let mut cla = Array2::zeros((4, self.size));
        let mut clo = Array2::zeros((4, self.size));
        let mut cell = 0;
        for (band, &nlon) in self.nlons.iter().enumerate() {
            let north = lat_borders[band];
            let south = lat_borders[band + 1];
            let lon_borders = longitude_borders(nlon);
            for i in 0..nlon {
                let east = lon_borders[i];
                let west = if i == 0 {
                    lon_borders[nlon]
                } else {
                    lon_borders[i - 1]
                };
                cla[[0, cell]] = north;
                cla[[1, cell]] = north;
                cla[[2, cell]] = south;
                cla[[3, cell]] = south;
                clo[[0, cell]] = east;
                clo[[1, cell]] = west;
                clo[[2, cell]] = west;
                clo[[3, cell]] = east;
                cell += 1;
            }
        }
        Ok(CellCorners {
            lat: cla.into_dyn(),
            lon: clo.into_dyn(),
        })
    }

    fn cell_areas(&self) -> GridResult<ndarray::ArrayD<f64>> {
        let band_areas = latband_areas(&self.lats)?;
        let mut areas = Vec::with_capacity(self.size);
        for (band, &nlon) in self.nlons.iter().enumerate() {
            let cell_area = band_areas[band] / nlon as f64;
            areas.extend(std::iter::repeat(cell_area).take(nlon));
        }
        Ok(Array1::from_vec(areas).into_dyn())
    }
}
