//! Curvilinear NEMO ocean grids (the ORCA family), backed by a
//! coordinate/mask NetCDF file.
//!
//! ORCA is a tripolar staggered grid: each cell carries four point
//! families (T in the cell center, U/V on the east/north edges, F on
//! the north-east vertex). The coordinate file publishes longitudes
//! (`glam*`), latitudes (`gphi*`) and metric scale factors (`e1*`,
//! `e2*`) for every family, plus the `top_level` wet-cell index.
//!
//! Fields are held on disk, not in memory: the grid object stores only
//! the file path, the recognized configuration name and the dimension
//! sizes, and every query opens the file read-only for its own scope.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use ndarray::{Array2, Array3};

use crate::errors::{GridError, GridResult};
use crate::grid::{CellCorners, GridCells, CORNER_FILL};

/// The staggered point families a caller can query.
///
/// F points are not directly queryable; they only serve as the corner
/// source for T cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrcaSubGrid {
    T,
    U,
    V,
}

impl OrcaSubGrid {
    fn letter(self) -> char {
        match self {
            OrcaSubGrid::T => 't',
            OrcaSubGrid::U => 'u',
            OrcaSubGrid::V => 'v',
        }
    }

    /// The point family holding this family's cell corners.
    fn corner_letter(self) -> char {
        match self {
            OrcaSubGrid::T => 'f',
            OrcaSubGrid::U => 'v',
            OrcaSubGrid::V => 'u',
        }
    }
}

impl FromStr for OrcaSubGrid {
    type Err = GridError;

    fn from_str(s: &str) -> GridResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "t" => Ok(OrcaSubGrid::T),
            "u" => Ok(OrcaSubGrid::U),
            "v" => Ok(OrcaSubGrid::V),
            _ => Err(GridError::InvalidSubGrid(s.to_string())),
        }
    }
}

/// The 17 variables a coordinate source must provide.
const REQUIRED_VARIABLES: [&str; 17] = [
    "glamt", "glamu", "glamv", "glamf", "gphit", "gphiu", "gphiv", "gphif", "e1t", "e1u",
    "e1v", "e1f", "e2t", "e2u", "e2v", "e2f", "top_level",
];

/// Known (x, y, z) dimension signatures and their configuration names.
const KNOWN_SIGNATURES: [((usize, usize, usize), &str); 2] = [
    ((362, 292, 75), "ORCA1L75"),
    ((182, 149, 31), "ORCA2L31"),
];

#[derive(Debug, Clone)]
pub struct OrcaGrid {
    path: PathBuf,
    name: &'static str,
    nx: usize,
    ny: usize,
}

impl OrcaGrid {
    /// Validate a coordinate source and bind to it.
    ///
    /// Checks, in order: the `x`/`y`/`z` dimensions exist, all 17
    /// required variables exist (reporting every absent one at once),
    /// and the dimension signature matches a known ORCA configuration.
    pub fn from_file<P: AsRef<Path>>(path: P) -> GridResult<Self> {
        let path = path.as_ref();
        let file = netcdf::open(path)?;

        let mut dims = [0usize; 3];
        for (slot, name) in dims.iter_mut().zip(["x", "y", "z"]) {
            *slot = file
                .dimension(name)
                .map(|d| d.len())
                .ok_or_else(|| GridError::MissingDimension {
                    name: name.to_string(),
                    path: path.to_owned(),
                })?;
        }
        let [nx, ny, nz] = dims;

        let missing: Vec<String> = REQUIRED_VARIABLES
            .iter()
            .filter(|name| file.variable(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(GridError::MissingVariables {
                names: missing,
                path: path.to_owned(),
            });
        }

        let name = KNOWN_SIGNATURES
            .iter()
            .find(|(sig, _)| *sig == (nx, ny, nz))
            .map(|(_, name)| *name)
            .ok_or(GridError::UnknownGridSignature {
                x: nx,
                y: ny,
                z: nz,
                path: path.to_owned(),
            })?;
        debug!("recognized {name} coordinate source at {path:?}");

        Ok(Self {
            path: path.to_owned(),
            name,
            nx,
            ny,
        })
    }

    /// Configuration name, e.g. `ORCA1L75`.
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Cells of one point family as a [`GridCells`] view.
    pub fn cells(&self, sub: OrcaSubGrid) -> OrcaCells<'_> {
        OrcaCells {
            grid: self,
            sub,
            name: format!("{}_{}", self.name, sub.letter()),
        }
    }

    /// Cell-center latitudes of a point family, shape `(nx, ny)`.
    pub fn cell_latitudes(&self, sub: OrcaSubGrid) -> GridResult<Array2<f64>> {
        self.read_field(&format!("gphi{}", sub.letter()))
    }

    /// Cell-center longitudes of a point family, shape `(nx, ny)`.
    pub fn cell_longitudes(&self, sub: OrcaSubGrid) -> GridResult<Array2<f64>> {
        self.read_field(&format!("glam{}", sub.letter()))
    }

    /// Cell areas as the product of the two metric scale factors, m².
    pub fn cell_areas(&self, sub: OrcaSubGrid) -> GridResult<Array2<f64>> {
        let letter = sub.letter();
        let e1 = self.read_field(&format!("e1{letter}"))?;
        let e2 = self.read_field(&format!("e2{letter}"))?;
        Ok(e1 * e2)
    }

    /// Wet-cell mask of a point family: 1 = ocean, 0 = land.
    ///
    /// T cells are wet where `top_level > 0`. A U (V) cell sits on the
    /// edge between two T cells and is wet only if both are: the
    /// eastern neighbor wraps periodically in i, the northern neighbor
    /// is clipped at the last row.
    pub fn cell_mask(&self, sub: OrcaSubGrid) -> GridResult<Array2<i32>> {
        let top_level = self.read_field("top_level")?;
        let tmask = top_level.mapv(|v| i32::from(v > 0.0));
        let (nx, ny) = (self.nx, self.ny);
        let mask = match sub {
            OrcaSubGrid::T => tmask,
            OrcaSubGrid::U => Array2::from_shape_fn((nx, ny), |(i, j)| {
                tmask[[i, j]] & tmask[[(i + 1) % nx, j]]
            }),
            OrcaSubGrid::V => Array2::from_shape_fn((nx, ny), |(i, j)| {
                tmask[[i, j]] & tmask[[i, (j + 1).min(ny - 1)]]
            }),
        };
        Ok(mask)
    }

    /// Cell corner coordinates of a point family, shape `(4, nx, ny)`,
    /// wound NE, NW, SW, SE in the source grid's (i, j) directions.
    ///
    /// Corners are taken from the staggered family sitting on this
    /// family's vertices (`T`: F points, `U`: V points, `V`: U points),
    /// with periodic wraparound in i. Two rows have no well-defined
    /// corner geometry and are filled with [`CORNER_FILL`] instead: the
    /// northern fold seam `j = ny - 1` (all four corners) and the
    /// southern boundary row `j = 0` (the two southern corners).
    pub fn cell_corners(&self, sub: OrcaSubGrid) -> GridResult<CellCorners> {
        let letter = sub.corner_letter();
        let src_lat = self.read_field(&format!("gphi{letter}"))?;
        let src_lon = self.read_field(&format!("glam{letter}"))?;
        let (nx, ny) = (self.nx, self.ny);
        let mut lat = Array3::from_elem((4, nx, ny), CORNER_FILL);
        let mut lon = Array3::from_elem((4, nx, ny), CORNER_FILL);
        for i in 0..nx {
            let iw = (i + nx - 1) % nx;
            for j in 0..ny - 1 {
                lat[[0, i, j]] = src_lat[[i, j]];
                lat[[1, i, j]] = src_lat[[iw, j]];
                lon[[0, i, j]] = src_lon[[i, j]];
                lon[[1, i, j]] = src_lon[[iw, j]];
                if j > 0 {
                    lat[[2, i, j]] = src_lat[[iw, j - 1]];
                    lat[[3, i, j]] = src_lat[[i, j - 1]];
                    lon[[2, i, j]] = src_lon[[iw, j - 1]];
                    lon[[3, i, j]] = src_lon[[i, j - 1]];
                }
            }
        }
        Ok(CellCorners {
            lat: lat.into_dyn(),
            lon: lon.into_dyn(),
        })
    }

    /// Read the surface level of a field and transpose it to `(nx, ny)`
    /// so axis 0 is the periodic east-west axis.
    fn read_field(&self, name: &str) -> GridResult<Array2<f64>> {
        let file = netcdf::open(&self.path)?;
        let var = file
            .variable(name)
            .ok_or_else(|| GridError::MissingVariables {
                names: vec![name.to_string()],
                path: self.path.clone(),
            })?;
        // Coordinate sources store fields as (t, y, x) or (y, x); with
        // a leading record axis only the first record is geometry.
        let ndims = var.dimensions().len();
        if !(2..=3).contains(&ndims) {
            return Err(GridError::ShapeMismatch(format!(
                "variable '{name}' in {:?} has {ndims} dimensions, expected 2 or 3",
                self.path
            )));
        }
        let mut values = var.get_values::<f64, _>(..)?;
        values.truncate(self.ny * self.nx);
        let field = Array2::from_shape_vec((self.ny, self.nx), values).map_err(|_| {
            GridError::ShapeMismatch(format!(
                "variable '{name}' in {:?} does not match the (y={}, x={}) grid shape",
                self.path, self.ny, self.nx
            ))
        })?;
        Ok(field.reversed_axes())
    }
}

/// One point family of an [`OrcaGrid`], adapted to the common grid
/// contract.
pub struct OrcaCells<'a> {
    grid: &'a OrcaGrid,
    sub: OrcaSubGrid,
    name: String,
}

impl GridCells for OrcaCells<'_> {
    fn grid_name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> usize {
        self.grid.nx * self.grid.ny
    }

    fn cell_latitudes(&self) -> GridResult<ndarray::ArrayD<f64>> {
        Ok(self.grid.cell_latitudes(self.sub)?.into_dyn())
    }

    fn cell_longitudes(&self) -> GridResult<ndarray::ArrayD<f64>> {
        Ok(self.grid.cell_longitudes(self.sub)?.into_dyn())
    }

    fn cell_corners(&self) -> GridResult<CellCorners> {
        self.grid.cell_corners(self.sub)
    }

    fn cell_areas(&self) -> GridResult<ndarray::ArrayD<f64>> {
        Ok(self.grid.cell_areas(self.sub)?.into_dyn())
    }

    fn cell_mask(&self) -> GridResult<ndarray::ArrayD<i32>> {
        Ok(self.grid.cell_mask(self.sub)?.into_dyn())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subgrid_selectors_parse_case_insensitively() {
        assert_eq!("t".parse::<OrcaSubGrid>().unwrap(), OrcaSubGrid::T);
        assert_eq!("U".parse::<OrcaSubGrid>().unwrap(), OrcaSubGrid::U);
        assert_eq!("v".parse::<OrcaSubGrid>().unwrap(), OrcaSubGrid::V);
    }

    #[test]
    fn foreign_selectors_are_rejected_by_name() {
        for bad in ["f", "w", "tt", ""] {
            match bad.parse::<OrcaSubGrid>() {
                Err(GridError::InvalidSubGrid(name)) => assert_eq!(name, bad),
                other => panic!("expected InvalidSubGrid, got {other:?}"),
            }
        }
    }

    #[test]
    fn corner_sources_are_the_opposite_stagger() {
        assert_eq!(OrcaSubGrid::T.corner_letter(), 'f');
        assert_eq!(OrcaSubGrid::U.corner_letter(), 'v');
        assert_eq!(OrcaSubGrid::V.corner_letter(), 'u');
    }
}
