//! The common grid contract implemented by every grid variant.

use ndarray::ArrayD;

use crate::errors::{GridError, GridResult};

/// Sentinel written in place of corner coordinates that have no defined
/// geometry (the curvilinear fold-seam and southern-boundary rows).
///
/// This is the CF-conventions default fill value for doubles; consumers
/// must treat it as "no interpolation metadata available for this cell
/// edge".
pub const CORNER_FILL: f64 = 9.96920996838687e36;

/// The four corner vertices of every cell of a grid.
///
/// Both arrays carry a leading axis of length 4; corner `k` of the
/// latitude and longitude arrays together describe the same vertex.
/// Corners are ordered counter-clockwise in the longitude/latitude
/// plane, starting at the north-east vertex: NE, NW, SW, SE.
#[derive(Debug, Clone)]
pub struct CellCorners {
    /// Corner latitudes in degrees north, shape `(4, …)`.
    pub lat: ArrayD<f64>,
    /// Corner longitudes in degrees east, shape `(4, …)`.
    pub lon: ArrayD<f64>,
}

/// Deterministic per-cell geometry queries shared by all grid variants.
///
/// A grid's cell count is fixed at construction; all queries return
/// arrays with mutually consistent cell indexing (same ordering, same
/// total count or same 2-D shape). Implementations own only the
/// parameters needed to regenerate geometry on demand and never cache
/// mutable state, so a single instance can serve any number of queries.
pub trait GridCells {
    /// Name identifying this grid in diagnostics and output datasets.
    fn grid_name(&self) -> &str;

    /// Total number of cells.
    fn size(&self) -> usize;

    /// Cell-center latitudes in degrees north.
    fn cell_latitudes(&self) -> GridResult<ArrayD<f64>>;

    /// Cell-center longitudes in degrees east.
    fn cell_longitudes(&self) -> GridResult<ArrayD<f64>>;

    /// The four bounding vertices of every cell.
    fn cell_corners(&self) -> GridResult<CellCorners>;

    /// Cell surface areas in m².
    fn cell_areas(&self) -> GridResult<ArrayD<f64>>;

    /// Land/ocean mask, 1 = ocean, 0 = land.
    ///
    /// Only a subset of grids defines a mask; the default fails with an
    /// unimplemented-capability error rather than returning a default
    /// value.
    fn cell_mask(&self) -> GridResult<ArrayD<i32>> {
        Err(GridError::Unsupported {
            grid: self.grid_name().to_string(),
            capability: "cell_mask".to_string(),
        })
    }
}
