//! Coupler input datasets.
//!
//! OASIS consumes three shared NetCDF files holding the geometry of
//! every coupled grid side by side: `grids.nc` (centers and corners),
//! `areas.nc` (cell areas) and `masks.nc` (land/sea masks). Each grid
//! contributes its own dimensions `{name}_p` / `{name}_q` (and
//! `{name}_c` = 4 for corners) and variables `{name}.lat`, `{name}.lon`,
//! `{name}.cla`, `{name}.clo`, `{name}.srf` and `{name}.msk`.
//!
//! Grids with a flat cell list are written as degenerate 2-D fields
//! with a singleton `q` axis, which is how the coupler expects 1-D
//! grids.

use std::path::Path;

use log::debug;
use ndarray::ArrayD;

use crate::errors::{GridError, GridResult};
use crate::grid::CellCorners;

pub const GRIDS_FILE: &str = "grids.nc";
pub const AREAS_FILE: &str = "areas.nc";
pub const MASKS_FILE: &str = "masks.nc";

/// Write one grid's center (and optionally corner) coordinates into
/// `grids.nc` under `dir`.
///
/// With `append` the existing dataset is opened read-write and other
/// grids' entries are left untouched; without it the dataset is
/// recreated from scratch. Re-writing a grid that is already present
/// overwrites its values in place.
pub fn write_grid(
    dir: &Path,
    name: &str,
    lats: &ArrayD<f64>,
    lons: &ArrayD<f64>,
    corners: Option<&CellCorners>,
    append: bool,
) -> GridResult<()> {
    let (p, q) = cell_shape(name, lats)?;
    if lons.shape() != lats.shape() {
        return Err(GridError::ShapeMismatch(format!(
            "latitudes {:?} and longitudes {:?} of grid '{name}' disagree",
            lats.shape(),
            lons.shape()
        )));
    }
    if let Some(corners) = corners {
        check_corner_shape(name, lats, corners)?;
    }

    let mut file = open_dataset(&dir.join(GRIDS_FILE), append)?;
    ensure_cell_dims(&mut file, name, p, q)?;
    put_field(
        &mut file,
        &format!("{name}.lat"),
        &[&dim_p(name), &dim_q(name)],
        lats.iter().copied().collect(),
        &[("units", "degrees_north"), ("standard_name", "Latitude")],
    )?;
    put_field(
        &mut file,
        &format!("{name}.lon"),
        &[&dim_p(name), &dim_q(name)],
        lons.iter().copied().collect(),
        &[("units", "degrees_east"), ("standard_name", "Longitude")],
    )?;
    if let Some(corners) = corners {
        let dim_c = format!("{name}_c");
        ensure_dim(&mut file, &dim_c, 4)?;
        put_field(
            &mut file,
            &format!("{name}.cla"),
            &[&dim_c, &dim_p(name), &dim_q(name)],
            corners.lat.iter().copied().collect(),
            &[
                ("units", "degrees_north"),
                ("standard_name", "Corner_latitude"),
            ],
        )?;
        put_field(
            &mut file,
            &format!("{name}.clo"),
            &[&dim_c, &dim_p(name), &dim_q(name)],
            corners.lon.iter().copied().collect(),
            &[
                ("units", "degrees_east"),
                ("standard_name", "Corner_longitude"),
            ],
        )?;
    }
    debug!("wrote grid '{name}' ({p}x{q}) to {GRIDS_FILE}");
    Ok(())
}

/// Write one grid's cell areas into `areas.nc` under `dir`.
pub fn write_areas(dir: &Path, name: &str, areas: &ArrayD<f64>, append: bool) -> GridResult<()> {
    let (p, q) = cell_shape(name, areas)?;
    let mut file = open_dataset(&dir.join(AREAS_FILE), append)?;
    ensure_cell_dims(&mut file, name, p, q)?;
    put_field(
        &mut file,
        &format!("{name}.srf"),
        &[&dim_p(name), &dim_q(name)],
        areas.iter().copied().collect(),
        &[("units", "m2"), ("standard_name", "cell_area")],
    )?;
    debug!("wrote areas of grid '{name}' to {AREAS_FILE}");
    Ok(())
}

/// Write one grid's land/sea mask into `masks.nc` under `dir`.
pub fn write_mask(dir: &Path, name: &str, mask: &ArrayD<i32>, append: bool) -> GridResult<()> {
    let (p, q) = cell_shape(name, mask)?;
    let mut file = open_dataset(&dir.join(MASKS_FILE), append)?;
    ensure_cell_dims(&mut file, name, p, q)?;
    let var_name = format!("{name}.msk");
    let values: Vec<i32> = mask.iter().copied().collect();
    let dims = [dim_p(name), dim_q(name)];
    let dim_refs: Vec<&str> = dims.iter().map(String::as_str).collect();
    if file.variable(&var_name).is_none() {
        file.add_variable::<i32>(&var_name, &dim_refs)?;
    }
    let mut var = file
        .variable_mut(&var_name)
        .ok_or_else(|| netcdf::Error::NotFound(var_name.clone()))?;
    var.put_values(&values, ..)?;
    debug!("wrote mask of grid '{name}' to {MASKS_FILE}");
    Ok(())
}

fn dim_p(name: &str) -> String {
    format!("{name}_p")
}

fn dim_q(name: &str) -> String {
    format!("{name}_q")
}

/// Interpret a per-cell array as the coupler's `(p, q)` layout; flat
/// cell lists get a singleton `q`.
fn cell_shape<T>(name: &str, field: &ArrayD<T>) -> GridResult<(usize, usize)> {
    match field.shape() {
        [p] => Ok((*p, 1)),
        [p, q] => Ok((*p, *q)),
        other => Err(GridError::ShapeMismatch(format!(
            "grid '{name}' fields must be 1-D or 2-D, got shape {other:?}"
        ))),
    }
}

fn check_corner_shape(
    name: &str,
    centers: &ArrayD<f64>,
    corners: &CellCorners,
) -> GridResult<()> {
    if corners.lat.shape() != corners.lon.shape() {
        return Err(GridError::ShapeMismatch(format!(
            "corner latitudes {:?} and longitudes {:?} of grid '{name}' disagree",
            corners.lat.shape(),
            corners.lon.shape()
        )));
    }
    let shape = corners.lat.shape();
    if shape.first() != Some(&4) || &shape[1..] != centers.shape() {
        return Err(GridError::ShapeMismatch(format!(
            "corners of grid '{name}' must have shape (4, {:?}), got {:?}",
            centers.shape(),
            shape
        )));
    }
    Ok(())
}

fn open_dataset(path: &Path, append: bool) -> GridResult<netcdf::FileMut> {
    if append && path.exists() {
        Ok(netcdf::append(path)?)
    } else {
        Ok(netcdf::create(path)?)
    }
}

/// Dimensions shared by all of a grid's variables within one dataset.
fn ensure_cell_dims(
    file: &mut netcdf::FileMut,
    name: &str,
    p: usize,
    q: usize,
) -> GridResult<()> {
    ensure_dim(file, &dim_p(name), p)?;
    ensure_dim(file, &dim_q(name), q)
}

fn ensure_dim(file: &mut netcdf::FileMut, name: &str, len: usize) -> GridResult<()> {
    match file.dimension(name).map(|d| d.len()) {
        Some(existing) if existing == len => Ok(()),
        Some(existing) => Err(GridError::ShapeMismatch(format!(
            "dimension '{name}' already present with length {existing}, expected {len}"
        ))),
        None => {
            file.add_dimension(name, len)?;
            Ok(())
        }
    }
}

/// Get-or-create a float variable and overwrite its values.
fn put_field(
    file: &mut netcdf::FileMut,
    var_name: &str,
    dims: &[&String],
    values: Vec<f64>,
    attributes: &[(&str, &str)],
) -> GridResult<()> {
    let dim_refs: Vec<&str> = dims.iter().map(|d| d.as_str()).collect();
    let fresh = file.variable(var_name).is_none();
    if fresh {
        file.add_variable::<f64>(var_name, &dim_refs)?;
    }
    let mut var = file
        .variable_mut(var_name)
        .ok_or_else(|| netcdf::Error::NotFound(var_name.to_string()))?;
    if fresh {
        for (key, value) in attributes {
            var.put_attribute(key, *value)?;
        }
    }
    var.put_values(&values, ..)?;
    Ok(())
}
