//! Externally supplied grid description tables.
//!
//! Linear Gaussian grids (the `TL`/`N` truncations) do not have a
//! closed-form latitude table; producing models publish the table in a
//! grid description dump. This module ingests such a table as a TOML
//! document:
//!
//! ```toml
//! name = "TL255"
//! gridtype = "gaussian"
//! ysize = 256
//! yvals = [89.46, 88.77, ...]
//! # present for reduced grids only:
//! reducedpoints = [18, 25, ...]
//! ```
//!
//! A description with `reducedpoints` describes a reduced Gaussian
//! grid, otherwise a full one; the factory builds the matching variant.

use std::path::Path;

use serde::Deserialize;

use crate::errors::{GridError, GridResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridDescription {
    pub name: String,
    pub gridtype: String,
    pub ysize: usize,
    /// Latitude-band centers, north to south, degrees north.
    pub yvals: Vec<f64>,
    /// Longitude cells per band; present only for reduced grids.
    pub reducedpoints: Option<Vec<usize>>,
}

impl GridDescription {
    pub fn from_toml_str(content: &str) -> GridResult<Self> {
        let desc: Self = toml::from_str(content)
            .map_err(|e| GridError::InvalidDescription(e.to_string()))?;
        desc.validate()?;
        Ok(desc)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> GridResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Structural consistency of the table itself. Geometric validity
    /// (latitude ordering and range) is checked by the grid it builds.
    pub fn validate(&self) -> GridResult<()> {
        if self.gridtype != "gaussian" {
            return Err(GridError::InvalidDescription(format!(
                "unsupported gridtype '{}' in description '{}'",
                self.gridtype, self.name
            )));
        }
        if self.yvals.len() != self.ysize {
            return Err(GridError::InvalidDescription(format!(
                "description '{}' declares ysize = {} but lists {} yvals",
                self.name,
                self.ysize,
                self.yvals.len()
            )));
        }
        if let Some(points) = &self.reducedpoints {
            if points.len() != self.ysize {
                return Err(GridError::InvalidDescription(format!(
                    "description '{}' lists {} reducedpoints for ysize = {}",
                    self.name,
                    points.len(),
                    self.ysize
                )));
            }
        }
        Ok(())
    }
}
