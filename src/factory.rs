//! Name-based grid construction.
//!
//! `factory` is a stateless dispatcher over four disjoint identifier
//! families; repeated calls with the same inputs build equal grids.

use std::path::Path;

use log::debug;

use crate::errors::{GridError, GridResult};
use crate::griddes::GridDescription;
use crate::latlon::{FullGaussianGrid, RegularLatLonGrid};
use crate::orca::OrcaGrid;
use crate::quadrature::{gaussian_latitudes, octahedral_longitude_counts};
use crate::reduced::ReducedGaussianGrid;

/// A constructed grid, tagged by variant.
#[derive(Debug, Clone)]
pub enum Grid {
    Regular(RegularLatLonGrid),
    FullGaussian(FullGaussianGrid),
    ReducedGaussian(ReducedGaussianGrid),
    Orca(OrcaGrid),
}

impl Grid {
    pub fn name(&self) -> &str {
        match self {
            Grid::Regular(_) => "Regular",
            Grid::FullGaussian(_) => "FullGaussian",
            Grid::ReducedGaussian(_) => "ReducedGaussian",
            Grid::Orca(grid) => grid.name(),
        }
    }
}

/// Construction arguments for [`factory`]; which one a grid family
/// accepts is part of its identifier contract.
#[derive(Debug, Clone, Copy)]
pub enum GridArgs<'a> {
    None,
    Resolution {
        nlat: usize,
        nlon: usize,
        first_lat: Option<f64>,
    },
    Description(&'a GridDescription),
    CoordinateFile(&'a Path),
}

/// Build a grid from its identifier.
///
/// Recognized identifiers:
///
/// - `"regular"` / `"latlon"` (case-insensitive) with
///   [`GridArgs::Resolution`];
/// - `F<n>` (e.g. `F128`): full Gaussian grid with `2n` computed
///   quadrature latitudes, no further arguments;
/// - `O<n>` (e.g. `O96`): octahedral reduced Gaussian grid, no further
///   arguments;
/// - `"orca"` (case-insensitive) with [`GridArgs::CoordinateFile`];
/// - any other name with [`GridArgs::Description`]: Gaussian grid built
///   from the supplied latitude table, reduced if the table carries
///   `reducedpoints`.
///
/// Unrecognized identifiers fail with [`GridError::UnknownGridType`]
/// naming the identifier; recognized identifiers with the wrong
/// argument kind fail as invalid arguments.
pub fn factory(name: &str, args: GridArgs) -> GridResult<Grid> {
    debug!("grid factory dispatch for '{name}'");
    match name.to_ascii_lowercase().as_str() {
        "regular" | "latlon" => match args {
            GridArgs::Resolution {
                nlat,
                nlon,
                first_lat,
            } => Ok(Grid::Regular(RegularLatLonGrid::new(nlat, nlon, first_lat)?)),
            _ => Err(GridError::InvalidArgument(format!(
                "grid '{name}' requires resolution arguments"
            ))),
        },
        "orca" => match args {
            GridArgs::CoordinateFile(path) => Ok(Grid::Orca(OrcaGrid::from_file(path)?)),
            _ => Err(GridError::InvalidArgument(format!(
                "grid '{name}' requires a coordinate file"
            ))),
        },
        _ => {
            if let Some(n) = parse_truncation(name, 'F') {
                require_no_args(name, &args)?;
                return Ok(Grid::FullGaussian(FullGaussianGrid::new(
                    gaussian_latitudes(n)?,
                )?));
            }
            if let Some(n) = parse_truncation(name, 'O') {
                require_no_args(name, &args)?;
                return Ok(Grid::ReducedGaussian(ReducedGaussianGrid::new(
                    gaussian_latitudes(n)?,
                    octahedral_longitude_counts(n)?,
                )?));
            }
            if let GridArgs::Description(desc) = args {
                return from_description(desc);
            }
            Err(GridError::UnknownGridType(name.to_string()))
        }
    }
}

/// Build a Gaussian grid from an external latitude table.
pub fn from_description(desc: &GridDescription) -> GridResult<Grid> {
    desc.validate()?;
    match &desc.reducedpoints {
        Some(points) => Ok(Grid::ReducedGaussian(ReducedGaussianGrid::new(
            desc.yvals.clone(),
            points.clone(),
        )?)),
        None => Ok(Grid::FullGaussian(FullGaussianGrid::new(
            desc.yvals.clone(),
        )?)),
    }
}

/// `F<n>` / `O<n>` identifiers: prefix letter plus a positive decimal
/// band-per-hemisphere count.
fn parse_truncation(name: &str, prefix: char) -> Option<usize> {
    let digits = name
        .strip_prefix(prefix)
        .or_else(|| name.strip_prefix(prefix.to_ascii_lowercase()))?;
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

fn require_no_args(name: &str, args: &GridArgs) -> GridResult<()> {
    match args {
        GridArgs::None => Ok(()),
        _ => Err(GridError::InvalidArgument(format!(
            "grid '{name}' does not take construction arguments"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_names_dispatch_case_insensitively() {
        for name in ["regular", "LatLon", "REGULAR"] {
            let grid = factory(
                name,
                GridArgs::Resolution {
                    nlat: 4,
                    nlon: 8,
                    first_lat: None,
                },
            )
            .unwrap();
            assert!(matches!(grid, Grid::Regular(_)));
            assert_eq!(grid.name(), "Regular");
        }
    }

    #[test]
    fn regular_without_resolution_is_an_argument_error() {
        assert!(matches!(
            factory("regular", GridArgs::None),
            Err(GridError::InvalidArgument(_))
        ));
    }

    #[test]
    fn full_gaussian_truncations_compute_their_latitudes() {
        let grid = factory("F2", GridArgs::None).unwrap();
        match grid {
            Grid::FullGaussian(g) => {
                assert_eq!(g.nlat(), 4);
                assert_eq!(g.nlon(), 8);
            }
            other => panic!("expected FullGaussian, got {other:?}"),
        }
    }

    #[test]
    fn octahedral_truncations_build_reduced_grids() {
        let grid = factory("O2", GridArgs::None).unwrap();
        match grid {
            Grid::ReducedGaussian(g) => {
                assert_eq!(g.longitude_counts(), &[20, 24, 24, 20]);
            }
            other => panic!("expected ReducedGaussian, got {other:?}"),
        }
    }

    #[test]
    fn truncations_reject_extra_arguments() {
        assert!(matches!(
            factory(
                "F2",
                GridArgs::Resolution {
                    nlat: 4,
                    nlon: 8,
                    first_lat: None
                }
            ),
            Err(GridError::InvalidArgument(_))
        ));
    }

    #[test]
    fn descriptions_build_full_or_reduced_grids() {
        let full = GridDescription {
            name: "TL3".to_string(),
            gridtype: "gaussian".to_string(),
            ysize: 4,
            yvals: vec![60.0, 20.0, -20.0, -60.0],
            reducedpoints: None,
        };
        assert!(matches!(
            factory("TL3", GridArgs::Description(&full)).unwrap(),
            Grid::FullGaussian(_)
        ));

        let reduced = GridDescription {
            reducedpoints: Some(vec![4, 8, 8, 4]),
            ..full
        };
        assert!(matches!(
            factory("TL3", GridArgs::Description(&reduced)).unwrap(),
            Grid::ReducedGaussian(_)
        ));
    }

    #[test]
    fn unknown_identifiers_fail_by_name() {
        match factory("icosahedral", GridArgs::None) {
            Err(GridError::UnknownGridType(name)) => assert_eq!(name, "icosahedral"),
            other => panic!("expected UnknownGridType, got {other:?}"),
        }
    }

    #[test]
    fn truncation_parsing_requires_digits() {
        assert!(matches!(
            factory("F", GridArgs::None),
            Err(GridError::UnknownGridType(_))
        ));
        assert!(matches!(
            factory("F12x", GridArgs::None),
            Err(GridError::UnknownGridType(_))
        ));
    }
}
