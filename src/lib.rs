pub mod earth;
pub mod factory;
pub mod geometry;
pub mod grid;
pub mod griddes;
pub mod latlon;
pub mod oasis;
pub mod orca;
pub mod quadrature;
pub mod reduced;

pub mod errors;

// Re-export the types most callers need
pub use errors::{GridError, GridResult};
pub use factory::{factory, Grid, GridArgs};
pub use grid::{CellCorners, GridCells, CORNER_FILL};
pub use orca::{OrcaGrid, OrcaSubGrid};
