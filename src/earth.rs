//! Earth constants shared by all grid variants.

/// Earth mean radius in metres.
pub const RADIUS: f64 = 6.371e6;

/// Surface area of the sphere with [`RADIUS`], in square metres.
///
/// Any un-masked full-globe grid must tile this area exactly (up to
/// floating-point tolerance).
pub const SURFACE_AREA: f64 = 4.0 * std::f64::consts::PI * RADIUS * RADIUS;
