//! Gaussian quadrature latitudes and reduced-grid row layouts.
//!
//! Full and octahedral Gaussian grids place their latitude bands at the
//! roots of the Legendre polynomial of matching degree. The roots are
//! found with Newton's method from the standard Chebyshev-like initial
//! guess, which converges in a handful of iterations for every degree
//! used in practice.

use crate::errors::{GridError, GridResult};

/// Latitude centers of a Gaussian grid with `2n` bands, in degrees
/// north, ordered north to south.
///
/// `n` is the number of bands between a pole and the equator, matching
/// the `F<n>`/`O<n>` naming of operational spectral truncations. The
/// returned latitudes are the arcsine of the `2n` Legendre roots and
/// are antisymmetric about the equator.
pub fn gaussian_latitudes(n: usize) -> GridResult<Vec<f64>> {
    if n == 0 {
        return Err(GridError::InvalidArgument(
            "Gaussian grid needs at least one band per hemisphere".to_string(),
        ));
    }
    let deg = 2 * n;
    let mut lats = Vec::with_capacity(deg);
    for i in 0..deg {
        let mut x = (std::f64::consts::PI * (i as f64 + 0.75) / (deg as f64 + 0.5)).cos();
        for _ in 0..100 {
            let (p, dp) = legendre(deg, x);
            let dx = p / dp;
            x -= dx;
            if dx.abs() < 1e-15 {
                break;
            }
        }
        lats.push(x.asin().to_degrees());
    }
    // Enforce exact equator antisymmetry on the converged roots.
    for i in 0..n {
        let sym = 0.5 * (lats[i] - lats[deg - 1 - i]);
        lats[i] = sym;
        lats[deg - 1 - i] = -sym;
    }
    Ok(lats)
}

/// Legendre polynomial `P_n` and its derivative at `x`, by the
/// three-term recurrence.
fn legendre(n: usize, x: f64) -> (f64, f64) {
    let mut p0 = 1.0;
    let mut p1 = x;
    for k in 2..=n {
        let k = k as f64;
        let p2 = ((2.0 * k - 1.0) * x * p1 - (k - 1.0) * p0) / k;
        p0 = p1;
        p1 = p2;
    }
    let dp = n as f64 * (x * p1 - p0) / (x * x - 1.0);
    (p1, dp)
}

/// Longitude cells per band for the octahedral reduced layout `O<n>`:
/// 20 cells at the polar band, growing by 4 per band towards the
/// equator, mirrored in the southern hemisphere.
pub fn octahedral_longitude_counts(n: usize) -> GridResult<Vec<usize>> {
    if n == 0 {
        return Err(GridError::InvalidArgument(
            "octahedral grid needs at least one band per hemisphere".to_string(),
        ));
    }
    let mut counts: Vec<usize> = (0..n).map(|i| 20 + 4 * i).collect();
    for i in (0..n).rev() {
        counts.push(counts[i]);
    }
    Ok(counts)
}
