//! # Approximate ΔT
//!
//! A rough estimate of ΔT = TT − UTC by year and month, from the piecewise
//! polynomial fits published at
//! <https://www.eclipsewise.com/help/deltatpoly2014.html>. (The reference is
//! not very precise about the boundaries between the year ranges.)
//!
//! This is a guide only. As an eclipse approaches, callers should supply an
//! authoritative ΔT; the solvers never fall back on this estimate.

use crate::polynomial::Polynomial;

/// Approximate ΔT in seconds for the middle of the given month.
///
/// Supported range: 1941-3000. Outside it the fit is not defined and 0.0 is
/// returned.
pub fn approximate_delta_t(year: i32, month: u8) -> f64 {
    let y = year as f64 + (month as f64 - 0.5) / 12.0;
    if year >= 2015 {
        polynomial_at(y - 2015.0, &[67.62, 0.3645, 0.0039755])
    } else if year >= 2005 {
        polynomial_at(y - 2005.0, &[64.69, 0.2930])
    } else if year >= 1986 {
        polynomial_at(
            y - 2000.0,
            &[63.86, 0.3345, -0.060374, 0.0017275, 0.000651814, 0.00002373599],
        )
    } else if year >= 1961 {
        polynomial_at(y - 1975.0, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0])
    } else if year >= 1941 {
        polynomial_at(y - 1950.0, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0])
    } else {
        0.0
    }
}

fn polynomial_at(t: f64, coefficients: &[f64]) -> f64 {
    Polynomial::new(coefficients).value_at(t)
}
