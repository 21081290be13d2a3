//! # Power-series evaluation
//!
//! Every time-varying Besselian quantity (shadow-axis coordinates, cone
//! radii, declination, hour angle) is tabulated as a short polynomial in the
//! time offset from the nominal hour of maximum eclipse. This module provides
//! the [`Polynomial`] type used to evaluate them and their rates.
//!
//! Evaluation uses **Horner's method**, which avoids repeated exponentiation
//! and is the numerically preferred form for these low-degree series.

use std::fmt;

/// A polynomial in a single variable, with an optional unit-converting
/// function applied after evaluation (degrees → radians, typically).
///
/// Coefficients are ordered: constant, first order, second order, and so on.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
    converter: Option<fn(f64) -> f64>,
}

impl Polynomial {
    pub fn new(coefficients: &[f64]) -> Self {
        Self {
            coefficients: coefficients.to_vec(),
            converter: None,
        }
    }

    /// The converter is applied to the evaluated value, not to the raw
    /// coefficients: [`Polynomial::coefficient`] stays in tabulated units.
    pub fn with_converter(converter: fn(f64) -> f64, coefficients: &[f64]) -> Self {
        Self {
            coefficients: coefficients.to_vec(),
            converter: Some(converter),
        }
    }

    /// Evaluate the polynomial at `t` (Horner's method), then apply the
    /// converter if one was given.
    pub fn value_at(&self, t: f64) -> f64 {
        let mut result = 0.0;
        for coeff in self.coefficients.iter().rev() {
            result = coeff + t * result;
        }
        match self.converter {
            Some(convert) => convert(result),
            None => result,
        }
    }

    /// The derivative with respect to the one independent variable.
    ///
    /// The constant term is dropped and each remaining coefficient is
    /// multiplied by its power. The derivative of a degree-0 polynomial is
    /// the empty polynomial, which evaluates to 0.
    pub fn derivative(&self) -> Polynomial {
        let deriv_coeff: Vec<f64> = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, coeff)| power as f64 * coeff)
            .collect();
        Polynomial {
            coefficients: deriv_coeff,
            converter: self.converter,
        }
    }

    /// The raw (pre-conversion) coefficient at the given index.
    ///
    /// Used for the tabulated linear-rate terms (M1, d1). An out-of-range
    /// index is a programming error and panics.
    pub fn coefficient(&self, idx: usize) -> f64 {
        self.coefficients[idx]
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (power, coeff) in self.coefficients.iter().enumerate() {
            if power > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}{coeff}", if *coeff < 0.0 { "" } else { "+" })?;
            match power {
                0 => (),
                1 => write!(f, "t")?,
                _ => write!(f, "t^{power}")?,
            }
        }
        Ok(())
    }
}
