//! # Constants for Umbra
//!
//! This module centralizes the **physical constants** and **unit conversions**
//! used throughout the `umbra` library.
//!
//! ## Overview
//!
//! - Earth figure constants used for the geocentric parallax terms
//! - Unit conversions (degrees ↔ radians)
//! - Numerical parameters of the inverse-interpolation solvers
//!
//! The Earth figure constants follow Meeus, *Elements of Solar Eclipses
//! 1951-2200* (1989), which is the reference for all the local-circumstances
//! formulas in this crate.

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Earth equatorial radius in meters (IAU 1976, as used by Meeus)
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6_378_140.0;

/// Earth flattening ratio, 1 - 1/298.257
pub const EARTH_FLATTENING: f64 = 0.99664719;

/// Degrees of Earth rotation per second of sidereal time
pub const DEGREES_PER_SIDEREAL_SECOND: f64 = 360.0 / 86_164.0905;

/// Degrees → radians factor truncated exactly as Meeus tabulates it for the
/// hourly rate terms ξ' and η'. Kept verbatim so intermediate values match
/// the published worksheets.
pub const MEEUS_RATE_FACTOR: f64 = 0.017_453_29;

/// Number of seconds in an hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Convergence threshold for the fixed-point solvers, in hours (~0.036 s)
pub const CONVERGENCE_THRESHOLD: f64 = 0.00001;

/// Iteration cap for each solver stage. Well-conditioned reference data
/// (1900-2200) converges in 2-4 iterations.
pub const MAX_SOLVER_ITERATIONS: usize = 50;

/// Apparent solar radius, the unit in which partial-phase geometry is expressed
pub const SOLAR_RADIUS: f64 = 1.0;
