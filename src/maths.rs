//! Small angle and formatting utilities shared across the crate.

use hifitime::Duration;

use crate::constants::{DPI, RADEG};

pub(crate) fn deg_to_rads(deg: f64) -> f64 {
    deg * RADEG
}

pub(crate) fn rads_to_degs(rad: f64) -> f64 {
    rad / RADEG
}

/// Similar to `atan2(y, x)`, but ensures the result is in `[0, 2π)`.
pub(crate) fn atan3(y: f64, x: f64) -> f64 {
    in_2pi(y.atan2(x))
}

/// Place the given angle in the range `[0, 2π)`.
pub(crate) fn in_2pi(rads: f64) -> f64 {
    rads.rem_euclid(DPI)
}

/// Format a signed duration as `+h:mm`, the form used in eclipse timelines.
pub(crate) fn hhmm(duration: Duration) -> String {
    let total_seconds = duration.abs().to_seconds().round() as i64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let sign = if duration.to_seconds() < 0.0 { '-' } else { '+' };
    format!("{sign}{hours}:{minutes:02}")
}

#[cfg(test)]
mod maths_test {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_atan3_range() {
        assert_relative_eq!(atan3(-1.0, 1.0), 2.0 * PI - PI / 4.0, epsilon = 1e-12);
        assert_relative_eq!(atan3(1.0, 1.0), PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_in_2pi() {
        assert_relative_eq!(in_2pi(-PI / 2.0), 3.0 * PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(in_2pi(5.0 * PI), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_hhmm() {
        assert_eq!(hhmm(Duration::from_seconds(3_720.0)), "+1:02");
        assert_eq!(hhmm(Duration::from_seconds(-600.0)), "-0:10");
    }
}
