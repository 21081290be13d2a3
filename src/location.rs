use std::fmt;

use hifitime::Duration;

use crate::constants::{EARTH_EQUATORIAL_RADIUS, EARTH_FLATTENING, SECONDS_PER_HOUR};
use crate::maths;

/// The place on Earth for which local circumstances of an eclipse are
/// calculated.
///
/// Angles are in radians, height in meters. Longitude is positive east of
/// Greenwich. The UTC offset is carried as hours plus minutes of the same
/// sign; some jurisdictions (Newfoundland and Labrador, for example) are
/// offset from Greenwich by minutes as well as hours.
pub struct Location {
    name: String,
    latitude: f64,
    longitude: f64,
    height: f64,
    offset_hours: i32,
    offset_minutes: i32,
    // geocentric radius components, in units of the Earth's equatorial
    // radius, accounting for the flattening of the Earth
    rho_sin_phi: f64,
    rho_cos_phi: f64,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        height: f64,
        offset_hours: i32,
        offset_minutes: i32,
    ) -> Location {
        let u = (EARTH_FLATTENING * latitude.tan()).atan();
        let height_term = height / EARTH_EQUATORIAL_RADIUS;
        let rho_sin_phi = EARTH_FLATTENING * u.sin() + height_term * latitude.sin();
        let rho_cos_phi = u.cos() + height_term * latitude.cos();
        Location {
            name: name.into(),
            latitude,
            longitude,
            height,
            offset_hours,
            offset_minutes,
            rho_sin_phi,
            rho_cos_phi,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geographic latitude, radians.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude, radians, positive east of Greenwich.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Longitude, radians, positive **west** of Greenwich — the convention
    /// used by Meeus in *Elements of Solar Eclipses*.
    pub fn longitude_west_positive(&self) -> f64 {
        -self.longitude
    }

    /// Altitude in meters.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// ρ·sinφ′, in units of the Earth's radius.
    pub fn rho_sin_phi(&self) -> f64 {
        self.rho_sin_phi
    }

    /// ρ·cosφ′, in units of the Earth's radius.
    pub fn rho_cos_phi(&self) -> f64 {
        self.rho_cos_phi
    }

    pub fn offset_hours(&self) -> i32 {
        self.offset_hours
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset_minutes
    }

    /// The full offset from Greenwich as a signed duration.
    pub fn utc_offset(&self) -> Duration {
        let seconds = self.offset_hours as f64 * SECONDS_PER_HOUR + self.offset_minutes as f64 * 60.0;
        Duration::from_seconds(seconds)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} φ:{:.5}° λ:{:.5}° h:{}m offset:{}h{}m",
            self.name,
            maths::rads_to_degs(self.latitude),
            maths::rads_to_degs(self.longitude),
            self.height,
            self.offset_hours,
            self.offset_minutes
        )
    }
}

#[cfg(test)]
mod location_test {
    use super::*;
    use approx::assert_relative_eq;
    use crate::maths::deg_to_rads;

    #[test]
    fn test_sea_level_equator() {
        let loc = Location::new("equator", 0.0, 0.0, 0.0, 0, 0);
        assert_relative_eq!(loc.rho_cos_phi(), 1.0);
        assert_relative_eq!(loc.rho_sin_phi(), 0.0);
    }

    #[test]
    fn test_us_naval_observatory() {
        // Meeus' worked example site (38.921389 N, 77.06556 W, 84 m)
        let loc = Location::new(
            "USNO",
            deg_to_rads(38.921389),
            deg_to_rads(-77.06556),
            84.0,
            0,
            0,
        );
        assert_relative_eq!(loc.rho_sin_phi(), 0.6248821400833366, epsilon = 1e-12);
        assert_relative_eq!(loc.rho_cos_phi(), 0.7790488196677506, epsilon = 1e-12);
        assert_relative_eq!(
            loc.longitude_west_positive(),
            deg_to_rads(77.06556),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_utc_offset_same_sign_minutes() {
        let loc = Location::new("St. John's", deg_to_rads(47.5615), deg_to_rads(-52.7126), 0.0, -3, -30);
        assert_relative_eq!(loc.utc_offset().to_seconds(), -12_600.0);
    }
}
