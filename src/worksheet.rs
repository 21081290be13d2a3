//! # Instantaneous eclipse geometry
//!
//! A [`Worksheet`] is one pure evaluation of the local eclipse geometry at a
//! trial time `t` (decimal hours from `T0`). It is the quantity the
//! inverse-interpolation solvers in [`crate::circumstances`] iterate on: each
//! solver step constructs a fresh worksheet at a corrected time, until the
//! correction term falls below the convergence threshold.
//!
//! ## Computed quantities
//!
//! * Shadow-axis projections ξ, η, ζ of the observer on the fundamental
//!   plane, and their hourly rates,
//! * fundamental-plane offsets `u`, `v`, separation `m` and rate terms
//!   `a`, `b`, `n`,
//! * cone radii L1′, L2′ corrected for the observer's distance ζ from the
//!   fundamental plane,
//! * magnitude G, position angle P, diameter ratio A,
//! * solar altitude, azimuth, parallactic angle and the zenith angle of the
//!   Moon relative to the Sun,
//! * correction terms τ for the time of maximum eclipse and for the four
//!   contact times.
//!
//! ## References
//!
//! * Meeus (1989), *Elements of Solar Eclipses 1951-2200*, page 24ff.
//! * *Explanatory Supplement to the Astronomical Ephemeris* (1961).
//! * Chauvenet, *A Manual of Spherical and Practical Astronomy*, page 478
//!   (the magnitude formula).
//!
//! Two deliberate deviations from the literal published formulas are carried
//! here, both empirically required: an absolute value on |L′| in the initial
//! contact correction (L2′ is negative for total eclipses, which flips the
//! sign of Meeus' expression), and the southern-hemisphere parallactic-angle
//! flip `π − q` (without it the partial-phase geometry is mirrored south of
//! the equator). Do not "fix" either without re-deriving from first
//! principles.

use std::fmt;

use hifitime::{Duration, Epoch};

use crate::besselian::BesselianElements;
use crate::constants::{DEGREES_PER_SIDEREAL_SECOND, MEEUS_RATE_FACTOR, SECONDS_PER_HOUR};
use crate::eclipse_type::EclipseType;
use crate::location::Location;
use crate::maths;

/// Which end of a phase a contact solver is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEdge {
    Start,
    End,
}

impl ContactEdge {
    /// Sign of the time step away from the reference instant.
    pub(crate) fn sign(self) -> f64 {
        match self {
            ContactEdge::Start => -1.0,
            ContactEdge::End => 1.0,
        }
    }
}

/// Which shadow cone bounds the phase being solved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowCone {
    /// Outer cone: bounds the partial phase.
    Penumbra,
    /// Inner cone: bounds totality or annularity.
    Umbra,
}

/// The local eclipse geometry at one trial time.
///
/// Produced whole by [`Worksheet::compute`] and never mutated afterwards;
/// each solver iteration constructs a fresh worksheet.
pub struct Worksheet<'a> {
    /// Decimal hours added to T0 of the Besselian elements.
    pub t: f64,
    /// Seconds, TT − UTC.
    pub delta_t: f64,
    /// Shadow-axis coordinates on the fundamental plane.
    pub x: f64,
    pub y: f64,
    /// Declination of the shadow-axis direction, radians.
    pub d: f64,
    /// Ephemeris hour angle of the shadow-axis direction, radians.
    pub mu: f64,
    /// Penumbral and umbral cone radii in the fundamental plane.
    pub l1: f64,
    pub l2: f64,
    /// Hourly rates of X and Y.
    pub x_rate: f64,
    pub y_rate: f64,
    /// Local hour angle, radians.
    pub hour_angle: f64,
    /// Observer projections on the shadow-axis frame.
    pub xi: f64,
    pub eta: f64,
    pub zeta: f64,
    /// Hourly rates of ξ and η.
    pub xi_rate: f64,
    pub eta_rate: f64,
    /// Fundamental-plane offsets of the shadow axis from the observer.
    pub u: f64,
    pub v: f64,
    /// Distance between observer and shadow axis in the fundamental plane.
    pub m: f64,
    /// Rate offsets (the Explanatory Supplement names these u′ and v′).
    pub a: f64,
    pub b: f64,
    pub n: f64,
    /// Cone radii corrected for ζ. Not derivatives, despite Meeus' primes:
    /// L1′ is always positive; L2′ is negative for total eclipses, positive
    /// for annular ones.
    pub l1_corrected: f64,
    pub l2_corrected: f64,
    /// Correction to the time of local maximum eclipse, hours.
    pub tau: f64,
    /// Magnitude of the eclipse. Negative means no eclipse here.
    pub magnitude: f64,
    /// Position angle of the Moon with respect to the Sun's center, radians.
    pub position_angle: f64,
    /// Ratio of the Moon's diameter to the Sun's diameter.
    pub diameter_ratio: f64,
    /// Altitude of the Sun, radians.
    pub altitude: f64,
    /// Azimuth of the Sun, radians, 0 = due North.
    pub azimuth: f64,
    /// Parallactic angle North Celestial Pole → Sun → Moon, radians.
    pub parallactic_angle: f64,
    /// The angle Zenith → Sun → Moon, radians.
    pub zenith_angle: f64,

    bessel: &'a BesselianElements,
    location: &'a Location,
}

impl<'a> Worksheet<'a> {
    /// Evaluate the full instantaneous geometry at trial time `t`.
    ///
    /// Pure function of its inputs: the same arguments always produce the
    /// same worksheet.
    pub fn compute(
        t: f64,
        delta_t: f64,
        bessel: &'a BesselianElements,
        location: &'a Location,
    ) -> Worksheet<'a> {
        let x = bessel.x().value_at(t);
        let y = bessel.y().value_at(t);
        let d = bessel.d().value_at(t);
        let mu = bessel.mu().value_at(t);
        let l1 = bessel.l1().value_at(t);
        let l2 = bessel.l2().value_at(t);

        let x_rate = bessel.x().derivative().value_at(t);
        let y_rate = bessel.y().derivative().value_at(t);

        // Local hour angle, assembled in degrees then converted. The
        // Explanatory Supplement names this θ.
        let hour_angle_deg = maths::rads_to_degs(mu)
            - maths::rads_to_degs(location.longitude_west_positive())
            - DEGREES_PER_SIDEREAL_SECOND * delta_t;
        let hour_angle = maths::deg_to_rads(hour_angle_deg);

        let rho_sin = location.rho_sin_phi();
        let rho_cos = location.rho_cos_phi();
        let xi = rho_cos * hour_angle.sin();
        let eta = rho_sin * d.cos() - rho_cos * hour_angle.cos() * d.sin();
        let zeta = rho_sin * d.sin() + rho_cos * hour_angle.cos() * d.cos();

        // Rates from the tabulated linear coefficients, degrees per hour.
        let m1 = bessel.mu().coefficient(1);
        let d1 = bessel.d().coefficient(1);
        let xi_rate = MEEUS_RATE_FACTOR * m1 * rho_cos * hour_angle.cos();
        let eta_rate = MEEUS_RATE_FACTOR * (m1 * xi * d.sin() - zeta * d1);

        let u = x - xi;
        let v = y - eta;
        let m = (u * u + v * v).sqrt();

        let a = x_rate - xi_rate;
        let b = y_rate - eta_rate;
        let n = (a * a + b * b).sqrt();

        let l1_corrected = l1 - zeta * bessel.tan_f1();
        let l2_corrected = l2 - zeta * bessel.tan_f2();

        // Inverse-interpolation correction toward the instant of closest
        // approach of the shadow axis.
        let tau = -(u * a + v * b) / (n * n);

        let magnitude = (l1_corrected - m) / (l1_corrected + l2_corrected);
        let position_angle = maths::atan3(u, v);
        let diameter_ratio = (l1_corrected - l2_corrected) / (l1_corrected + l2_corrected);

        let phi = location.latitude();
        let altitude =
            (d.sin() * phi.sin() + d.cos() * phi.cos() * hour_angle.cos()).asin();

        // Azimuth re-based so that 0 is due North instead of South.
        let azimuth = maths::in_2pi(
            hour_angle.sin().atan2(
                hour_angle.cos() * phi.sin() - d.tan() * phi.cos(),
            ) + std::f64::consts::PI,
        );

        let mut parallactic_angle =
            ((phi.cos() * hour_angle.sin()) / altitude.cos()).asin();
        if phi < 0.0 {
            // In the southern hemisphere, measure the angle from the South
            // Celestial Pole instead. Meeus does not mention this step, but
            // it is necessary to orient the partial-phase geometry.
            parallactic_angle = std::f64::consts::PI - parallactic_angle;
        }
        let parallactic_angle = maths::in_2pi(parallactic_angle);
        let zenith_angle = maths::in_2pi(position_angle - parallactic_angle);

        Worksheet {
            t,
            delta_t,
            x,
            y,
            d,
            mu,
            l1,
            l2,
            x_rate,
            y_rate,
            hour_angle,
            xi,
            eta,
            zeta,
            xi_rate,
            eta_rate,
            u,
            v,
            m,
            a,
            b,
            n,
            l1_corrected,
            l2_corrected,
            tau,
            magnitude,
            position_angle,
            diameter_ratio,
            altitude,
            azimuth,
            parallactic_angle,
            zenith_angle,
            bessel,
            location,
        }
    }

    /// The magnitude of the eclipse at this instant: the fraction of the
    /// Sun's diameter covered by the Moon. Negative means no eclipse.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Correction to the time of local maximum eclipse, hours. Used for
    /// inverse interpolation.
    pub fn correction_to_max_eclipse(&self) -> f64 {
        self.tau
    }

    /// Seed correction from the instant of maximum toward a contact time.
    ///
    /// Meeus seems to be in error here: L1′ is always positive but L2′ is
    /// either sign, which can flip his expression. The absolute value keeps
    /// the step pointed at the requested edge.
    pub fn initial_contact_correction(&self, edge: ContactEdge, cone: ShadowCone) -> f64 {
        let l_corrected = self.cone_radius(cone);
        let s = self.s_term(l_corrected);
        edge.sign() * (l_corrected.abs() / self.n) * (1.0 - s * s).sqrt()
    }

    /// Newton-style refinement step toward a contact time.
    pub fn contact_correction(&self, edge: ContactEdge, cone: ShadowCone) -> f64 {
        let toward_closest_approach = -(self.u * self.a + self.v * self.b) / (self.n * self.n);
        toward_closest_approach + self.initial_contact_correction(edge, cone)
    }

    /// The eclipse type at this location and instant.
    ///
    /// Can differ from the global type. Never returns [`EclipseType::Hybrid`],
    /// since that idea is global in nature, not local.
    pub fn local_eclipse_type(&self) -> EclipseType {
        if self.magnitude < 0.0 {
            EclipseType::None
        } else if self.m > self.l2_corrected.abs() {
            EclipseType::Partial
        } else if self.l2_corrected < 0.0 {
            EclipseType::Total
        } else {
            EclipseType::Annular
        }
    }

    /// The instant T0 + t, in physics time. Reflects neither ΔT nor the
    /// location's offset from UTC.
    pub fn tt(&self) -> Epoch {
        self.to_epoch(0.0)
    }

    /// The instant T0 + t − ΔT. Does not reflect the location's UTC offset.
    pub fn utc(&self) -> Epoch {
        self.to_epoch(self.delta_t)
    }

    /// The instant T0 + t − ΔT + offset, in the location's civil time.
    pub fn local_civil_time(&self) -> Epoch {
        self.utc() + self.location.utc_offset()
    }

    fn cone_radius(&self, cone: ShadowCone) -> f64 {
        match cone {
            ShadowCone::Penumbra => self.l1_corrected,
            ShadowCone::Umbra => self.l2_corrected,
        }
    }

    fn s_term(&self, l_corrected: f64) -> f64 {
        (self.a * self.v - self.u * self.b) / (self.n * l_corrected)
    }

    /// T0 + t − ΔT past midnight of the max-eclipse calendar date. A
    /// negative hour count rolls into the previous day by construction
    /// (there are eclipses with T0 = 0).
    fn to_epoch(&self, delta_t_seconds: f64) -> Epoch {
        let (year, month, day, ..) = self.bessel.when_max_eclipse().to_gregorian_utc();
        let midnight = Epoch::from_gregorian_utc_at_midnight(year, month, day);
        let hours = self.bessel.t0() as f64 + self.t - delta_t_seconds / SECONDS_PER_HOUR;
        midnight + Duration::from_hours(hours)
    }
}

impl fmt::Display for Worksheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Worksheet:")?;
        writeln!(f, "  t: {}", self.t)?;
        writeln!(f, "  ΔT: {}", self.delta_t)?;
        writeln!(f, "  X: {}  Y: {}", self.x, self.y)?;
        writeln!(f, "  d: {}°", maths::rads_to_degs(self.d))?;
        writeln!(f, "  μ: {}°", maths::rads_to_degs(self.mu))?;
        writeln!(f, "  L1: {}  L2: {}", self.l1, self.l2)?;
        writeln!(f, "  H: {}°", maths::rads_to_degs(self.hour_angle))?;
        writeln!(f, "  ξ: {}  η: {}  ζ: {}", self.xi, self.eta, self.zeta)?;
        writeln!(f, "  u: {}  v: {}  m: {}", self.u, self.v, self.m)?;
        writeln!(f, "  a: {}  b: {}  n: {}", self.a, self.b, self.n)?;
        writeln!(f, "  L1′: {}  L2′: {}", self.l1_corrected, self.l2_corrected)?;
        writeln!(f, "  τ: {}", self.tau)?;
        writeln!(f, "  G: {}  A: {}", self.magnitude, self.diameter_ratio)?;
        writeln!(f, "  P: {}°", maths::rads_to_degs(self.position_angle))?;
        writeln!(f, "  h: {}°", maths::rads_to_degs(self.altitude))?;
        writeln!(f, "  az: {}°", maths::rads_to_degs(self.azimuth))?;
        writeln!(f, "  q: {}°", maths::rads_to_degs(self.parallactic_angle))?;
        writeln!(f, "  Z: {}°", maths::rads_to_degs(self.zenith_angle))
    }
}

#[cfg(test)]
mod worksheet_test {
    use super::*;
    use crate::maths::deg_to_rads;
    use approx::assert_relative_eq;

    fn usno() -> Location {
        Location::new(
            "USNO",
            deg_to_rads(38.921389),
            deg_to_rads(-77.06556),
            84.0,
            0,
            0,
        )
    }

    #[test]
    fn test_meeus_worked_example_at_t0() {
        let bessel = BesselianElements::meeus_1994_example();
        let location = usno();
        let w = Worksheet::compute(0.0, 61.0, &bessel, &location);

        // Intermediate values of Meeus' worksheet, page 27. H carries his
        // known ~0.01 arcsecond discrepancy: the formula gives -1.411192°
        // where the book prints -1.411188°.
        assert_relative_eq!(
            maths::rads_to_degs(w.hour_angle),
            -1.4111925520512048,
            epsilon = 1e-9
        );
        assert_relative_eq!(w.m, 0.15615360706825873, epsilon = 1e-9);
        assert_relative_eq!(w.l1_corrected, 0.5625908227566443, epsilon = 1e-9);
        assert_relative_eq!(w.l2_corrected, 0.016385348323354483, epsilon = 1e-9);
        assert_relative_eq!(w.magnitude(), 0.7019929938225851, epsilon = 1e-9);
        assert_relative_eq!(
            w.correction_to_max_eclipse(),
            0.45607547031919976,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_compute_is_pure() {
        let bessel = BesselianElements::meeus_1994_example();
        let location = usno();
        let w1 = Worksheet::compute(0.25, 61.0, &bessel, &location);
        let w2 = Worksheet::compute(0.25, 61.0, &bessel, &location);
        assert_eq!(w1.magnitude, w2.magnitude);
        assert_eq!(w1.tau, w2.tau);
        assert_eq!(w1.zenith_angle, w2.zenith_angle);
    }

    #[test]
    fn test_civil_time_round_trip() {
        let bessel = BesselianElements::meeus_1994_example();
        let location = Location::new(
            "offset site",
            deg_to_rads(47.0),
            deg_to_rads(-64.0),
            0.0,
            -3,
            -30,
        );
        let w = Worksheet::compute(0.4, 61.0, &bessel, &location);
        let expected = w.utc() + location.utc_offset();
        assert_eq!(w.local_civil_time(), expected);
        // TT leads UTC by ΔT
        assert_relative_eq!((w.tt() - w.utc()).to_seconds(), 61.0, epsilon = 1e-6);
    }

    #[test]
    fn test_day_rollover_when_hours_go_negative() {
        let bessel = BesselianElements::meeus_1994_example();
        let location = usno();
        // T0 = 17; t = -18h puts TT on the previous calendar day
        let w = Worksheet::compute(-18.0, 0.0, &bessel, &location);
        let (year, month, day, hour, ..) = w.tt().to_gregorian_utc();
        assert_eq!((year, month, day), (1994, 5, 9));
        assert_eq!(hour, 23);
    }

    #[test]
    fn test_southern_hemisphere_parallactic_flip() {
        let bessel = BesselianElements::meeus_1994_example();
        let north = Location::new("N", deg_to_rads(20.0), deg_to_rads(-77.0), 0.0, 0, 0);
        let south = Location::new("S", deg_to_rads(-20.0), deg_to_rads(-77.0), 0.0, 0, 0);
        let wn = Worksheet::compute(0.0, 61.0, &bessel, &north);
        let ws = Worksheet::compute(0.0, 61.0, &bessel, &south);
        // The two angles are measured from opposite celestial poles.
        let q_n_unflipped = (north.latitude().cos() * wn.hour_angle.sin() / wn.altitude.cos()).asin();
        let q_s_unflipped = (south.latitude().cos() * ws.hour_angle.sin() / ws.altitude.cos()).asin();
        assert_relative_eq!(wn.parallactic_angle, maths::in_2pi(q_n_unflipped), epsilon = 1e-12);
        assert_relative_eq!(
            ws.parallactic_angle,
            maths::in_2pi(std::f64::consts::PI - q_s_unflipped),
            epsilon = 1e-12
        );
    }
}
