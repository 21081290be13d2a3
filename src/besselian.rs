//! # Besselian elements
//!
//! The standard tabulated data describing the geometry of the Moon's shadow
//! relative to the Earth's center for one eclipse. Each time-varying quantity
//! is a short [`Polynomial`] in `t`, the decimal-hour offset from `T0`, the
//! nominal integral hour of maximum eclipse.
//!
//! Reference: *Elements of Solar Eclipses 1951-2200*, Jean Meeus (1989).

use std::fmt;

use hifitime::Epoch;

use crate::eclipse_type::EclipseType;
use crate::maths;
use crate::polynomial::Polynomial;

/// The per-eclipse coefficients needed to calculate local circumstances.
///
/// Identifies one eclipse globally; not tied to any observer. Immutable.
pub struct BesselianElements {
    when_max_eclipse: Epoch,
    jd_max_eclipse: f64,
    eclipse_type: EclipseType,
    t0: i32,
    x: Polynomial,
    y: Polynomial,
    d: Polynomial,
    mu: Polynomial,
    l1: Polynomial,
    l2: Polynomial,
    tan_f1: f64,
    tan_f2: f64,
}

impl BesselianElements {
    /// Build from pre-tabulated data.
    ///
    /// `when_max_eclipse` is the date and time (TT) of maximum eclipse; to
    /// change to UTC, ΔT must be subtracted. `d` and `mu` must carry a
    /// degrees → radians converter. `l2` is positive for an annular eclipse,
    /// negative for a total one.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        when_max_eclipse: Epoch,
        jd_max_eclipse: f64,
        eclipse_type: EclipseType,
        t0: i32,
        x: Polynomial,
        y: Polynomial,
        d: Polynomial,
        mu: Polynomial,
        l1: Polynomial,
        l2: Polynomial,
        tan_f1: f64,
        tan_f2: f64,
    ) -> BesselianElements {
        BesselianElements {
            when_max_eclipse,
            jd_max_eclipse,
            eclipse_type,
            t0,
            x,
            y,
            d,
            mu,
            l1,
            l2,
            tan_f1,
            tan_f2,
        }
    }

    /// Date and time (TT) of maximum eclipse.
    pub fn when_max_eclipse(&self) -> Epoch {
        self.when_max_eclipse
    }

    /// Julian Date (TT) of the time of maximum eclipse.
    pub fn jd_max_eclipse(&self) -> f64 {
        self.jd_max_eclipse
    }

    /// The general (global) character of the eclipse.
    pub fn eclipse_type(&self) -> EclipseType {
        self.eclipse_type
    }

    /// Nominal integral hour near maximum eclipse, the base for `t`.
    pub fn t0(&self) -> i32 {
        self.t0
    }

    /// Coordinate of the shadow axis on the fundamental plane.
    pub fn x(&self) -> &Polynomial {
        &self.x
    }

    /// Coordinate of the shadow axis on the fundamental plane.
    pub fn y(&self) -> &Polynomial {
        &self.y
    }

    /// Declination for the direction of the shadow axis (radians).
    pub fn d(&self) -> &Polynomial {
        &self.d
    }

    /// Ephemeris hour angle for the direction of the shadow axis (radians).
    pub fn mu(&self) -> &Polynomial {
        &self.mu
    }

    /// Radius of the penumbral cone in the fundamental plane, Earth radii.
    pub fn l1(&self) -> &Polynomial {
        &self.l1
    }

    /// Radius of the umbral cone in the fundamental plane, Earth radii.
    pub fn l2(&self) -> &Polynomial {
        &self.l2
    }

    /// Tangent of the angle between penumbral cone elements and shadow axis.
    pub fn tan_f1(&self) -> f64 {
        self.tan_f1
    }

    /// Tangent of the angle between umbral cone elements and shadow axis.
    pub fn tan_f2(&self) -> f64 {
        self.tan_f2
    }

    /// The worked example from Meeus' book, pages 26-27: the annular eclipse
    /// of 1994 May 10. Used for tests and documentation.
    ///
    /// Meeus' example seems to have a tiny error in the computation of H, of
    /// about 0.01 arcseconds: his stated value is -1.411188°, but the value
    /// computed by his own formula is -1.411192°. Likely a small difference
    /// in the sidereal-rate constant.
    pub fn meeus_1994_example() -> BesselianElements {
        BesselianElements::new(
            Epoch::from_gregorian_utc(1994, 5, 10, 17, 0, 0, 0),
            0.0, // not used by the worked example
            EclipseType::Annular,
            17,
            Polynomial::new(&[-0.173367, 0.4990629, 0.0000296, -0.00000563]),
            Polynomial::new(&[0.383484, 0.0869393, -0.0001183, -0.00000092]),
            Polynomial::with_converter(maths::deg_to_rads, &[17.68613, 0.010642, -0.000004]),
            Polynomial::with_converter(maths::deg_to_rads, &[75.90923, 15.001621]),
            Polynomial::new(&[0.566906, -0.0000318, -0.0000098]),
            Polynomial::new(&[0.020679, -0.0000317, -0.0000097]),
            0.0046308,
            0.0046077,
        )
    }
}

impl fmt::Display for BesselianElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Besselian Elements:")?;
        writeln!(f, "  When (TT): {}", self.when_max_eclipse)?;
        writeln!(f, "  JD: {}", self.jd_max_eclipse)?;
        writeln!(f, "  Type: {}", self.eclipse_type)?;
        writeln!(f, "  T0: {}", self.t0)?;
        writeln!(f, "  x: {}", self.x)?;
        writeln!(f, "  y: {}", self.y)?;
        writeln!(f, "  d: {}", self.d)?;
        writeln!(f, "  mu: {}", self.mu)?;
        writeln!(f, "  L1: {}", self.l1)?;
        writeln!(f, "  L2: {}", self.l2)?;
        writeln!(f, "  tanF1: {}", self.tan_f1)?;
        writeln!(f, "  tanF2: {}", self.tan_f2)
    }
}
