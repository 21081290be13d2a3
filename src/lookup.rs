//! # Besselian-element lookup
//!
//! Reads pre-tabulated Besselian elements from a CSV file and keys them by
//! the eclipse's calendar date. The expected layout is the NASA *Five
//! Millennium Canon of Solar Eclipses* export (54 columns; the columns used
//! here are the date, the eclipse-type letter, the Julian Date, T0, the
//! X/Y/d/μ/L1/L2 polynomial coefficients and tanF1/tanF2).
//!
//! Reference: <https://eclipse.gsfc.nasa.gov/SEpubs/5MCSE.html>, which has
//! kindly made this data freely available. The supported range of years is
//! 1900-2200 inclusive.
//!
//! A date with no tabulated eclipse is an expected outcome and comes back as
//! `Ok(None)`; a row that exists but cannot be parsed is corrupt reference
//! data and fails hard.

use camino::{Utf8Path, Utf8PathBuf};
use hifitime::Epoch;
use log::warn;
use serde::Deserialize;

use crate::besselian::BesselianElements;
use crate::errors::UmbraError;
use crate::maths;
use crate::polynomial::Polynomial;

/// The columns of one tabulated eclipse that this crate consumes.
///
/// Extra columns in the file (saros, gamma, path width, ...) are ignored by
/// the deserializer.
#[derive(Debug, Deserialize)]
struct ElementsRow {
    year: i32,
    month: u8,
    day: u8,
    /// Time of day (TT) of greatest eclipse, `HH:MM:SS`.
    td_ge: String,
    eclipse_type: String,
    julian_date: f64,
    /// Tabulated with useless decimals; always an integral hour.
    t0: f64,
    x0: f64,
    x1: f64,
    x2: f64,
    x3: f64,
    y0: f64,
    y1: f64,
    y2: f64,
    y3: f64,
    d0: f64,
    d1: f64,
    d2: f64,
    mu0: f64,
    mu1: f64,
    mu2: f64,
    l10: f64,
    l11: f64,
    l12: f64,
    l20: f64,
    l21: f64,
    l22: f64,
    tan_f1: f64,
    tan_f2: f64,
}

impl ElementsRow {
    fn into_elements(self) -> Result<BesselianElements, UmbraError> {
        let eclipse_type = self.eclipse_type.parse()?;
        let (hour, minute, second) = parse_time_of_day(&self.td_ge)?;
        let when_max_eclipse =
            Epoch::from_gregorian_utc(self.year, self.month, self.day, hour, minute, second, 0);
        Ok(BesselianElements::new(
            when_max_eclipse,
            self.julian_date,
            eclipse_type,
            self.t0 as i32,
            Polynomial::new(&[self.x0, self.x1, self.x2, self.x3]),
            Polynomial::new(&[self.y0, self.y1, self.y2, self.y3]),
            Polynomial::with_converter(maths::deg_to_rads, &[self.d0, self.d1, self.d2]),
            Polynomial::with_converter(maths::deg_to_rads, &[self.mu0, self.mu1, self.mu2]),
            Polynomial::new(&[self.l10, self.l11, self.l12]),
            Polynomial::new(&[self.l20, self.l21, self.l22]),
            self.tan_f1,
            self.tan_f2,
        ))
    }
}

fn parse_time_of_day(raw: &str) -> Result<(u8, u8, u8), UmbraError> {
    let mut parts = raw.split(':');
    let mut next = || {
        parts
            .next()
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(|| UmbraError::MalformedElementsRow(format!("time of day: {raw}")))
    };
    Ok((next()?, next()?, next()?))
}

/// Looks up the [`BesselianElements`] of an eclipse given its calendar date
/// (TT/UTC, with no offset from Greenwich).
pub struct BesselianElementsLookup {
    path: Utf8PathBuf,
}

impl BesselianElementsLookup {
    pub fn new(path: impl AsRef<Utf8Path>) -> BesselianElementsLookup {
        BesselianElementsLookup {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the Besselian elements of the eclipse on the given date.
    ///
    /// Returns `Ok(None)` when no eclipse is tabulated for the date.
    pub fn lookup(
        &self,
        year: i32,
        month: u8,
        day: u8,
    ) -> Result<Option<BesselianElements>, UmbraError> {
        let mut reader = csv::Reader::from_path(self.path.as_std_path())?;
        for record in reader.deserialize() {
            let row: ElementsRow = record?;
            if (row.year, row.month, row.day) == (year, month, day) {
                return row.into_elements().map(Some);
            }
        }
        warn!("no eclipse tabulated for {year:04}-{month:02}-{day:02}");
        Ok(None)
    }
}
