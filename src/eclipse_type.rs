use std::fmt;
use std::str::FromStr;

use crate::errors::UmbraError;

/// General character of a solar eclipse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EclipseType {
    Total,
    Annular,
    /// An eclipse which is total at some places, and annular at others.
    /// Only meaningful globally: local classification never yields `Hybrid`.
    Hybrid,
    Partial,
    None,
}

impl FromStr for EclipseType {
    type Err = UmbraError;

    /// Match the first character of the input against the variant names.
    ///
    /// The tabulated data uses suffixed codes such as `Pb`, `A+`, `H3` or
    /// `Tm`; only the leading letter is significant.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.chars().next() {
            Some('T') => Ok(EclipseType::Total),
            Some('A') => Ok(EclipseType::Annular),
            Some('H') => Ok(EclipseType::Hybrid),
            Some('P') => Ok(EclipseType::Partial),
            Some('N') => Ok(EclipseType::None),
            _ => Err(UmbraError::InvalidEclipseType(raw.to_string())),
        }
    }
}

impl fmt::Display for EclipseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EclipseType::Total => "Total",
            EclipseType::Annular => "Annular",
            EclipseType::Hybrid => "Hybrid",
            EclipseType::Partial => "Partial",
            EclipseType::None => "None",
        };
        write!(f, "{name}")
    }
}
