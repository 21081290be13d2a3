use thiserror::Error;

/// Errors surfaced by the `umbra` library.
///
/// Expected cold-path outcomes (no eclipse tabulated for a date, no eclipse
/// visible at a location) are *not* errors: they are expressed as an absent
/// result by the callers concerned.
#[derive(Error, Debug)]
pub enum UmbraError {
    #[error("Unknown eclipse type code: {0}")]
    InvalidEclipseType(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unable to read Besselian-element data: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Malformed Besselian-element row: {0}")]
    MalformedElementsRow(String),

    #[error("{stage} failed to converge within {max_iterations} iterations")]
    NonConvergence {
        stage: &'static str,
        max_iterations: usize,
    },

    #[error("Partial-phase sample spacing must be at least one minute")]
    ZeroSampleSpacing,
}
