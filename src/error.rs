//! Error types for dip statistic computation and p-value estimation.

use core::fmt;

/// Error returned when a dip test cannot be carried out.
///
/// The dip computation itself is total on valid input: once a sample has
/// been accepted, the algorithm always terminates and never reports
/// numeric failures (near-degenerate hull constructions are absorbed by
/// epsilon tolerances). Errors therefore only arise from invalid input
/// or invalid configuration, and are surfaced immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DipError {
    /// The sample is empty.
    ///
    /// A dip value requires at least one observation. Samples with fewer
    /// than four observations are accepted and return dip = 0.
    EmptySample,

    /// The sample contains a NaN or infinite value.
    ///
    /// Non-finite observations have no position on the real line, so the
    /// ECDF (and therefore the dip) is undefined for them.
    NonFiniteSample,

    /// A dip value passed to a p-value estimator was NaN, infinite, or
    /// negative.
    InvalidDip,

    /// Monte Carlo estimation was configured with zero trials.
    ZeroTrials,

    /// A critical-value table failed validation.
    ///
    /// The payload describes which structural requirement was violated
    /// (dimension mismatch, non-monotone grid, or non-finite entries).
    MalformedTable(&'static str),
}

impl fmt::Display for DipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySample => write!(f, "sample is empty"),
            Self::NonFiniteSample => {
                write!(f, "sample contains non-finite values (NaN/Inf)")
            }
            Self::InvalidDip => {
                write!(f, "dip value must be finite and non-negative")
            }
            Self::ZeroTrials => {
                write!(f, "Monte Carlo trial count must be positive")
            }
            Self::MalformedTable(reason) => {
                write!(f, "malformed critical-value table: {reason}")
            }
        }
    }
}

impl std::error::Error for DipError {}
