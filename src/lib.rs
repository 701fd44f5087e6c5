//! # unidip
//!
//! Hartigan's dip test of unimodality.
//!
//! The dip statistic of a one-dimensional sample is the minimum, over
//! all unimodal (convex-then-concave) distribution functions, of the
//! maximum absolute deviation from the sample's empirical CDF. Large
//! dips indicate multimodality; the associated p-value is the
//! probability of a dip at least as large under the unimodal null.
//!
//! ## Quick start
//!
//! ```
//! use unidip::diptest;
//!
//! // Two tight clusters: clearly bimodal.
//! let mut sample: Vec<f64> = (0..100).map(|i| -3.0 + 0.001 * i as f64).collect();
//! sample.extend((0..100).map(|i| 3.0 + 0.001 * i as f64));
//!
//! let result = diptest(&sample).unwrap();
//! assert!(result.dip > 0.05);
//! assert!(result.p_value < 0.01);
//! ```
//!
//! For control over p-value estimation (trial count, seed, or a
//! precomputed critical-value table), use the [`DipTest`] builder.
//!
//! ## References
//!
//! - Hartigan, J. A. & Hartigan, P. M. (1985). "The dip test of
//!   unimodality." The Annals of Statistics 13(1):70-84.
//! - Hartigan, P. M. (1985). "Computation of the dip statistic to test
//!   for unimodality." Applied Statistics 34(3):320-325.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod constants;
mod error;
mod oracle;
mod result;

// Functional modules
pub mod analysis;
pub mod statistics;

// Re-exports for public API
pub use analysis::{CriticalValueTable, PValueEstimator};
pub use config::{Config, PValueStrategy};
pub use constants::{DEFAULT_SEED, DEFAULT_TRIALS};
pub use error::DipError;
pub use oracle::DipTest;
pub use result::{DipResult, DipTestResult};
pub use statistics::{dip_statistic, StepEcdf};

/// Run a dip test with the default configuration.
///
/// Equivalent to `DipTest::new().test(sample)`: computes the dip
/// statistic and a Monte Carlo p-value with the default trial count and
/// seed.
///
/// # Errors
///
/// [`DipError::EmptySample`] or [`DipError::NonFiniteSample`] for
/// invalid samples.
pub fn diptest(sample: &[f64]) -> Result<DipTestResult, DipError> {
    DipTest::new().test(sample)
}
