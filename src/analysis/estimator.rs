//! The p-value estimation component.

use crate::analysis::simulation::simulate_p_value;
use crate::config::{Config, PValueStrategy};
use crate::error::DipError;

/// Estimates the significance of an observed dip value.
///
/// A thin dispatcher over the configured strategy: Monte Carlo
/// simulation or critical-value table interpolation. Constructed from a
/// validated [`Config`]; construction is the point where configuration
/// errors surface.
#[derive(Debug, Clone)]
pub struct PValueEstimator {
    config: Config,
}

impl PValueEstimator {
    /// Build an estimator from a configuration.
    ///
    /// # Errors
    ///
    /// Propagates [`Config::validate`] failures.
    pub fn new(config: Config) -> Result<Self, DipError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Estimate the p-value of `dip` observed on a sample of size `n`.
    ///
    /// The result is in `[0, 1]` and monotone non-increasing in `dip`
    /// for fixed `n` and configuration, under either strategy.
    ///
    /// # Errors
    ///
    /// [`DipError::InvalidDip`] for a NaN, infinite, or negative dip;
    /// [`DipError::EmptySample`] for `n == 0`.
    pub fn estimate(&self, dip: f64, n: usize) -> Result<f64, DipError> {
        match &self.config.strategy {
            PValueStrategy::MonteCarlo => {
                simulate_p_value(dip, n, self.config.trials, self.config.seed)
            }
            PValueStrategy::Table(table) => table.p_value(dip, n),
        }
    }
}
