//! Main `DipTest` entry point and builder.

use tracing::debug;

use crate::analysis::estimator::PValueEstimator;
use crate::analysis::table::CriticalValueTable;
use crate::config::{Config, PValueStrategy};
use crate::error::DipError;
use crate::result::DipTestResult;
use crate::statistics::dip::dip_statistic;

/// Main entry point for testing a sample for unimodality.
///
/// Use the builder pattern to configure and run dip tests.
///
/// # Example
///
/// ```
/// use unidip::DipTest;
///
/// let sample: Vec<f64> = (0..100).map(|i| (i as f64 * 0.37).sin()).collect();
/// let result = DipTest::new()
///     .trials(500)
///     .seed(7)
///     .test(&sample)
///     .unwrap();
/// assert!(result.dip >= 0.0 && result.dip <= 0.5);
/// assert!(result.p_value >= 0.0 && result.p_value <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DipTest {
    config: Config,
}

impl Default for DipTest {
    fn default() -> Self {
        Self::new()
    }
}

impl DipTest {
    /// Create with default configuration (Monte Carlo p-values).
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the number of Monte Carlo trials.
    pub fn trials(mut self, n: usize) -> Self {
        self.config.trials = n;
        self
    }

    /// Set the Monte Carlo RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Use table interpolation instead of simulation for p-values.
    pub fn critical_values(mut self, table: CriticalValueTable) -> Self {
        self.config.strategy = PValueStrategy::Table(table);
        self
    }

    /// Compute the dip statistic of `sample` and estimate its p-value.
    ///
    /// The sample may be in any order and is never mutated.
    ///
    /// # Errors
    ///
    /// Invalid samples surface [`DipError::EmptySample`] or
    /// [`DipError::NonFiniteSample`]; invalid configurations surface
    /// [`DipError::ZeroTrials`] or [`DipError::MalformedTable`].
    pub fn test(&self, sample: &[f64]) -> Result<DipTestResult, DipError> {
        let estimator = PValueEstimator::new(self.config.clone())?;
        let dip = dip_statistic(sample)?;
        let p_value = estimator.estimate(dip.dip, sample.len())?;
        debug!(
            dip = dip.dip,
            p_value,
            n = sample.len(),
            "dip test complete"
        );
        Ok(DipTestResult {
            dip: dip.dip,
            p_value,
            n: sample.len(),
            modal_interval: dip.modal_interval,
            iterations: dip.iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_take_effect() {
        let test = DipTest::new().trials(50).seed(3);
        let a = test.test(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = test.test(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.n, 6);
    }

    #[test]
    fn invalid_sample_is_surfaced() {
        assert_eq!(
            DipTest::new().test(&[]).unwrap_err(),
            DipError::EmptySample
        );
    }

    #[test]
    fn invalid_config_is_surfaced() {
        assert_eq!(
            DipTest::new().trials(0).test(&[1.0, 2.0]).unwrap_err(),
            DipError::ZeroTrials
        );
    }
}
