//! Configuration for dip test p-value estimation.

use crate::analysis::table::CriticalValueTable;
use crate::constants::{DEFAULT_SEED, DEFAULT_TRIALS};
use crate::error::DipError;

/// How the p-value of an observed dip is estimated.
#[derive(Debug, Clone)]
pub enum PValueStrategy {
    /// Simulate uniform null samples and count dips reaching the
    /// observed one. Statistically exact, deterministic for a fixed
    /// seed and trial count, slower for large samples.
    MonteCarlo,

    /// Interpolate against a precomputed critical-value table. Fast and
    /// deterministic; accuracy bounded by the table's grid resolution.
    /// The table is an external data asset owned by this configuration,
    /// not a process-wide singleton.
    Table(CriticalValueTable),
}

/// Configuration options for a dip test.
#[derive(Debug, Clone)]
pub struct Config {
    /// P-value estimation strategy. Default: Monte Carlo.
    pub strategy: PValueStrategy,

    /// Number of Monte Carlo trials. Ignored by the table strategy.
    ///
    /// At least 1000 is recommended for stable estimates near common
    /// decision thresholds. Default: 2000.
    pub trials: usize,

    /// RNG seed for Monte Carlo trials. Ignored by the table strategy.
    ///
    /// The estimate is a pure function of (sample, trials, seed); there
    /// is no ambient random state. Default: a fixed crate-wide seed.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: PValueStrategy::MonteCarlo,
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
        }
    }
}

impl Config {
    /// Check the configuration before use.
    ///
    /// # Errors
    ///
    /// - [`DipError::ZeroTrials`] for a Monte Carlo strategy with no
    ///   trials.
    /// - [`DipError::MalformedTable`] for an invalid table.
    pub fn validate(&self) -> Result<(), DipError> {
        match &self.strategy {
            PValueStrategy::MonteCarlo => {
                if self.trials == 0 {
                    return Err(DipError::ZeroTrials);
                }
            }
            PValueStrategy::Table(table) => table.validate()?,
        }
        Ok(())
    }
}
