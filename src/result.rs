//! Result types for the dip test.

use serde::{Deserialize, Serialize};

pub use crate::statistics::dip::DipResult;

/// Combined outcome of a dip test: the statistic plus its significance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DipTestResult {
    /// The dip statistic, in `[0, 0.5]`.
    pub dip: f64,

    /// Estimated probability of observing a dip at least this large
    /// under the unimodal null, in `[0, 1]`.
    pub p_value: f64,

    /// Number of observations in the sample.
    pub n: usize,

    /// Modal interval in data coordinates. Diagnostic only.
    pub modal_interval: (f64, f64),

    /// GCM/LCM refinement iterations the dip computation used.
    pub iterations: usize,
}

impl DipTestResult {
    /// Whether the unimodal null is rejected at significance `alpha`.
    pub fn rejects_unimodality_at(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}
