//! Numeric constants used throughout the crate.

/// Default deterministic seed for Monte Carlo p-value simulation.
///
/// This seed ensures reproducibility: same seed + same data = same result.
/// The value `0x756E69646970` is "unidip" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x756E69646970;

/// Default number of Monte Carlo trials for p-value estimation.
///
/// 2000 trials give a standard error below 0.012 for p-values near 0.5
/// and much less in the tails, which is adequate for the usual 0.05/0.01
/// decision thresholds.
pub const DEFAULT_TRIALS: usize = 2000;

/// Tolerance for slope and interval-width comparisons during GCM/LCM
/// construction.
///
/// Without this tolerance, convexity checks on near-degenerate (near
/// uniformly spaced) data can mis-detect touch points.
pub const HULL_EPS: f64 = 1e-12;

/// Absolute tolerance below which two observations are merged as a tie
/// when building the step ECDF.
pub const TIE_EPS: f64 = 1e-10;
