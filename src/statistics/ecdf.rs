//! Step-function representation of the empirical CDF.
//!
//! The dip algorithm operates on the ECDF as an explicit polyline: each
//! observed value contributes two points, one at the cumulative
//! proportion just below it and one at the proportion including it, so
//! every jump of the step function is visible to the hull construction.
//! Observations closer than [`TIE_EPS`](crate::constants::TIE_EPS) are
//! merged into a single jump with summed weight.

use serde::{Deserialize, Serialize};

use crate::constants::TIE_EPS;
use crate::error::DipError;

/// Debug assertion that all values in the slice are finite.
#[inline]
pub(crate) fn debug_assert_finite(data: &[f64]) {
    debug_assert!(
        data.iter().all(|x| x.is_finite()),
        "ECDF input must be finite (no NaN or infinity)"
    );
}

/// Empirical CDF of a sample, stored as an explicit step polyline.
///
/// For a sample with `u` distinct values the polyline has `2u` points:
/// `(v_i, F(v_i^-))` followed by `(v_i, F(v_i))` for each distinct value
/// `v_i` in ascending order. The first point is `(v_1, 0)` and the last
/// is `(v_u, 1)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepEcdf {
    /// X coordinates of the polyline (each distinct value twice).
    xs: Vec<f64>,
    /// Y coordinates of the polyline (cumulative proportions).
    ys: Vec<f64>,
    /// Number of observations in the original sample.
    n_obs: usize,
}

impl StepEcdf {
    /// Build the step ECDF of a raw sample.
    ///
    /// The input may be in any order; a sorted copy is made internally
    /// and the caller's slice is never mutated.
    ///
    /// # Errors
    ///
    /// - [`DipError::EmptySample`] if the sample has no observations.
    /// - [`DipError::NonFiniteSample`] if any value is NaN or infinite.
    pub fn from_sample(sample: &[f64]) -> Result<Self, DipError> {
        if sample.is_empty() {
            return Err(DipError::EmptySample);
        }
        if sample.iter().any(|v| !v.is_finite()) {
            return Err(DipError::NonFiniteSample);
        }

        let mut sorted = sample.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Ok(Self::from_sorted(sorted))
    }

    /// Build the step ECDF from an already sorted sample.
    ///
    /// Used on internally generated data (Monte Carlo trials) where
    /// finiteness is guaranteed by construction.
    pub(crate) fn from_sorted(sorted: Vec<f64>) -> Self {
        debug_assert_finite(&sorted);
        debug_assert!(
            sorted.windows(2).all(|w| w[0] <= w[1]),
            "ECDF input must be sorted ascending"
        );

        let n = sorted.len();

        // Merge tied observations into (value, count) jumps. Ties are
        // resolved against the first value of the current run so a long
        // chain of values each within TIE_EPS of its neighbor does not
        // collapse into one jump.
        let mut values = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        let mut i = 0;
        while i < n {
            let v = sorted[i];
            let mut j = i + 1;
            while j < n && sorted[j] - v < TIE_EPS {
                j += 1;
            }
            values.push(v);
            counts.push(j - i);
            i = j;
        }

        let u = values.len();
        let mut xs = Vec::with_capacity(2 * u);
        let mut ys = Vec::with_capacity(2 * u);
        let mut cum = 0usize;
        for (v, c) in values.iter().zip(&counts) {
            xs.push(*v);
            ys.push(cum as f64 / n as f64);
            cum += c;
            xs.push(*v);
            ys.push(cum as f64 / n as f64);
        }
        // Guard against accumulated rounding on the final proportion.
        if let Some(last) = ys.last_mut() {
            *last = 1.0;
        }

        StepEcdf { xs, ys, n_obs: n }
    }

    /// X coordinates of the step polyline.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Y coordinates (cumulative proportions) of the step polyline.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of polyline points (twice the number of distinct values).
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Whether the polyline is empty. Never true for a constructed ECDF.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Number of observations in the original sample.
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    /// Width of the observed support, `max - min`.
    pub fn range(&self) -> f64 {
        self.xs[self.xs.len() - 1] - self.xs[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubled_points_for_distinct_values() {
        let ecdf = StepEcdf::from_sample(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(ecdf.xs(), &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
        assert_eq!(ecdf.ys()[0], 0.0);
        assert_eq!(*ecdf.ys().last().unwrap(), 1.0);
        let expected = [0.0, 1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0, 1.0];
        for (got, want) in ecdf.ys().iter().zip(expected) {
            assert!((got - want).abs() < 1e-15, "got {got}, want {want}");
        }
    }

    #[test]
    fn ties_merge_into_single_jump() {
        let ecdf = StepEcdf::from_sample(&[5.0, 5.0, 5.0, 7.0]).unwrap();
        assert_eq!(ecdf.xs(), &[5.0, 5.0, 7.0, 7.0]);
        assert_eq!(ecdf.ys(), &[0.0, 0.75, 0.75, 1.0]);
        assert_eq!(ecdf.n_obs(), 4);
    }

    #[test]
    fn near_ties_merge_within_tolerance() {
        let ecdf = StepEcdf::from_sample(&[1.0, 1.0 + 1e-12, 2.0]).unwrap();
        assert_eq!(ecdf.len(), 4); // two distinct values after merging
    }

    #[test]
    fn constant_sample_collapses_to_one_value() {
        let ecdf = StepEcdf::from_sample(&[4.2; 10]).unwrap();
        assert_eq!(ecdf.len(), 2);
        assert_eq!(ecdf.range(), 0.0);
        assert_eq!(ecdf.ys(), &[0.0, 1.0]);
    }

    #[test]
    fn rejects_empty_and_non_finite() {
        assert_eq!(
            StepEcdf::from_sample(&[]).unwrap_err(),
            DipError::EmptySample
        );
        assert_eq!(
            StepEcdf::from_sample(&[1.0, f64::NAN]).unwrap_err(),
            DipError::NonFiniteSample
        );
        assert_eq!(
            StepEcdf::from_sample(&[f64::INFINITY]).unwrap_err(),
            DipError::NonFiniteSample
        );
    }

    #[test]
    fn input_is_not_mutated() {
        let sample = vec![3.0, 1.0, 2.0];
        let _ = StepEcdf::from_sample(&sample).unwrap();
        assert_eq!(sample, vec![3.0, 1.0, 2.0]);
    }
}
