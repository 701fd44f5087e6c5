//! P-value lookup against a precomputed critical-value table.
//!
//! The table is an external, versioned data asset: rows are sample
//! sizes, columns are cumulative null probabilities, and each cell holds
//! the dip value at that quantile of the null distribution for that
//! sample size (the grid shape of Hartigan & Hartigan's published table
//! and of the R `diptest` package's `qDiptab`). This module ships only
//! the interpolation logic; the data is supplied by the caller, e.g.
//! deserialized with serde.
//!
//! Lookups interpolate on the `√n · dip` scale, on which the null
//! distribution is roughly stable across sample sizes. Sample sizes
//! outside the grid clamp to the boundary rows, which on that scale is
//! equivalent to the classical `dip · √(n/m)` size transform.

use serde::{Deserialize, Serialize};

use crate::error::DipError;

/// Precomputed critical dip values on a (sample size × probability) grid.
///
/// Construct with [`CriticalValueTable::new`] or deserialize from an
/// external asset; every lookup re-checks structural validity, so a
/// malformed deserialized table surfaces [`DipError::MalformedTable`]
/// rather than a wrong p-value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalValueTable {
    /// Sample sizes of the grid rows, strictly increasing.
    sample_sizes: Vec<usize>,
    /// Cumulative null probabilities of the grid columns, strictly
    /// increasing within `[0, 1]`.
    probabilities: Vec<f64>,
    /// Critical dip values, one row per sample size; each row strictly
    /// increasing across columns.
    critical_values: Vec<Vec<f64>>,
}

impl CriticalValueTable {
    /// Build a validated table.
    ///
    /// # Errors
    ///
    /// [`DipError::MalformedTable`] when the grid is structurally
    /// invalid; the payload names the violated requirement.
    pub fn new(
        sample_sizes: Vec<usize>,
        probabilities: Vec<f64>,
        critical_values: Vec<Vec<f64>>,
    ) -> Result<Self, DipError> {
        let table = Self {
            sample_sizes,
            probabilities,
            critical_values,
        };
        table.validate()?;
        Ok(table)
    }

    /// Sample sizes of the grid rows.
    pub fn sample_sizes(&self) -> &[usize] {
        &self.sample_sizes
    }

    /// Cumulative null probabilities of the grid columns.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Check the structural invariants the lookup relies on.
    pub fn validate(&self) -> Result<(), DipError> {
        if self.sample_sizes.len() < 2 {
            return Err(DipError::MalformedTable("need at least two sample sizes"));
        }
        if self.probabilities.len() < 2 {
            return Err(DipError::MalformedTable("need at least two probabilities"));
        }
        if self.sample_sizes[0] == 0 {
            return Err(DipError::MalformedTable("sample sizes must be positive"));
        }
        if !self.sample_sizes.windows(2).all(|w| w[0] < w[1]) {
            return Err(DipError::MalformedTable(
                "sample sizes must be strictly increasing",
            ));
        }
        if !self
            .probabilities
            .iter()
            .all(|p| p.is_finite() && (0.0..=1.0).contains(p))
        {
            return Err(DipError::MalformedTable(
                "probabilities must be finite and within [0, 1]",
            ));
        }
        if !self.probabilities.windows(2).all(|w| w[0] < w[1]) {
            return Err(DipError::MalformedTable(
                "probabilities must be strictly increasing",
            ));
        }
        if self.critical_values.len() != self.sample_sizes.len() {
            return Err(DipError::MalformedTable(
                "need one row of critical values per sample size",
            ));
        }
        for row in &self.critical_values {
            if row.len() != self.probabilities.len() {
                return Err(DipError::MalformedTable(
                    "row length must match the probability grid",
                ));
            }
            if !row.iter().all(|v| v.is_finite() && *v > 0.0) {
                return Err(DipError::MalformedTable(
                    "critical values must be finite and positive",
                ));
            }
            if !row.windows(2).all(|w| w[0] < w[1]) {
                return Err(DipError::MalformedTable(
                    "critical values must be strictly increasing within a row",
                ));
            }
        }
        Ok(())
    }

    /// Estimate the p-value of an observed dip for a sample of size `n`.
    ///
    /// Returns 1.0 when the scaled dip falls below the whole grid and
    /// 0.0 when it exceeds it; otherwise interpolates linearly between
    /// the bracketing probability columns. Monotone non-increasing in
    /// `dip` for fixed `n`.
    ///
    /// # Errors
    ///
    /// - [`DipError::MalformedTable`] if the table fails validation.
    /// - [`DipError::InvalidDip`] if `dip` is NaN, infinite, or negative.
    /// - [`DipError::EmptySample`] if `n` is zero.
    pub fn p_value(&self, dip: f64, n: usize) -> Result<f64, DipError> {
        self.validate()?;
        if !dip.is_finite() || dip < 0.0 {
            return Err(DipError::InvalidDip);
        }
        if n == 0 {
            return Err(DipError::EmptySample);
        }

        let sizes = &self.sample_sizes;
        let k = sizes.len();

        // Bracketing rows for the (clamped) sample size.
        let (row_lo, frac) = if n <= sizes[0] {
            (0, 0.0)
        } else if n >= sizes[k - 1] {
            (k - 2, 1.0)
        } else {
            let i = sizes.partition_point(|&s| s < n) - 1;
            let f = (n - sizes[i]) as f64 / (sizes[i + 1] - sizes[i]) as f64;
            (i, f)
        };

        let scaled = (n as f64).sqrt() * dip;
        let sqrt_lo = (sizes[row_lo] as f64).sqrt();
        let sqrt_hi = (sizes[row_lo + 1] as f64).sqrt();

        // Row-interpolated critical values on the sqrt(n)-dip scale.
        // Strictly increasing because both rows are.
        let crit: Vec<f64> = (0..self.probabilities.len())
            .map(|j| {
                let a = sqrt_lo * self.critical_values[row_lo][j];
                let b = sqrt_hi * self.critical_values[row_lo + 1][j];
                a + frac * (b - a)
            })
            .collect();

        let Some(j) = crit.iter().rposition(|&c| c < scaled) else {
            return Ok(1.0);
        };
        if j == crit.len() - 1 {
            return Ok(0.0);
        }

        let q = (scaled - crit[j]) / (crit[j + 1] - crit[j]);
        let cum = self.probabilities[j] + q * (self.probabilities[j + 1] - self.probabilities[j]);
        Ok((1.0 - cum).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Small synthetic grid with the qDiptab shape. Critical values
    /// shrink roughly like 1/sqrt(n) across rows.
    fn table() -> CriticalValueTable {
        CriticalValueTable::new(
            vec![10, 100, 1000],
            vec![0.5, 0.9, 0.95, 0.99],
            vec![
                vec![0.100, 0.140, 0.160, 0.200],
                vec![0.032, 0.044, 0.050, 0.063],
                vec![0.010, 0.014, 0.016, 0.020],
            ],
        )
        .unwrap()
    }

    #[test]
    fn exact_grid_hit_recovers_tail_probability() {
        // n = 100, dip exactly at the 0.95 column of that row.
        let p = table().p_value(0.050, 100).unwrap();
        assert!((p - 0.05).abs() < 1e-9, "p was {p}");
    }

    #[test]
    fn saturates_below_and_above_the_grid() {
        let t = table();
        assert_eq!(t.p_value(0.001, 100).unwrap(), 1.0);
        assert_eq!(t.p_value(0.25, 100).unwrap(), 0.0);
    }

    #[test]
    fn monotone_non_increasing_in_dip() {
        let t = table();
        for &n in &[10, 37, 100, 520, 1000, 20000] {
            let mut last = f64::INFINITY;
            for i in 0..60 {
                let dip = 0.004 * i as f64;
                let p = t.p_value(dip, n).unwrap();
                assert!(p <= last, "p not monotone at n={n}, dip={dip}");
                last = p;
            }
        }
    }

    #[test]
    fn sample_sizes_beyond_grid_clamp_on_sqrt_scale() {
        let t = table();
        // Same sqrt(n)*dip lands in the same place whether n sits on the
        // last row or beyond it.
        let p_edge = t.p_value(0.016, 1000).unwrap();
        let p_beyond = t.p_value(0.016 / 10.0_f64.sqrt(), 10000).unwrap();
        assert!((p_edge - p_beyond).abs() < 1e-9);
        // Below the grid minimum, clamps to the first rows.
        let p_small = t.p_value(0.15, 5).unwrap();
        assert!(p_small > 0.0 && p_small < 1.0);
    }

    #[test]
    fn rejects_invalid_queries() {
        let t = table();
        assert_eq!(t.p_value(f64::NAN, 100).unwrap_err(), DipError::InvalidDip);
        assert_eq!(t.p_value(-0.1, 100).unwrap_err(), DipError::InvalidDip);
        assert_eq!(t.p_value(0.05, 0).unwrap_err(), DipError::EmptySample);
    }

    #[test]
    fn construction_validates_the_grid() {
        let err = CriticalValueTable::new(
            vec![100, 10],
            vec![0.5, 0.9],
            vec![vec![0.03, 0.05], vec![0.10, 0.14]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DipError::MalformedTable("sample sizes must be strictly increasing")
        );

        let err = CriticalValueTable::new(
            vec![10, 100],
            vec![0.9, 0.5],
            vec![vec![0.10, 0.14], vec![0.03, 0.05]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DipError::MalformedTable("probabilities must be strictly increasing")
        );

        let err = CriticalValueTable::new(
            vec![10, 100],
            vec![0.5, 0.9],
            vec![vec![0.10, 0.14]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DipError::MalformedTable("need one row of critical values per sample size")
        );
    }

    #[test]
    fn deserialized_tables_are_checked_at_lookup() {
        let json = r#"{
            "sample_sizes": [10, 100],
            "probabilities": [0.9, 0.5],
            "critical_values": [[0.10, 0.14], [0.03, 0.05]]
        }"#;
        let t: CriticalValueTable = serde_json::from_str(json).unwrap();
        assert_eq!(
            t.p_value(0.05, 50).unwrap_err(),
            DipError::MalformedTable("probabilities must be strictly increasing")
        );
    }

    #[test]
    fn valid_table_round_trips_through_serde() {
        let t = table();
        let json = serde_json::to_string(&t).unwrap();
        let back: CriticalValueTable = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}
