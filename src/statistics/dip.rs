//! The dip statistic: greatest deviation between the ECDF and the best
//! fitting unimodal CDF.
//!
//! # Algorithm
//!
//! Following Hartigan (1985), the search maintains a window `[low, high]`
//! over the ECDF polyline — the modal interval, where the optimal
//! unimodal fit is still ambiguous. Each iteration builds the greatest
//! convex minorant (GCM) and least concave majorant (LCM) of the window,
//! measures the largest vertical gap between them at each other's touch
//! points, and narrows the window so that the largest gap sits at one of
//! its endpoints. Deviations left outside the narrowed window feed a
//! running lower bound `D` on twice the dip; the loop stops once the gap
//! inside the window can no longer exceed that bound, or the window has
//! collapsed. The dip is `D / 2`: the unimodal fit is allowed to run
//! through the middle of a band of width `D` around the ECDF, so the
//! sup-norm distance is half the band width.
//!
//! The window is strictly narrowed every iteration (the maximal gap is
//! attained at an interior touch point), so the search always terminates.
//!
//! # Reference
//!
//! Hartigan, P. M. (1985). "Computation of the dip statistic to test for
//! unimodality." Applied Statistics 34(3):320-325.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::constants::HULL_EPS;
use crate::error::DipError;
use crate::statistics::ecdf::StepEcdf;
use crate::statistics::hull::{concave_majorant, interp_on_touches};

/// Outcome of a dip statistic computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DipResult {
    /// The dip value, in `[0, 0.5]`.
    ///
    /// Half the minimal sup-norm distance between the ECDF and any
    /// unimodal CDF. The algorithm never produces values above 0.25
    /// (attained by a sample split between two point masses), but the
    /// documented contract is the looser bound.
    pub dip: f64,

    /// Final modal interval in data coordinates: the range over which
    /// the optimal unimodal fit's mode may lie. Diagnostic only.
    pub modal_interval: (f64, f64),

    /// Number of GCM/LCM refinement iterations performed.
    pub iterations: usize,
}

/// Compute the dip statistic of a sample.
///
/// The input may be in any order; a sorted copy is made internally and
/// the caller's slice is never mutated. Duplicate values are allowed.
///
/// Degenerate inputs have a fixed policy: samples with fewer than four
/// observations and constant samples (all values tied) return a dip of
/// exactly 0.0 rather than exercising the hull construction.
///
/// # Errors
///
/// - [`DipError::EmptySample`] for an empty slice.
/// - [`DipError::NonFiniteSample`] if any value is NaN or infinite.
///
/// # Example
///
/// ```
/// use unidip::dip_statistic;
///
/// // An evenly spaced ramp attains the minimum possible dip, 1/(2n).
/// let sample: Vec<f64> = (1..=10).map(f64::from).collect();
/// let result = dip_statistic(&sample).unwrap();
/// assert!((result.dip - 0.05).abs() < 1e-12);
/// ```
pub fn dip_statistic(sample: &[f64]) -> Result<DipResult, DipError> {
    let ecdf = StepEcdf::from_sample(sample)?;
    Ok(dip_from_ecdf(&ecdf))
}

/// Dip computation over an already constructed step ECDF.
pub(crate) fn dip_from_ecdf(ecdf: &StepEcdf) -> DipResult {
    let xs = ecdf.xs();
    let ys = ecdf.ys();
    let m = xs.len();

    // Fixed degenerate policy: tiny samples and constant samples are
    // perfectly unimodal by definition, not by hull construction.
    if ecdf.n_obs() < 4 || ecdf.range() < HULL_EPS {
        return DipResult {
            dip: 0.0,
            modal_interval: (xs[0], xs[m - 1]),
            iterations: 0,
        };
    }

    let mut low = 0usize;
    let mut high = m - 1;
    // Running lower bound on twice the dip.
    let mut d_bound = 0.0f64;
    let mut modal = (xs[low], xs[high]);
    let mut iterations = 0usize;

    loop {
        iterations += 1;
        let win_x = &xs[low..=high];
        let win_y = &ys[low..=high];
        let neg_y: Vec<f64> = win_y.iter().map(|y| -y).collect();

        // Touch indices are window-local. Both hulls share the window
        // endpoints, where the deviation is zero by construction.
        let lcm = concave_majorant(win_x, win_y);
        let gcm = concave_majorant(win_x, &neg_y);

        // Largest gap below the LCM, measured at interior GCM touches.
        // Strict `>` keeps the lowest (outermost-left) index on ties.
        let mut max_g = 0.0f64;
        let mut arg_g = gcm[0];
        for &g in &gcm[1..gcm.len() - 1] {
            let diff = interp_on_touches(win_x, win_y, &lcm, win_x[g]) - win_y[g];
            if diff > max_g {
                max_g = diff;
                arg_g = g;
            }
        }

        // Largest gap above the GCM, measured at interior LCM touches.
        // `>=` keeps the highest (outermost-right) index on ties.
        let mut max_h = 0.0f64;
        let mut arg_h = lcm[lcm.len() - 1];
        for &h in &lcm[1..lcm.len() - 1] {
            let gcm_val = -interp_on_touches(win_x, &neg_y, &gcm, win_x[h]);
            let diff = win_y[h] - gcm_val;
            if diff >= max_h {
                max_h = diff;
                arg_h = h;
            }
        }

        let d = max_g.max(max_h);
        trace!(
            iteration = iterations,
            low,
            high,
            gap = d,
            bound = d_bound,
            "dip refinement step"
        );
        if d <= d_bound {
            break;
        }

        // Narrow to the modal interval so the largest gap sits at one of
        // its endpoints.
        let (l0, u0) = if max_g > max_h {
            let l0 = arg_g;
            let u0 = lcm
                .iter()
                .copied()
                .find(|&h| h >= l0)
                .unwrap_or(lcm[lcm.len() - 1]);
            (l0, u0)
        } else {
            let u0 = arg_h;
            let l0 = gcm.iter().rev().copied().find(|&g| g <= u0).unwrap_or(gcm[0]);
            (l0, u0)
        };

        // Deviations outside the narrowed window are final: the ECDF
        // below the GCM on the left flank, above the LCM on the right.
        for (&x, &y) in win_x.iter().zip(win_y).take(l0 + 1) {
            let gcm_val = -interp_on_touches(win_x, &neg_y, &gcm, x);
            d_bound = d_bound.max(y - gcm_val);
        }
        for (&x, &y) in win_x.iter().zip(win_y).skip(u0) {
            let lcm_val = interp_on_touches(win_x, win_y, &lcm, x);
            d_bound = d_bound.max(lcm_val - y);
        }

        modal = (win_x[l0], win_x[u0]);
        if win_x[u0] - win_x[l0] < HULL_EPS {
            break;
        }
        if d <= d_bound {
            break;
        }

        high = low + u0;
        low += l0;

        // The narrowing above is strict, so this backstop is never the
        // reason the loop ends; it bounds the worst case regardless.
        if iterations >= m {
            break;
        }
    }

    debug!(
        dip = d_bound / 2.0,
        iterations,
        modal_lo = modal.0,
        modal_hi = modal.1,
        "dip statistic computed"
    );

    DipResult {
        dip: d_bound / 2.0,
        modal_interval: modal,
        iterations,
    }
}
