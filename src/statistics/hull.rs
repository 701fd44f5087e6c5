//! Greatest convex minorant / least concave majorant construction.
//!
//! Both hulls are computed as ordered sequences of touch-point indices
//! over a window of ECDF polyline points, by walking from the left end
//! and repeatedly jumping to the point of extremal slope. The functions
//! here are pure: each call returns a fresh index vector for its window
//! and no hull state is shared across iterations of the dip search.
//!
//! The walk follows Hartigan (1985) as realized in Johnsson's reference
//! implementation: vertical segments (two points sharing an x, i.e. an
//! ECDF jump) are handled with an epsilon tolerance so near-degenerate
//! spacing cannot stall the walk or mis-detect touch points.

use crate::constants::HULL_EPS;

/// Touch-point indices of the least concave majorant of `(xs, ys)`.
///
/// `xs` must be sorted ascending with each value appearing at most
/// twice (the step-ECDF doubling). The result always starts at index 0
/// and ends at the last index.
pub(crate) fn concave_majorant(xs: &[f64], ys: &[f64]) -> Vec<usize> {
    debug_assert!(xs.len() == ys.len());
    debug_assert!(xs.len() >= 2, "hull needs at least two points");

    let n = xs.len();
    let mut touch = vec![0usize];
    let mut cur = 0usize;
    while cur < n - 1 {
        if xs[cur + 1] - xs[cur] > HULL_EPS {
            cur = steepest_from(xs, ys, cur, cur + 1);
            touch.push(cur);
        } else if ys[cur + 1] > ys[cur] || cur == n - 2 {
            // Vertical segment going up belongs to the majorant; the
            // final point is always included.
            cur += 1;
            touch.push(cur);
        } else if cur + 2 < n && xs[cur + 2] - xs[cur] > HULL_EPS {
            // Vertical segment going down: skip over it and continue
            // the walk from the slopes past the jump.
            cur = steepest_from(xs, ys, cur, cur + 2);
            touch.push(cur);
        } else {
            // Three or more points share an x within tolerance. Tie
            // merging in the ECDF rules this out; recover by stepping.
            cur += 1;
            touch.push(cur);
        }
    }
    touch
}

/// Touch-point indices of the greatest convex minorant of `(xs, ys)`.
///
/// Computed as the concave majorant of the negated ordinates.
#[cfg(test)]
pub(crate) fn convex_minorant(xs: &[f64], ys: &[f64]) -> Vec<usize> {
    let neg: Vec<f64> = ys.iter().map(|y| -y).collect();
    concave_majorant(xs, &neg)
}

/// Index `j >= from` maximizing the slope from `(xs[base], ys[base])`.
///
/// The first index attaining the maximum wins, which puts hull touch
/// points as far left as possible.
fn steepest_from(xs: &[f64], ys: &[f64], base: usize, from: usize) -> usize {
    let mut best = from;
    let mut best_slope = f64::NEG_INFINITY;
    for j in from..xs.len() {
        // xs[j] - xs[base] > HULL_EPS is guaranteed by the callers.
        let slope = (ys[j] - ys[base]) / (xs[j] - xs[base]);
        if slope > best_slope {
            best_slope = slope;
            best = j;
        }
    }
    best
}

/// Evaluate the piecewise-linear hull through the touch points at `xq`.
///
/// Queries outside the touch range clamp to the end values. A query
/// landing exactly on a duplicated touch x (an ECDF jump kept by the
/// hull) returns the later — for a majorant, upper — of the duplicate
/// values, matching the convention of the reference implementation.
pub(crate) fn interp_on_touches(xs: &[f64], ys: &[f64], touch: &[usize], xq: f64) -> f64 {
    debug_assert!(!touch.is_empty());

    // First touch position whose x is not below the query.
    let mut k = touch.partition_point(|&t| xs[t] < xq);
    if k == touch.len() {
        return ys[touch[touch.len() - 1]];
    }
    if xs[touch[k]] == xq {
        while k + 1 < touch.len() && xs[touch[k + 1]] == xq {
            k += 1;
        }
        return ys[touch[k]];
    }
    if k == 0 {
        return ys[touch[0]];
    }
    let (a, b) = (touch[k - 1], touch[k]);
    let t = (xq - xs[a]) / (xs[b] - xs[a]);
    ys[a] + t * (ys[b] - ys[a])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::ecdf::StepEcdf;

    #[test]
    fn majorant_of_concave_points_touches_all() {
        // y = -(x-2)^2 sampled at x = 0..4 is concave.
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [-4.0, -1.0, 0.0, -1.0, -4.0];
        assert_eq!(concave_majorant(&xs, &ys), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn majorant_skips_interior_dip() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, -5.0, 1.0];
        assert_eq!(concave_majorant(&xs, &ys), vec![0, 2]);
    }

    #[test]
    fn minorant_skips_interior_bump() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 5.0, 1.0];
        assert_eq!(convex_minorant(&xs, &ys), vec![0, 2]);
    }

    #[test]
    fn hulls_of_uniform_ramp_ecdf() {
        // Evenly spaced sample: the majorant touches the top of every
        // jump, the minorant the bottom of every jump.
        let sample: Vec<f64> = (1..=10).map(f64::from).collect();
        let ecdf = StepEcdf::from_sample(&sample).unwrap();
        let lcm = concave_majorant(ecdf.xs(), ecdf.ys());
        let gcm = convex_minorant(ecdf.xs(), ecdf.ys());

        let mut want_lcm = vec![0];
        want_lcm.extend((0..10).map(|i| 2 * i + 1));
        assert_eq!(lcm, want_lcm);

        let mut want_gcm: Vec<usize> = (0..10).map(|i| 2 * i).collect();
        want_gcm.push(19);
        assert_eq!(gcm, want_gcm);
    }

    #[test]
    fn majorant_lies_above_all_points() {
        let xs = [0.0, 0.5, 1.0, 1.5, 2.0, 3.0];
        let ys = [0.0, 0.1, 0.9, 0.2, 0.8, 1.0];
        let touch = concave_majorant(&xs, &ys);
        for (i, (&x, &y)) in xs.iter().zip(&ys).enumerate() {
            let hull = interp_on_touches(&xs, &ys, &touch, x);
            assert!(
                hull >= y - 1e-12,
                "majorant below point {i}: hull {hull} < y {y}"
            );
        }
    }

    #[test]
    fn interp_clamps_and_handles_duplicates() {
        let xs = [1.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 0.5, 0.75, 1.0];
        let touch = vec![0, 1, 2, 3];
        // Exact hit on a duplicated x takes the later (upper) value.
        assert_eq!(interp_on_touches(&xs, &ys, &touch, 1.0), 0.5);
        // Clamping outside the range.
        assert_eq!(interp_on_touches(&xs, &ys, &touch, 0.0), 0.0);
        assert_eq!(interp_on_touches(&xs, &ys, &touch, 9.0), 1.0);
        // Ordinary linear interpolation between touch points.
        let mid = interp_on_touches(&xs, &ys, &touch, 2.5);
        assert!((mid - 0.875).abs() < 1e-12);
    }
}
