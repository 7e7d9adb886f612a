//! Empirical quantiles using the R type 7 definition.
//!
//! The resampling confidence intervals are built on the interpolating
//! quantile estimator that R and NumPy use by default:
//!
//! ```text
//! h = 1 + (n - 1) * p          (1-based position)
//! q = x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])
//! ```
//!
//! Linear interpolation between order statistics gives continuous quantiles
//! of the replicate distribution, which is what the percentile and basic
//! interval constructions expect.
//!
//! # Reference
//!
//! Hyndman, R. J. & Fan, Y. (1996). "Sample quantiles in statistical
//! packages." The American Statistician 50(4):361-365.

/// Compute the type 7 quantile of `data` at probability `p`.
///
/// The input does not need to be sorted; a working copy is sorted
/// internally. Use [`percentile_sorted`] when the data is already ordered.
///
/// # Arguments
///
/// * `data` - Observations, in any order
/// * `p` - Quantile probability in [0, 1]
///
/// # Panics
///
/// Panics if `data` is empty or if `p` is outside [0, 1].
pub fn percentile(data: &[f64], p: f64) -> f64 {
    assert!(!data.is_empty(), "cannot compute a quantile of an empty slice");
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    percentile_sorted(&sorted, p)
}

/// Compute the type 7 quantile from data already sorted ascending.
///
/// This is the cheap path for callers that sort once and read several
/// quantiles, as the interval estimators do.
///
/// # Panics
///
/// Panics if `sorted` is empty or if `p` is outside [0, 1]. The caller must
/// ensure the data is sorted; no verification is performed.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "cannot compute a quantile of an empty slice"
    );
    assert!(
        (0.0..=1.0).contains(&p),
        "quantile probability must be in [0, 1]"
    );

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    // 0-based position of the 1-based h = 1 + (n - 1) p.
    let position = (n - 1) as f64 * p;
    let lower_idx = position.floor() as usize;
    let fraction = position - lower_idx as f64;

    if lower_idx + 1 >= n {
        return sorted[n - 1];
    }
    sorted[lower_idx] + fraction * (sorted[lower_idx + 1] - sorted[lower_idx])
}
