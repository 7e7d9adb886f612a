//! Leave-one-out jackknife estimation.
//!
//! The jackknife recomputes an estimator n times, each time with one
//! observation held out, and reads bias and standard error from how the
//! estimates move. It is deterministic, needs no random stream, and for
//! smooth estimators corrects bias of order 1/n exactly.

use serde::{Deserialize, Serialize};

use crate::error::StatError;
use crate::statistics::{check_confidence_level, t_quantile, Interval, Statistic, SummaryStatistics};

/// Jackknife evaluation of a scalar estimator.
///
/// Built in one shot by [`evaluate`](Self::evaluate); all queries read the
/// stored leave-one-out estimates.
///
/// # Example
///
/// ```
/// use simstat::bootstrap::Jackknife;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let jack = Jackknife::evaluate(&data, |sample| {
///     sample.iter().sum::<f64>() / sample.len() as f64
/// }).unwrap();
///
/// assert!((jack.original_estimate() - 3.0).abs() < 1e-12);
/// assert!(jack.bias_estimate().abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Jackknife {
    original_estimate: f64,
    /// Estimate with observation i held out, in data order.
    loo_estimates: Vec<f64>,
    across: Statistic,
    sample_size: usize,
}

impl Jackknife {
    /// Apply `estimator` to `data` and to every leave-one-out subsample.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InsufficientData`] if the data holds fewer than
    /// two observations.
    pub fn evaluate<F>(data: &[f64], estimator: F) -> Result<Self, StatError>
    where
        F: Fn(&[f64]) -> f64,
    {
        let n = data.len();
        if n < 2 {
            return Err(StatError::InsufficientData {
                required: 2,
                actual: n,
            });
        }
        let original_estimate = estimator(data);
        let mut loo_estimates = Vec::with_capacity(n);
        let mut across = Statistic::new();
        let mut held_out = Vec::with_capacity(n - 1);
        for i in 0..n {
            held_out.clear();
            held_out.extend_from_slice(&data[..i]);
            held_out.extend_from_slice(&data[i + 1..]);
            let estimate = estimator(&held_out);
            across.collect(estimate);
            loo_estimates.push(estimate);
        }
        Ok(Self {
            original_estimate,
            loo_estimates,
            across,
            sample_size: n,
        })
    }

    /// The estimator applied to the full data.
    pub fn original_estimate(&self) -> f64 {
        self.original_estimate
    }

    /// The leave-one-out estimates, in data order.
    pub fn leave_one_out_estimates(&self) -> &[f64] {
        &self.loo_estimates
    }

    /// Number of observations in the original data.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Mean of the leave-one-out estimates.
    pub fn jackknife_average(&self) -> f64 {
        self.across.average()
    }

    /// Jackknife bias estimate `(n - 1) * (loo_average - original)`.
    pub fn bias_estimate(&self) -> f64 {
        let n = self.sample_size as f64;
        (n - 1.0) * (self.jackknife_average() - self.original_estimate)
    }

    /// Original estimate with the jackknife bias removed,
    /// `n * original - (n - 1) * loo_average`.
    pub fn bias_corrected_estimate(&self) -> f64 {
        let n = self.sample_size as f64;
        n * self.original_estimate - (n - 1.0) * self.jackknife_average()
    }

    /// Jackknife standard error
    /// `sqrt((n - 1) / n * sum((loo_i - loo_average)^2))`.
    pub fn std_error_estimate(&self) -> f64 {
        let n = self.sample_size as f64;
        ((n - 1.0) / n * self.across.deviation_sum_of_squares()).sqrt()
    }

    /// t-based confidence interval on the original estimate with the
    /// jackknife standard error and `n - 1` degrees of freedom.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidConfidenceLevel`] if `level` is outside
    /// (0, 1).
    pub fn confidence_interval(&self, level: f64) -> Result<Interval, StatError> {
        check_confidence_level(level)?;
        let df = self.sample_size as f64 - 1.0;
        let t = t_quantile(df, 1.0 - (1.0 - level) / 2.0);
        let half_width = t * self.std_error_estimate();
        Ok(Interval::new(
            self.original_estimate - half_width,
            self.original_estimate + half_width,
        ))
    }

    /// Snapshot of the derived quantities as a serializable record.
    pub fn estimate(&self) -> JackknifeEstimate {
        JackknifeEstimate {
            sample_size: self.sample_size,
            original_estimate: self.original_estimate,
            jackknife_average: self.jackknife_average(),
            bias_estimate: self.bias_estimate(),
            bias_corrected_estimate: self.bias_corrected_estimate(),
            std_error_estimate: self.std_error_estimate(),
        }
    }
}

/// Serializable record of a jackknife evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JackknifeEstimate {
    /// Number of observations in the original data.
    pub sample_size: usize,
    /// The estimator applied to the full data.
    pub original_estimate: f64,
    /// Mean of the leave-one-out estimates.
    pub jackknife_average: f64,
    /// Jackknife bias estimate.
    pub bias_estimate: f64,
    /// Original estimate with the jackknife bias removed.
    pub bias_corrected_estimate: f64,
    /// Jackknife standard error.
    pub std_error_estimate: f64,
}
