//! Bootstrap and jackknife resampling for estimator uncertainty.
//!
//! The bootstrap treats the observed sample as a stand-in for the unknown
//! population: resampling it with replacement and re-applying the estimator
//! yields an empirical distribution of replicate estimates, from which bias,
//! standard error, and confidence intervals follow without distributional
//! assumptions. [`Bootstrap`] runs the procedure for scalar estimators,
//! [`MultiBootstrap`] for vector-valued ones, and [`Jackknife`] provides the
//! classic leave-one-out alternative.
//!
//! All randomness flows through a [`RandomStream`](crate::stream::RandomStream),
//! so experiments stay reproducible and support common random numbers and
//! antithetic draws.
//!
//! Reference: Efron, B. and Tibshirani, R. J. (1993). An Introduction to the
//! Bootstrap. Chapman & Hall.

mod jackknife;
mod multi;

pub use jackknife::{Jackknife, JackknifeEstimate};
pub use multi::{BootstrapEstimate, MultiBootstrap, VectorEstimator};

use crate::error::StatError;
use crate::statistics::{
    check_confidence_level, percentile_sorted, z_quantile, Interval, Statistic, SummaryStatistics,
};
use crate::stream::{sample_with_replacement, RandomStream, XoshiroStream};

/// Percentile interval: the central `level` span of the replicates.
pub(crate) fn percentile_interval(replicates: &[f64], level: f64) -> Result<Interval, StatError> {
    check_confidence_level(level)?;
    if replicates.is_empty() {
        return Ok(Interval::nan());
    }
    let mut sorted = replicates.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    let alpha = 1.0 - level;
    Ok(Interval::new(
        percentile_sorted(&sorted, alpha / 2.0),
        percentile_sorted(&sorted, 1.0 - alpha / 2.0),
    ))
}

/// Basic interval: the percentile interval reflected about the original
/// estimate.
pub(crate) fn basic_interval(
    estimate: f64,
    replicates: &[f64],
    level: f64,
) -> Result<Interval, StatError> {
    let quantiles = percentile_interval(replicates, level)?;
    Ok(Interval::new(
        2.0 * estimate - quantiles.upper,
        2.0 * estimate - quantiles.lower,
    ))
}

/// Standard normal interval: `estimate +/- z * std_dev`.
pub(crate) fn std_normal_interval(
    estimate: f64,
    std_dev: f64,
    level: f64,
) -> Result<Interval, StatError> {
    check_confidence_level(level)?;
    let z = z_quantile(1.0 - (1.0 - level) / 2.0);
    Ok(Interval::new(estimate - z * std_dev, estimate + z * std_dev))
}

/// Bootstrap engine for scalar estimators.
///
/// Construction fixes the original data; each call to
/// [`generate_samples`](Self::generate_samples) re-applies an estimator to
/// the original data and to freshly drawn with-replacement resamples of the
/// same size, replacing any previous results. Queries then read the original
/// estimate, the replicate estimates, and intervals derived from them.
///
/// The engine owns its random stream. [`new`](Self::new) seeds one from
/// entropy; [`with_stream`](Self::with_stream) accepts a caller-built stream
/// for reproducible or coordinated experiments.
///
/// # Example
///
/// ```
/// use simstat::bootstrap::Bootstrap;
/// use simstat::stream::XoshiroStream;
///
/// let data = vec![3.1, 4.9, 2.7, 5.3, 4.1, 3.8, 5.0, 2.9];
/// let mut boot = Bootstrap::with_stream(data, XoshiroStream::new(42)).unwrap();
/// boot.generate_samples(500, |sample| {
///     sample.iter().sum::<f64>() / sample.len() as f64
/// }, false).unwrap();
///
/// let ci = boot.percentile_ci(0.95).unwrap();
/// assert!(ci.lower <= boot.original_estimate());
/// assert!(boot.original_estimate() <= ci.upper);
/// ```
#[derive(Debug, Clone)]
pub struct Bootstrap<S: RandomStream = XoshiroStream> {
    original_data: Vec<f64>,
    stream: S,
    num_samples: usize,
    original_estimate: f64,
    /// Summary over the replicate estimates.
    across: Statistic,
    replicate_estimates: Vec<f64>,
    saved_replicates: Vec<Vec<f64>>,
}

impl Bootstrap<XoshiroStream> {
    /// Create an engine over `original_data` with an entropy-seeded stream.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InsufficientData`] if the data holds fewer than
    /// two observations.
    pub fn new(original_data: Vec<f64>) -> Result<Self, StatError> {
        Self::with_stream(original_data, XoshiroStream::default())
    }
}

impl<S: RandomStream> Bootstrap<S> {
    /// Create an engine over `original_data` drawing from `stream`.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InsufficientData`] if the data holds fewer than
    /// two observations.
    pub fn with_stream(original_data: Vec<f64>, stream: S) -> Result<Self, StatError> {
        if original_data.len() < 2 {
            return Err(StatError::InsufficientData {
                required: 2,
                actual: original_data.len(),
            });
        }
        Ok(Self {
            original_data,
            stream,
            num_samples: 0,
            original_estimate: f64::NAN,
            across: Statistic::new(),
            replicate_estimates: Vec::new(),
            saved_replicates: Vec::new(),
        })
    }

    /// Run the bootstrap: `num_samples` resamples, each passed to
    /// `estimator`.
    ///
    /// Results from any previous run are discarded first. Each resample has
    /// the size of the original data and is drawn with replacement from it.
    /// With `save_replicate_data` the raw resamples are retained for
    /// inspection, at a memory cost of `num_samples` times the data size.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidReplicateCount`] unless `num_samples`
    /// is at least 2.
    pub fn generate_samples<F>(
        &mut self,
        num_samples: usize,
        estimator: F,
        save_replicate_data: bool,
    ) -> Result<(), StatError>
    where
        F: Fn(&[f64]) -> f64,
    {
        if num_samples < 2 {
            return Err(StatError::InvalidReplicateCount(num_samples));
        }
        self.num_samples = num_samples;
        self.across.reset();
        self.replicate_estimates.clear();
        self.saved_replicates.clear();
        self.replicate_estimates.reserve(num_samples);

        self.original_estimate = estimator(&self.original_data);
        let size = self.original_data.len();
        for _ in 0..num_samples {
            let sample = sample_with_replacement(&self.original_data, size, &mut self.stream);
            let estimate = estimator(&sample);
            self.across.collect(estimate);
            self.replicate_estimates.push(estimate);
            if save_replicate_data {
                self.saved_replicates.push(sample);
            }
        }
        Ok(())
    }

    /// Percentile confidence interval over the replicate estimates.
    ///
    /// NaN bounds before any [`generate_samples`](Self::generate_samples)
    /// run.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidConfidenceLevel`] if `level` is outside
    /// (0, 1).
    pub fn percentile_ci(&self, level: f64) -> Result<Interval, StatError> {
        percentile_interval(&self.replicate_estimates, level)
    }

    /// Basic (reflected percentile) confidence interval.
    ///
    /// NaN bounds before any [`generate_samples`](Self::generate_samples)
    /// run.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidConfidenceLevel`] if `level` is outside
    /// (0, 1).
    pub fn basic_ci(&self, level: f64) -> Result<Interval, StatError> {
        basic_interval(self.original_estimate, &self.replicate_estimates, level)
    }

    /// Normal-approximation confidence interval centered on the original
    /// estimate with the across-replicate standard deviation.
    ///
    /// NaN bounds before any [`generate_samples`](Self::generate_samples)
    /// run.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidConfidenceLevel`] if `level` is outside
    /// (0, 1).
    pub fn std_normal_ci(&self, level: f64) -> Result<Interval, StatError> {
        std_normal_interval(self.original_estimate, self.across.std_deviation(), level)
    }

    /// The estimator applied to the original data. NaN before any run.
    pub fn original_estimate(&self) -> f64 {
        self.original_estimate
    }

    /// Replicate estimates from the last run, in generation order.
    pub fn replicate_estimates(&self) -> &[f64] {
        &self.replicate_estimates
    }

    /// Summary statistics over the replicate estimates.
    pub fn across_replicate_statistics(&self) -> &Statistic {
        &self.across
    }

    /// Raw resamples retained by the last run, empty unless saving was
    /// requested.
    pub fn saved_replicate_data(&self) -> &[Vec<f64>] {
        &self.saved_replicates
    }

    /// Replicate count of the last run, zero before any.
    pub fn num_bootstrap_samples(&self) -> usize {
        self.num_samples
    }

    /// Bootstrap bias estimate: replicate average minus original estimate.
    pub fn bias_estimate(&self) -> f64 {
        self.across.average() - self.original_estimate
    }

    /// Bootstrap standard error: across-replicate standard deviation.
    pub fn std_error_estimate(&self) -> f64 {
        self.across.std_deviation()
    }

    /// The data the engine resamples from.
    pub fn original_data(&self) -> &[f64] {
        &self.original_data
    }

    /// Mutable access to the owned stream, for substream advancement or
    /// antithetic switching between runs.
    pub fn stream_mut(&mut self) -> &mut S {
        &mut self.stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean(sample: &[f64]) -> f64 {
        sample.iter().sum::<f64>() / sample.len() as f64
    }

    #[test]
    fn test_percentile_interval_type7() {
        // Five replicates, level 0.8: quantiles at p = 0.1 and p = 0.9
        // interpolate to 8.4 and 11.6.
        let replicates = [10.0, 8.0, 12.0, 9.0, 11.0];
        let interval = percentile_interval(&replicates, 0.8).unwrap();
        assert!((interval.lower - 8.4).abs() < 1e-12);
        assert!((interval.upper - 11.6).abs() < 1e-12);
    }

    #[test]
    fn test_basic_interval_mirrors_percentile() {
        // With the original estimate at the center of symmetric replicates,
        // reflection reproduces the percentile interval exactly.
        let replicates = [8.0, 9.0, 10.0, 11.0, 12.0];
        let percentile = percentile_interval(&replicates, 0.8).unwrap();
        let basic = basic_interval(10.0, &replicates, 0.8).unwrap();
        assert!((basic.lower - percentile.lower).abs() < 1e-12);
        assert!((basic.upper - percentile.upper).abs() < 1e-12);
    }

    #[test]
    fn test_interval_helpers_check_level() {
        let replicates = [1.0, 2.0, 3.0];
        assert_eq!(
            percentile_interval(&replicates, 0.0).unwrap_err(),
            StatError::InvalidConfidenceLevel(0.0)
        );
        assert!(basic_interval(2.0, &replicates, 1.0).is_err());
        assert!(std_normal_interval(2.0, 1.0, 1.5).is_err());
    }

    #[test]
    fn test_empty_replicates_give_nan_interval() {
        let interval = percentile_interval(&[], 0.95).unwrap();
        assert!(interval.lower.is_nan());
        assert!(interval.upper.is_nan());
    }

    #[test]
    fn test_std_normal_interval() {
        let interval = std_normal_interval(10.0, 2.0, 0.95).unwrap();
        // z(0.975) = 1.959964...
        assert!((interval.lower - (10.0 - 1.959964 * 2.0)).abs() < 1e-4);
        assert!((interval.upper - (10.0 + 1.959964 * 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_construction_requires_two_observations() {
        assert_eq!(
            Bootstrap::new(vec![1.0]).unwrap_err(),
            StatError::InsufficientData {
                required: 2,
                actual: 1,
            }
        );
        assert!(Bootstrap::new(vec![]).is_err());
        assert!(Bootstrap::new(vec![1.0, 2.0]).is_ok());
    }

    #[test]
    fn test_generate_requires_two_samples() {
        let data = vec![1.0, 2.0, 3.0];
        let mut boot = Bootstrap::with_stream(data, XoshiroStream::new(1)).unwrap();
        assert_eq!(
            boot.generate_samples(1, mean, false).unwrap_err(),
            StatError::InvalidReplicateCount(1)
        );
        assert!(boot.generate_samples(0, mean, false).is_err());
    }

    #[test]
    fn test_generate_populates_state() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let mut boot = Bootstrap::with_stream(data, XoshiroStream::new(7)).unwrap();
        boot.generate_samples(50, mean, false).unwrap();

        assert!((boot.original_estimate() - 5.5).abs() < 1e-12);
        assert_eq!(boot.replicate_estimates().len(), 50);
        assert_eq!(boot.num_bootstrap_samples(), 50);
        assert_eq!(boot.across_replicate_statistics().count(), 50.0);
        assert!(boot.bias_estimate().is_finite());
        assert!(boot.std_error_estimate() > 0.0);
        assert!(boot.saved_replicate_data().is_empty());
        // Every replicate mean stays within the data range.
        for &estimate in boot.replicate_estimates() {
            assert!((1.0..=10.0).contains(&estimate));
        }
    }

    #[test]
    fn test_saved_replicates_have_original_size() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let mut boot = Bootstrap::with_stream(data, XoshiroStream::new(3)).unwrap();
        boot.generate_samples(5, mean, true).unwrap();

        assert_eq!(boot.saved_replicate_data().len(), 5);
        for sample in boot.saved_replicate_data() {
            assert_eq!(sample.len(), 4);
            assert!(sample.iter().all(|x| [1.0, 2.0, 3.0, 4.0].contains(x)));
        }
    }

    #[test]
    fn test_rerun_replaces_results() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let mut boot = Bootstrap::with_stream(data, XoshiroStream::new(9)).unwrap();
        boot.generate_samples(10, mean, true).unwrap();
        boot.generate_samples(20, mean, false).unwrap();

        assert_eq!(boot.replicate_estimates().len(), 20);
        assert_eq!(boot.num_bootstrap_samples(), 20);
        assert_eq!(boot.across_replicate_statistics().count(), 20.0);
        assert!(boot.saved_replicate_data().is_empty());
    }

    #[test]
    fn test_intervals_before_generation_are_nan() {
        let boot = Bootstrap::with_stream(vec![1.0, 2.0], XoshiroStream::new(1)).unwrap();
        assert!(boot.original_estimate().is_nan());
        assert!(!boot.percentile_ci(0.95).unwrap().is_finite());
        assert!(!boot.basic_ci(0.95).unwrap().is_finite());
        assert!(!boot.std_normal_ci(0.95).unwrap().is_finite());
    }
}
