//! The read-only statistical query surface shared by every accumulator.
//!
//! [`SummaryStatistics`] is the single contract through which reporting and
//! export collaborators read results: counts, moments, extremes, the lag-1
//! diagnostics, confidence intervals, and an immutable [`StatisticSnapshot`]
//! suitable for serialization. Each concrete accumulator implements the
//! required accessors; interval construction is provided once here, on top
//! of the Student-t inverse CDF.
//!
//! Statistics whose preconditions are not met return `f64::NAN` rather than
//! failing. A confidence level outside (0, 1) is the one exception: that is
//! a caller error and is reported as [`StatError::InvalidConfidenceLevel`].

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::error::StatError;

/// Confidence level used when a caller has no preference of their own.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// A closed interval `[lower, upper]`.
///
/// Confidence bounds are reported with this record. A degenerate interval
/// with NaN bounds marks a statistic that is undefined for the data seen so
/// far (for example an interval requested before any replicates exist).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl Interval {
    /// Create an interval from its bounds.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// The degenerate NaN interval.
    pub fn nan() -> Self {
        Self {
            lower: f64::NAN,
            upper: f64::NAN,
        }
    }

    /// Width of the interval, `upper - lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `x` lies inside the interval (bounds included).
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    /// Whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// Immutable record of every summary quantity at a point in time.
///
/// This is the export channel: serialize it, ship it, archive it. The
/// interval and half-width are evaluated at the `confidence_level` the
/// snapshot was taken with. Undefined quantities hold NaN, which
/// `serde_json` renders as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticSnapshot {
    /// Name of the accumulator, if one was given.
    pub name: Option<String>,
    /// Number of non-missing observations.
    pub count: f64,
    /// Arithmetic average.
    pub average: f64,
    /// Sample variance (n - 1 denominator).
    pub variance: f64,
    /// Sample standard deviation.
    pub std_deviation: f64,
    /// Standard error of the average.
    pub std_error: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
    /// Bias-corrected sample skewness.
    pub skewness: f64,
    /// Bias-corrected excess kurtosis.
    pub kurtosis: f64,
    /// Lag-1 autocovariance of the observation sequence.
    pub lag1_covariance: f64,
    /// Lag-1 autocorrelation of the observation sequence.
    pub lag1_correlation: f64,
    /// Von Neumann test statistic for lag-1 independence.
    pub von_neumann_lag1_statistic: f64,
    /// Number of missing (NaN or infinite) observations.
    pub missing_count: f64,
    /// Confidence level the interval below was built at.
    pub confidence_level: f64,
    /// Student-t half-width at `confidence_level`.
    pub half_width: f64,
    /// Confidence interval `average +/- half_width`.
    pub interval: Interval,
}

/// Read-only summary queries over collected observations.
///
/// Implemented by [`Statistic`](crate::Statistic),
/// [`BatchStatistic`](crate::BatchStatistic),
/// [`WeightedStatistic`](crate::WeightedStatistic), and
/// [`Histogram`](crate::Histogram). Accumulators that have no meaningful
/// definition for a quantity (the weighted tallies have no central moments,
/// for instance) return NaN for it, keeping the surface uniform for
/// reporting collaborators.
pub trait SummaryStatistics {
    /// Name of the accumulator, if one was given.
    fn name(&self) -> Option<&str>;

    /// Number of non-missing observations collected.
    fn count(&self) -> f64;

    /// Arithmetic average. NaN before the first observation.
    fn average(&self) -> f64;

    /// Sample variance with the n - 1 denominator. NaN if `count < 2`.
    fn variance(&self) -> f64;

    /// Smallest observation. Positive infinity before the first observation.
    fn min(&self) -> f64;

    /// Largest observation. Negative infinity before the first observation.
    fn max(&self) -> f64;

    /// Bias-corrected sample skewness. NaN if `count < 3`.
    fn skewness(&self) -> f64;

    /// Bias-corrected excess kurtosis. NaN if `count < 4`.
    fn kurtosis(&self) -> f64;

    /// Lag-1 autocovariance of the collected sequence. NaN if `count <= 2`.
    fn lag1_covariance(&self) -> f64;

    /// Lag-1 autocorrelation, `lag1_covariance / variance`. NaN if
    /// `count <= 2`.
    fn lag1_correlation(&self) -> f64;

    /// Von Neumann lag-1 test statistic. NaN if `count <= 2`.
    ///
    /// Under independence this is approximately standard normal, so large
    /// absolute values flag serial correlation in the collected sequence.
    fn von_neumann_lag1_statistic(&self) -> f64;

    /// Number of missing (NaN or infinite) observations seen.
    fn missing_count(&self) -> f64;

    /// Sample standard deviation.
    fn std_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Standard error of the average, `std_deviation / sqrt(count)`.
    fn std_error(&self) -> f64 {
        self.std_deviation() / self.count().sqrt()
    }

    /// Student-t confidence half-width at `level`.
    ///
    /// Uses `count - 1` degrees of freedom. NaN if `count <= 1`.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidConfidenceLevel`] unless `0 < level < 1`.
    fn half_width(&self, level: f64) -> Result<f64, StatError> {
        check_confidence_level(level)?;
        let n = self.count();
        if n <= 1.0 {
            return Ok(f64::NAN);
        }
        let p = 1.0 - (1.0 - level) / 2.0;
        Ok(t_quantile(n - 1.0, p) * self.std_error())
    }

    /// Confidence interval `average +/- half_width(level)`.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidConfidenceLevel`] unless `0 < level < 1`.
    fn confidence_interval(&self, level: f64) -> Result<Interval, StatError> {
        let half_width = self.half_width(level)?;
        let average = self.average();
        Ok(Interval::new(average - half_width, average + half_width))
    }

    /// Capture every summary quantity into an immutable snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidConfidenceLevel`] unless `0 < level < 1`.
    fn snapshot(&self, level: f64) -> Result<StatisticSnapshot, StatError> {
        let half_width = self.half_width(level)?;
        let average = self.average();
        Ok(StatisticSnapshot {
            name: self.name().map(str::to_string),
            count: self.count(),
            average,
            variance: self.variance(),
            std_deviation: self.std_deviation(),
            std_error: self.std_error(),
            min: self.min(),
            max: self.max(),
            skewness: self.skewness(),
            kurtosis: self.kurtosis(),
            lag1_covariance: self.lag1_covariance(),
            lag1_correlation: self.lag1_correlation(),
            von_neumann_lag1_statistic: self.von_neumann_lag1_statistic(),
            missing_count: self.missing_count(),
            confidence_level: level,
            half_width,
            interval: Interval::new(average - half_width, average + half_width),
        })
    }
}

/// Validate a confidence level.
pub(crate) fn check_confidence_level(level: f64) -> Result<(), StatError> {
    if !(level > 0.0 && level < 1.0) {
        return Err(StatError::InvalidConfidenceLevel(level));
    }
    Ok(())
}

/// Inverse CDF of the Student-t distribution with `df` degrees of freedom.
///
/// Returns NaN for a non-positive `df`.
pub(crate) fn t_quantile(df: f64, p: f64) -> f64 {
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => dist.inverse_cdf(p),
        Err(_) => f64::NAN,
    }
}

/// Inverse CDF of the standard normal distribution.
pub(crate) fn z_quantile(p: f64) -> f64 {
    match Normal::new(0.0, 1.0) {
        Ok(dist) => dist.inverse_cdf(p),
        Err(_) => f64::NAN,
    }
}
