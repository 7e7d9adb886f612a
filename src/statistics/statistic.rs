//! Single-pass accumulation of summary statistics.
//!
//! [`Statistic`] folds an observation stream into count, mean, central
//! moments 2 through 4, extremes, and the lag-1 cross-product sum in one
//! pass with O(1) state, generalizing Welford's recurrence to the higher
//! moments. Nothing is recomputed from raw data: every derived quantity is
//! read on demand from the accumulated state.
//!
//! Missing observations (NaN or infinite) are tallied and excluded. They
//! never enter the moment recurrence, so a stream with gaps yields exactly
//! the statistics of its non-missing subsequence.

use crate::statistics::summary::SummaryStatistics;

/// Online accumulator of count, mean, central moments 2 to 4, extremes,
/// and lag-1 serial statistics.
///
/// Counts are carried as integer-valued `f64` so they combine directly with
/// the moment arithmetic. All derived quantities are obtained through the
/// [`SummaryStatistics`] trait; undefined ones read as NaN.
///
/// # Example
///
/// ```
/// use simstat::{Statistic, SummaryStatistics};
///
/// let mut stat = Statistic::with_name("service time");
/// stat.collect_all(&[2.0, 4.0, 6.0]);
/// assert_eq!(stat.count(), 3.0);
/// assert!((stat.average() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Statistic {
    name: Option<String>,
    /// Number of non-missing observations, integer-valued.
    count: f64,
    /// Running mean of the non-missing observations.
    mean: f64,
    /// Second central moment, averaged by count.
    moment2: f64,
    /// Third central moment, averaged by count.
    moment3: f64,
    /// Fourth central moment, averaged by count.
    moment4: f64,
    min: f64,
    max: f64,
    /// First non-missing observation; NaN until one arrives.
    first_value: f64,
    /// Most recent non-missing observation; NaN until one arrives.
    last_value: f64,
    /// Sum of x[i] * x[i-1] over consecutive non-missing observations.
    sum_cross_lag1: f64,
    num_negative: f64,
    num_zero: f64,
    num_missing: f64,
}

impl Default for Statistic {
    fn default() -> Self {
        Self::new()
    }
}

impl Statistic {
    /// Create an empty, unnamed accumulator.
    pub fn new() -> Self {
        Self {
            name: None,
            count: 0.0,
            mean: 0.0,
            moment2: 0.0,
            moment3: 0.0,
            moment4: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            first_value: f64::NAN,
            last_value: f64::NAN,
            sum_cross_lag1: 0.0,
            num_negative: 0.0,
            num_zero: 0.0,
            num_missing: 0.0,
        }
    }

    /// Create an empty accumulator with a name for reports and snapshots.
    pub fn with_name(name: impl Into<String>) -> Self {
        let mut stat = Self::new();
        stat.name = Some(name.into());
        stat
    }

    /// Create an accumulator pre-loaded with `data`.
    pub fn from_data(data: &[f64]) -> Self {
        let mut stat = Self::new();
        stat.collect_all(data);
        stat
    }

    /// Collect one observation.
    ///
    /// A NaN or infinite value is missing: it increments the missing tally
    /// and changes nothing else. Otherwise the count, mean, and central
    /// moments advance by the one-pass recurrence. The higher moments are
    /// updated from the old state before the mean moves; reordering these
    /// updates corrupts the recurrence.
    pub fn collect(&mut self, x: f64) {
        if !x.is_finite() {
            self.num_missing += 1.0;
            return;
        }
        if x < 0.0 {
            self.num_negative += 1.0;
        }
        if x == 0.0 {
            self.num_zero += 1.0;
        }
        if self.count == 0.0 {
            self.first_value = x;
        } else {
            self.sum_cross_lag1 += x * self.last_value;
        }

        let n = self.count;
        let n1 = n + 1.0;
        let n2 = n * n;
        let delta = (self.mean - x) / n1;
        let d2 = delta * delta;
        let d3 = delta * d2;
        let r1 = n / n1;
        self.moment4 = r1
            * ((1.0 + n * n2) * d2 * d2
                + 6.0 * self.moment2 * d2
                + 4.0 * self.moment3 * delta
                + self.moment4);
        self.moment3 = r1 * ((1.0 - n2) * d3 + 3.0 * self.moment2 * delta + self.moment3);
        self.moment2 = r1 * ((1.0 + n) * d2 + self.moment2);
        self.mean -= delta;
        self.count = n1;

        self.min = self.min.min(x);
        self.max = self.max.max(x);
        self.last_value = x;
    }

    /// Collect every value in `data`, in order.
    pub fn collect_all(&mut self, data: &[f64]) {
        for &x in data {
            self.collect(x);
        }
    }

    /// Collect an indicator observation: 1.0 for `true`, 0.0 for `false`.
    ///
    /// Useful for tallying proportions; the average is then the observed
    /// fraction of `true`.
    pub fn collect_bool(&mut self, value: bool) {
        self.collect(if value { 1.0 } else { 0.0 });
    }

    /// Restore the empty state, keeping the name.
    pub fn reset(&mut self) {
        let name = self.name.take();
        *self = Self::new();
        self.name = name;
    }

    /// Sum of the non-missing observations, `average * count`.
    pub fn sum(&self) -> f64 {
        self.mean * self.count
    }

    /// First non-missing observation. NaN before one arrives.
    pub fn first_value(&self) -> f64 {
        self.first_value
    }

    /// Most recent non-missing observation. NaN before one arrives.
    pub fn last_value(&self) -> f64 {
        self.last_value
    }

    /// Number of strictly negative observations.
    pub fn negative_count(&self) -> f64 {
        self.num_negative
    }

    /// Number of observations equal to zero.
    pub fn zero_count(&self) -> f64 {
        self.num_zero
    }

    /// Second central moment, averaged by count.
    pub fn moment2(&self) -> f64 {
        self.moment2
    }

    /// Third central moment, averaged by count.
    pub fn moment3(&self) -> f64 {
        self.moment3
    }

    /// Fourth central moment, averaged by count.
    pub fn moment4(&self) -> f64 {
        self.moment4
    }

    /// Sum of squared deviations from the mean, `moment2 * count`.
    pub fn deviation_sum_of_squares(&self) -> f64 {
        self.moment2 * self.count
    }
}

impl SummaryStatistics for Statistic {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn count(&self) -> f64 {
        self.count
    }

    fn average(&self) -> f64 {
        if self.count < 1.0 {
            return f64::NAN;
        }
        self.mean
    }

    fn variance(&self) -> f64 {
        if self.count < 2.0 {
            return f64::NAN;
        }
        self.moment2 * self.count / (self.count - 1.0)
    }

    fn min(&self) -> f64 {
        self.min
    }

    fn max(&self) -> f64 {
        self.max
    }

    fn skewness(&self) -> f64 {
        if self.count < 3.0 {
            return f64::NAN;
        }
        let n = self.count;
        let s = self.variance().sqrt();
        let s3 = s * s * s;
        n * n * self.moment3 / ((n - 1.0) * (n - 2.0) * s3)
    }

    fn kurtosis(&self) -> f64 {
        if self.count < 4.0 {
            return f64::NAN;
        }
        let n = self.count;
        let n1 = n - 1.0;
        let v = self.variance();
        let d = n1 * (n - 2.0) * (n - 3.0) * v * v;
        (n * n * (n + 1.0) * self.moment4 - 3.0 * n1 * n1 * n1 * v * v) / d
    }

    fn lag1_covariance(&self) -> f64 {
        if self.count <= 2.0 {
            return f64::NAN;
        }
        let n = self.count;
        (self.sum_cross_lag1 - (n + 1.0) * self.mean * self.mean
            + self.mean * (self.first_value + self.last_value))
            / n
    }

    fn lag1_correlation(&self) -> f64 {
        if self.count <= 2.0 {
            return f64::NAN;
        }
        self.lag1_covariance() / self.variance()
    }

    fn von_neumann_lag1_statistic(&self) -> f64 {
        if self.count <= 2.0 {
            return f64::NAN;
        }
        let n = self.count;
        // Ratio of the lag-1 autocovariance to the population moment, with
        // an end-point correction for the first and last observations.
        let r1 = self.lag1_covariance() / self.moment2;
        let ends = (self.first_value - self.mean).powi(2) + (self.last_value - self.mean).powi(2);
        let b = ends / (2.0 * n * self.moment2);
        ((n * n - 1.0) / (n - 2.0)).sqrt() * (r1 + b)
    }

    fn missing_count(&self) -> f64 {
        self.num_missing
    }
}
