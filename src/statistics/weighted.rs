//! Weighted averages for time-persistent observations.
//!
//! Quantities like queue length or inventory level hold a value for a
//! duration rather than occurring at a point, so their average must weight
//! each value by how long it persisted. [`WeightedStatistic`] accumulates
//! `sum(w * x) / sum(w)` in one pass.

use crate::statistics::summary::SummaryStatistics;

/// One-pass weighted-average accumulator.
///
/// A (value, weight) pair is missing when either component is non-finite
/// or the weight is not strictly positive; missing pairs are tallied and
/// otherwise ignored.
///
/// Only the weighted mean, extremes, and counts are defined. The central
/// moments, lag-1 diagnostics, and the interval machinery built on them
/// answer NaN, since a single weighted pass does not support them.
///
/// # Example
///
/// ```
/// use simstat::{SummaryStatistics, WeightedStatistic};
///
/// let mut queue_length = WeightedStatistic::new();
/// queue_length.collect(0.0, 2.5); // empty for 2.5 time units
/// queue_length.collect(2.0, 1.5); // two waiting for 1.5
/// assert!((queue_length.average() - 0.75).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct WeightedStatistic {
    name: Option<String>,
    count: f64,
    weighted_sum: f64,
    sum_of_weights: f64,
    weighted_sum_of_squares: f64,
    min: f64,
    max: f64,
    last_value: f64,
    last_weight: f64,
    num_missing: f64,
}

impl Default for WeightedStatistic {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightedStatistic {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            name: None,
            count: 0.0,
            weighted_sum: 0.0,
            sum_of_weights: 0.0,
            weighted_sum_of_squares: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            last_value: f64::NAN,
            last_weight: f64::NAN,
            num_missing: 0.0,
        }
    }

    /// Attach a name for reports and snapshots.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Collect one (value, weight) pair.
    pub fn collect(&mut self, x: f64, weight: f64) {
        if !x.is_finite() || !weight.is_finite() || weight <= 0.0 {
            self.num_missing += 1.0;
            return;
        }
        self.count += 1.0;
        self.weighted_sum += weight * x;
        self.sum_of_weights += weight;
        self.weighted_sum_of_squares += weight * x * x;
        if x < self.min {
            self.min = x;
        }
        if x > self.max {
            self.max = x;
        }
        self.last_value = x;
        self.last_weight = weight;
    }

    /// The weighted mean `sum(w * x) / sum(w)`, NaN before any valid pair.
    pub fn weighted_average(&self) -> f64 {
        if self.sum_of_weights <= 0.0 {
            return f64::NAN;
        }
        self.weighted_sum / self.sum_of_weights
    }

    /// Running `sum(w * x)`.
    pub fn weighted_sum(&self) -> f64 {
        self.weighted_sum
    }

    /// Running `sum(w)`.
    pub fn sum_of_weights(&self) -> f64 {
        self.sum_of_weights
    }

    /// Running `sum(w * x * x)`.
    pub fn weighted_sum_of_squares(&self) -> f64 {
        self.weighted_sum_of_squares
    }

    /// Most recent valid value, NaN before any.
    pub fn last_value(&self) -> f64 {
        self.last_value
    }

    /// Most recent valid weight, NaN before any.
    pub fn last_weight(&self) -> f64 {
        self.last_weight
    }

    /// Return to the empty state, keeping the name.
    pub fn reset(&mut self) {
        let name = self.name.take();
        *self = Self::new();
        self.name = name;
    }
}

impl SummaryStatistics for WeightedStatistic {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn count(&self) -> f64 {
        self.count
    }

    /// The weighted mean, not the arithmetic mean of the values.
    fn average(&self) -> f64 {
        self.weighted_average()
    }

    fn variance(&self) -> f64 {
        f64::NAN
    }

    fn min(&self) -> f64 {
        if self.count == 0.0 {
            return f64::NAN;
        }
        self.min
    }

    fn max(&self) -> f64 {
        if self.count == 0.0 {
            return f64::NAN;
        }
        self.max
    }

    fn skewness(&self) -> f64 {
        f64::NAN
    }

    fn kurtosis(&self) -> f64 {
        f64::NAN
    }

    fn lag1_covariance(&self) -> f64 {
        f64::NAN
    }

    fn lag1_correlation(&self) -> f64 {
        f64::NAN
    }

    fn von_neumann_lag1_statistic(&self) -> f64 {
        f64::NAN
    }

    fn missing_count(&self) -> f64 {
        self.num_missing
    }
}
