//! Fixed-bin histograms with running summary statistics.
//!
//! [`Histogram`] tabulates observations into half-open bins defined by a
//! sorted break-point sequence, while an embedded [`Statistic`] keeps the
//! usual one-pass summaries over the same stream. Values outside the binned
//! range still contribute to the summaries; they are tallied separately as
//! underflow or overflow.

use serde::{Deserialize, Serialize};

use crate::error::StatError;
use crate::statistics::statistic::Statistic;
use crate::statistics::summary::SummaryStatistics;

/// One tabulated bin covering `[lower, upper)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Exclusive upper edge.
    pub upper: f64,
    /// Observations that landed in the bin.
    pub count: u64,
}

/// Histogram over `break_points.len() - 1` half-open bins.
///
/// Bin `i` covers `[break_points[i], break_points[i + 1])`. Observations
/// below the first break point count as underflow, observations at or above
/// the last count as overflow, and missing values (NaN or infinite) are
/// tallied by the embedded summary accumulator.
///
/// # Example
///
/// ```
/// use simstat::{Histogram, SummaryStatistics};
///
/// let mut hist = Histogram::uniform(0.0, 10.0, 5).unwrap();
/// hist.collect(3.0);
/// hist.collect(17.0);
/// hist.collect(62.0);
/// assert_eq!(hist.bin_counts(), &[1, 1, 0, 0, 0]);
/// assert_eq!(hist.overflow_count(), 1);
/// assert_eq!(hist.count(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct Histogram {
    name: Option<String>,
    break_points: Vec<f64>,
    bin_counts: Vec<u64>,
    underflow: u64,
    overflow: u64,
    stat: Statistic,
}

impl Histogram {
    /// Create a histogram from explicit break points.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidBreakPoints`] unless the sequence holds
    /// at least two finite, strictly increasing values.
    pub fn new(break_points: Vec<f64>) -> Result<Self, StatError> {
        if break_points.len() < 2 {
            return Err(StatError::InvalidBreakPoints(
                "need at least two break points",
            ));
        }
        if break_points.iter().any(|b| !b.is_finite()) {
            return Err(StatError::InvalidBreakPoints(
                "break points must be finite",
            ));
        }
        if break_points.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(StatError::InvalidBreakPoints(
                "break points must be strictly increasing",
            ));
        }
        let num_bins = break_points.len() - 1;
        Ok(Self {
            name: None,
            break_points,
            bin_counts: vec![0; num_bins],
            underflow: 0,
            overflow: 0,
            stat: Statistic::new(),
        })
    }

    /// Create a histogram of `num_bins` equal-width bins starting at
    /// `lower_limit`.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidBreakPoints`] if `lower_limit` or
    /// `bin_width` is non-finite, `bin_width` is not positive, or
    /// `num_bins` is zero.
    pub fn uniform(lower_limit: f64, bin_width: f64, num_bins: usize) -> Result<Self, StatError> {
        if !lower_limit.is_finite() {
            return Err(StatError::InvalidBreakPoints(
                "lower limit must be finite",
            ));
        }
        if !bin_width.is_finite() || bin_width <= 0.0 {
            return Err(StatError::InvalidBreakPoints(
                "bin width must be finite and positive",
            ));
        }
        if num_bins == 0 {
            return Err(StatError::InvalidBreakPoints(
                "need at least one bin",
            ));
        }
        let break_points = (0..=num_bins)
            .map(|i| lower_limit + i as f64 * bin_width)
            .collect();
        Self::new(break_points)
    }

    /// Attach a name for reports and snapshots.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Collect one observation.
    ///
    /// The embedded summary accumulator sees every observation; only finite
    /// values are routed to a bin or to the underflow/overflow tallies.
    pub fn collect(&mut self, x: f64) {
        self.stat.collect(x);
        if !x.is_finite() {
            return;
        }
        let first = self.break_points[0];
        let last = self.break_points[self.break_points.len() - 1];
        if x < first {
            self.underflow += 1;
        } else if x >= last {
            self.overflow += 1;
        } else {
            // Number of break points <= x; at least 1 and at most num_bins
            // here, so the subtraction stays in range.
            let idx = self.break_points.partition_point(|b| *b <= x) - 1;
            self.bin_counts[idx] += 1;
        }
    }

    /// Collect every value in `data`, in order.
    pub fn collect_all(&mut self, data: &[f64]) {
        for &x in data {
            self.collect(x);
        }
    }

    /// The tabulated bins with their edges, in order.
    pub fn bins(&self) -> Vec<HistogramBin> {
        self.break_points
            .windows(2)
            .zip(&self.bin_counts)
            .map(|(edges, &count)| HistogramBin {
                lower: edges[0],
                upper: edges[1],
                count,
            })
            .collect()
    }

    /// Raw per-bin counts, in bin order.
    pub fn bin_counts(&self) -> &[u64] {
        &self.bin_counts
    }

    /// The break points the histogram was built from.
    pub fn break_points(&self) -> &[f64] {
        &self.break_points
    }

    /// Number of bins.
    pub fn num_bins(&self) -> usize {
        self.bin_counts.len()
    }

    /// Finite observations below the first break point.
    pub fn underflow_count(&self) -> u64 {
        self.underflow
    }

    /// Finite observations at or above the last break point.
    pub fn overflow_count(&self) -> u64 {
        self.overflow
    }

    /// Summary statistics over every collected observation.
    pub fn statistic(&self) -> &Statistic {
        &self.stat
    }

    /// Clear all tallies, keeping the break points and the name.
    pub fn reset(&mut self) {
        self.bin_counts.iter_mut().for_each(|c| *c = 0);
        self.underflow = 0;
        self.overflow = 0;
        self.stat.reset();
    }
}

impl SummaryStatistics for Histogram {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn count(&self) -> f64 {
        self.stat.count()
    }

    fn average(&self) -> f64 {
        self.stat.average()
    }

    fn variance(&self) -> f64 {
        self.stat.variance()
    }

    fn min(&self) -> f64 {
        self.stat.min()
    }

    fn max(&self) -> f64 {
        self.stat.max()
    }

    fn skewness(&self) -> f64 {
        self.stat.skewness()
    }

    fn kurtosis(&self) -> f64 {
        self.stat.kurtosis()
    }

    fn lag1_covariance(&self) -> f64 {
        self.stat.lag1_covariance()
    }

    fn lag1_correlation(&self) -> f64 {
        self.stat.lag1_correlation()
    }

    fn von_neumann_lag1_statistic(&self) -> f64 {
        self.stat.von_neumann_lag1_statistic()
    }

    fn missing_count(&self) -> f64 {
        self.stat.missing_count()
    }
}
