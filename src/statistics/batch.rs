//! Batch means for correlated observation streams.
//!
//! Raw simulation output is rarely independent, so classic interval
//! formulas applied to it understate the variance. [`BatchStatistic`]
//! groups the stream into contiguous batches and summarizes the batch
//! means instead: batch averages of a well-chosen size are approximately
//! independent, which restores the validity of the classic formulas.
//!
//! The engine is a small state machine driven by `collect`:
//!
//! - **batch close**: when the in-progress batch reaches the current batch
//!   size, its mean is recorded and fed to the across-batch accumulator.
//! - **rebatch**: when the stored batch means hit their cap, adjacent means
//!   are averaged in groups so the count drops back to the configured
//!   minimum and the batch size grows by the rebatch multiple. Memory stays
//!   bounded no matter how long the stream runs.

use serde::{Deserialize, Serialize};

use crate::error::StatError;
use crate::statistics::statistic::Statistic;
use crate::statistics::summary::SummaryStatistics;

/// Configuration for [`BatchStatistic`].
///
/// All three parameters must be at least 2. The cap on stored batch means
/// is `min_num_batches * rebatch_multiple`; reaching it triggers a rebatch.
///
/// # Example
///
/// ```
/// use simstat::BatchConfig;
///
/// let config = BatchConfig::default()
///     .with_min_num_batches(30)
///     .with_min_batch_size(8);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_num_batches(), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of batches restored after each rebatch. Default: 20.
    pub min_num_batches: usize,
    /// Initial batch size. Default: 16.
    pub min_batch_size: usize,
    /// Growth factor applied to the batch size at each rebatch. Default: 2.
    pub rebatch_multiple: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            min_num_batches: 20,
            min_batch_size: 16,
            rebatch_multiple: 2,
        }
    }
}

impl BatchConfig {
    /// Set the number of batches restored after each rebatch.
    pub fn with_min_num_batches(mut self, min_num_batches: usize) -> Self {
        self.min_num_batches = min_num_batches;
        self
    }

    /// Set the initial batch size.
    pub fn with_min_batch_size(mut self, min_batch_size: usize) -> Self {
        self.min_batch_size = min_batch_size;
        self
    }

    /// Set the batch size growth factor.
    pub fn with_rebatch_multiple(mut self, rebatch_multiple: usize) -> Self {
        self.rebatch_multiple = rebatch_multiple;
        self
    }

    /// Largest number of batch means held before a rebatch fires.
    pub fn max_num_batches(&self) -> usize {
        self.min_num_batches * self.rebatch_multiple
    }

    /// Check every parameter against its minimum.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidBatchConfig`] naming the first parameter
    /// found below 2.
    pub fn validate(&self) -> Result<(), StatError> {
        if self.min_num_batches < 2 {
            return Err(StatError::InvalidBatchConfig {
                parameter: "min_num_batches",
                value: self.min_num_batches,
                minimum: 2,
            });
        }
        if self.min_batch_size < 2 {
            return Err(StatError::InvalidBatchConfig {
                parameter: "min_batch_size",
                value: self.min_batch_size,
                minimum: 2,
            });
        }
        if self.rebatch_multiple < 2 {
            return Err(StatError::InvalidBatchConfig {
                parameter: "rebatch_multiple",
                value: self.rebatch_multiple,
                minimum: 2,
            });
        }
        Ok(())
    }
}

/// Automatic batch-means accumulator.
///
/// Observations go in one at a time through [`collect`](Self::collect);
/// every summary query ([`SummaryStatistics`]) answers over the batch
/// means, not the raw stream. So `count()` is the number of completed
/// batches, `average()` is the grand batch-mean average, and the lag-1 and
/// Von Neumann diagnostics measure whether the batch means themselves still
/// carry serial correlation (if they do, the batches are too small).
///
/// # Example
///
/// ```
/// use simstat::{BatchConfig, BatchStatistic, SummaryStatistics};
///
/// let config = BatchConfig::default()
///     .with_min_num_batches(2)
///     .with_min_batch_size(2);
/// let mut batches = BatchStatistic::new(config).unwrap();
/// for x in [1.0, 2.0, 3.0, 4.0] {
///     batches.collect(x);
/// }
/// assert_eq!(batches.num_batches(), 2);
/// assert!((batches.average() - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BatchStatistic {
    config: BatchConfig,
    name: Option<String>,
    /// Size a batch must reach before it closes; grows on rebatch.
    current_batch_size: usize,
    num_rebatches: usize,
    /// Means of the completed batches, oldest first.
    batch_means: Vec<f64>,
    /// Accumulator over the batch in progress.
    within: Statistic,
    /// Accumulator over the completed batch means.
    across: Statistic,
    /// Non-missing observations seen over the engine's lifetime.
    total_count: f64,
    num_missing: f64,
}

impl BatchStatistic {
    /// Create an engine with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidBatchConfig`] if any parameter is
    /// below 2.
    pub fn new(config: BatchConfig) -> Result<Self, StatError> {
        config.validate()?;
        Ok(Self {
            config,
            name: None,
            current_batch_size: config.min_batch_size,
            num_rebatches: 0,
            batch_means: Vec::with_capacity(config.max_num_batches()),
            within: Statistic::new(),
            across: Statistic::new(),
            total_count: 0.0,
            num_missing: 0.0,
        })
    }

    /// Attach a name for reports and snapshots.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Collect one raw observation.
    ///
    /// Missing values (NaN or infinite) are tallied and never reach the
    /// batching machinery. A finite value joins the batch in progress and
    /// may trigger a batch close and, at the cap, a rebatch.
    pub fn collect(&mut self, x: f64) {
        if !x.is_finite() {
            self.num_missing += 1.0;
            return;
        }
        self.total_count += 1.0;
        self.within.collect(x);
        if self.within.count() >= self.current_batch_size as f64 {
            self.close_batch();
        }
    }

    /// Collect every value in `data`, in order.
    pub fn collect_all(&mut self, data: &[f64]) {
        for &x in data {
            self.collect(x);
        }
    }

    /// Record the completed batch mean and start a new batch.
    fn close_batch(&mut self) {
        let mean = self.within.average();
        self.batch_means.push(mean);
        self.across.collect(mean);
        self.within.reset();
        if self.batch_means.len() == self.config.max_num_batches() {
            self.rebatch();
        }
    }

    /// Collapse the stored means into `min_num_batches` coarser ones.
    fn rebatch(&mut self) {
        self.num_rebatches += 1;
        self.current_batch_size *= self.config.rebatch_multiple;
        self.across.reset();

        let group = self.config.rebatch_multiple;
        let mut coarser = Vec::with_capacity(self.config.min_num_batches);
        for chunk in self.batch_means.chunks_exact(group) {
            let mut scratch = Statistic::new();
            scratch.collect_all(chunk);
            let mean = scratch.average();
            self.across.collect(mean);
            coarser.push(mean);
        }
        self.batch_means = coarser;
    }

    /// Partition the current batch means into exactly `k` groups and return
    /// the group averages.
    ///
    /// The group size is `num_batches / k` rounded down; trailing means
    /// that do not fill a whole group are left out of the partition. The
    /// engine itself is not touched, unlike the internal rebatch event.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidBatchPartition`] unless
    /// `1 <= k <= num_batches`.
    pub fn reform_batches(&self, k: usize) -> Result<Vec<f64>, StatError> {
        let available = self.batch_means.len();
        if k < 1 || k > available {
            return Err(StatError::InvalidBatchPartition {
                requested: k,
                available,
            });
        }
        let group = available / k;
        let mut means = Vec::with_capacity(k);
        for chunk in self.batch_means[..k * group].chunks_exact(group) {
            let mut scratch = Statistic::new();
            scratch.collect_all(chunk);
            means.push(scratch.average());
        }
        Ok(means)
    }

    /// Means of the completed batches, oldest first.
    pub fn batch_means(&self) -> &[f64] {
        &self.batch_means
    }

    /// Number of completed batches currently stored.
    pub fn num_batches(&self) -> usize {
        self.batch_means.len()
    }

    /// Observations a batch must hold before it closes.
    pub fn current_batch_size(&self) -> usize {
        self.current_batch_size
    }

    /// Number of rebatch events over the engine's lifetime.
    pub fn num_rebatches(&self) -> usize {
        self.num_rebatches
    }

    /// Non-missing observations collected over the engine's lifetime.
    pub fn total_count(&self) -> f64 {
        self.total_count
    }

    /// Observations sitting in the batch in progress.
    pub fn amount_unbatched(&self) -> f64 {
        self.within.count()
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Return to the construction-time state, keeping the name.
    pub fn reset(&mut self) {
        self.current_batch_size = self.config.min_batch_size;
        self.num_rebatches = 0;
        self.batch_means.clear();
        self.within.reset();
        self.across.reset();
        self.total_count = 0.0;
        self.num_missing = 0.0;
    }
}

impl SummaryStatistics for BatchStatistic {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of completed batches.
    fn count(&self) -> f64 {
        self.across.count()
    }

    fn average(&self) -> f64 {
        self.across.average()
    }

    fn variance(&self) -> f64 {
        self.across.variance()
    }

    /// Smallest batch mean.
    fn min(&self) -> f64 {
        self.across.min()
    }

    /// Largest batch mean.
    fn max(&self) -> f64 {
        self.across.max()
    }

    fn skewness(&self) -> f64 {
        self.across.skewness()
    }

    fn kurtosis(&self) -> f64 {
        self.across.kurtosis()
    }

    fn lag1_covariance(&self) -> f64 {
        self.across.lag1_covariance()
    }

    fn lag1_correlation(&self) -> f64 {
        self.across.lag1_correlation()
    }

    fn von_neumann_lag1_statistic(&self) -> f64 {
        self.across.von_neumann_lag1_statistic()
    }

    /// Missing observations seen in the raw stream.
    fn missing_count(&self) -> f64 {
        self.num_missing
    }
}
