//! Bootstrap for vector-valued estimators.
//!
//! A single resampling pass often needs to feed several statistics at once,
//! for example the mean and a tail quantile of the same sample. Drawing
//! separate resamples per statistic would break the correlation between
//! them; [`MultiBootstrap`] applies one [`VectorEstimator`] to each
//! resample and tracks every component, so all components of a replicate
//! come from the same draw.

use serde::{Deserialize, Serialize};

use crate::bootstrap::{basic_interval, percentile_interval, std_normal_interval};
use crate::error::StatError;
use crate::statistics::{Interval, Statistic, SummaryStatistics};
use crate::stream::{sample_with_replacement, RandomStream, XoshiroStream};

/// A named, vector-valued statistic computed from a sample.
///
/// Implementations declare their output dimensions up front via
/// [`names`](Self::names); every [`estimate`](Self::estimate) call is then
/// expected to return one value per declared name, in the same order.
pub trait VectorEstimator {
    /// Names of the estimate components, one per dimension.
    fn names(&self) -> Vec<String>;

    /// Compute the component estimates for `sample`.
    fn estimate(&self, sample: &[f64]) -> Vec<f64>;
}

/// Bootstrap engine for [`VectorEstimator`]s.
///
/// Works like [`Bootstrap`](crate::bootstrap::Bootstrap) but fans each
/// replicate out to one accumulator per estimate component. A replicate
/// whose estimate vector does not match the declared dimension count is
/// skipped and tallied in [`skipped_replicates`](Self::skipped_replicates);
/// only the original-data estimate is held to the declared shape strictly,
/// since a mismatch there means the estimator itself is inconsistent.
///
/// # Example
///
/// ```
/// use simstat::bootstrap::{MultiBootstrap, VectorEstimator};
/// use simstat::stream::XoshiroStream;
///
/// struct MeanAndMax;
///
/// impl VectorEstimator for MeanAndMax {
///     fn names(&self) -> Vec<String> {
///         vec!["mean".into(), "max".into()]
///     }
///     fn estimate(&self, sample: &[f64]) -> Vec<f64> {
///         let mean = sample.iter().sum::<f64>() / sample.len() as f64;
///         let max = sample.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
///         vec![mean, max]
///     }
/// }
///
/// let data = vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0];
/// let mut boot = MultiBootstrap::with_stream(data, XoshiroStream::new(11)).unwrap();
/// boot.generate_samples(200, &MeanAndMax).unwrap();
///
/// let estimates = boot.estimates();
/// assert_eq!(estimates.len(), 2);
/// assert_eq!(estimates[0].name, "mean");
/// assert_eq!(estimates[1].name, "max");
/// ```
#[derive(Debug, Clone)]
pub struct MultiBootstrap<S: RandomStream = XoshiroStream> {
    original_data: Vec<f64>,
    stream: S,
    num_samples: usize,
    dimension_names: Vec<String>,
    original_estimates: Vec<f64>,
    /// One summary accumulator per estimate component.
    across: Vec<Statistic>,
    /// Estimate vectors of the valid replicates, in generation order.
    replicate_rows: Vec<Vec<f64>>,
    skipped: usize,
}

impl MultiBootstrap<XoshiroStream> {
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

impl<S: RandomStream> MultiBootstrap<S> {
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
            dimension_names: Vec::new(),
            original_estimates: Vec::new(),
            across: Vec::new(),
            replicate_rows: Vec::new(),
            skipped: 0,
        })
    }

    /// Run the bootstrap: `num_samples` resamples, each passed to
    /// `estimator`.
    ///
    /// Results from any previous run are discarded first. Replicates whose
    /// estimate vector length differs from the declared names are skipped
    /// and tallied, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidReplicateCount`] unless `num_samples` is
    /// at least 2, [`StatError::NoDimensionNames`] if the estimator
    /// declares no names, or [`StatError::DimensionMismatch`] if the
    /// original-data estimate does not match the declared names.
    pub fn generate_samples<E>(
        &mut self,
        num_samples: usize,
        estimator: &E,
    ) -> Result<(), StatError>
    where
        E: VectorEstimator,
    {
        if num_samples < 2 {
            return Err(StatError::InvalidReplicateCount(num_samples));
        }
        let names = estimator.names();
        if names.is_empty() {
            return Err(StatError::NoDimensionNames);
        }
        let originals = estimator.estimate(&self.original_data);
        if originals.len() != names.len() {
            return Err(StatError::DimensionMismatch {
                expected: names.len(),
                actual: originals.len(),
            });
        }

        let dim = names.len();
        self.num_samples = num_samples;
        self.dimension_names = names;
        self.original_estimates = originals;
        self.across = vec![Statistic::new(); dim];
        self.replicate_rows.clear();
        self.skipped = 0;

        let size = self.original_data.len();
        for _ in 0..num_samples {
            let sample = sample_with_replacement(&self.original_data, size, &mut self.stream);
            let row = estimator.estimate(&sample);
            if row.len() != dim {
                self.skipped += 1;
                continue;
            }
            for (stat, &estimate) in self.across.iter_mut().zip(&row) {
                stat.collect(estimate);
            }
            self.replicate_rows.push(row);
        }
        Ok(())
    }

    /// One [`BootstrapEstimate`] per estimate component, in declaration
    /// order. Empty before any run.
    pub fn estimates(&self) -> Vec<BootstrapEstimate> {
        self.dimension_names
            .iter()
            .enumerate()
            .map(|(d, name)| BootstrapEstimate {
                name: name.clone(),
                sample_size: self.original_data.len(),
                original_estimate: self.original_estimates[d],
                replicates: self.replicate_rows.iter().map(|row| row[d]).collect(),
            })
            .collect()
    }

    /// Component names declared by the last run's estimator.
    pub fn dimension_names(&self) -> &[String] {
        &self.dimension_names
    }

    /// The estimator applied to the original data, one value per component.
    pub fn original_estimates(&self) -> &[f64] {
        &self.original_estimates
    }

    /// Summary statistics over the replicates, one accumulator per
    /// component.
    pub fn across_replicate_statistics(&self) -> &[Statistic] {
        &self.across
    }

    /// Estimate vectors of the valid replicates, in generation order.
    pub fn replicate_rows(&self) -> &[Vec<f64>] {
        &self.replicate_rows
    }

    /// Replicates skipped because their estimate vector had the wrong
    /// length.
    pub fn skipped_replicates(&self) -> usize {
        self.skipped
    }

    /// Replicates that produced a full estimate vector.
    pub fn num_valid_replicates(&self) -> usize {
        self.replicate_rows.len()
    }

    /// Replicate count requested in the last run, zero before any.
    pub fn num_bootstrap_samples(&self) -> usize {
        self.num_samples
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

/// Bootstrap results for one component of a vector estimator.
///
/// A plain serializable record: the component name, the original-data
/// estimate, and the replicate estimates, with interval and bias queries
/// recomputed from the replicates on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapEstimate {
    /// Component name declared by the estimator.
    pub name: String,
    /// Size of the original data the replicates were drawn from.
    pub sample_size: usize,
    /// The estimator applied to the original data.
    pub original_estimate: f64,
    /// Replicate estimates for this component, in generation order.
    pub replicates: Vec<f64>,
}

impl BootstrapEstimate {
    /// Percentile confidence interval over the replicates.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidConfidenceLevel`] if `level` is outside
    /// (0, 1).
    pub fn percentile_ci(&self, level: f64) -> Result<Interval, StatError> {
        percentile_interval(&self.replicates, level)
    }

    /// Basic (reflected percentile) confidence interval.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidConfidenceLevel`] if `level` is outside
    /// (0, 1).
    pub fn basic_ci(&self, level: f64) -> Result<Interval, StatError> {
        basic_interval(self.original_estimate, &self.replicates, level)
    }

    /// Normal-approximation confidence interval.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidConfidenceLevel`] if `level` is outside
    /// (0, 1).
    pub fn std_normal_ci(&self, level: f64) -> Result<Interval, StatError> {
        let std_dev = Statistic::from_data(&self.replicates).std_deviation();
        std_normal_interval(self.original_estimate, std_dev, level)
    }

    /// Bootstrap bias estimate: replicate average minus original estimate.
    pub fn bias_estimate(&self) -> f64 {
        Statistic::from_data(&self.replicates).average() - self.original_estimate
    }

    /// Bootstrap standard error: standard deviation of the replicates.
    pub fn std_error_estimate(&self) -> f64 {
        Statistic::from_data(&self.replicates).std_deviation()
    }
}
