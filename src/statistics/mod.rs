//! Accumulators and summaries for observation streams.
//!
//! The pieces layer on one another. [`Statistic`] is the one-pass core:
//! count, mean, central moments, extremes, and lag-1 serial diagnostics.
//! [`BatchStatistic`] feeds batch means through a `Statistic` to handle
//! correlated streams, [`Histogram`] pairs one with binned tabulation, and
//! [`WeightedStatistic`] covers time-persistent values. Every accumulator
//! answers queries through the [`SummaryStatistics`] trait.

mod batch;
mod histogram;
mod quantile;
mod statistic;
mod summary;
mod weighted;

pub use batch::{BatchConfig, BatchStatistic};
pub use histogram::{Histogram, HistogramBin};
pub use quantile::{percentile, percentile_sorted};
pub use statistic::Statistic;
pub use summary::{Interval, StatisticSnapshot, SummaryStatistics, DEFAULT_CONFIDENCE_LEVEL};
pub use weighted::WeightedStatistic;

pub(crate) use summary::{check_confidence_level, t_quantile, z_quantile};
