//! # simstat
//!
//! Streaming statistics, batch means, and bootstrap resampling for
//! simulation output analysis.
//!
//! Simulation runs emit long, often autocorrelated observation streams.
//! This crate covers the path from raw stream to defensible interval
//! estimate:
//! - [`Statistic`]: one-pass accumulation of count, mean, central moments
//!   2 to 4, extremes, and lag-1 serial diagnostics, with O(1) state
//! - [`BatchStatistic`]: automatic batch means with rebatching, so interval
//!   formulas stay valid on correlated streams under bounded memory
//! - [`bootstrap`]: with-replacement resampling, jackknife, and percentile,
//!   basic, and normal confidence intervals for arbitrary estimators
//! - [`stream`]: seedable random streams with substream jumps and
//!   antithetic draws for reproducible, coordinated experiments
//!
//! Missing observations (NaN or infinities) are tallied and excluded
//! everywhere, and statistics that are undefined for the data seen so far
//! read as NaN rather than failing.
//!
//! ## Quick Start
//!
//! ```
//! use simstat::{Statistic, SummaryStatistics};
//!
//! let mut stat = Statistic::with_name("service time");
//! stat.collect_all(&[4.2, 3.8, 5.1, 4.6]);
//!
//! assert_eq!(stat.count(), 4.0);
//! assert!((stat.average() - 4.425).abs() < 1e-12);
//! let interval = stat.confidence_interval(0.95).unwrap();
//! assert!(interval.contains(stat.average()));
//! ```
//!
//! Bootstrap a confidence interval for any estimator of the data:
//!
//! ```
//! use simstat::bootstrap::Bootstrap;
//! use simstat::stream::XoshiroStream;
//!
//! let data = vec![63.72, 32.24, 40.28, 36.94, 36.29, 56.94, 34.1, 63.36, 49.29, 87.2];
//! let mut boot = Bootstrap::with_stream(data, XoshiroStream::new(42)).unwrap();
//! boot.generate_samples(500, |sample| {
//!     sample.iter().sum::<f64>() / sample.len() as f64
//! }, false).unwrap();
//!
//! let ci = boot.percentile_ci(0.95).unwrap();
//! assert!(ci.lower < boot.original_estimate());
//! assert!(boot.original_estimate() < ci.upper);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod error;

// Functional modules
pub mod bootstrap;
pub mod output;
pub mod statistics;
pub mod stream;

// Re-exports for public API
pub use error::StatError;

pub use bootstrap::{
    Bootstrap, BootstrapEstimate, Jackknife, JackknifeEstimate, MultiBootstrap, VectorEstimator,
};
pub use statistics::{
    percentile, percentile_sorted, BatchConfig, BatchStatistic, Histogram, HistogramBin, Interval,
    Statistic, StatisticSnapshot, SummaryStatistics, WeightedStatistic, DEFAULT_CONFIDENCE_LEVEL,
};
pub use stream::{sample_with_replacement, RandomStream, XoshiroStream};
