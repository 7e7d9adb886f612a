//! Integration tests for random streams and resampling engines.
//!
//! Covers stream determinism and control operations, scalar bootstrap
//! behavior and interval identities, the multivariate engine with its
//! skip policy, and jackknife estimation.

use std::cell::Cell;

use simstat::bootstrap::{Bootstrap, Jackknife, MultiBootstrap, VectorEstimator};
use simstat::stream::{sample_with_replacement, RandomStream, XoshiroStream};
use simstat::{percentile, StatError, Statistic, SummaryStatistics};

fn mean(sample: &[f64]) -> f64 {
    sample.iter().sum::<f64>() / sample.len() as f64
}

fn reference_data() -> Vec<f64> {
    vec![
        63.72, 32.24, 40.28, 36.94, 36.29, 56.94, 34.1, 63.36, 49.29, 87.2,
    ]
}

// ============================================================================
// Random stream control
// ============================================================================

#[test]
fn same_seed_gives_same_draws() {
    let mut a = XoshiroStream::new(2024);
    let mut b = XoshiroStream::new(2024);
    for _ in 0..100 {
        assert_eq!(a.next_u01(), b.next_u01());
    }

    let mut c = XoshiroStream::new(2025);
    let first: Vec<f64> = (0..10).map(|_| c.next_u01()).collect();
    let mut d = XoshiroStream::new(2024);
    let second: Vec<f64> = (0..10).map(|_| d.next_u01()).collect();
    assert_ne!(first, second);
}

#[test]
fn reset_start_replays_the_stream() {
    let mut stream = XoshiroStream::new(7);
    let first: Vec<f64> = (0..20).map(|_| stream.next_u01()).collect();
    stream.reset_start();
    let replay: Vec<f64> = (0..20).map(|_| stream.next_u01()).collect();
    assert_eq!(first, replay);
}

#[test]
fn substream_advance_and_reset() {
    let mut stream = XoshiroStream::new(7);
    let base: Vec<f64> = (0..10).map(|_| stream.next_u01()).collect();

    stream.advance_substream();
    let advanced: Vec<f64> = (0..10).map(|_| stream.next_u01()).collect();
    assert_ne!(base, advanced);

    // Resetting to the substream start replays the advanced draws.
    stream.reset_start_substream();
    let replay: Vec<f64> = (0..10).map(|_| stream.next_u01()).collect();
    assert_eq!(advanced, replay);

    // Resetting to the stream start undoes the advancement entirely.
    stream.reset_start();
    let from_start: Vec<f64> = (0..10).map(|_| stream.next_u01()).collect();
    assert_eq!(base, from_start);
}

#[test]
fn resamples_draw_only_from_the_data() {
    let data = [5.0, 7.0, 11.0, 13.0];
    let mut stream = XoshiroStream::new(3);
    let sample = sample_with_replacement(&data, 1000, &mut stream);

    assert_eq!(sample.len(), 1000);
    assert!(sample.iter().all(|x| data.contains(x)));
    // With 1000 draws over 4 values, every value should appear.
    for value in data {
        assert!(sample.contains(&value));
    }
}

// ============================================================================
// Scalar bootstrap
// ============================================================================

#[test]
fn replicate_counts_match_request() {
    let mut boot = Bootstrap::with_stream(reference_data(), XoshiroStream::new(17)).unwrap();
    boot.generate_samples(500, mean, false).unwrap();

    assert_eq!(boot.replicate_estimates().len(), 500);
    assert_eq!(boot.num_bootstrap_samples(), 500);
    assert_eq!(boot.across_replicate_statistics().count(), 500.0);
}

#[test]
fn same_seed_reproduces_the_whole_run() {
    let mut a = Bootstrap::with_stream(reference_data(), XoshiroStream::new(99)).unwrap();
    let mut b = Bootstrap::with_stream(reference_data(), XoshiroStream::new(99)).unwrap();
    a.generate_samples(200, mean, false).unwrap();
    b.generate_samples(200, mean, false).unwrap();

    assert_eq!(a.replicate_estimates(), b.replicate_estimates());
    assert_eq!(a.percentile_ci(0.95).unwrap(), b.percentile_ci(0.95).unwrap());
}

#[test]
fn stream_reset_reproduces_without_rebuilding() {
    let mut boot = Bootstrap::with_stream(reference_data(), XoshiroStream::new(31)).unwrap();
    boot.generate_samples(100, mean, false).unwrap();
    let first = boot.replicate_estimates().to_vec();

    boot.stream_mut().reset_start();
    boot.generate_samples(100, mean, false).unwrap();
    assert_eq!(boot.replicate_estimates(), first.as_slice());

    boot.stream_mut().advance_substream();
    boot.generate_samples(100, mean, false).unwrap();
    assert_ne!(boot.replicate_estimates(), first.as_slice());
}

#[test]
fn antithetic_draws_change_the_resamples() {
    let mut plain = Bootstrap::with_stream(reference_data(), XoshiroStream::new(5)).unwrap();
    let mut anti = Bootstrap::with_stream(reference_data(), XoshiroStream::new(5)).unwrap();
    anti.stream_mut().set_antithetic(true);

    plain.generate_samples(100, mean, false).unwrap();
    anti.generate_samples(100, mean, false).unwrap();
    assert_ne!(plain.replicate_estimates(), anti.replicate_estimates());
}

#[test]
fn end_to_end_interval_estimation() {
    let mut boot = Bootstrap::with_stream(reference_data(), XoshiroStream::new(12345)).unwrap();
    boot.generate_samples(1000, mean, false).unwrap();

    assert!((boot.original_estimate() - 50.036).abs() < 1e-9);
    // The replicate average sits near the original estimate.
    assert!((boot.across_replicate_statistics().average() - 50.036).abs() < 2.0);

    let percentile_ci = boot.percentile_ci(0.95).unwrap();
    assert!(percentile_ci.is_finite());
    assert!(percentile_ci.lower < 50.036 && 50.036 < percentile_ci.upper);

    let basic = boot.basic_ci(0.95).unwrap();
    assert!(basic.is_finite());

    let normal = boot.std_normal_ci(0.95).unwrap();
    assert!(normal.lower < 50.036 && 50.036 < normal.upper);
}

#[test]
fn basic_interval_is_the_reflected_percentile_interval() {
    let mut boot = Bootstrap::with_stream(reference_data(), XoshiroStream::new(8)).unwrap();
    boot.generate_samples(300, mean, false).unwrap();

    let estimate = boot.original_estimate();
    let percentile_ci = boot.percentile_ci(0.9).unwrap();
    let basic = boot.basic_ci(0.9).unwrap();

    assert!((basic.lower - (2.0 * estimate - percentile_ci.upper)).abs() < 1e-12);
    assert!((basic.upper - (2.0 * estimate - percentile_ci.lower)).abs() < 1e-12);
}

#[test]
fn normal_interval_is_centered_on_the_estimate() {
    let mut boot = Bootstrap::with_stream(reference_data(), XoshiroStream::new(8)).unwrap();
    boot.generate_samples(300, mean, false).unwrap();

    let interval = boot.std_normal_ci(0.95).unwrap();
    let midpoint = (interval.lower + interval.upper) / 2.0;
    assert!((midpoint - boot.original_estimate()).abs() < 1e-9);
}

#[test]
fn queries_before_generation_read_nan() {
    let boot = Bootstrap::with_stream(reference_data(), XoshiroStream::new(1)).unwrap();
    assert!(boot.original_estimate().is_nan());
    assert!(boot.replicate_estimates().is_empty());
    assert!(!boot.percentile_ci(0.95).unwrap().is_finite());
    assert!(!boot.std_normal_ci(0.95).unwrap().is_finite());
}

#[test]
fn scalar_bootstrap_errors() {
    assert_eq!(
        Bootstrap::new(vec![42.0]).unwrap_err(),
        StatError::InsufficientData {
            required: 2,
            actual: 1,
        }
    );

    let mut boot = Bootstrap::with_stream(vec![1.0, 2.0], XoshiroStream::new(1)).unwrap();
    assert_eq!(
        boot.generate_samples(1, mean, false).unwrap_err(),
        StatError::InvalidReplicateCount(1)
    );
    assert!(boot.percentile_ci(0.0).is_err());
    assert!(boot.basic_ci(2.0).is_err());
}

// ============================================================================
// Multivariate bootstrap
// ============================================================================

struct MeanAndQ75;

impl VectorEstimator for MeanAndQ75 {
    fn names(&self) -> Vec<String> {
        vec!["mean".into(), "q75".into()]
    }

    fn estimate(&self, sample: &[f64]) -> Vec<f64> {
        vec![mean(sample), percentile(sample, 0.75)]
    }
}

struct MeanOnly;

impl VectorEstimator for MeanOnly {
    fn names(&self) -> Vec<String> {
        vec!["mean".into()]
    }

    fn estimate(&self, sample: &[f64]) -> Vec<f64> {
        vec![mean(sample)]
    }
}

/// Drops every third replicate estimate after the original-data call.
struct Flaky {
    calls: Cell<usize>,
}

impl VectorEstimator for Flaky {
    fn names(&self) -> Vec<String> {
        vec!["mean".into()]
    }

    fn estimate(&self, sample: &[f64]) -> Vec<f64> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        if call > 0 && call % 3 == 0 {
            return Vec::new();
        }
        vec![mean(sample)]
    }
}

#[test]
fn vector_estimator_tracks_every_dimension() {
    let mut boot = MultiBootstrap::with_stream(reference_data(), XoshiroStream::new(21)).unwrap();
    boot.generate_samples(300, &MeanAndQ75).unwrap();

    assert_eq!(boot.dimension_names(), &["mean", "q75"]);
    assert!((boot.original_estimates()[0] - 50.036).abs() < 1e-9);
    assert_eq!(boot.num_valid_replicates(), 300);
    assert_eq!(boot.skipped_replicates(), 0);

    let estimates = boot.estimates();
    assert_eq!(estimates.len(), 2);
    for estimate in &estimates {
        assert_eq!(estimate.sample_size, 10);
        assert_eq!(estimate.replicates.len(), 300);
        let ci = estimate.percentile_ci(0.95).unwrap();
        assert!(ci.is_finite());
        assert!(ci.lower <= ci.upper);
    }
}

#[test]
fn single_dimension_matches_scalar_bootstrap() {
    // Both engines consume the stream identically, so a one-dimensional
    // vector estimator reproduces the scalar engine bit for bit.
    let mut scalar = Bootstrap::with_stream(reference_data(), XoshiroStream::new(404)).unwrap();
    scalar.generate_samples(150, mean, false).unwrap();

    let mut multi = MultiBootstrap::with_stream(reference_data(), XoshiroStream::new(404)).unwrap();
    multi.generate_samples(150, &MeanOnly).unwrap();

    let estimates = multi.estimates();
    assert_eq!(estimates[0].replicates.as_slice(), scalar.replicate_estimates());
    assert_eq!(estimates[0].original_estimate, scalar.original_estimate());
}

#[test]
fn short_estimate_rows_are_skipped_and_tallied() {
    let mut boot = MultiBootstrap::with_stream(reference_data(), XoshiroStream::new(6)).unwrap();
    let flaky = Flaky {
        calls: Cell::new(0),
    };
    boot.generate_samples(30, &flaky).unwrap();

    assert_eq!(boot.skipped_replicates(), 10);
    assert_eq!(boot.num_valid_replicates(), 20);
    assert_eq!(boot.across_replicate_statistics()[0].count(), 20.0);
    assert_eq!(boot.estimates()[0].replicates.len(), 20);
}

#[test]
fn multivariate_declaration_errors() {
    struct Nameless;
    impl VectorEstimator for Nameless {
        fn names(&self) -> Vec<String> {
            Vec::new()
        }
        fn estimate(&self, _sample: &[f64]) -> Vec<f64> {
            Vec::new()
        }
    }

    struct WrongArity;
    impl VectorEstimator for WrongArity {
        fn names(&self) -> Vec<String> {
            vec!["a".into(), "b".into()]
        }
        fn estimate(&self, _sample: &[f64]) -> Vec<f64> {
            vec![1.0, 2.0, 3.0]
        }
    }

    let mut boot = MultiBootstrap::with_stream(reference_data(), XoshiroStream::new(1)).unwrap();
    assert_eq!(
        boot.generate_samples(10, &Nameless).unwrap_err(),
        StatError::NoDimensionNames
    );
    assert_eq!(
        boot.generate_samples(10, &WrongArity).unwrap_err(),
        StatError::DimensionMismatch {
            expected: 2,
            actual: 3,
        }
    );
}

// ============================================================================
// Jackknife
// ============================================================================

#[test]
fn jackknife_of_the_mean() {
    let data = reference_data();
    let jack = Jackknife::evaluate(&data, mean).unwrap();

    assert_eq!(jack.sample_size(), 10);
    assert_eq!(jack.leave_one_out_estimates().len(), 10);
    assert!((jack.original_estimate() - 50.036).abs() < 1e-9);
    // The mean is linear, so the jackknife finds no bias.
    assert!(jack.bias_estimate().abs() < 1e-9);
    assert!((jack.bias_corrected_estimate() - jack.original_estimate()).abs() < 1e-9);

    // For the mean, the jackknife standard error is s / sqrt(n) exactly.
    let stat = Statistic::from_data(&data);
    let classic = stat.std_deviation() / (data.len() as f64).sqrt();
    assert!((jack.std_error_estimate() - classic).abs() < 1e-9);

    let interval = jack.confidence_interval(0.95).unwrap();
    assert!(interval.contains(jack.original_estimate()));
}

#[test]
fn jackknife_agrees_with_bootstrap_standard_error() {
    // Both estimate the same standard error of the mean; with 2000
    // replicates they should land within a few percent of each other.
    let data = reference_data();
    let jack = Jackknife::evaluate(&data, mean).unwrap();

    let mut boot = Bootstrap::with_stream(data, XoshiroStream::new(77)).unwrap();
    boot.generate_samples(2000, mean, false).unwrap();

    let ratio = boot.std_error_estimate() / jack.std_error_estimate();
    assert!(ratio > 0.8 && ratio < 1.2, "ratio {}", ratio);
}
