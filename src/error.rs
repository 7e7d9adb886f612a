//! Error types for invalid-argument failures.
//!
//! Only precondition violations are reported as errors, and always at the
//! point of the offending call. Statistics that are mathematically undefined
//! for the data seen so far (for example, the variance of a single
//! observation) are not errors: they return `f64::NAN` so that downstream
//! aggregation can detect the poison value instead of unwinding.

/// Errors raised when a caller violates a documented precondition.
#[derive(Debug, Clone, PartialEq)]
pub enum StatError {
    /// A confidence level outside the open interval (0, 1).
    InvalidConfidenceLevel(f64),
    /// An operation that needs more observations than were supplied.
    InsufficientData {
        /// Minimum number of observations the operation requires.
        required: usize,
        /// Number of observations actually supplied.
        actual: usize,
    },
    /// A batching parameter below its minimum allowed value.
    InvalidBatchConfig {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Value that was supplied.
        value: usize,
        /// Smallest value the parameter accepts.
        minimum: usize,
    },
    /// A requested batch partition outside `1..=num_batches`.
    InvalidBatchPartition {
        /// Number of groups requested.
        requested: usize,
        /// Number of batch means currently stored.
        available: usize,
    },
    /// A bootstrap replicate count of zero or one.
    InvalidReplicateCount(usize),
    /// A vector estimator that declared no dimension names.
    NoDimensionNames,
    /// An estimate vector whose length does not match the declared names.
    DimensionMismatch {
        /// Number of declared dimension names.
        expected: usize,
        /// Length of the returned estimate vector.
        actual: usize,
    },
    /// Histogram break points that do not define at least one valid bin.
    InvalidBreakPoints(&'static str),
}

impl std::fmt::Display for StatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatError::InvalidConfidenceLevel(level) => {
                write!(f, "confidence level must be in (0, 1), got {}", level)
            }
            StatError::InsufficientData { required, actual } => {
                write!(f, "requires at least {} observations, got {}", required, actual)
            }
            StatError::InvalidBatchConfig {
                parameter,
                value,
                minimum,
            } => {
                write!(f, "{} must be at least {}, got {}", parameter, minimum, value)
            }
            StatError::InvalidBatchPartition {
                requested,
                available,
            } => {
                write!(
                    f,
                    "cannot partition {} batch means into {} groups",
                    available, requested
                )
            }
            StatError::InvalidReplicateCount(count) => {
                write!(
                    f,
                    "number of bootstrap samples must be greater than 1, got {}",
                    count
                )
            }
            StatError::NoDimensionNames => {
                write!(f, "vector estimator declared no dimension names")
            }
            StatError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "estimate vector has {} components, expected {}",
                    actual, expected
                )
            }
            StatError::InvalidBreakPoints(reason) => {
                write!(f, "invalid histogram break points: {}", reason)
            }
        }
    }
}

impl std::error::Error for StatError {}
