//! Error types for range reduction
//!
//! Failures fall into two groups: arguments rejected before any work is
//! scheduled, and failures raised by the execution substrate while the
//! computation runs. Neither is retried.

use thiserror::Error;

/// Arguments rejected before any work is scheduled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// `from > to`
    #[error("The from value {from} must not be greater than the to value {to}")]
    BoundsReversed { from: i64, to: i64 },

    /// `from == to` while single-element ranges are disallowed
    #[error("The from value {from} must be strictly less than the to value {to}")]
    BoundsNotIncreasing { from: i64, to: i64 },

    #[error(
        "Please provide a big enough threshold to avoid inefficient small subtasks. \
         The minimum is {min_threshold} (got {threshold})"
    )]
    ThresholdTooSmall { threshold: u64, min_threshold: u64 },

    #[error("Parallelism must be at least 1")]
    ZeroParallelism,
}

/// Failures originating in the parallel execution substrate
#[derive(Debug, Error)]
pub enum SubstrateError {
    #[error("failed to build worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("worker thread panicked: {0}")]
    WorkerPanicked(String),

    /// Raised by substrates that refuse further work (resource exhaustion)
    #[error("substrate exhausted: {0}")]
    Exhausted(String),
}

/// Error returned by a reduction
#[derive(Debug, Error)]
pub enum ReduceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    #[error("computation failed: {0}")]
    SubstrateFailure(#[from] SubstrateError),
}

/// Result type alias for reductions
pub type Result<T, E = ReduceError> = std::result::Result<T, E>;
