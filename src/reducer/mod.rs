//! Divide-and-conquer range summation
//!
//! A range whose span exceeds the threshold is split at its midpoint. The
//! first half is forked onto the [`Substrate`], the second half is reduced
//! on the current thread, and the two partial sums are added once the forked
//! half has been joined. Ranges at or below the threshold are summed one
//! integer at a time.
//!
//! ```rust
//! use rangesum::parallel::WorkStealing;
//! use rangesum::reducer::{Range, Reducer};
//!
//! let pool = WorkStealing::new(4)?;
//! let reducer = Reducer::new(&pool);
//! let sum = reducer.compute_sum(Range::new(0, 1_000_000)?, 1_001)?;
//! assert_eq!(sum, 500_000_500_000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod observer;
pub mod range;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidArgument, Result};
use crate::parallel::{ExecutionStrategy, ScopedThreads, Sequential, Substrate, WorkStealing};

pub use observer::{Both, ReduceObserver, ReduceStats, Silent, StatsSnapshot, TracingObserver};
pub use range::{Range, RangePolicy};

/// Default minimum granularity; thresholds must be strictly greater
pub const MIN_THRESHOLD: u64 = 1000;

/// Settings shared by every task of one computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReducerConfig {
    /// Thresholds must exceed this value
    pub min_threshold: u64,
    /// Whether `from == to` is accepted
    pub range_policy: RangePolicy,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            min_threshold: MIN_THRESHOLD,
            range_policy: RangePolicy::Strict,
        }
    }
}

impl ReducerConfig {
    /// Check a top-level range and threshold before any work is scheduled
    pub fn validate(&self, range: Range, threshold: u64) -> Result<(), InvalidArgument> {
        self.range_policy.check(range)?;

        if threshold <= self.min_threshold {
            return Err(InvalidArgument::ThresholdTooSmall {
                threshold,
                min_threshold: self.min_threshold,
            });
        }

        Ok(())
    }
}

/// Sums ranges by recursive fork/join on an injected substrate
pub struct Reducer<S, O = TracingObserver> {
    substrate: S,
    observer: O,
    config: ReducerConfig,
}

impl<S: Substrate> Reducer<S> {
    /// Reducer reporting to `tracing` with the default configuration
    pub fn new(substrate: S) -> Self {
        Self::with_observer(substrate, TracingObserver)
    }
}

impl<S: Substrate, O: ReduceObserver> Reducer<S, O> {
    pub fn with_observer(substrate: S, observer: O) -> Self {
        Self {
            substrate,
            observer,
            config: ReducerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReducerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ReducerConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Sum every integer in `range`
    ///
    /// Arguments are validated before anything reaches the substrate. A
    /// substrate failure anywhere in the tree aborts the whole computation;
    /// no partial sum is returned.
    pub fn compute_sum(&self, range: Range, threshold: u64) -> Result<i128> {
        self.config.validate(range, threshold)?;
        self.substrate.install(|| self.reduce(range, threshold, 0))
    }

    fn reduce(&self, range: Range, threshold: u64, depth: usize) -> Result<i128> {
        if range.span() <= threshold {
            let sum = range.sequential_sum();
            self.observer.on_leaf(range, sum, depth);
            return Ok(sum);
        }

        let (first, second) = range.split();
        self.observer.on_split(range, first, second, depth);

        let (first_sum, second_sum) = self.substrate.fork_join(
            || self.reduce(first, threshold, depth + 1),
            || self.reduce(second, threshold, depth + 1),
        )?;

        Ok(first_sum? + second_sum?)
    }
}

/// Sum `range` on `substrate` with the default configuration
pub fn compute_sum<S: Substrate>(substrate: S, range: Range, threshold: u64) -> Result<i128> {
    Reducer::new(substrate).compute_sum(range, threshold)
}

/// Threshold that gives each worker roughly one leaf: `span / parallelism`
pub fn default_threshold(span: u64, parallelism: usize) -> Result<u64, InvalidArgument> {
    if parallelism == 0 {
        return Err(InvalidArgument::ZeroParallelism);
    }
    Ok(span / parallelism as u64)
}

/// Build the substrate `strategy` names and sum `range` on it
pub fn run_strategy<O: ReduceObserver>(
    strategy: ExecutionStrategy,
    config: ReducerConfig,
    observer: O,
    range: Range,
    threshold: u64,
) -> Result<i128> {
    config.validate(range, threshold)?;
    tracing::debug!("Running {:?} over {} with threshold {}", strategy, range, threshold);

    match strategy {
        ExecutionStrategy::Sequential => Reducer::with_observer(Sequential, observer)
            .with_config(config)
            .compute_sum(range, threshold),
        ExecutionStrategy::Parallel { workers } => {
            Reducer::with_observer(WorkStealing::new(workers)?, observer)
                .with_config(config)
                .compute_sum(range, threshold)
        }
        ExecutionStrategy::Scoped { workers } => {
            Reducer::with_observer(ScopedThreads::new(workers), observer)
                .with_config(config)
                .compute_sum(range, threshold)
        }
    }
}

/// Sum `[0, n]` on a work-stealing pool sized to the machine
///
/// The threshold is `n / parallelism`, so the call fails with
/// [`InvalidArgument::ThresholdTooSmall`] when `n` is too small for the pool.
pub fn sum_to(n: i64) -> Result<i128> {
    let range = Range::new(0, n)?;
    let pool = WorkStealing::new(num_cpus::get())?;
    let threshold = default_threshold(range.span(), pool.parallelism())?;
    Reducer::new(&pool).compute_sum(range, threshold)
}
