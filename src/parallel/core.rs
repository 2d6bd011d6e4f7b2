use serde::{Deserialize, Serialize};

use crate::error::SubstrateError;

/// Fork/join execution substrate consumed by the reducer
///
/// `fork_join` is the `submit` + `await` pair in a single structured call:
/// `forked` is handed to the substrate and may run concurrently, `inline`
/// runs on the calling thread, and the call returns once both are done.
/// Implementations must run each closure exactly once and hand back exactly
/// the values they produced.
pub trait Substrate: Sync {
    fn fork_join<A, B, RA, RB>(&self, forked: A, inline: B) -> Result<(RA, RB), SubstrateError>
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send;

    /// Run the top-level computation inside the substrate
    fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        op()
    }

    /// Number of workers available for forked work
    fn parallelism(&self) -> usize;
}

impl<S: Substrate + ?Sized> Substrate for &S {
    fn fork_join<A, B, RA, RB>(&self, forked: A, inline: B) -> Result<(RA, RB), SubstrateError>
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        (**self).fork_join(forked, inline)
    }

    fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        (**self).install(op)
    }

    fn parallelism(&self) -> usize {
        (**self).parallelism()
    }
}

/// Runs both halves on the calling thread, forked half first
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Substrate for Sequential {
    fn fork_join<A, B, RA, RB>(&self, forked: A, inline: B) -> Result<(RA, RB), SubstrateError>
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        let first = forked();
        let second = inline();
        Ok((first, second))
    }

    fn parallelism(&self) -> usize {
        1
    }
}

/// Requested execution mode, as configured by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Sequential when the range would not split, work-stealing pool otherwise
    #[default]
    Auto,
    Sequential,
    /// rayon work-stealing pool
    Parallel,
    /// crossbeam scoped threads with a bounded worker budget
    Scoped,
}

impl ExecutionMode {
    /// Resolve the mode into a concrete strategy for one computation
    pub fn resolve(self, span: u64, threshold: u64, workers: usize) -> ExecutionStrategy {
        match self {
            ExecutionMode::Auto => ExecutionStrategy::auto(span, threshold, workers),
            ExecutionMode::Sequential => ExecutionStrategy::Sequential,
            ExecutionMode::Parallel => ExecutionStrategy::Parallel { workers },
            ExecutionMode::Scoped => ExecutionStrategy::Scoped { workers },
        }
    }
}

/// Execution strategy enum for choosing the substrate of one computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExecutionStrategy {
    Sequential,
    Parallel { workers: usize },
    Scoped { workers: usize },
}

impl ExecutionStrategy {
    /// Auto strategy selection based on whether the range splits at all
    ///
    /// A range whose span does not exceed the threshold is a single leaf, so
    /// spinning up workers for it is pure overhead. The same holds when only
    /// one worker is available.
    ///
    /// ```rust
    /// use rangesum::parallel::ExecutionStrategy;
    ///
    /// let strategy = ExecutionStrategy::auto(500, 1_000, 8);
    /// assert!(matches!(strategy, ExecutionStrategy::Sequential));
    ///
    /// let strategy = ExecutionStrategy::auto(1_000_000, 1_000, 8);
    /// assert!(matches!(strategy, ExecutionStrategy::Parallel { workers: 8 }));
    /// ```
    pub fn auto(span: u64, threshold: u64, optimal_workers: usize) -> Self {
        if span <= threshold || optimal_workers <= 1 {
            ExecutionStrategy::Sequential
        } else {
            ExecutionStrategy::Parallel {
                workers: optimal_workers,
            }
        }
    }

    /// Calculate optimal workers based on available CPU cores and configuration limits
    ///
    /// # Algorithm
    /// ```text
    /// 1. Detect available CPU cores: num_cpus::get()
    /// 2. Apply percentage: cores * thread_percentage / 100
    /// 3. Apply config limit: min(max_threads_config, percentage_result) if max_threads_config > 0
    /// 4. Ensure minimum: max(1, final_result)
    /// ```
    ///
    /// ```rust
    /// use rangesum::parallel::ExecutionStrategy;
    ///
    /// let workers = ExecutionStrategy::calculate_optimal_workers(0, 75);
    /// assert!(workers >= 1);
    ///
    /// let workers = ExecutionStrategy::calculate_optimal_workers(8, 75);
    /// assert!(workers <= 8);
    /// ```
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        let available_cores = num_cpus::get();

        let workers_by_percentage =
            std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

        // 0 means no configured limit
        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }

    /// Number of workers this strategy runs with
    pub fn workers(&self) -> usize {
        match self {
            ExecutionStrategy::Sequential => 1,
            ExecutionStrategy::Parallel { workers } | ExecutionStrategy::Scoped { workers } => {
                *workers
            }
        }
    }
}
