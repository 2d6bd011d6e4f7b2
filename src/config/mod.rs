//! Configuration management for rangesum
//!
//! Settings are layered with figment (see [`core`]); this module holds the
//! typed view the rest of the crate consumes and its validation.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::parallel::{ExecutionMode, ExecutionStrategy};
use crate::reducer::{MIN_THRESHOLD, RangePolicy, ReducerConfig};

pub mod core;

pub use self::core::ConfigOverrides;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RangesumConfig {
    pub reducer: ReducerSettings,
    pub parallel: ParallelSettings,
}

/// Reduction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReducerSettings {
    /// Thresholds must be strictly greater than this
    pub min_threshold: u64,

    /// Leaf size (0 = derive from span and parallelism)
    pub threshold: u64,

    pub range_policy: RangePolicy,
}

/// Worker pool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelSettings {
    pub mode: ExecutionMode,

    /// Maximum number of worker threads (0 = no limit)
    pub max_threads: usize,

    /// Percentage of CPU cores to use (1-100)
    pub thread_percentage: u8,
}

impl Default for ReducerSettings {
    fn default() -> Self {
        Self {
            min_threshold: MIN_THRESHOLD,
            threshold: 0,
            range_policy: RangePolicy::Strict,
        }
    }
}

impl Default for ParallelSettings {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Auto,
            max_threads: 0,
            thread_percentage: 100,
        }
    }
}

impl RangesumConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.parallel.thread_percentage) {
            anyhow::bail!(
                "parallel.thread_percentage must be between 1 and 100 (got {})",
                self.parallel.thread_percentage
            );
        }

        Ok(())
    }

    pub fn reducer_config(&self) -> ReducerConfig {
        ReducerConfig {
            min_threshold: self.reducer.min_threshold,
            range_policy: self.reducer.range_policy,
        }
    }

    /// Worker count from CPU cores and the configured limits
    pub fn workers(&self) -> usize {
        ExecutionStrategy::calculate_optimal_workers(
            self.parallel.max_threads,
            self.parallel.thread_percentage,
        )
    }

    /// Explicitly configured threshold, if any
    pub fn threshold(&self) -> Option<u64> {
        (self.reducer.threshold != 0).then_some(self.reducer.threshold)
    }
}

#[cfg(test)]
mod tests;
