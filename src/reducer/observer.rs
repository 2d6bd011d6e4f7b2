use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::range::Range;

/// Receives diagnostics from a running reduction
///
/// Called concurrently from every worker taking part in the computation.
/// Both hooks default to doing nothing.
pub trait ReduceObserver: Sync {
    /// `parent` was split into `first` (forked) and `second` (computed inline)
    fn on_split(&self, _parent: Range, _first: Range, _second: Range, _depth: usize) {}

    /// `range` was summed directly
    fn on_leaf(&self, _range: Range, _sum: i128, _depth: usize) {}
}

impl<O: ReduceObserver + ?Sized> ReduceObserver for &O {
    fn on_split(&self, parent: Range, first: Range, second: Range, depth: usize) {
        (**self).on_split(parent, first, second, depth);
    }

    fn on_leaf(&self, range: Range, sum: i128, depth: usize) {
        (**self).on_leaf(range, sum, depth);
    }
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ReduceObserver for Silent {}

/// Forwards splits and leaves to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ReduceObserver for TracingObserver {
    fn on_split(&self, parent: Range, first: Range, second: Range, depth: usize) {
        tracing::debug!(%parent, %first, %second, depth, "Forking computation into two ranges");
    }

    fn on_leaf(&self, range: Range, sum: i128, depth: usize) {
        tracing::trace!(%range, %sum, depth, "Summed value range");
    }
}

/// Split/leaf counters tracked atomically across workers
#[derive(Debug, Default)]
pub struct ReduceStats {
    splits: AtomicUsize,
    leaves: AtomicUsize,
    max_depth: AtomicUsize,
}

/// Point-in-time copy of [`ReduceStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub splits: usize,
    pub leaves: usize,
    pub max_depth: usize,
}

impl ReduceStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            splits: self.splits.load(Ordering::Relaxed),
            leaves: self.leaves.load(Ordering::Relaxed),
            max_depth: self.max_depth.load(Ordering::Relaxed),
        }
    }
}

impl ReduceObserver for ReduceStats {
    fn on_split(&self, _parent: Range, _first: Range, _second: Range, depth: usize) {
        self.splits.fetch_add(1, Ordering::Relaxed);
        self.max_depth.fetch_max(depth, Ordering::Relaxed);
    }

    fn on_leaf(&self, _range: Range, _sum: i128, depth: usize) {
        self.leaves.fetch_add(1, Ordering::Relaxed);
        self.max_depth.fetch_max(depth, Ordering::Relaxed);
    }
}

/// Fans every event out to two observers, `A` first
#[derive(Debug, Clone, Copy, Default)]
pub struct Both<A, B>(pub A, pub B);

impl<A: ReduceObserver, B: ReduceObserver> ReduceObserver for Both<A, B> {
    fn on_split(&self, parent: Range, first: Range, second: Range, depth: usize) {
        self.0.on_split(parent, first, second, depth);
        self.1.on_split(parent, first, second, depth);
    }

    fn on_leaf(&self, range: Range, sum: i128, depth: usize) {
        self.0.on_leaf(range, sum, depth);
        self.1.on_leaf(range, sum, depth);
    }
}
