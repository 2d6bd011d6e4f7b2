use rayon::{ThreadPool, ThreadPoolBuilder};

use super::core::Substrate;
use crate::error::SubstrateError;

/// Work-stealing pool backed by a dedicated rayon thread pool
///
/// Forked halves are pushed onto the current worker's deque where idle
/// workers can steal them; a worker waiting on a stolen half keeps executing
/// other queued work instead of blocking.
pub struct WorkStealing {
    pool: ThreadPool,
}

impl WorkStealing {
    pub fn new(workers: usize) -> Result<Self, SubstrateError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|index| format!("rangesum-worker-{index}"))
            .build()?;

        tracing::debug!("Built work-stealing pool with {} workers", pool.current_num_threads());
        Ok(Self { pool })
    }
}

impl Substrate for WorkStealing {
    fn fork_join<A, B, RA, RB>(&self, forked: A, inline: B) -> Result<(RA, RB), SubstrateError>
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        // rayon runs its first operand on the calling thread and offers the second for stealing
        let (second, first) = self.pool.join(inline, forked);
        Ok((first, second))
    }

    fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    fn parallelism(&self) -> usize {
        self.pool.current_num_threads()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_size() {
        let pool = WorkStealing::new(3).unwrap();
        assert_eq!(pool.parallelism(), 3);

        // Zero is clamped to a single worker
        let pool = WorkStealing::new(0).unwrap();
        assert_eq!(pool.parallelism(), 1);
    }

    #[test]
    fn test_fork_join_keeps_operand_order() {
        let pool = WorkStealing::new(2).unwrap();
        let (first, second) = pool.fork_join(|| "forked", || "inline").unwrap();
        assert_eq!(first, "forked");
        assert_eq!(second, "inline");
    }

    #[test]
    fn test_install_runs_on_pool_worker() {
        let pool = WorkStealing::new(2).unwrap();
        let name = pool.install(|| std::thread::current().name().map(str::to_owned));
        assert!(name.unwrap().starts_with("rangesum-worker-"));
    }
}
