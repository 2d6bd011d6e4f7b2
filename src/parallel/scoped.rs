use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::core::Substrate;
use crate::error::SubstrateError;

/// Scoped OS threads with a bounded worker budget
///
/// Each fork spawns a crossbeam scoped thread while a worker permit is free.
/// The calling thread counts as one worker, so `workers - 1` permits exist.
/// Once the budget is used up, forked halves run inline on the caller.
pub struct ScopedThreads {
    workers: usize,
    available: AtomicUsize,
}

/// Returns a permit to the pool when dropped
struct Permit<'a> {
    available: &'a AtomicUsize,
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        self.available.fetch_add(1, Ordering::AcqRel);
    }
}

impl ScopedThreads {
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        Self {
            workers,
            available: AtomicUsize::new(workers - 1),
        }
    }

    fn try_acquire(&self) -> Option<Permit<'_>> {
        self.available
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |free| free.checked_sub(1))
            .ok()
            .map(|_| Permit {
                available: &self.available,
            })
    }
}

impl Substrate for ScopedThreads {
    fn fork_join<A, B, RA, RB>(&self, forked: A, inline: B) -> Result<(RA, RB), SubstrateError>
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        let Some(_permit) = self.try_acquire() else {
            tracing::trace!("Worker budget exhausted, running forked half inline");
            let first = forked();
            let second = inline();
            return Ok((first, second));
        };

        crossbeam::thread::scope(|s| -> Result<(RA, RB), SubstrateError> {
            let handle = s
                .builder()
                .name("rangesum-scoped".to_string())
                .spawn(move |_| forked())
                .map_err(SubstrateError::Spawn)?;

            let second = inline();

            let first = handle
                .join()
                .map_err(|payload| SubstrateError::WorkerPanicked(panic_message(payload.as_ref())))?;

            Ok((first, second))
        })
        .map_err(|payload| SubstrateError::WorkerPanicked(panic_message(payload.as_ref())))?
    }

    fn parallelism(&self) -> usize {
        self.workers
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fork_join_runs_both_halves() {
        let substrate = ScopedThreads::new(4);
        let (first, second) = substrate.fork_join(|| 20 + 1, || 20 + 2).unwrap();
        assert_eq!((first, second), (21, 22));
    }

    #[test]
    fn test_forked_half_runs_on_another_thread() {
        let substrate = ScopedThreads::new(2);
        let caller = std::thread::current().id();
        let (forked_on, inline_on) = substrate
            .fork_join(|| std::thread::current().id(), || std::thread::current().id())
            .unwrap();

        assert_ne!(forked_on, caller);
        assert_eq!(inline_on, caller);
    }

    #[test]
    fn test_single_worker_never_spawns() {
        let substrate = ScopedThreads::new(1);
        let caller = std::thread::current().id();
        let (forked_on, _) = substrate
            .fork_join(|| std::thread::current().id(), || ())
            .unwrap();
        assert_eq!(forked_on, caller);
    }

    #[test]
    fn test_permits_are_returned() {
        let substrate = ScopedThreads::new(2);
        substrate.fork_join(|| (), || ()).unwrap();
        assert_eq!(substrate.available.load(Ordering::Acquire), 1);
    }

    #[test]
    fn test_worker_panic_becomes_substrate_error() {
        let substrate = ScopedThreads::new(2);
        let result = substrate.fork_join(|| -> u32 { panic!("boom") }, || 1u32);
        match result {
            Err(SubstrateError::WorkerPanicked(message)) => assert_eq!(message, "boom"),
            other => panic!("expected WorkerPanicked, got {other:?}"),
        }
        assert_eq!(substrate.available.load(Ordering::Acquire), 1);
    }
}
