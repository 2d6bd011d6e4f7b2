//! Fork/join execution substrates
//!
//! The reducer never spawns threads itself. It hands every fork to a
//! [`Substrate`], which decides where the forked half runs. This module owns
//! the substrates and the choice between them.
//!
//! # Architecture Responsibilities
//!
//! ## What This Module Does:
//! - **Resource Discovery**: Detects available CPU cores using `num_cpus::get()`
//! - **Resource Calculation**: Applies user configuration (thread percentage, max threads)
//! - **Execution Strategy**: Sequential, work-stealing pool, or bounded scoped threads
//!
//! ## What This Module Does NOT Do:
//! - **Domain Logic**: Knows nothing about ranges, thresholds, or sums
//! - **Rebalancing**: Work is split once per fork; nothing is migrated afterwards
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Reducer       │    │   Substrate      │    │   Workers       │
//! │                 │───▶│                  │───▶│                 │
//! │ • split/leaf    │    │ • fork_join      │    │ • rayon pool    │
//! │ • combine       │    │ • install        │    │ • scoped threads│
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use rangesum::parallel::{ExecutionStrategy, Substrate, WorkStealing};
//!
//! let strategy = ExecutionStrategy::auto(1_000_000, 1_000, 4);
//! assert!(matches!(strategy, ExecutionStrategy::Parallel { workers: 4 }));
//!
//! let pool = WorkStealing::new(strategy.workers()).unwrap();
//! let (left, right) = pool.fork_join(|| 1 + 1, || 2 + 2).unwrap();
//! assert_eq!(left + right, 6);
//! ```

pub mod core;
pub mod pool;
pub mod scoped;

pub use self::core::{ExecutionMode, ExecutionStrategy, Sequential, Substrate};
pub use pool::WorkStealing;
pub use scoped::ScopedThreads;
