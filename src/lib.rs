//! # rangesum - parallel divide-and-conquer range summation
//!
//! rangesum sums every integer of an inclusive range by splitting it in half
//! until each piece is small enough to add up directly. One half of every
//! split is forked onto a worker, the other is reduced on the current
//! thread, and the partial sums are combined on the way back up.
//!
//! ## Features
//!
//! - **Pluggable substrates**: rayon work stealing, crossbeam scoped threads,
//!   or plain sequential execution behind one [`parallel::Substrate`] trait
//! - **Exact results**: sums are accumulated in `i128`, which holds the sum
//!   of any `i64` range
//! - **Injected diagnostics**: splits and leaves are reported to a
//!   [`reducer::ReduceObserver`], by default as `tracing` events
//! - **Layered configuration**: defaults, config files, environment variables,
//!   and command-line flags via figment
//!
//! ## Library Usage
//!
//! ```rust
//! use rangesum::parallel::WorkStealing;
//! use rangesum::reducer::{Range, Reducer, ReducerConfig};
//!
//! let pool = WorkStealing::new(4)?;
//! let reducer = Reducer::new(&pool).with_config(ReducerConfig {
//!     min_threshold: 1,
//!     ..ReducerConfig::default()
//! });
//! assert_eq!(reducer.compute_sum(Range::new(1, 10)?, 2)?, 55);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Command Line
//!
//! ```bash
//! # Sum 0..=1000000 and check it against n(n+1)/2
//! rangesum sum 1000000
//!
//! # Explicit threshold and worker count, with statistics
//! rangesum sum 1000000 --threshold 5000 --parallelism 4 --stats
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod parallel;
pub mod reducer;
pub mod verify;

pub use config::RangesumConfig;
pub use error::{InvalidArgument, ReduceError, SubstrateError};
pub use reducer::{Range, Reducer, compute_sum};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
