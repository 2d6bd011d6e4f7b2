use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::process::ExitCode;
use std::time::Instant;

use crate::cli::{EXIT_MISMATCH, Output};
use crate::config::{ConfigOverrides, RangesumConfig};
use crate::error::{InvalidArgument, ReduceError};
use crate::parallel::{ExecutionMode, ExecutionStrategy};
use crate::reducer::{
    Both, Range, RangePolicy, ReduceStats, StatsSnapshot, TracingObserver, default_threshold,
    run_strategy,
};
use crate::verify::Verification;

#[derive(Args, Debug)]
pub struct SumArgs {
    /// Upper bound of the range (inclusive)
    #[arg(value_name = "N", allow_negative_numbers = true)]
    pub n: i64,

    /// Lower bound of the range (inclusive)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub from: i64,

    /// Leaf size; ranges whose span is at or below it are summed directly
    #[arg(short, long)]
    pub threshold: Option<u64>,

    /// Smallest threshold allowed (thresholds must be greater)
    #[arg(long)]
    pub min_threshold: Option<u64>,

    /// Number of workers (default: derived from CPU cores and config)
    #[arg(short, long)]
    pub parallelism: Option<usize>,

    /// Processing mode
    #[arg(long, value_enum)]
    pub mode: Option<ExecutionMode>,

    /// Accept single-element ranges (FROM == N)
    #[arg(long)]
    pub inclusive: bool,

    /// Show split/leaf statistics
    #[arg(long)]
    pub stats: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct SumReport {
    #[serde(flatten)]
    verification: Verification,
    threshold: u64,
    strategy: ExecutionStrategy,
    elapsed_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<StatsSnapshot>,
}

pub fn execute(args: SumArgs, custom_config: Option<&str>, output: &Output) -> Result<ExitCode> {
    let overrides = ConfigOverrides {
        threshold: args.threshold,
        min_threshold: args.min_threshold,
        range_policy: args.inclusive.then_some(RangePolicy::Inclusive),
        mode: args.mode,
        max_threads: None,
    };
    let config = RangesumConfig::load(custom_config, &overrides)?;

    let range = Range::new(args.from, args.n).map_err(ReduceError::from)?;
    let workers = match args.parallelism {
        Some(0) => return Err(ReduceError::from(InvalidArgument::ZeroParallelism).into()),
        Some(workers) => workers,
        None => config.workers(),
    };
    let threshold = resolve_threshold(args.threshold, &config, range, workers)?;
    let strategy = config.parallel.mode.resolve(range.span(), threshold, workers);

    tracing::info!(
        "Summing {} with threshold {} using {:?}",
        range,
        threshold,
        strategy
    );

    let stats = ReduceStats::new();
    let started = Instant::now();
    let computed = run_strategy(
        strategy,
        config.reducer_config(),
        Both(TracingObserver, &stats),
        range,
        threshold,
    )?;
    let elapsed = started.elapsed();

    let report = SumReport {
        verification: Verification::check(range, computed),
        threshold,
        strategy,
        elapsed_secs: elapsed.as_secs_f64(),
        stats: args.stats.then(|| stats.snapshot()),
    };

    match args.format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => print_report(&report, output),
    }

    if report.verification.matches {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_MISMATCH))
    }
}

/// Threshold for one run, in priority order
///
/// A `--threshold` flag is used as given, so an invalid value is rejected by
/// the reducer rather than replaced. Next comes a configured threshold, and
/// finally `span / workers` raised just above the minimum.
fn resolve_threshold(
    explicit: Option<u64>,
    config: &RangesumConfig,
    range: Range,
    workers: usize,
) -> Result<u64, ReduceError> {
    if let Some(threshold) = explicit.or_else(|| config.threshold()) {
        return Ok(threshold);
    }

    let derived = default_threshold(range.span(), workers)?;
    let min_threshold = config.reducer.min_threshold;
    if derived > min_threshold {
        return Ok(derived);
    }

    let raised = min_threshold.saturating_add(1);
    tracing::warn!(
        "Derived threshold {} does not exceed the minimum {}; using {}",
        derived,
        min_threshold,
        raised
    );
    Ok(raised)
}

fn print_report(report: &SumReport, output: &Output) {
    let verification = &report.verification;

    output.header(&format!(
        "Sum for range {}..{}",
        verification.from, verification.to
    ));
    output.key_value("Computed sum:", &verification.computed.to_string(), verification.matches);
    output.key_value("Formula sum:", &verification.expected.to_string(), false);
    output.key_value("Threshold:", &report.threshold.to_string(), false);
    output.key_value("Strategy:", &describe(report.strategy), false);
    output.key_value("Elapsed:", &format!("{:.3}s", report.elapsed_secs), false);

    if let Some(stats) = report.stats {
        output.category("Statistics");
        output.key_value("Splits:", &stats.splits.to_string(), false);
        output.key_value("Leaves:", &stats.leaves.to_string(), false);
        output.key_value("Max depth:", &stats.max_depth.to_string(), false);
    }

    output.blank_line();
    if verification.matches {
        output.success("Computed sum matches the formula");
    } else {
        output.error(&format!(
            "Computed sum {} does not match the formula sum {}",
            verification.computed, verification.expected
        ));
    }
}

fn describe(strategy: ExecutionStrategy) -> String {
    match strategy {
        ExecutionStrategy::Sequential => "sequential".to_string(),
        ExecutionStrategy::Parallel { workers } => format!("work-stealing pool ({workers} workers)"),
        ExecutionStrategy::Scoped { workers } => format!("scoped threads ({workers} workers)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min_threshold: u64, threshold: u64) -> RangesumConfig {
        let mut config = RangesumConfig::default();
        config.reducer.min_threshold = min_threshold;
        config.reducer.threshold = threshold;
        config
    }

    #[test]
    fn test_explicit_threshold_kept() {
        let range = Range::new(0, 10).unwrap();
        assert_eq!(resolve_threshold(None, &config(1000, 5000), range, 4).unwrap(), 5000);
    }

    #[test]
    fn test_flag_threshold_used_as_given() {
        let range = Range::new(0, 100).unwrap();
        assert_eq!(resolve_threshold(Some(0), &config(1000, 5000), range, 4).unwrap(), 0);
        assert_eq!(resolve_threshold(Some(7), &config(1000, 0), range, 4).unwrap(), 7);
    }

    #[test]
    fn test_derived_threshold() {
        let range = Range::new(0, 1_000_000).unwrap();
        assert_eq!(resolve_threshold(None, &config(1000, 0), range, 4).unwrap(), 250_000);
    }

    #[test]
    fn test_small_derived_threshold_raised() {
        let range = Range::new(0, 100).unwrap();
        assert_eq!(resolve_threshold(None, &config(1000, 0), range, 4).unwrap(), 1001);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let range = Range::new(0, 100).unwrap();
        assert!(matches!(
            resolve_threshold(None, &config(1000, 0), range, 0),
            Err(ReduceError::InvalidArgument(InvalidArgument::ZeroParallelism))
        ));
    }

    #[test]
    fn test_describe_strategy() {
        assert_eq!(describe(ExecutionStrategy::Sequential), "sequential");
        assert_eq!(
            describe(ExecutionStrategy::Parallel { workers: 4 }),
            "work-stealing pool (4 workers)"
        );
    }
}
