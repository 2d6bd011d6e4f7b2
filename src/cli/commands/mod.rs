use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::process::ExitCode;

use super::Output;

pub mod config;
pub mod sum;
pub mod version;

#[derive(Parser)]
#[command(
    name = "rangesum",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sum integer ranges with parallel divide-and-conquer",
    long_about = "rangesum splits a range in half until each piece is below a threshold, \
                  sums the pieces on a pool of workers, and checks the result against \
                  the closed-form formula."
)]
pub struct Cli {
    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sum the range [FROM, N] and verify it against N(N+1)/2
    Sum(sum::SumArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Show version information
    Version,
}

impl Cli {
    pub fn run(self) -> Result<ExitCode> {
        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        match self.command {
            Some(Commands::Sum(args)) => sum::execute(args, self.config.as_deref(), &output),
            Some(Commands::Config(args)) => {
                config::execute(args, self.config.as_deref())?;
                Ok(ExitCode::SUCCESS)
            }
            Some(Commands::Version) => {
                version::execute(&output);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                Cli::command().print_help()?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
