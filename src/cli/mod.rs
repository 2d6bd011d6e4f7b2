//! Command-line interface for rangesum
//!
//! clap parses the arguments, the commands load configuration and run the
//! reducer, and [`exit_code`] maps failures onto process exit codes.

use std::process::ExitCode;

use crate::error::ReduceError;

mod commands;
mod output;

pub use commands::{Cli, Commands};
pub use output::Output;

/// Computed and closed-form sums disagree
pub const EXIT_MISMATCH: u8 = 1;
/// Invalid arguments or configuration
pub const EXIT_INVALID: u8 = 2;
/// The execution substrate failed
pub const EXIT_SUBSTRATE: u8 = 3;

/// Exit code for an error returned by [`Cli::run`]
pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ReduceError>() {
        Some(ReduceError::SubstrateFailure(_)) => ExitCode::from(EXIT_SUBSTRATE),
        Some(ReduceError::InvalidArgument(_)) | None => ExitCode::from(EXIT_INVALID),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InvalidArgument, SubstrateError};

    #[test]
    fn test_exit_codes() {
        let invalid = anyhow::Error::from(ReduceError::from(InvalidArgument::ZeroParallelism));
        assert_eq!(exit_code(&invalid), ExitCode::from(EXIT_INVALID));

        let failed = anyhow::Error::from(ReduceError::from(SubstrateError::Exhausted(
            "no workers".to_string(),
        )));
        assert_eq!(exit_code(&failed), ExitCode::from(EXIT_SUBSTRATE));

        let config = anyhow::anyhow!("Config file not found: missing.toml");
        assert_eq!(exit_code(&config), ExitCode::from(EXIT_INVALID));
    }
}
