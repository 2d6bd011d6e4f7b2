use clap::Parser;
use console::style;
use std::process::ExitCode;

use rangesum::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", style("✖").red(), err);
            cli::exit_code(&err)
        }
    }
}
