//! Reconocer CLI
//!
//! Experiment-configuration entry point for the reconocer toolkit.
//!
//! # Usage
//!
//! ```bash
//! # Validate a config
//! reconocer validate experiment.yaml
//!
//! # Validate with overrides
//! reconocer validate experiment.yaml --set test.batch_size=64
//!
//! # Show the resolved config
//! reconocer info experiment.yaml --format yaml
//!
//! # Write a starter config
//! reconocer init --template image-triplet --output experiment.yaml
//! ```

use clap::Parser;
use reconocer::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
