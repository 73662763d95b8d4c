//! CLI command implementations

mod info;
mod init;
mod validate;

use crate::cli::LogLevel;
use crate::config::{Cli, Command, LoadOptions};
use crate::validate::Strictness;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    // Configure output based on verbose/quiet flags
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match cli.command {
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Info(args) => info::run_info(args, log_level),
        Command::Init(args) => init::run_init(args, log_level),
    }
}

/// Build load options from the shared CLI flags
pub(crate) fn load_options(set: &[String], strict: bool) -> Result<LoadOptions, String> {
    let overrides =
        crate::config::parse_overrides(set).map_err(|e| e.to_string())?;
    let strictness = if strict { Strictness::Strict } else { Strictness::Lenient };
    Ok(LoadOptions { strictness, overrides })
}
