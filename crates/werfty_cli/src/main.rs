//! werfty CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or unsupported provider
//! - 3: Validation or detection failure
//! - 4: Plugin error
//! - 5: I/O error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use werfty_gen::{ErrorCategory, GenError};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const PLUGIN_ERROR: u8 = 4;
    pub const IO_ERROR: u8 = 5;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "werfty=debug"
    } else if cli.quiet {
        "werfty=warn"
    } else {
        "werfty=info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Schemas(args) => commands::schemas::execute(args),
        Commands::ListExamples(args) => commands::list_examples::execute(args),
        Commands::Plugins(args) => commands::plugins::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    let Some(gen_error) = e.chain().find_map(|cause| cause.downcast_ref::<GenError>()) else {
        return ExitCodes::GENERAL_ERROR;
    };

    match gen_error.category() {
        ErrorCategory::Provider => ExitCodes::INVALID_ARGS,
        ErrorCategory::Config | ErrorCategory::Schema | ErrorCategory::Detection => {
            ExitCodes::VALIDATION_FAILURE
        }
        ErrorCategory::Plugin => ExitCodes::PLUGIN_ERROR,
        ErrorCategory::Io => ExitCodes::IO_ERROR,
    }
}
