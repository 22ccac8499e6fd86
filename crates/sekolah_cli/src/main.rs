//! sekolah-check CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Every check passed or was skipped
//! - 1: At least one check failed
//! - 2: Runner error (unreadable config, bad arguments)

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const CHECKS_FAILED: u8 = 1;
    pub const RUNNER_ERROR: u8 = 2;
}

/// Default filter from the output flags. A non-empty `RUST_LOG` replaces it.
fn log_filter(quiet: bool, verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if let Some(filter) = rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
    {
        return filter;
    }

    let level = if quiet {
        "sekolah=warn"
    } else if verbose {
        "sekolah=debug"
    } else {
        "sekolah=info"
    };
    EnvFilter::new(format!("{},warn", level))
}

fn init_logging(cli: &Cli) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(cli.quiet, cli.verbose, rust_log.as_deref());

    // stdout carries the report; logs go to stderr
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(ExitCodes::RUNNER_ERROR)
            } else {
                ExitCode::from(ExitCodes::SUCCESS)
            };
        }
    };

    init_logging(&cli);
    let output = cli.output();

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args, &output),
        Commands::Data(args) => commands::data::execute(args, &output),
        Commands::InitConfig(args) => commands::init_config::execute(args, &output),
    };

    match result {
        Ok(true) => ExitCode::from(ExitCodes::SUCCESS),
        Ok(false) => ExitCode::from(ExitCodes::CHECKS_FAILED),
        Err(e) => {
            eprintln!("✗ Error: {:#}", e);
            ExitCode::from(ExitCodes::RUNNER_ERROR)
        }
    }
}
