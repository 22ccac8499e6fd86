//! CLI command definitions.
//!
//! Each subcommand returns `Ok(true)` when every check passed or was
//! skipped, `Ok(false)` when at least one failed, and `Err` when the run
//! itself could not proceed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use sekolah_policy::{banner, render_text, CheckSuite, DataPolicy, SuiteReport, DEFAULT_POLICY_FILE};

pub mod data;
pub mod init_config;
pub mod run;

/// sekolah-check - data-quality gate for the sekolah-pseo schools dataset
#[derive(Parser)]
#[command(name = "sekolah-check")]
#[command(version, about = "Data-quality gate for the sekolah-pseo schools dataset")]
#[command(long_about = r#"
sekolah-check validates the ETL output of the sekolah-pseo site build and
smoke-checks the project layout around it.

COMMANDS:
  run          → Project structure checks plus every data check
  data         → Data checks against an explicit CSV file
  init-config  → Write the default policy file

EXIT CODES:
  0 - All checks passed or were skipped
  1 - At least one check failed
  2 - Runner error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show every check result, not only failures
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress the banner and progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print a machine-readable JSON report
    #[arg(long, global = true)]
    pub json: bool,

    /// Policy file (defaults to <root>/sekolah-check.yaml when present)
    #[arg(long, global = true, env = "SEKOLAH_CHECK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output(&self) -> Output {
        Output {
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
            config: self.config.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full suite against a project root
    Run(run::RunArgs),

    /// Run only the data checks against a CSV file
    Data(data::DataArgs),

    /// Write the default policy file
    #[command(name = "init-config")]
    InitConfig(init_config::InitConfigArgs),
}

/// Global flags every command honours.
#[derive(Debug, Clone, Default)]
pub struct Output {
    pub verbose: bool,
    pub quiet: bool,
    pub json: bool,
    pub config: Option<PathBuf>,
}

/// Resolve the policy: explicit file, then the default file under `root`,
/// then built-in defaults.
pub fn load_policy(config: Option<&Path>, root: &Path) -> Result<DataPolicy> {
    if let Some(path) = config {
        info!("Loading policy from {:?}", path);
        return DataPolicy::from_file(path).with_context(|| format!("Failed to load policy {}", path.display()));
    }

    let discovered = root.join(DEFAULT_POLICY_FILE);
    if discovered.is_file() {
        info!("Loading policy from {:?}", discovered);
        return DataPolicy::from_file(&discovered)
            .with_context(|| format!("Failed to load policy {}", discovered.display()));
    }

    debug!("No policy file found, using defaults");
    Ok(DataPolicy::default())
}

/// Print the banner unless the output is quiet or machine-readable.
pub fn announce(output: &Output) {
    if !output.quiet && !output.json {
        println!("{}", banner("SEKOLAH-PSEO TEST SUITE"));
    }
}

/// Print the report for a finished suite and return whether it passed.
pub fn emit(suite: &CheckSuite, output: &Output) -> Result<bool> {
    if output.json {
        let json = SuiteReport::new(suite)
            .to_json()
            .context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", render_text(suite, output.verbose));
    }

    Ok(suite.passed())
}
