//! Data command - row checks against an explicit CSV file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use tracing::info;

use sekolah_policy::run_data;

use super::{announce, emit, load_policy, Output};

#[derive(Args)]
pub struct DataArgs {
    /// CSV file to validate
    pub file: PathBuf,
}

pub fn execute(args: DataArgs, output: &Output) -> Result<bool> {
    let policy = load_policy(output.config.as_deref(), Path::new("."))?;

    announce(output);
    info!("Validating {:?}", args.file);

    let suite = run_data(&args.file, &policy);
    emit(&suite, output)
}
