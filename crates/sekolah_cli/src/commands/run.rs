//! Run command - full suite against a project root.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use sekolah_policy::run_all;

use super::{announce, emit, load_policy, Output};

#[derive(Args)]
pub struct RunArgs {
    /// Project root to check
    #[arg(short, long, default_value = ".", env = "SEKOLAH_ROOT")]
    pub root: PathBuf,
}

pub fn execute(args: RunArgs, output: &Output) -> Result<bool> {
    if !args.root.is_dir() {
        anyhow::bail!("Project root not found: {}", args.root.display());
    }

    let policy = load_policy(output.config.as_deref(), &args.root)?;

    announce(output);
    info!("Checking project at {:?}", args.root);

    let suite = run_all(&args.root, &policy);
    emit(&suite, output)
}
