//! Init-config command - write the default policy file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use sekolah_policy::{DataPolicy, DEFAULT_POLICY_FILE};

use super::Output;

#[derive(Args)]
pub struct InitConfigArgs {
    /// Where to write the policy file
    #[arg(short, long, default_value = DEFAULT_POLICY_FILE)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn execute(args: InitConfigArgs, output: &Output) -> Result<bool> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }

    let yaml = DataPolicy::default()
        .to_yaml()
        .context("Failed to serialize default policy")?;
    let content = format!("# sekolah-check policy\n{}", yaml);

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&args.output, content).with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("Wrote default policy to {:?}", args.output);
    if !output.quiet && !output.json {
        println!("✓ Wrote {}", args.output.display());
    }

    Ok(true)
}
