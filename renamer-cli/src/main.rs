//! Renamer CLI - rename files to `YYYY-MM-DD - Description.ext`
//!
//! Usage:
//!   file-renamer <PATH> [--dry-run] [-v] [--separator dash|underscore]
//!                       [--include-hidden] [--force-rename]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use renamer_core::{RenameConfig, Renamer, Separator, DEFAULT_MAX_DESCRIPTION_LEN, DEFAULT_MAX_FILENAME_LEN};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "file-renamer")]
#[command(about = "Rename files or a single file in PATH based on their modification date and contents", long_about = None)]
#[command(version)]
struct Cli {
    /// File or directory to rename
    #[arg(value_parser = existing_path)]
    path: PathBuf,

    /// Show what would be renamed without making changes
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Preferred separator for filenames
    #[arg(long, value_enum, default_value_t = SeparatorArg::Dash)]
    separator: SeparatorArg,

    /// Include hidden files (dot files) in processing
    #[arg(long)]
    include_hidden: bool,

    /// Re-process files that are already renamed
    #[arg(long)]
    force_rename: bool,

    /// Maximum length of a content-derived description
    #[arg(long, default_value_t = DEFAULT_MAX_DESCRIPTION_LEN)]
    max_description_length: usize,

    /// Maximum length of the complete new filename
    #[arg(long, default_value_t = DEFAULT_MAX_FILENAME_LEN)]
    max_filename_length: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SeparatorArg {
    Dash,
    Underscore,
}

impl From<SeparatorArg> for Separator {
    fn from(arg: SeparatorArg) -> Self {
        match arg {
            SeparatorArg::Dash => Separator::Dash,
            SeparatorArg::Underscore => Separator::Underscore,
        }
    }
}

impl Cli {
    fn config(&self) -> RenameConfig {
        RenameConfig::new()
            .with_dry_run(self.dry_run)
            .with_verbose(self.verbose)
            .with_separator(self.separator.into())
            .with_hidden(self.include_hidden)
            .with_force_rename(self.force_rename)
            .with_max_description_len(self.max_description_length)
            .with_max_filename_len(self.max_filename_length)
    }
}

/// Reject paths that do not exist before any processing starts
fn existing_path(s: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("Path '{}' does not exist.", s))
    }
}

/// Install the global subscriber at the configured level
fn init_logging(config: &RenameConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level()))
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();

    init_logging(&config)?;

    // Per-file failures are logged by the renamer; only path-level errors surface here
    if let Err(e) = Renamer::new(config).run(&cli.path) {
        tracing::error!("{}", e);
    }

    Ok(())
}
