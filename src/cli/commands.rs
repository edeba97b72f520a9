//! CLI argument definitions

use crate::infrastructure::DEFAULT_CONFIG_FILE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notesync")]
#[command(about = "Sync a notes directory with a remote git repository", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file, relative to the home directory unless absolute
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override the configured push mode (force, safe)
    #[arg(long, value_name = "MODE")]
    pub push_mode: Option<String>,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
