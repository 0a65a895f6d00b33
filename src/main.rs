//! Regprobe - unified CLI entrypoint.
//!
//! Usage:
//!   regprobe run --config config/regprobe.toml
//!   regprobe run --skip-verify
//!   regprobe config validate --config config/regprobe.toml
//!   regprobe config show --format json

use anyhow::Result;
use clap::Parser;
use regprobe::cli::commands::{run_config, run_session};
use regprobe::cli::{Cli, Commands};
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine config path - use global --config or default
    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config/regprobe.toml"));

    match cli.command {
        Commands::Run(args) => run_session(args, &config_path, cli.log_level),
        Commands::Config(args) => run_config(args, &config_path),
    }
}
