//! Command-line interface.
//!
//! Unified CLI for regprobe operations.

pub mod commands;

use clap::{Parser, Subcommand};

/// Regprobe - convergence verifier for dynamically registered resource types.
#[derive(Parser, Debug)]
#[command(name = "regprobe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one register/verify/release session.
    Run(commands::RunArgs),
    /// Configuration operations.
    Config(commands::ConfigArgs),
}
