//! Config command implementation.

use crate::core::config::Config;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration operations.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands. The file path comes from the global `--config` flag.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate the configuration file.
    Validate,
    /// Print configuration with defaults applied.
    Show {
        /// Output format (toml, json).
        #[arg(long, default_value = "toml")]
        format: String,
    },
}

/// Run the config command against the given config path.
pub fn run_config(args: ConfigArgs, config_path: &PathBuf) -> Result<()> {
    match args.command {
        ConfigCommand::Validate => {
            Config::from_file(config_path)
                .with_context(|| format!("validation failed for {:?}", config_path))?;
            println!("configuration is valid: {}", config_path.display());
            Ok(())
        }
        ConfigCommand::Show { format } => {
            let loaded = Config::from_file(config_path)
                .with_context(|| format!("failed to load {:?}", config_path))?;
            let rendered = match format.as_str() {
                "toml" => toml::to_string_pretty(&loaded).context("failed to render toml")?,
                "json" => {
                    serde_json::to_string_pretty(&loaded).context("failed to render json")?
                }
                other => anyhow::bail!("unknown format: {} (expected toml or json)", other),
            };
            println!("{}", rendered);
            Ok(())
        }
    }
}
