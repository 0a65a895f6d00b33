//! CLI command implementations.

mod config;
mod run;

pub use config::{run_config, ConfigArgs, ConfigCommand};
pub use run::{run_session, RunArgs};
