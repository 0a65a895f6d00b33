//! Run command implementation.

use crate::core::config::{Config, ConfigOverrides};
use crate::registry::client::ControlPlane;
use crate::registry::descriptor::TypeScope;
use crate::registry::factory::DefinitionFactory;
use crate::registry::http::{HttpControlPlane, HttpDocumentSource};
use crate::registry::version::{ServerVersion, VersionGate};
use crate::session::{RegistrationSession, SessionConfig};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

/// Run one register/verify/release session.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Skip the convergence check; only exercise registration and release.
    #[arg(long)]
    pub skip_verify: bool,

    /// Register a namespaced type instead of a cluster-scoped one.
    #[arg(long)]
    pub namespaced: bool,
}

/// Initialize the tracing subscriber.
fn init_tracing(default_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// Run the session command with the given config path.
pub fn run_session(args: RunArgs, config_path: &PathBuf, log_level: Option<String>) -> Result<()> {
    let mut config = Config::from_file(config_path)
        .with_context(|| format!("failed to load config from {:?}", config_path))?;
    config.apply_overrides(&ConfigOverrides {
        log_level,
        verify: if args.skip_verify { Some(false) } else { None },
    });

    init_tracing(&config.telemetry.log_level);

    let control_plane =
        HttpControlPlane::from_config(&config).context("failed to initialize control plane client")?;
    let documents =
        HttpDocumentSource::from_config(&config).context("failed to initialize document fetcher")?;

    // Version gating is a precondition of the run, not part of the session:
    // a server too old to support dynamic registration is a skip, not a
    // failure.
    if let Some(ref minimum) = config.version_gate.minimum {
        let gate = VersionGate::at_least(ServerVersion::parse(minimum)?);
        let reported = control_plane
            .server_version()
            .context("failed to query server version")?;
        if !gate.permits(reported) {
            warn!(%reported, minimum = %gate.minimum(), "server below minimum version, skipping");
            return Ok(());
        }
        info!(%reported, "server version gate passed");
    }

    let scope = if args.namespaced {
        TypeScope::Namespaced
    } else {
        TypeScope::Cluster
    };
    let descriptor = DefinitionFactory::default().random_descriptor(scope);

    let mut session = RegistrationSession::new(
        &control_plane,
        &documents,
        SessionConfig::from_config(&config),
    );

    session.run(&descriptor).map_err(anyhow::Error::from)?;
    info!("session completed successfully");
    Ok(())
}
