//! Configuration parsing and validation.
//!
//! Regprobe configuration is loaded from TOML files with CLI overrides.
//! Sections mirror the components of a verification run: the control plane
//! under test, the discovery document it serves, the convergence poll
//! calibration, and telemetry.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level regprobe configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Control plane endpoint configuration.
    pub control_plane: ControlPlaneConfig,

    /// Discovery document configuration.
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Convergence poll calibration.
    #[serde(default)]
    pub convergence: ConvergenceConfig,

    /// Server version gating.
    #[serde(default)]
    pub version_gate: VersionGateConfig,

    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Control plane endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlPlaneConfig {
    /// Base URL of the control plane API (e.g. "http://127.0.0.1:8080").
    pub base_url: String,

    /// Per-request timeout in seconds for registry RPCs.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

/// Discovery document configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Well-known path of the generated API document.
    #[serde(default = "default_document_path")]
    pub document_path: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            document_path: default_document_path(),
        }
    }
}

/// Convergence poll calibration.
///
/// The defaults (5s cadence, 120s deadline) were chosen to exceed one full
/// refresh cycle of the slowest downstream subsystem that rebuilds its view
/// of the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvergenceConfig {
    /// Seconds between probe attempts.
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,

    /// Overall deadline in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Whether to verify convergence at all. When false the session only
    /// exercises registration and release.
    #[serde(default = "default_verify")]
    pub verify: bool,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval_seconds(),
            timeout_seconds: default_timeout_seconds(),
            verify: default_verify(),
        }
    }
}

impl ConvergenceConfig {
    /// Poll cadence as a duration.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// Poll deadline as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Server version gating.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionGateConfig {
    /// Minimum server version required to run (e.g. "v1.7.0").
    /// When absent the session runs against any server.
    #[serde(default)]
    pub minimum: Option<String>,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// Default value functions

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_document_path() -> String {
    "/swagger.json".to_string()
}

fn default_interval_seconds() -> u64 {
    5
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_verify() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

/// CLI overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override for telemetry.log_level.
    pub log_level: Option<String>,

    /// Override for convergence.verify.
    pub verify: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| "failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).with_context(|| "failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides to the configuration.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref log_level) = overrides.log_level {
            self.telemetry.log_level = log_level.clone();
        }
        if let Some(verify) = overrides.verify {
            self.convergence.verify = verify;
        }
    }

    /// Validate configuration consistency.
    pub fn validate(&self) -> Result<()> {
        self.validate_control_plane()?;
        self.validate_discovery()?;
        self.validate_convergence()?;
        self.validate_version_gate()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_control_plane(&self) -> Result<()> {
        if self.control_plane.base_url.is_empty() {
            anyhow::bail!("control_plane.base_url must not be empty");
        }
        if !self.control_plane.base_url.starts_with("http://")
            && !self.control_plane.base_url.starts_with("https://")
        {
            anyhow::bail!(
                "control_plane.base_url must start with http:// or https://, got: {}",
                self.control_plane.base_url
            );
        }
        if self.control_plane.request_timeout_seconds == 0 {
            anyhow::bail!("control_plane.request_timeout_seconds must be > 0");
        }
        Ok(())
    }

    fn validate_discovery(&self) -> Result<()> {
        if !self.discovery.document_path.starts_with('/') {
            anyhow::bail!(
                "discovery.document_path must start with '/', got: {}",
                self.discovery.document_path
            );
        }
        Ok(())
    }

    fn validate_convergence(&self) -> Result<()> {
        if self.convergence.interval_seconds == 0 {
            anyhow::bail!("convergence.interval_seconds must be > 0");
        }
        if self.convergence.timeout_seconds == 0 {
            anyhow::bail!("convergence.timeout_seconds must be > 0");
        }
        Ok(())
    }

    fn validate_version_gate(&self) -> Result<()> {
        if let Some(ref minimum) = self.version_gate.minimum {
            crate::registry::version::ServerVersion::parse(minimum)
                .with_context(|| format!("version_gate.minimum is not a valid version: {}", minimum))?;
        }
        Ok(())
    }

    fn validate_telemetry(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "telemetry.log_level must be one of {:?}, got: {}",
                valid_levels,
                self.telemetry.log_level
            );
        }
        Ok(())
    }
}
