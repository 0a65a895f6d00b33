//! Server version parsing and gating.
//!
//! Dynamic type registration only exists on sufficiently recent servers, so a
//! run may be skipped entirely when the target reports an older version. The
//! gate is a precondition check in the caller; the session core never
//! consults it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A server version of the form "v{major}.{minor}.{patch}".
///
/// Pre-release and build suffixes are ignored for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ServerVersion {
    /// Create a version from its components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string such as "v1.7.0" or "1.13.2-beta.1".
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim().trim_start_matches('v');

        // Cut pre-release/build metadata before splitting components.
        let core = trimmed
            .split(|c| c == '-' || c == '+')
            .next()
            .unwrap_or(trimmed);

        let mut parts = core.split('.');
        let major = parse_component(parts.next(), input)?;
        let minor = parse_component(parts.next(), input)?;
        let patch = match parts.next() {
            Some(p) => p
                .parse::<u32>()
                .with_context(|| format!("invalid version string: {}", input))?,
            None => 0,
        };

        if parts.next().is_some() {
            anyhow::bail!("invalid version string: {}", input);
        }

        Ok(Self {
            major,
            minor,
            patch,
        })
    }
}

fn parse_component(part: Option<&str>, input: &str) -> Result<u32> {
    part.ok_or_else(|| anyhow::anyhow!("invalid version string: {}", input))?
        .parse::<u32>()
        .with_context(|| format!("invalid version string: {}", input))
}

impl std::fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Precondition gate on the server's reported version.
#[derive(Debug, Clone, Copy)]
pub struct VersionGate {
    /// Minimum version required for the run to proceed.
    minimum: ServerVersion,
}

impl VersionGate {
    /// Create a gate requiring at least the given version.
    pub fn at_least(minimum: ServerVersion) -> Self {
        Self { minimum }
    }

    /// Minimum version this gate requires.
    pub fn minimum(&self) -> ServerVersion {
        self.minimum
    }

    /// Check whether a server at the reported version may be exercised.
    pub fn permits(&self, reported: ServerVersion) -> bool {
        reported >= self.minimum
    }
}
