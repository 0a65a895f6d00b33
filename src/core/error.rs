//! Error types for registration sessions.
//!
//! Regprobe distinguishes three transport-level failures (creation, deletion,
//! probe fetch) from the session-level taxonomy built on top of them. A
//! session can end with more than one failure: a convergence timeout followed
//! by a failed deregistration must surface both, so the terminal error type
//! is a non-empty list rather than a single variant.

use std::time::Duration;
use thiserror::Error;

/// The registration call against the control plane was rejected or failed.
///
/// Fatal to the session; nothing was acquired, so release is skipped.
#[derive(Debug, Clone, Error)]
#[error("type registration failed: {message}")]
pub struct CreationError {
    /// Human-readable failure description.
    pub message: String,

    /// HTTP status code, when the control plane answered at all.
    pub status: Option<u16>,
}

impl CreationError {
    /// Create a creation error from a transport-level message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Create a creation error carrying the control plane's status code.
    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }
}

/// The deregistration call against the control plane failed.
///
/// Reported as a session failure but does not retroactively change the
/// verdict of the steps that ran before release.
#[derive(Debug, Clone, Error)]
#[error("type deregistration failed: {message}")]
pub struct DeletionError {
    /// Human-readable failure description.
    pub message: String,

    /// HTTP status code, when the control plane answered at all.
    pub status: Option<u16>,
}

impl DeletionError {
    /// Create a deletion error from a transport-level message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Create a deletion error carrying the control plane's status code.
    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }
}

/// The convergence probe's underlying fetch failed.
///
/// A hard error from the probe aborts polling immediately and is never
/// conflated with "not yet visible", which is the only retried condition.
#[derive(Debug, Clone, Error)]
#[error("convergence probe failed: {message}")]
pub struct ProbeError {
    /// Human-readable failure description.
    pub message: String,
}

impl ProbeError {
    /// Create a probe error from a transport-level message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A single failure encountered during a registration session.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// Configuration could not be loaded or was invalid.
    #[error("failed to load configuration: {message}")]
    ConfigLoad { message: String },

    /// The control plane client could not be constructed.
    #[error("failed to initialize control plane client: {message}")]
    ClientInit { message: String },

    /// Registration was rejected; nothing was acquired.
    #[error(transparent)]
    Creation(#[from] CreationError),

    /// The convergence probe hit a hard transport failure.
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// The registered type never became visible before the deadline.
    #[error("registered type did not converge within {timeout:?}")]
    ConvergenceTimeout { timeout: Duration },

    /// Deregistration failed after the handle was acquired.
    #[error(transparent)]
    Deletion(#[from] DeletionError),
}

impl SessionError {
    /// Stable short name for the failure kind, used in logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigLoad { .. } => "config_load",
            Self::ClientInit { .. } => "client_init",
            Self::Creation(_) => "creation",
            Self::Probe(_) => "probe",
            Self::ConvergenceTimeout { .. } => "convergence_timeout",
            Self::Deletion(_) => "deletion",
        }
    }
}

/// Terminal outcome of a failed session, enumerating every failure.
///
/// A session that times out waiting for convergence and then fails to
/// deregister carries both errors here; neither masks the other.
#[derive(Debug, Clone)]
pub struct SessionFailure {
    /// Every failure encountered, in the order it occurred. Never empty.
    pub errors: Vec<SessionError>,
}

impl SessionFailure {
    /// Wrap a single failure.
    pub fn single(error: SessionError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Build from an accumulated list.
    ///
    /// Returns `None` when the list is empty (the session succeeded).
    pub fn from_errors(errors: Vec<SessionError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Check whether any recorded failure has the given kind.
    pub fn contains_kind(&self, kind: &str) -> bool {
        self.errors.iter().any(|e| e.kind() == kind)
    }
}

impl std::fmt::Display for SessionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, " [{}] {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SessionFailure {}

/// Result type for session-level operations.
pub type SessionResult<T> = Result<T, SessionFailure>;
