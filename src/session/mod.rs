//! Registration sessions.
//!
//! A session drives one end-to-end exercise: register a type descriptor with
//! the control plane, optionally wait for every derived view to agree the
//! type exists, and release the registration on exit no matter what happened
//! in between. Release is exactly-once by construction: once the handle is
//! acquired there are no early returns between acquisition and the
//! deregistration call; verification failures are accumulated instead of
//! propagated.
//!
//! Dependencies are injected explicitly. A session owns no global state and
//! holds no shared mutable state, so any number of sessions may run
//! concurrently as long as their descriptors do not collide (which the
//! randomized factory guarantees).

use crate::convergence::matcher;
use crate::convergence::poller::{self, ConvergenceResult, PollOutcome, PollSchedule};
use crate::core::config::Config;
use crate::core::error::{SessionError, SessionFailure, SessionResult};
use crate::registry::client::{ControlPlane, DocumentSource};
use crate::registry::descriptor::TypeDescriptor;
use std::time::Duration;
use tracing::{error, info, warn};

/// Where a session currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing has happened yet.
    Idle,
    /// The registration call is in flight.
    Registering,
    /// The handle is live; nothing further has been attempted.
    Registered,
    /// Convergence polling is in progress.
    Verifying,
    /// The deregistration call is in flight.
    Releasing,
    /// The session completed with no failures.
    Done,
    /// The session ended with at least one failure.
    Failed {
        /// Kind of the first failure encountered.
        kind: &'static str,
    },
}

/// Per-session configuration.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Time between convergence probe attempts.
    pub poll_interval: Duration,

    /// Overall convergence deadline.
    pub poll_timeout: Duration,

    /// Whether to run the convergence check at all.
    pub verify_convergence: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            poll_timeout: Duration::from_secs(120),
            verify_convergence: true,
        }
    }
}

impl SessionConfig {
    /// Derive session settings from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            poll_interval: config.convergence.interval(),
            poll_timeout: config.convergence.timeout(),
            verify_convergence: config.convergence.verify,
        }
    }
}

/// One end-to-end register/verify/release exercise.
pub struct RegistrationSession<'a> {
    control_plane: &'a dyn ControlPlane,
    documents: &'a dyn DocumentSource,
    config: SessionConfig,
    state: SessionState,
}

impl<'a> RegistrationSession<'a> {
    /// Create a session over the given collaborators.
    pub fn new(
        control_plane: &'a dyn ControlPlane,
        documents: &'a dyn DocumentSource,
        config: SessionConfig,
    ) -> Self {
        Self {
            control_plane,
            documents,
            config,
            state: SessionState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run the session to completion.
    ///
    /// On failure the returned [`SessionFailure`] enumerates every error
    /// encountered, in order; a convergence timeout does not hide a later
    /// deletion failure or vice versa.
    pub fn run(&mut self, descriptor: &TypeDescriptor) -> SessionResult<()> {
        self.state = SessionState::Registering;
        info!(%descriptor, name = %descriptor.registry_name(), "registering type definition");

        // Registration failure is fatal: no handle exists, so there is
        // nothing to release and no later step can run.
        let handle = match self.control_plane.register(descriptor) {
            Ok(handle) => handle,
            Err(e) => {
                error!(%e, "registration failed");
                let error = SessionError::from(e);
                self.state = SessionState::Failed { kind: error.kind() };
                return Err(SessionFailure::single(error));
            }
        };
        self.state = SessionState::Registered;

        // The handle is live. From here to the deregister call there are no
        // early returns; failures accumulate so that release always runs.
        let mut failures: Vec<SessionError> = Vec::new();

        if self.config.verify_convergence {
            self.state = SessionState::Verifying;
            let schedule = PollSchedule::new(self.config.poll_interval, self.config.poll_timeout);
            let documents = self.documents;

            let verdict = poller::poll(schedule, || {
                PollOutcome::from_check(
                    documents
                        .fetch()
                        .map(|document| matcher::matches(&document, descriptor)),
                )
            });

            match verdict {
                ConvergenceResult::Converged { attempts } => {
                    info!(attempts, "type visible in generated document");
                }
                ConvergenceResult::TimedOut { attempts } => {
                    warn!(
                        attempts,
                        timeout = ?self.config.poll_timeout,
                        "type never became visible before the deadline"
                    );
                    failures.push(SessionError::ConvergenceTimeout {
                        timeout: self.config.poll_timeout,
                    });
                }
                ConvergenceResult::Aborted(e) => {
                    error!(%e, "convergence probe aborted");
                    failures.push(SessionError::from(e));
                }
            }
        }

        self.state = SessionState::Releasing;
        info!(name = %handle.name(), "releasing type definition");
        if let Err(e) = self.control_plane.deregister(handle) {
            error!(%e, "deregistration failed");
            failures.push(SessionError::from(e));
        }

        match SessionFailure::from_errors(failures) {
            None => {
                self.state = SessionState::Done;
                Ok(())
            }
            Some(failure) => {
                self.state = SessionState::Failed {
                    kind: failure.errors[0].kind(),
                };
                Err(failure)
            }
        }
    }
}
