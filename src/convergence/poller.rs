//! Bounded-retry convergence polling.
//!
//! There is no push-based signal that a registration has propagated to every
//! derived view, so convergence is inferred by probing on a fixed cadence
//! until the probe reports success, a deadline expires, or the probe itself
//! fails. The loop distinguishes two very different conditions:
//!
//! - "not yet visible" is the expected eventually-consistent state and is
//!   retried until the deadline;
//! - a hard probe failure means the question could not be asked at all and
//!   aborts the loop immediately, so outages never masquerade as slow
//!   convergence.

use crate::core::error::ProbeError;
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of a single probe attempt.
#[derive(Debug)]
pub enum PollOutcome {
    /// The condition holds; polling can stop.
    Converged,
    /// The condition does not hold yet; retry after the next tick.
    NotYetConverged,
    /// The probe could not be evaluated at all.
    ProbeFailed(ProbeError),
}

impl PollOutcome {
    /// Build an outcome from a fallible boolean check.
    pub fn from_check(check: Result<bool, ProbeError>) -> Self {
        match check {
            Ok(true) => Self::Converged,
            Ok(false) => Self::NotYetConverged,
            Err(e) => Self::ProbeFailed(e),
        }
    }
}

/// Final verdict of a poll run.
#[derive(Debug)]
pub enum ConvergenceResult {
    /// The probe reported success before the deadline.
    Converged {
        /// Number of probe invocations, including the successful one.
        attempts: u32,
    },
    /// The probe consistently reported "not yet" until the deadline.
    TimedOut {
        /// Number of probe invocations performed.
        attempts: u32,
    },
    /// The probe hit a hard error; no further attempts were made.
    Aborted(ProbeError),
}

impl ConvergenceResult {
    /// Whether the run ended in convergence.
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }
}

/// Poll cadence and deadline.
#[derive(Debug, Clone, Copy)]
pub struct PollSchedule {
    /// Time between probe attempts.
    pub interval: Duration,
    /// Overall deadline, measured from the start of the run.
    pub timeout: Duration,
}

impl PollSchedule {
    /// Create a schedule with the given cadence and deadline.
    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

/// Run a probe on a fixed cadence until it converges, aborts, or the
/// deadline expires.
///
/// At least one probe is performed even when the timeout is shorter than the
/// interval. The sleep between attempts blocks the calling thread; this is a
/// deliberate bounded wait, not a busy loop.
pub fn poll<P>(schedule: PollSchedule, mut probe: P) -> ConvergenceResult
where
    P: FnMut() -> PollOutcome,
{
    let started = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        match probe() {
            PollOutcome::Converged => {
                debug!(attempts, "probe converged");
                return ConvergenceResult::Converged { attempts };
            }
            PollOutcome::ProbeFailed(error) => {
                debug!(attempts, %error, "probe failed hard, aborting");
                return ConvergenceResult::Aborted(error);
            }
            PollOutcome::NotYetConverged => {
                let elapsed = started.elapsed();
                if elapsed >= schedule.timeout {
                    debug!(attempts, ?elapsed, "deadline reached without convergence");
                    return ConvergenceResult::TimedOut { attempts };
                }
                debug!(attempts, ?elapsed, "not yet converged, sleeping");
                std::thread::sleep(schedule.interval);
            }
        }
    }
}
