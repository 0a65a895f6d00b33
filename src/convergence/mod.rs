//! Convergence detection: document matching and bounded-retry polling.

pub mod matcher;
pub mod poller;
