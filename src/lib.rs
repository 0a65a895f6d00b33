//! Regprobe - convergence verifier for dynamically registered resource types.
//!
//! Regprobe checks that a resource type submitted to a control plane's type
//! registry becomes observably available across every subsystem that derives
//! state from that registry, within a bounded time window, and that the
//! registration is reliably reversed afterward regardless of outcome.
//!
//! There is no single atomic signal that "registration is done". The routing
//! layer and the generated API document refresh independently, so correctness
//! is inferred by repeatedly probing derived views until they agree, with
//! explicit timeout and fail-fast semantics.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     RegistrationSession                         │
//! │        register → (verify convergence) → release, always        │
//! └─────────────────────────────────────────────────────────────────┘
//!                  │                          │
//! ┌────────────────────────────┐  ┌────────────────────────────────┐
//! │      ConvergencePoller     │  │        ControlPlane            │
//! │  bounded retry, fail-fast  │  │  register / deregister RPCs    │
//! └────────────────────────────┘  └────────────────────────────────┘
//!                  │
//! ┌────────────────────────────┐  ┌────────────────────────────────┐
//! │      DocumentMatcher       │◄─│        DocumentSource          │
//! │  token-presence predicate  │  │  generated API document fetch  │
//! └────────────────────────────┘  └────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! ## Core
//! - [`core::config`] - Configuration parsing and validation
//! - [`core::error`] - Error taxonomy and multi-failure reporting
//!
//! ## Registry
//! - [`registry::descriptor`] - Type descriptors and derived tokens
//! - [`registry::factory`] - Randomized descriptor generation
//! - [`registry::client`] - Control plane and discovery interfaces
//! - [`registry::http`] - HTTP implementations of both interfaces
//! - [`registry::version`] - Server version parsing and gating
//!
//! ## Convergence
//! - [`convergence::matcher`] - Document token matching
//! - [`convergence::poller`] - Bounded-retry poll loop
//!
//! ## Session
//! - [`session`] - End-to-end register/verify/release orchestration
//!
//! ## CLI
//! - [`cli::commands`] - CLI command implementations
//!
//! # Key Invariants
//!
//! - One live [`registry::client::RegistrationHandle`] per session; handles
//!   are consumed by value on release and cannot be reused.
//! - Release runs exactly once on every exit path after a successful
//!   registration, including convergence timeouts and probe aborts.
//! - A hard probe error aborts polling immediately; only "not yet visible"
//!   is retried.
//! - A failed session reports every failure it encountered, not just the
//!   first.

// Core infrastructure
pub mod core;

// Type registry integration
pub mod registry;

// Convergence detection
pub mod convergence;

// Session orchestration
pub mod session;

// CLI
pub mod cli;

// Re-exports for convenience
pub use self::core::{config, error};
pub use convergence::{matcher, poller};
pub use registry::{client, descriptor, factory, version};
pub use session::{RegistrationSession, SessionConfig, SessionState};
