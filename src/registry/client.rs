//! Control plane and discovery interfaces.
//!
//! These traits are the session's only view of the outside world. Both are
//! synchronous, single-shot operations: the session never retries a
//! registration or deregistration itself, and a probe fetch that fails is a
//! hard error, not a retry candidate.

use crate::core::error::{CreationError, DeletionError, ProbeError};
use crate::registry::descriptor::TypeDescriptor;
use crate::registry::version::ServerVersion;
use bytes::Bytes;

/// Opaque token for a live registration.
///
/// Owned exclusively by the session that acquired it and consumed by value on
/// release, so a released handle cannot be reused.
#[derive(Debug, PartialEq, Eq)]
pub struct RegistrationHandle {
    /// Registry-side name of the registered type definition.
    name: String,
}

impl RegistrationHandle {
    /// Create a handle for a registry object with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Registry-side name this handle refers to.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Client for the control plane's type registry.
pub trait ControlPlane {
    /// Submit a type definition, obtaining a handle for the live registration.
    fn register(&self, descriptor: &TypeDescriptor) -> Result<RegistrationHandle, CreationError>;

    /// Remove a previously registered type definition.
    ///
    /// Consumes the handle; there is nothing valid to retry with afterward.
    fn deregister(&self, handle: RegistrationHandle) -> Result<(), DeletionError>;

    /// Report the server's version, for gating.
    fn server_version(&self) -> Result<ServerVersion, ProbeError>;
}

/// Read-only source of the generated API document.
///
/// The document is rebuilt periodically by an independent server-side
/// process; consecutive fetches may observe different generations.
pub trait DocumentSource {
    /// Fetch the current document blob.
    fn fetch(&self) -> Result<Bytes, ProbeError>;
}
