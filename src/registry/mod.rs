//! Type registry integration: descriptors, clients, and version gating.

pub mod client;
pub mod descriptor;
pub mod factory;
pub mod http;
pub mod version;
