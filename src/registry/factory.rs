//! Randomized descriptor generation.
//!
//! Each verification run registers a type that must not collide with anything
//! already in the registry, including leftovers from earlier runs that failed
//! to clean up. Names are derived from a v4 UUID; deterministic
//! reproducibility is explicitly not a goal.

use crate::registry::descriptor::{TypeDescriptor, TypeScope};
use uuid::Uuid;

/// Factory for collision-resistant random type descriptors.
#[derive(Debug, Clone)]
pub struct DefinitionFactory {
    /// Domain suffix appended to generated groups.
    group_domain: String,
}

impl DefinitionFactory {
    /// Create a factory generating groups under the given domain
    /// (e.g. "example.com" yields groups like "probe-1a2b3c4d5e.example.com").
    pub fn new(group_domain: impl Into<String>) -> Self {
        Self {
            group_domain: group_domain.into(),
        }
    }

    /// Generate a descriptor with a fresh random name.
    pub fn random_descriptor(&self, scope: TypeScope) -> TypeDescriptor {
        let token = Uuid::new_v4().simple().to_string();
        let suffix = &token[..10];

        TypeDescriptor {
            group: format!("probe-{}.{}", suffix, self.group_domain),
            version: "v1".to_string(),
            kind: format!("Probe{}", suffix),
            plural: format!("probe{}s", suffix),
            scope,
        }
    }
}

impl Default for DefinitionFactory {
    fn default() -> Self {
        Self::new("example.com")
    }
}
