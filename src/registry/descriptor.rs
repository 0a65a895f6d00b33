//! Resource type descriptors and their derived tokens.
//!
//! A descriptor identifies a dynamically registered extensible type within
//! the control plane: group, version, kind, plural name, and scope. It is
//! produced once per session and never mutated afterward; the routing path
//! and document tokens derived from it must stay stable for the duration of
//! convergence polling.

use serde::{Deserialize, Serialize};

/// Scope of a registered resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeScope {
    /// Instances live at cluster level, outside any namespace.
    Cluster,
    /// Instances live inside a namespace.
    Namespaced,
}

impl std::fmt::Display for TypeScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cluster => write!(f, "cluster"),
            Self::Namespaced => write!(f, "namespaced"),
        }
    }
}

/// Immutable descriptor of the resource type under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// String namespace for the type (e.g. "example.com").
    pub group: String,

    /// API version (e.g. "v1").
    pub version: String,

    /// Type name in singular, capitalized form (e.g. "Widget").
    pub kind: String,

    /// Plural name used in routing paths (e.g. "widgets").
    pub plural: String,

    /// Cluster or namespaced scope.
    pub scope: TypeScope,
}

impl TypeDescriptor {
    /// Token under which the type's schema appears in generated documents.
    ///
    /// Format: `{group}.{version}.{kind}`.
    pub fn definition_token(&self) -> String {
        format!("{}.{}.{}", self.group, self.version, self.kind)
    }

    /// Token under which the type's routes appear in generated documents.
    ///
    /// Format: `/apis/{group}/{version}/{plural}`.
    pub fn route_token(&self) -> String {
        format!("/apis/{}/{}/{}", self.group, self.version, self.plural)
    }

    /// Name under which the registry addresses the type definition itself.
    ///
    /// Format: `{plural}.{group}`.
    pub fn registry_name(&self) -> String {
        format!("{}.{}", self.plural, self.group)
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} kind={} ({})",
            self.group, self.version, self.kind, self.scope
        )
    }
}
