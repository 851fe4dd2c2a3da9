//! Error types for plan-engine

use std::fmt;

/// Result type for plan-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Definition namespaces within a workspace.
///
/// Blueprint and project names are independent; a blueprint and a project
/// may share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefKind {
    Blueprint,
    Project,
}

impl fmt::Display for DefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefKind::Blueprint => f.write_str("blueprint"),
            DefKind::Project => f.write_str("project"),
        }
    }
}

/// Errors that can occur while resolving blueprints and building projects
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An include graph revisits a blueprint already on the active
    /// expansion path. Carries the full cycle, e.g. `a -> b -> a`.
    #[error("circular include: {path}")]
    CircularInclude { path: String },

    /// An `include` directive names a blueprint that was never loaded
    #[error("unknown blueprint '{name}'")]
    UnknownBlueprint { name: String },

    /// A project's `use` directive names a blueprint that was never loaded
    #[error("project '{project}' references unknown blueprint '{blueprint}'")]
    UnknownProjectBlueprint { project: String, blueprint: String },

    /// An operation names a spec tag absent from the registry
    #[error("unknown spec type '{tag}'")]
    UnknownSpecType { tag: String },

    /// A spec constructor rejected its attribute mapping
    #[error("failed to decode spec '{tag}': {source}")]
    SpecDecode {
        tag: String,
        source: serde_json::Error,
    },

    /// A project constructor rejected its attribute mapping
    #[error("failed to decode project '{name}': {source}")]
    ProjectDecode {
        name: String,
        source: serde_json::Error,
    },

    /// A blueprint or project name was loaded twice within its kind
    #[error("duplicate {kind} '{name}'")]
    DuplicateDefinition { kind: DefKind, name: String },

    /// A block or document does not have the expected shape
    #[error("malformed {kind} '{name}': {detail}")]
    MalformedBlock {
        kind: DefKind,
        name: String,
        detail: String,
    },

    /// A read named a project absent from the resolved result
    #[error("project not found: '{name}'")]
    ProjectNotFound { name: String },

    /// A spec's check/apply/remove action failed at build time
    #[error("spec execution failed: {message}")]
    Execution { message: String },

    /// Interpolation error from plan-resolve
    #[error(transparent)]
    Resolve(#[from] plan_resolve::Error),
}

impl Error {
    pub(crate) fn malformed(kind: DefKind, name: &str, detail: impl Into<String>) -> Self {
        Error::MalformedBlock {
            kind,
            name: name.to_string(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_definition_names_kind_and_name() {
        let err = Error::DuplicateDefinition {
            kind: DefKind::Blueprint,
            name: "base".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("blueprint"));
        assert!(display.contains("base"));
    }

    #[test]
    fn circular_include_names_full_cycle() {
        let err = Error::CircularInclude {
            path: "a -> b -> a".to_string(),
        };
        assert!(err.to_string().contains("a -> b -> a"));
    }
}
