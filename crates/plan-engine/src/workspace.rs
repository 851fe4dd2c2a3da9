//! Workspace — accumulates raw definitions and resolves projects on access.
//!
//! A workspace grows only via [`load`](Workspace::load); every read access
//! runs one full resolution pass over the pending tables and retains
//! nothing. Two reads with no intervening load yield value-equal but
//! distinct project instances — correctness-first re-computation, no cache
//! to invalidate.

use crate::Result;
use crate::error::{DefKind, Error};
use crate::graph;
use crate::project::{self, Project, ProjectType};
use crate::registry::SpecRegistry;
use indexmap::IndexMap;
use plan_resolve::Resolver;
use serde_json::Value;
use std::fmt;

/// Accumulator and lookup facade for blueprint/project definitions.
pub struct Workspace<P: ProjectType = Project> {
    registry: SpecRegistry<P>,
    pending_blueprints: IndexMap<String, Value>,
    pending_projects: IndexMap<String, Value>,
}

impl<P: ProjectType> Workspace<P> {
    pub fn new(registry: SpecRegistry<P>) -> Self {
        Self {
            registry,
            pending_blueprints: IndexMap::new(),
            pending_projects: IndexMap::new(),
        }
    }

    pub fn registry(&self) -> &SpecRegistry<P> {
        &self.registry
    }

    /// Extract blueprint and project blocks from a parsed unit.
    ///
    /// Fails with [`Error::DuplicateDefinition`] when a name of the same
    /// kind was already loaded; the two namespaces are independent.
    pub fn load(&mut self, unit: &Value) -> Result<()> {
        for (name, data) in entries(unit, "blueprint")? {
            if self.pending_blueprints.contains_key(name) {
                return Err(Error::DuplicateDefinition {
                    kind: DefKind::Blueprint,
                    name: name.to_string(),
                });
            }
            tracing::debug!(name, "found blueprint");
            self.pending_blueprints
                .insert(name.to_string(), data.clone());
        }
        for (name, data) in entries(unit, "project")? {
            if self.pending_projects.contains_key(name) {
                return Err(Error::DuplicateDefinition {
                    kind: DefKind::Project,
                    name: name.to_string(),
                });
            }
            tracing::debug!(name, "found project");
            self.pending_projects.insert(name.to_string(), data.clone());
        }
        Ok(())
    }

    /// Interpolate `unit` against `resolver`, then load the result.
    pub fn load_resolved(&mut self, unit: &Value, resolver: &Resolver) -> Result<()> {
        let resolved = resolver.resolve_document(unit)?;
        self.load(&resolved)
    }

    /// Whether a project with this name is loaded (no resolution).
    pub fn contains(&self, name: &str) -> bool {
        self.pending_projects.contains_key(name)
    }

    /// Number of loaded projects (no resolution).
    pub fn len(&self) -> usize {
        self.pending_projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending_projects.is_empty()
    }

    /// Resolve everything and return the name → project table.
    pub fn resolve(&self) -> Result<IndexMap<String, P>> {
        tracing::debug!(
            blueprints = self.pending_blueprints.len(),
            projects = self.pending_projects.len(),
            "resolving workspace"
        );
        let blueprints = graph::resolve_all(&self.pending_blueprints, &self.registry)?;
        let mut projects = IndexMap::new();
        for (name, raw) in &self.pending_projects {
            let built = project::build_project(name, raw, &blueprints, &self.registry)?;
            projects.insert(name.clone(), built);
        }
        Ok(projects)
    }

    /// Resolve and return one project; absent names fail.
    pub fn project(&self, name: &str) -> Result<P> {
        self.resolve()?
            .shift_remove(name)
            .ok_or_else(|| Error::ProjectNotFound {
                name: name.to_string(),
            })
    }

    /// Resolve and return one project, or `None` when absent.
    pub fn get(&self, name: &str) -> Result<Option<P>> {
        Ok(self.resolve()?.shift_remove(name))
    }

    /// Resolved project names, in load order.
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.resolve()?.into_keys().collect())
    }

    /// Projects matching `names`, in input order; absent names are skipped.
    pub fn filter<I, S>(&self, names: I) -> Result<Vec<P>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved = self.resolve()?;
        Ok(names
            .into_iter()
            .filter_map(|name| resolved.shift_remove(name.as_ref()))
            .collect())
    }
}

impl<P: ProjectType> fmt::Debug for Workspace<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workspace")
            .field("blueprints", &self.pending_blueprints.len())
            .field("projects", &self.pending_projects.len())
            .finish()
    }
}

/// Iterate the `name → block` entries of a top-level definition sequence.
fn entries<'a>(unit: &'a Value, key: &'a str) -> Result<Vec<(&'a str, &'a Value)>> {
    let kind = match key {
        "blueprint" => DefKind::Blueprint,
        _ => DefKind::Project,
    };
    let Some(seq) = unit.get(key) else {
        return Ok(Vec::new());
    };
    let items = seq.as_array().ok_or_else(|| {
        Error::malformed(kind, "<document>", format!("'{key}' must be a sequence"))
    })?;
    let mut out = Vec::new();
    for item in items {
        let entry = item.as_object().ok_or_else(|| {
            Error::malformed(kind, "<document>", format!("'{key}' entries must be mappings"))
        })?;
        for (name, data) in entry {
            out.push((name.as_str(), data));
        }
    }
    Ok(out)
}
