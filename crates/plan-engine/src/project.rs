//! Project model and builder — the top-level build target.

use crate::Result;
use crate::block;
use crate::blueprint::Blueprint;
use crate::context::BuildContext;
use crate::error::{DefKind, Error};
use crate::op::Strategy;
use crate::registry::SpecRegistry;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Constructs a typed project from resolved parts.
///
/// Implement this for domain project types; [`Project`] is the default.
/// Constructor failures propagate unchanged — the builder does not interpret
/// or recover them.
pub trait ProjectType: Sized + Send + Sync + 'static {
    fn assemble(parts: ProjectParts<Self>) -> Result<Self>;
}

/// Everything a project constructor receives.
pub struct ProjectParts<P> {
    pub name: String,
    /// `use`d blueprints in order, then the inline blueprint if any.
    pub blueprints: Vec<Blueprint<P>>,
    /// Domain attributes — the block minus composition and strategy keys.
    pub attrs: Map<String, Value>,
}

/// Default project type: name, description, blueprints, and passthrough
/// attributes for anything the type does not model.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub blueprints: Vec<Blueprint<Project>>,
    pub attrs: Map<String, Value>,
}

impl Project {
    /// Run every blueprint against this project, in order.
    pub fn build(&self, dry_run: bool) -> Result<()> {
        let ctx = BuildContext::new(self).with_dry_run(dry_run);
        tracing::info!(project = %self.name, dry_run, "building project");
        for blueprint in &self.blueprints {
            blueprint.build(&ctx)?;
        }
        Ok(())
    }
}

impl ProjectType for Project {
    fn assemble(parts: ProjectParts<Self>) -> Result<Self> {
        let mut description = String::new();
        let mut attrs = Map::new();
        for (key, value) in parts.attrs {
            if key == "description" {
                description =
                    serde_json::from_value(value).map_err(|source| Error::ProjectDecode {
                        name: parts.name.clone(),
                        source,
                    })?;
            } else {
                attrs.insert(key, value);
            }
        }
        Ok(Self {
            name: parts.name,
            description,
            blueprints: parts.blueprints,
            attrs,
        })
    }
}

/// Build one project from its raw block and the resolved blueprint table.
///
/// The blueprint sequence is every `use`d name's resolved blueprint in
/// order, then an implicit `<name>:inline` blueprint wrapping directly
/// declared operations when any exist.
pub(crate) fn build_project<P: ProjectType>(
    name: &str,
    raw: &Value,
    blueprints: &IndexMap<String, Blueprint<P>>,
    registry: &SpecRegistry<P>,
) -> Result<P> {
    let block = block::as_block(DefKind::Project, name, raw)?;

    let mut assembled = Vec::new();
    for used in block::name_list(DefKind::Project, name, block, "use")? {
        let blueprint = blueprints
            .get(used)
            .ok_or_else(|| Error::UnknownProjectBlueprint {
                project: name.to_string(),
                blueprint: used.to_string(),
            })?;
        assembled.push(blueprint.clone());
    }

    let mut inline = Vec::new();
    for raw_op in block::operations(DefKind::Project, name, block)? {
        inline.push(registry.decode(raw_op.strategy, raw_op.tag, raw_op.attrs)?);
    }
    if !inline.is_empty() {
        assembled.push(Blueprint::new(format!("{name}:inline"), inline));
    }

    let mut attrs = Map::new();
    for (key, value) in block {
        if matches!(key.as_str(), "use" | "include") || Strategy::from_key(key).is_some() {
            continue;
        }
        attrs.insert(key.clone(), value.clone());
    }

    P::assemble(ProjectParts {
        name: name.to_string(),
        blueprints: assembled,
        attrs,
    })
}
