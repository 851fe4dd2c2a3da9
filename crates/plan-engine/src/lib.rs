//! Blueprint and project resolution engine for declarative configuration.
//!
//! This crate turns parsed configuration documents into typed build targets:
//!
//! - **Specs** describe one resource's desired state; a [`SpecRegistry`]
//!   decodes them from attribute mappings by tag.
//! - **Operations** pair a spec with a [`Strategy`] (`present` / `ensure` /
//!   `absent`) that decides when the spec acts at build time.
//! - **Blueprints** are named operation lists, composed from other
//!   blueprints via `include` — expansion flattens the include graph,
//!   detecting cycles.
//! - **Projects** combine `use`d blueprints with domain attributes into a
//!   typed build target.
//! - The **Workspace** accumulates raw definitions across loads and resolves
//!   everything fresh on each read.
//!
//! # Architecture
//!
//! `plan-engine` sits above `plan-resolve` and below the embedding
//! application:
//!
//! ```text
//!        application (parser, file discovery, CLI)
//!                        |
//!                   plan-engine
//!                        |
//!                   plan-resolve
//! ```
//!
//! # Example
//!
//! ```ignore
//! use plan_engine::{SpecRegistry, Workspace};
//!
//! let mut registry = SpecRegistry::new();
//! registry.register::<VpcSpec>("vpc");
//! let mut workspace = Workspace::new(registry);
//! workspace.load(&parsed_unit)?;
//! let project = workspace.project("app")?;
//! project.build(false)?;
//! ```

mod block;

pub mod blueprint;
pub mod context;
pub mod error;
pub mod graph;
pub mod op;
pub mod project;
pub mod registry;
pub mod spec;
pub mod workspace;

pub use blueprint::Blueprint;
pub use context::BuildContext;
pub use error::{DefKind, Error, Result};
pub use op::{Operation, Strategy};
pub use project::{Project, ProjectParts, ProjectType};
pub use registry::SpecRegistry;
pub use spec::Spec;
pub use workspace::Workspace;
