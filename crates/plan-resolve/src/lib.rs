//! Reference lookup and `${...}` interpolation for parsed configuration documents.
//!
//! This crate is the leaf of the resolution stack: it knows nothing about
//! blueprints or projects. It takes a parsed document ([`serde_json::Value`])
//! and a runtime [`Context`], and expands every `${a.b.c}` reference it finds:
//!
//! - A string that is exactly one `${ref}` expression resolves to the
//!   referenced value with its type preserved (numbers stay numbers, mappings
//!   stay mappings).
//! - Mixed strings splice the string form of each referenced value into the
//!   surrounding literal text.
//! - `$${...}` escapes to literal `${...}`; `${{ ... }}` passes through
//!   untouched so embedded CI-expression syntax survives resolution.
//!
//! Resolution never mutates its inputs; [`Resolver::resolve_document`] returns
//! a new structure.

pub mod context;
pub mod error;
pub mod resolver;

pub use context::{Context, ContextValue, Members};
pub use error::{Error, Result};
pub use resolver::Resolver;
