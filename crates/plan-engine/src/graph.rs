//! Blueprint graph resolution — include expansion with cycle detection.
//!
//! Expansion is depth-first and memoized within one pass: a blueprint
//! reachable through two include paths (a diamond) is expanded once and its
//! operations concatenated once per path — ordered concatenation, never set
//! deduplication. Nothing survives the pass; callers re-resolve from the
//! pending table on every access.

use crate::block;
use crate::blueprint::Blueprint;
use crate::error::{DefKind, Error, Result};
use crate::registry::SpecRegistry;
use indexmap::IndexMap;
use serde_json::Value;

/// Resolve every pending blueprint into a flattened operation list.
///
/// Expansion order depends only on `include` declaration order and the
/// pending-table contents.
pub fn resolve_all<P: 'static>(
    pending: &IndexMap<String, Value>,
    registry: &SpecRegistry<P>,
) -> Result<IndexMap<String, Blueprint<P>>> {
    let mut resolved = IndexMap::new();
    for name in pending.keys() {
        resolve_one(name, pending, registry, &mut resolved, &mut Vec::new())?;
    }
    Ok(resolved)
}

fn resolve_one<'a, P: 'static>(
    name: &'a str,
    pending: &'a IndexMap<String, Value>,
    registry: &SpecRegistry<P>,
    resolved: &mut IndexMap<String, Blueprint<P>>,
    path: &mut Vec<&'a str>,
) -> Result<()> {
    if resolved.contains_key(name) {
        return Ok(());
    }
    if let Some(start) = path.iter().position(|active| *active == name) {
        let mut cycle = path[start..].to_vec();
        cycle.push(name);
        return Err(Error::CircularInclude {
            path: cycle.join(" -> "),
        });
    }
    let Some(raw) = pending.get(name) else {
        return Err(Error::UnknownBlueprint {
            name: name.to_string(),
        });
    };
    let block = block::as_block(DefKind::Blueprint, name, raw)?;

    tracing::debug!(blueprint = name, "resolving blueprint");
    path.push(name);

    let mut ops = Vec::new();
    for include in block::name_list(DefKind::Blueprint, name, block, "include")? {
        resolve_one(include, pending, registry, resolved, path)?;
        ops.extend(resolved[include].iter().cloned());
    }
    for raw_op in block::operations(DefKind::Blueprint, name, block)? {
        ops.push(registry.decode(raw_op.strategy, raw_op.tag, raw_op.attrs)?);
    }

    path.pop();
    resolved.insert(name.to_string(), Blueprint::new(name, ops));
    Ok(())
}
