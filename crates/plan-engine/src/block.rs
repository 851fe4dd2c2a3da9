//! Raw-block access — strategy entries and composition directives.
//!
//! A raw block is the mapping behind one `blueprint "name" { ... }` or
//! `project "name" { ... }` definition: scalar attributes, an optional
//! `include`/`use` name list, and operation entries grouped under the
//! strategy keys. Parsers hand these in as documents; this module reads
//! them without mutating anything.

use crate::error::{DefKind, Error, Result};
use crate::op::Strategy;
use serde_json::{Map, Value};

/// An undecoded operation entry: strategy, spec tag, attribute mapping.
pub(crate) struct RawOp<'a> {
    pub strategy: Strategy,
    pub tag: &'a str,
    pub attrs: &'a Map<String, Value>,
}

/// View a raw definition value as a block mapping.
pub(crate) fn as_block<'a>(kind: DefKind, name: &str, raw: &'a Value) -> Result<&'a Map<String, Value>> {
    raw.as_object()
        .ok_or_else(|| Error::malformed(kind, name, "definition body must be a mapping"))
}

/// Collect the block's operation entries, scanning strategies in
/// [`Strategy::ALL`] order and preserving declaration order within each.
pub(crate) fn operations<'a>(
    kind: DefKind,
    name: &str,
    block: &'a Map<String, Value>,
) -> Result<Vec<RawOp<'a>>> {
    let mut ops = Vec::new();
    for strategy in Strategy::ALL {
        let key = strategy.as_key();
        let Some(entries) = block.get(key) else {
            continue;
        };
        let entries = entries.as_array().ok_or_else(|| {
            Error::malformed(kind, name, format!("'{key}' must be a sequence of entries"))
        })?;
        for entry in entries {
            let entry = entry.as_object().ok_or_else(|| {
                Error::malformed(kind, name, format!("'{key}' entries must be mappings"))
            })?;
            for (tag, attrs) in entry {
                let attrs = attrs.as_object().ok_or_else(|| {
                    Error::malformed(
                        kind,
                        name,
                        format!("attributes of '{tag}' must be a mapping"),
                    )
                })?;
                ops.push(RawOp {
                    strategy,
                    tag,
                    attrs,
                });
            }
        }
    }
    Ok(ops)
}

/// Read an ordered name list directive (`include` or `use`) from a block.
pub(crate) fn name_list<'a>(
    kind: DefKind,
    name: &str,
    block: &'a Map<String, Value>,
    key: &str,
) -> Result<Vec<&'a str>> {
    let Some(value) = block.get(key) else {
        return Ok(Vec::new());
    };
    let items = value
        .as_array()
        .ok_or_else(|| Error::malformed(kind, name, format!("'{key}' must be a list of names")))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .ok_or_else(|| Error::malformed(kind, name, format!("'{key}' names must be strings")))
        })
        .collect()
}
