//! Walk parsed documents and resolve `${...}` interpolation references.

use crate::context::Context;
use crate::error::{Error, Result};
use serde_json::Value;

/// Resolves `${...}` interpolation references against a [`Context`].
#[derive(Debug, Default, Clone)]
pub struct Resolver {
    context: Context,
}

/// One piece of a scanned string: literal text or a reference to resolve.
#[derive(Debug, PartialEq, Eq)]
enum Part {
    Literal(String),
    Reference(String),
}

impl Resolver {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Resolve a dotted reference (e.g. `env.HOME`) against the context.
    ///
    /// Each segment tries keyed lookup, then named-member lookup. Any failure
    /// reports the full dotted path. A terminal thunk is invoked with no
    /// arguments and its result used; intermediate thunks are never invoked.
    pub fn resolve_reference(&self, path: &str) -> Result<Value> {
        let mut segments = path.split('.');
        // split always yields at least one segment
        let first = segments.next().unwrap_or_default();
        let mut current = self
            .context
            .get(first)
            .cloned()
            .ok_or_else(|| Error::undefined(path))?;
        for segment in segments {
            current = current
                .lookup(segment)
                .ok_or_else(|| Error::undefined(path))?;
        }
        tracing::trace!(path, "resolved reference");
        current.render().ok_or_else(|| Error::undefined(path))
    }

    /// Resolve every `${...}` occurrence in a string.
    ///
    /// A string that is exactly one `${ref}` expression resolves to the
    /// referenced value with its type preserved. Mixed content splices the
    /// string form of each value into the surrounding literal text.
    pub fn resolve_string(&self, input: &str) -> Result<Value> {
        if !input.contains("${") {
            return Ok(Value::String(input.to_string()));
        }

        let parts = scan(input)?;
        if let [Part::Reference(path)] = parts.as_slice() {
            return self.resolve_reference(path);
        }

        let mut out = String::new();
        for part in &parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Reference(path) => {
                    let value = self.resolve_reference(path)?;
                    out.push_str(&render(&value));
                }
            }
        }
        Ok(Value::String(out))
    }

    /// Recursively resolve a parsed document.
    ///
    /// Mapping values and sequence elements are resolved in place of their
    /// originals (keys and order untouched); strings go through
    /// [`resolve_string`](Resolver::resolve_string); all other scalars pass
    /// through unchanged. The input is never mutated.
    pub fn resolve_document(&self, doc: &Value) -> Result<Value> {
        match doc {
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| Ok((key.clone(), self.resolve_document(value)?)))
                .collect::<Result<serde_json::Map<String, Value>>>()
                .map(Value::Object),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_document(item))
                .collect::<Result<Vec<Value>>>()
                .map(Value::Array),
            Value::String(text) => self.resolve_string(text),
            scalar => Ok(scalar.clone()),
        }
    }
}

/// String form of a resolved value for mixed-content splicing.
///
/// Strings splice raw; everything else uses its compact JSON text.
fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Split a string into literal and reference parts.
///
/// Handles the `$${...}` escape (literal `${...}`, positional, not recursive)
/// and the `${{ ... }}` double-brace form, which passes through completely
/// unchanged. An unterminated `${` is an error; an unterminated escape or
/// double-brace opener passes through literally.
fn scan(input: &str) -> Result<Vec<Part>> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < input.len() {
        let rest = &input[i..];
        if let Some(tail) = rest.strip_prefix("$${") {
            match tail.find('}') {
                Some(close) => {
                    literal.push_str("${");
                    literal.push_str(&tail[..=close]);
                    i += 3 + close + 1;
                }
                None => {
                    // no closer; the opener is not an escape, keep it verbatim
                    literal.push_str(rest);
                    i = input.len();
                }
            }
        } else if let Some(tail) = rest.strip_prefix("${{") {
            match tail.find("}}") {
                Some(close) => {
                    let end = 3 + close + 2;
                    literal.push_str(&rest[..end]);
                    i += end;
                }
                None => {
                    literal.push_str(rest);
                    i = input.len();
                }
            }
        } else if let Some(tail) = rest.strip_prefix("${") {
            match tail.find('}') {
                Some(close) => {
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(Part::Reference(tail[..close].trim().to_string()));
                    i += 2 + close + 1;
                }
                None => {
                    return Err(Error::UnterminatedReference {
                        input: input.to_string(),
                    });
                }
            }
        } else {
            let step = rest
                .char_indices()
                .nth(1)
                .map_or(rest.len(), |(offset, _)| offset);
            literal.push_str(&rest[..step]);
            i += step;
        }
    }

    if !literal.is_empty() {
        parts.push(Part::Literal(literal));
    }
    Ok(parts)
}
