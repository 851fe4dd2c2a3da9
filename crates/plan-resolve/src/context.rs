//! Runtime context for reference resolution.
//!
//! A [`Context`] binds top-level names to values a `${...}` reference can walk
//! into. Lookup is an explicit two-step capability: keyed lookup into plain
//! document mappings first, then named-member lookup via the [`Members`]
//! trait. Thunks are invoked only when they are the terminal segment of a
//! reference.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Named-member lookup for application objects placed in a [`Context`].
///
/// `member` returns `None` for names the object does not expose. When an
/// object is the terminal segment of a reference, `as_value` supplies its
/// document-value form; the default exposes none, which makes a terminal
/// lookup on the object fail.
pub trait Members: Send + Sync {
    fn member(&self, name: &str) -> Option<ContextValue>;

    /// Document-value form of the object itself, if it has one.
    fn as_value(&self) -> Option<Value> {
        None
    }
}

/// A value bound to a name in a [`Context`].
#[derive(Clone)]
pub enum ContextValue {
    /// A plain document value; nested mappings support keyed lookup.
    Value(Value),
    /// An object exposing named members.
    Object(Arc<dyn Members>),
    /// A zero-argument thunk, invoked only as the terminal segment.
    Thunk(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl ContextValue {
    /// Two-step segment lookup: keyed first, then named-member.
    ///
    /// Thunks support neither; a reference that tries to walk through one
    /// fails rather than invoking it.
    pub fn lookup(&self, segment: &str) -> Option<ContextValue> {
        match self {
            ContextValue::Value(Value::Object(map)) => {
                map.get(segment).cloned().map(ContextValue::Value)
            }
            ContextValue::Value(_) => None,
            ContextValue::Object(object) => object.member(segment),
            ContextValue::Thunk(_) => None,
        }
    }

    /// The document value this resolves to as a terminal segment.
    pub fn render(&self) -> Option<Value> {
        match self {
            ContextValue::Value(value) => Some(value.clone()),
            ContextValue::Object(object) => object.as_value(),
            ContextValue::Thunk(thunk) => Some(thunk()),
        }
    }
}

impl fmt::Debug for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            ContextValue::Object(_) => f.write_str("Object(..)"),
            ContextValue::Thunk(_) => f.write_str("Thunk(..)"),
        }
    }
}

impl From<Value> for ContextValue {
    fn from(value: Value) -> Self {
        ContextValue::Value(value)
    }
}

/// The runtime value set `${...}` references resolve against.
///
/// Supplied once per resolution call and never mutated by resolution.
#[derive(Debug, Default, Clone)]
pub struct Context {
    entries: HashMap<String, ContextValue>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a plain document value under `name`.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries
            .insert(name.into(), ContextValue::Value(value.into()));
        self
    }

    /// Bind an object exposing named members under `name`.
    pub fn with_object(mut self, name: impl Into<String>, object: impl Members + 'static) -> Self {
        self.entries
            .insert(name.into(), ContextValue::Object(Arc::new(object)));
        self
    }

    /// Bind a zero-argument thunk under `name`.
    pub fn with_thunk(
        mut self,
        name: impl Into<String>,
        thunk: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        self.entries
            .insert(name.into(), ContextValue::Thunk(Arc::new(thunk)));
        self
    }

    pub fn get(&self, name: &str) -> Option<&ContextValue> {
        self.entries.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<serde_json::Map<String, Value>> for Context {
    /// Each top-level entry of the mapping becomes a plain value binding.
    fn from(map: serde_json::Map<String, Value>) -> Self {
        let entries = map
            .into_iter()
            .map(|(name, value)| (name, ContextValue::Value(value)))
            .collect();
        Self { entries }
    }
}
