//! Spec decoding registry — the tag → constructor table.
//!
//! The registry is an explicit value owned by the caller (usually a
//! [`Workspace`](crate::workspace::Workspace)); there is no process-wide
//! table. Tests construct a fresh registry per test.

use crate::error::{Error, Result};
use crate::op::{Operation, Strategy};
use crate::spec::Spec;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

type DecodeFn<P> = Box<dyn Fn(&Map<String, Value>) -> Result<Arc<dyn Spec<P>>> + Send + Sync>;

/// Maps spec-type tags to decode functions.
pub struct SpecRegistry<P> {
    decoders: HashMap<String, DecodeFn<P>>,
}

impl<P: 'static> SpecRegistry<P> {
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Register `S` under `tag`, decoding attribute mappings via serde.
    ///
    /// Attributes arrive as keyword-style construction arguments: the whole
    /// mapping deserializes into `S` in one step.
    pub fn register<S>(&mut self, tag: impl Into<String>)
    where
        S: Spec<P> + DeserializeOwned + 'static,
    {
        let tag = tag.into();
        let decode_tag = tag.clone();
        self.register_with(tag, move |attrs| {
            let spec: S = serde_json::from_value(Value::Object(attrs.clone())).map_err(|source| {
                Error::SpecDecode {
                    tag: decode_tag.clone(),
                    source,
                }
            })?;
            Ok(Arc::new(spec) as Arc<dyn Spec<P>>)
        });
    }

    /// Register a custom decode function under `tag`.
    pub fn register_with<F>(&mut self, tag: impl Into<String>, decode: F)
    where
        F: Fn(&Map<String, Value>) -> Result<Arc<dyn Spec<P>>> + Send + Sync + 'static,
    {
        self.decoders.insert(tag.into(), Box::new(decode));
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.decoders.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Decode one operation from its strategy, spec tag, and attributes.
    pub fn decode(
        &self,
        strategy: Strategy,
        tag: &str,
        attrs: &Map<String, Value>,
    ) -> Result<Operation<P>> {
        let decoder = self.decoders.get(tag).ok_or_else(|| Error::UnknownSpecType {
            tag: tag.to_string(),
        })?;
        let spec = decoder(attrs)?;
        Ok(Operation::new(strategy, tag, spec))
    }
}

impl<P: 'static> Default for SpecRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}
