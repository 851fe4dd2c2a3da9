//! Blueprint model — a named, ordered collection of operations.

use crate::Result;
use crate::context::BuildContext;
use crate::op::Operation;
use std::fmt;

/// A named collection of operations, optionally composed from other
/// blueprints via `include` at resolution time.
///
/// By the time a `Blueprint` exists, composition is already flattened:
/// included operations come first in include order, the blueprint's own
/// operations last.
pub struct Blueprint<P> {
    name: String,
    ops: Vec<Operation<P>>,
}

impl<P> Blueprint<P> {
    pub fn new(name: impl Into<String>, ops: Vec<Operation<P>>) -> Self {
        Self {
            name: name.into(),
            ops,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ops(&self) -> &[Operation<P>] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation<P>> {
        self.ops.iter()
    }

    /// Run every operation in declaration order.
    pub fn build(&self, ctx: &BuildContext<'_, P>) -> Result<()> {
        tracing::debug!(blueprint = %self.name, ops = self.ops.len(), "building blueprint");
        for op in &self.ops {
            op.run(ctx)?;
        }
        Ok(())
    }
}

impl<P> Clone for Blueprint<P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            ops: self.ops.clone(),
        }
    }
}

impl<P> fmt::Debug for Blueprint<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blueprint")
            .field("name", &self.name)
            .field("ops", &self.ops)
            .finish()
    }
}

impl<'a, P> IntoIterator for &'a Blueprint<P> {
    type Item = &'a Operation<P>;
    type IntoIter = std::slice::Iter<'a, Operation<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
