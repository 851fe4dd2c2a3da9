//! The `Spec` trait — desired-state checks and transitions.

use crate::Result;
use crate::context::BuildContext;
use std::fmt;

/// A declarative specification of one resource's desired state.
///
/// Implementations are decoded from configuration attribute mappings through
/// a [`SpecRegistry`](crate::registry::SpecRegistry) and wrapped together
/// with a [`Strategy`](crate::op::Strategy) into
/// [`Operation`](crate::op::Operation)s. `P` is the project type the spec
/// builds against.
pub trait Spec<P>: fmt::Debug + Send + Sync {
    /// Current state matches desired state.
    fn equals(&self, ctx: &BuildContext<'_, P>) -> Result<bool>;

    /// Resource exists (defaults to [`equals`](Spec::equals)).
    fn exists(&self, ctx: &BuildContext<'_, P>) -> Result<bool> {
        self.equals(ctx)
    }

    /// Create or update the resource.
    fn apply(&self, ctx: &BuildContext<'_, P>) -> Result<()>;

    /// Delete the resource.
    fn remove(&self, ctx: &BuildContext<'_, P>) -> Result<()>;
}
