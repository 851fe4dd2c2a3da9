//! Operation strategies — when a spec is applied or removed at build time.

use crate::Result;
use crate::context::BuildContext;
use crate::spec::Spec;
use std::fmt;
use std::sync::Arc;

/// Controls when an operation acts at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Apply only if the resource does not exist.
    Present,
    /// Apply if current state does not match desired state.
    Ensure,
    /// Remove if the resource exists.
    Absent,
}

impl Strategy {
    /// Every strategy, in the order blocks are scanned.
    pub const ALL: [Strategy; 3] = [Strategy::Present, Strategy::Ensure, Strategy::Absent];

    /// Strategy block keys, in [`Strategy::ALL`] order.
    pub const KEYS: [&'static str; 3] = [
        Strategy::Present.as_key(),
        Strategy::Ensure.as_key(),
        Strategy::Absent.as_key(),
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "present" => Some(Strategy::Present),
            "ensure" => Some(Strategy::Ensure),
            "absent" => Some(Strategy::Absent),
            _ => None,
        }
    }

    pub const fn as_key(self) -> &'static str {
        match self {
            Strategy::Present => "present",
            Strategy::Ensure => "ensure",
            Strategy::Absent => "absent",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// A (strategy, decoded spec) pair — one desired-state action.
///
/// The spec instance is shared; cloning an operation is cheap, which is what
/// lets included blueprints concatenate into including ones without
/// re-decoding.
pub struct Operation<P> {
    strategy: Strategy,
    tag: String,
    spec: Arc<dyn Spec<P>>,
}

impl<P> Operation<P> {
    pub fn new(strategy: Strategy, tag: impl Into<String>, spec: Arc<dyn Spec<P>>) -> Self {
        Self {
            strategy,
            tag: tag.into(),
            spec,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The spec-type tag this operation was decoded from.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn spec(&self) -> &dyn Spec<P> {
        self.spec.as_ref()
    }

    /// Run this operation against the build target.
    pub fn run(&self, ctx: &BuildContext<'_, P>) -> Result<()> {
        match self.strategy {
            Strategy::Present => {
                if self.spec.exists(ctx)? {
                    tracing::debug!(tag = %self.tag, "skipping; already exists");
                } else if ctx.dry_run {
                    tracing::info!(tag = %self.tag, "[dry run] would apply");
                } else {
                    tracing::info!(tag = %self.tag, "applying");
                    self.spec.apply(ctx)?;
                }
            }
            Strategy::Ensure => {
                if self.spec.equals(ctx)? {
                    tracing::debug!(tag = %self.tag, "skipping; up to date");
                } else if ctx.dry_run {
                    tracing::info!(tag = %self.tag, "[dry run] would apply");
                } else {
                    tracing::info!(tag = %self.tag, "applying");
                    self.spec.apply(ctx)?;
                }
            }
            Strategy::Absent => {
                if self.spec.exists(ctx)? {
                    if ctx.dry_run {
                        tracing::info!(tag = %self.tag, "[dry run] would remove");
                    } else {
                        tracing::info!(tag = %self.tag, "removing");
                        self.spec.remove(ctx)?;
                    }
                } else {
                    tracing::debug!(tag = %self.tag, "skipping removal; not present");
                }
            }
        }
        Ok(())
    }
}

impl<P> Clone for Operation<P> {
    fn clone(&self) -> Self {
        Self {
            strategy: self.strategy,
            tag: self.tag.clone(),
            spec: Arc::clone(&self.spec),
        }
    }
}

impl<P> fmt::Debug for Operation<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("strategy", &self.strategy)
            .field("tag", &self.tag)
            .field("spec", &self.spec)
            .finish()
    }
}
