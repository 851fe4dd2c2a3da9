//! Build-time execution context.

/// Runtime state passed through the build chain.
///
/// Carries the project being built and the dry-run flag. Specs read the
/// target; nothing here is mutated during a build.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a, P> {
    /// The project being built.
    pub target: &'a P,
    /// When set, operations log intended actions without performing them.
    pub dry_run: bool,
}

impl<'a, P> BuildContext<'a, P> {
    pub fn new(target: &'a P) -> Self {
        Self {
            target,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
