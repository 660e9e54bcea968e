//! Pipeline pass trait.

use super::TransformContext;
use crate::Result;

/// Information about a pipeline pass.
#[derive(Debug, Clone)]
pub struct PassInfo {
    /// The pass name.
    pub name: &'static str,
    /// A human-readable description.
    pub description: &'static str,
}

/// A pass in the rewrite pipeline.
///
/// Passes run in a fixed order on one template at a time. Each pass reads
/// and rewrites [`TransformContext::text`] and records anything it had to
/// leave alone as a diagnostic.
pub trait Pass: Send + Sync {
    /// The name of this pass (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this pass does.
    fn description(&self) -> &'static str;

    /// Run this pass on the template context.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be migrated. Non-fatal issues
    /// should be recorded as diagnostics instead.
    fn run(&self, ctx: &mut TransformContext<'_>) -> Result<()>;

    /// Get information about this pass.
    fn info(&self) -> PassInfo {
        PassInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
