//! Hooks around each pass.

use super::TransformContext;
use crate::Result;

/// Observes, and may adjust, a template between passes.
///
/// Hooks run for every template and every pass, in registration order.
/// [`super::SnapshotPlugin`] is the built-in implementation.
///
/// ```ignore
/// struct RawCounter(AtomicUsize);
///
/// impl Plugin for RawCounter {
///     fn name(&self) -> &'static str { "raw-counter" }
///
///     fn on_after_pass(&self, pass: &str, ctx: &mut TransformContext<'_>) -> Result<()> {
///         if pass == "protect-raw" {
///             self.0.fetch_add(ctx.raw.len(), Ordering::Relaxed);
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Runs before `pass`. An error aborts the run.
    #[allow(unused_variables)]
    fn on_before_pass(&self, pass: &str, ctx: &mut TransformContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Runs after `pass` succeeded. An error aborts the run.
    #[allow(unused_variables)]
    fn on_after_pass(&self, pass: &str, ctx: &mut TransformContext<'_>) -> Result<()> {
        Ok(())
    }
}
