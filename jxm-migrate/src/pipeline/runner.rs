//! Pipeline orchestrator.

use std::path::Path;

use super::{
    Pass, Plugin, Settings, TransformContext,
    passes::{AssetPass, ImportPass, ProtectRawPass, RestoreRawPass, SlotPass},
};
use crate::{Result, registry::Registry};

/// The rewrite pipeline orchestrator.
///
/// The pipeline runs the built-in passes on one template at a time, calling
/// plugin hooks before and after each pass. The pass order is fixed: raw
/// blocks are protected first and restored last, imports come after every
/// rewrite that can add or rename tags.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::new());
/// let ctx = pipeline.run(&registry, &settings, path, &source)?;
///
/// if ctx.is_changed() {
///     write_file(path, &ctx.text)?;
/// }
/// ```
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with the built-in passes.
    pub fn new() -> Self {
        Self {
            passes: vec![
                Box::new(ProtectRawPass),
                Box::new(SlotPass),
                Box::new(AssetPass),
                Box::new(ImportPass),
                Box::new(RestoreRawPass),
            ],
            plugins: Vec::new(),
        }
    }

    /// Add a plugin to receive pass lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// The passes in execution order.
    pub fn passes(&self) -> impl Iterator<Item = &dyn Pass> {
        self.passes.iter().map(|p| p.as_ref())
    }

    /// Run every pass on one template.
    ///
    /// # Errors
    ///
    /// Returns an error if a pass or plugin fails. See
    /// [`crate::Error::is_file_scoped`] for which errors only concern this
    /// template.
    pub fn run<'a>(
        &self,
        registry: &'a Registry,
        settings: &'a Settings,
        path: &Path,
        source: &str,
    ) -> Result<TransformContext<'a>> {
        let mut ctx = TransformContext::new(registry, settings, path, source);
        tracing::debug!(path = %path.display(), component = ?ctx.component.map(|c| c.canonical_name.as_str()), "migrating template");

        for pass in &self.passes {
            self.run_pass(pass.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run a single pass with plugin hooks.
    fn run_pass(&self, pass: &dyn Pass, ctx: &mut TransformContext<'_>) -> Result<()> {
        let pass_name = pass.name();

        for plugin in &self.plugins {
            plugin.on_before_pass(pass_name, ctx)?;
        }

        pass.run(ctx)?;
        tracing::trace!(pass = pass_name, path = %ctx.path.display(), "pass complete");

        for plugin in &self.plugins {
            plugin.on_after_pass(pass_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::registry::{ComponentRecord, RegistryBuilder};

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_pass(&self, _pass: &str, _ctx: &mut TransformContext<'_>) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_pass(&self, _pass: &str, _ctx: &mut TransformContext<'_>) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn registry() -> Registry {
        let mut builder = RegistryBuilder::new();
        builder
            .add_record(ComponentRecord::new("card.jinja", "/c/card.jinja", None))
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_pass_order() {
        let names: Vec<_> = Pipeline::new().passes().map(|p| p.name()).collect();
        assert_eq!(names, ["protect-raw", "slots", "assets", "imports", "restore-raw"]);
    }

    #[test]
    fn test_pipeline_runs_passes() {
        let registry = registry();
        let settings = Settings::default();

        let ctx = Pipeline::new()
            .run(&registry, &settings, Path::new("/t/page.jinja"), "<Card>{{ content() }}</Card>")
            .unwrap();

        assert_eq!(ctx.text, "{#import \"card.jinja\" as Card #}\n<Card>{{ content }}</Card>");
        assert_eq!(ctx.stats.imports_added, 1);
        assert_eq!(ctx.stats.slots_migrated, 1);
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let registry = registry();
        let settings = Settings::default();
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        pipeline
            .run(&registry, &settings, Path::new("/t/page.jinja"), "<p></p>")
            .unwrap();

        // 5 built-in passes = 5 before + 5 after hooks
        assert_eq!(before_count.load(Ordering::SeqCst), 5);
        assert_eq!(after_count.load(Ordering::SeqCst), 5);
    }
}
