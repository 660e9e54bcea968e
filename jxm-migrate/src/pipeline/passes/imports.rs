use crate::{
    Error, Result,
    pipeline::{Pass, TransformContext},
    transform::imports,
};

/// Adds import declarations and renames component tags to their aliases.
pub struct ImportPass;

impl Pass for ImportPass {
    fn name(&self) -> &'static str {
        "imports"
    }

    fn description(&self) -> &'static str {
        "Import every component the template uses"
    }

    fn run(&self, ctx: &mut TransformContext<'_>) -> Result<()> {
        let plan = imports::plan_imports(&ctx.text, ctx.registry).map_err(|conflict| {
            Error::AliasExhausted {
                file: ctx.path.clone(),
                alias: conflict.alias,
                names: conflict.names,
            }
        })?;

        for tag in &plan.unresolved {
            ctx.add_info(self.name(), format!("<{tag}> matches no component, left as markup"));
        }
        for collision in &plan.collisions {
            ctx.add_warning(self.name(), collision.to_string());
        }
        if plan.is_noop() {
            return Ok(());
        }

        ctx.stats.imports_added += plan.new_imports().count();
        ctx.stats.tags_renamed += plan.renames.len();
        ctx.text = imports::apply_plan(&ctx.text, &plan);
        Ok(())
    }
}
