use crate::{
    Result,
    pipeline::{Pass, TransformContext},
    transform::assets,
};

/// Migrates the asset render call and the template's asset declarations.
pub struct AssetPass;

impl Pass for AssetPass {
    fn name(&self) -> &'static str {
        "assets"
    }

    fn description(&self) -> &'static str {
        "Rewrite asset declarations to public URLs and declare co-located assets"
    }

    fn run(&self, ctx: &mut TransformContext<'_>) -> Result<()> {
        let (text, calls) = assets::migrate_render_calls(&ctx.text);
        ctx.stats.asset_calls_migrated += calls;
        ctx.text = text;

        // Declarations are only rewritten for templates that are components.
        let Some(component) = ctx.component else {
            return Ok(());
        };
        let url_prefix = ctx.settings.url_prefix.as_str();

        let (text, rewritten) = assets::rewrite_declarations(&ctx.text, url_prefix, component);
        let (text, inserted) = assets::insert_discovered(&text, url_prefix, component);
        ctx.stats.declarations_rewritten += rewritten;
        ctx.stats.assets_declared += inserted;
        ctx.text = text;
        Ok(())
    }
}
