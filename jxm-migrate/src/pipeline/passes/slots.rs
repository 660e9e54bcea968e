use crate::{
    Result,
    pipeline::{Pass, TransformContext},
    transform::slots,
};

/// Rewrites slot definitions and `_slot` conditionals.
pub struct SlotPass;

impl Pass for SlotPass {
    fn name(&self) -> &'static str {
        "slots"
    }

    fn description(&self) -> &'static str {
        "Rewrite content() calls into slots and _slot conditionals into fills"
    }

    fn run(&self, ctx: &mut TransformContext<'_>) -> Result<()> {
        let (conditionals, findings) = slots::find_conditionals(&ctx.text);
        for finding in findings {
            ctx.add_warning_at(self.name(), finding.message, finding.offset);
        }
        ctx.stats.fills_generated += conditionals.iter().map(|c| c.branches.len()).sum::<usize>();
        ctx.stats.conditionals_migrated += conditionals.len();

        let text = slots::rewrite(&ctx.text, &conditionals);

        let (text, definitions) = slots::migrate_definitions(&text);
        ctx.stats.slots_migrated += definitions;

        ctx.text = text;
        Ok(())
    }
}
