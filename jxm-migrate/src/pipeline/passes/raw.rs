//! Raw block passes bracketing every other pass.

use crate::{
    Result,
    pipeline::{Diagnostic, Pass, TransformContext},
    transform::{line_at, raw::RawBlocks},
};

/// Swaps `{% raw %}` blocks for placeholder tokens.
pub struct ProtectRawPass;

impl Pass for ProtectRawPass {
    fn name(&self) -> &'static str {
        "protect-raw"
    }

    fn description(&self) -> &'static str {
        "Replace raw blocks with placeholder tokens"
    }

    fn run(&self, ctx: &mut TransformContext<'_>) -> Result<()> {
        let protected = RawBlocks::protect(&ctx.text);
        for finding in &protected.findings {
            let line = line_at(&ctx.original, finding.offset);
            let diagnostic = Diagnostic::warning(self.name(), finding.message.clone())
                .in_file(&ctx.path)
                .at_line(line);
            ctx.diagnostics.push(diagnostic);
        }
        ctx.text = protected.text;
        ctx.raw = protected.blocks;
        Ok(())
    }
}

/// Puts raw blocks back in place of their tokens.
pub struct RestoreRawPass;

impl Pass for RestoreRawPass {
    fn name(&self) -> &'static str {
        "restore-raw"
    }

    fn description(&self) -> &'static str {
        "Restore raw blocks byte-for-byte"
    }

    fn run(&self, ctx: &mut TransformContext<'_>) -> Result<()> {
        ctx.text = ctx.raw.restore(&ctx.text);
        Ok(())
    }
}
