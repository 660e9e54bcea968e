//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod migrate;
mod output;
mod scan;

use std::path::Path;

pub use migrate::{AppliedReport, MigrateReport};
pub use output::{Report, TerminalOutput};
pub use scan::ScanReport;

/// Show `path` relative to `base` when it lies below it.
fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base).unwrap_or(path).display().to_string()
}
