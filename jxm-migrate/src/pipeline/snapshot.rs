//! Pipeline snapshot plugin for debugging.
//!
//! Captures each template's text after every pass, so a surprising rewrite
//! can be traced back to the pass that produced it.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use serde::Serialize;

use super::{Diagnostic, Plugin, TransformContext};
use crate::{Error, Result};

/// A snapshot of one template at a specific pass.
#[derive(Debug, Clone, Serialize)]
pub struct PassSnapshot {
    /// Template being migrated.
    pub file: PathBuf,

    /// The pass that just completed.
    pub pass: String,

    /// Template text after the pass. Raw blocks show as placeholders until
    /// the restore pass has run.
    pub text: String,

    /// Diagnostics collected so far for this template.
    pub diagnostics: Vec<Diagnostic>,
}

/// A plugin that captures template text after each pass.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir(".jxm/debug"));
/// ```
pub struct SnapshotPlugin {
    /// Collected snapshots.
    snapshots: RwLock<Vec<PassSnapshot>>,
    /// Output directory for snapshots.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    /// Create a new snapshot plugin.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a new snapshot plugin that writes each snapshot to a directory.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PassSnapshot> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn capture_snapshot(&self, pass: &str, ctx: &TransformContext<'_>) -> (usize, PassSnapshot) {
        let snapshot = PassSnapshot {
            file: ctx.path.clone(),
            pass: pass.to_string(),
            text: ctx.text.clone(),
            diagnostics: ctx.diagnostics.clone(),
        };
        let mut snapshots = self
            .snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        snapshots.push(snapshot.clone());
        (snapshots.len() - 1, snapshot)
    }
}

fn write_snapshot(dir: &Path, index: usize, snapshot: &PassSnapshot) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let stem = snapshot
        .file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("template");
    let path = dir.join(format!("{index:04}-{stem}-{}.json", snapshot.pass));
    let json = serde_json::to_string_pretty(snapshot).map_err(|source| Error::Snapshot { source })?;
    fs::write(&path, json).map_err(|e| Error::io(&path, e))
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_pass(&self, pass: &str, ctx: &mut TransformContext<'_>) -> Result<()> {
        let (index, snapshot) = self.capture_snapshot(pass, ctx);

        // If output directory is configured, write immediately
        if let Some(ref dir) = self.output_dir {
            write_snapshot(dir, index, &snapshot)?;
        }

        Ok(())
    }
}
