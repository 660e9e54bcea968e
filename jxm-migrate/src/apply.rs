//! Writing a [`MigrationPlan`] to disk.

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local};
use eyre::{Context, Result};
use jxmigrate_core::{WriteResult, copy_file, write_file};
use serde::Serialize;

use crate::plan::MigrationPlan;

/// How to apply a plan.
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Directory that receives a timestamped backup. `None` skips the backup.
    pub backup_root: Option<PathBuf>,
}

/// What applying a plan did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyReport {
    pub backup: Option<PathBuf>,
    pub templates_written: usize,
    pub assets_copied: usize,
    /// Asset destinations that already held identical content.
    pub assets_unchanged: usize,
}

/// Name of a backup directory created at `now`.
pub fn backup_dir_name(now: DateTime<Local>) -> String {
    now.format("backup-%Y%m%d-%H%M%S").to_string()
}

/// Where `file` is stored inside a backup directory.
///
/// The absolute path is mirrored below `backup_dir`, so files with the same
/// name in different folders never overwrite each other.
pub fn backup_destination(backup_dir: &Path, file: &Path) -> PathBuf {
    let absolute = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
    absolute
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .fold(backup_dir.to_path_buf(), |dir, part| dir.join(part))
}

/// Copy every existing file into a new timestamped directory under `root`.
///
/// Missing files are skipped. Returns the backup directory.
pub fn create_backup<'a>(
    files: impl IntoIterator<Item = &'a Path>,
    root: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    let backup_dir = root.join(backup_dir_name(now));
    std::fs::create_dir_all(&backup_dir)
        .wrap_err_with(|| format!("failed to create '{}'", backup_dir.display()))?;

    for file in files {
        if !file.is_file() {
            continue;
        }
        let dest = backup_destination(&backup_dir, file);
        copy_file(file, &dest)?;
    }

    tracing::info!(path = %backup_dir.display(), "created backup");
    Ok(backup_dir)
}

/// Back up, then write migrated templates and copy assets.
pub fn apply(plan: &MigrationPlan, options: &ApplyOptions) -> Result<ApplyReport> {
    let mut report = ApplyReport::default();

    if let Some(root) = &options.backup_root {
        let files = plan
            .changes
            .iter()
            .map(|c| c.path.as_path())
            .chain(plan.asset_copies.iter().map(|c| c.source.as_path()));
        report.backup = Some(create_backup(files, root, Local::now())?);
    }

    for change in &plan.changes {
        write_file(&change.path, &change.migrated)?;
        tracing::debug!(path = %change.path.display(), "wrote template");
        report.templates_written += 1;
    }

    for copy in &plan.asset_copies {
        match copy_file(&copy.source, &copy.destination)? {
            WriteResult::Written => report.assets_copied += 1,
            WriteResult::Skipped => report.assets_unchanged += 1,
        }
    }

    tracing::info!(
        templates = report.templates_written,
        assets = report.assets_copied,
        "applied migration"
    );
    Ok(report)
}
