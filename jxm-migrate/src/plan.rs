//! Run-level migration planning.
//!
//! [`plan`] builds the registry, runs the pipeline over every component
//! template and collects the result in a [`MigrationPlan`]. Nothing is
//! written; see [`crate::apply`].

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use jxmigrate_config::Config;
use serde::Serialize;

use crate::{
    Error, Result,
    pipeline::{Diagnostic, FileStats, Pipeline, Settings},
    registry::{FolderCount, Registry, RegistryBuilder},
    transform::assets::AssetKind,
};

/// A template the migration rewrites.
#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    pub path: PathBuf,
    pub original: String,
    pub migrated: String,
    pub stats: FileStats,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileChange {
    pub fn changed(&self) -> bool {
        self.original != self.migrated
    }

    /// Lines present only in the migrated text.
    pub fn added_lines(&self) -> Vec<&str> {
        lines_missing_from(&self.migrated, &self.original)
    }

    /// Lines present only in the original text.
    pub fn removed_lines(&self) -> Vec<&str> {
        lines_missing_from(&self.original, &self.migrated)
    }
}

fn lines_missing_from<'a>(text: &'a str, other: &str) -> Vec<&'a str> {
    let other: HashSet<&str> = other.lines().collect();
    text.lines().filter(|line| !other.contains(line)).collect()
}

/// A template that could not be migrated. It is left untouched.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// A co-located asset to copy into the static folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetCopy {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Totals shown at the end of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub components: usize,
    pub templates_modified: usize,
    pub templates_failed: usize,
    pub imports_added: usize,
    pub slots_migrated: usize,
    pub fills_generated: usize,
    pub asset_calls_migrated: usize,
    pub assets_to_copy: usize,
    pub warnings: usize,
}

/// Everything a migration run would do.
#[derive(Debug, Default, Serialize)]
pub struct MigrationPlan {
    pub folders: Vec<FolderCount>,
    pub components: usize,
    /// Templates whose text changes.
    pub changes: Vec<FileChange>,
    pub failures: Vec<FileFailure>,
    pub asset_copies: Vec<AssetCopy>,
    /// Warnings from every template, including unchanged ones.
    pub diagnostics: Vec<Diagnostic>,
}

impl MigrationPlan {
    /// Whether applying the plan would write anything.
    pub fn has_work(&self) -> bool {
        !self.changes.is_empty() || !self.asset_copies.is_empty()
    }

    pub fn summary(&self) -> Summary {
        let mut stats = FileStats::default();
        for change in &self.changes {
            stats += change.stats;
        }
        Summary {
            components: self.components,
            templates_modified: self.changes.len(),
            templates_failed: self.failures.len(),
            imports_added: stats.imports_added,
            slots_migrated: stats.slots_migrated,
            fills_generated: stats.fills_generated,
            asset_calls_migrated: stats.asset_calls_migrated,
            assets_to_copy: self.asset_copies.len(),
            warnings: self.diagnostics.iter().filter(|d| d.severity.is_warning()).count(),
        }
    }
}

/// Build the registry for every configured folder.
pub fn build_registry(config: &Config) -> Result<(Registry, Vec<FolderCount>)> {
    let builder = RegistryBuilder::new().add_folders(&config.folders)?;
    let (registry, counts) = builder.finish();
    tracing::info!(components = registry.len(), folders = counts.len(), "built component registry");
    Ok((registry, counts))
}

/// Copies for every co-located asset, deduplicated by destination.
pub fn plan_asset_copies(registry: &Registry, settings: &Settings) -> Vec<AssetCopy> {
    let mut seen = HashSet::new();
    let mut copies = Vec::new();

    for record in registry.iter() {
        for kind in AssetKind::ALL {
            let source = match kind {
                AssetKind::Style => record.style_path.as_ref(),
                AssetKind::Script => record.script_path.as_ref(),
            };
            let Some(source) = source else {
                continue;
            };
            let destination = settings.asset_destination(record, kind.extension());
            if seen.insert(destination.clone()) {
                copies.push(AssetCopy {
                    source: source.clone(),
                    destination,
                });
            }
        }
    }

    copies
}

/// Plan a migration of every template in the configured folders.
///
/// # Errors
///
/// Fails on an ambiguous registry or an unreadable template. A template whose
/// aliases cannot be made unique is recorded as a [`FileFailure`] instead.
pub fn plan(config: &Config, pipeline: &Pipeline) -> Result<MigrationPlan> {
    let (registry, folders) = build_registry(config)?;
    let settings = Settings::from_config(config);

    let mut plan = MigrationPlan {
        folders,
        components: registry.len(),
        asset_copies: plan_asset_copies(&registry, &settings),
        ..Default::default()
    };

    for record in registry.iter() {
        let path = record.file_path.as_path();
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        match migrate_file(pipeline, &registry, &settings, path, &source) {
            Ok(change) => {
                plan.diagnostics.extend(change.diagnostics.iter().cloned());
                if change.changed() {
                    plan.changes.push(change);
                }
            }
            Err(err) if err.is_file_scoped() => {
                tracing::debug!(path = %path.display(), error = %err, "template left unchanged");
                plan.failures.push(FileFailure {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    tracing::info!(
        changed = plan.changes.len(),
        failed = plan.failures.len(),
        assets = plan.asset_copies.len(),
        "planned migration"
    );
    Ok(plan)
}

/// Run the pipeline over one template.
pub fn migrate_file(
    pipeline: &Pipeline,
    registry: &Registry,
    settings: &Settings,
    path: &Path,
    source: &str,
) -> Result<FileChange> {
    let ctx = pipeline.run(registry, settings, path, source)?;
    for diagnostic in ctx.warnings() {
        tracing::debug!("{diagnostic}");
    }
    Ok(FileChange {
        path: path.to_path_buf(),
        original: ctx.original,
        migrated: ctx.text,
        stats: ctx.stats,
        diagnostics: ctx.diagnostics,
    })
}
