//! Migrate operation - plan a run, then apply it.

use std::path::{Path, PathBuf};

use eyre::Result;
use jxmigrate_config::Config;
use jxmigrate_migrate::{
    apply::{self as applier, ApplyOptions},
    pipeline::{Pipeline, SnapshotPlugin},
};

use crate::reports::{AppliedReport, MigrateReport};

/// Build the migration plan for `config` without touching any file.
///
/// With `snapshots`, the text of every template after each pass is written
/// below that directory.
pub fn plan(config: &Config, snapshots: Option<&Path>) -> jxmigrate_migrate::Result<MigrateReport> {
    let mut pipeline = Pipeline::new();
    if let Some(dir) = snapshots {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(dir));
    }

    let plan = jxmigrate_migrate::plan(config, &pipeline)?;
    let base = std::env::current_dir().unwrap_or_default();
    Ok(MigrateReport::new(plan, base))
}

/// Write the planned changes, backing up into `backup_root` first when given.
pub fn apply(report: &MigrateReport, backup_root: Option<PathBuf>) -> Result<AppliedReport> {
    let options = ApplyOptions { backup_root };
    let result = applier::apply(&report.plan, &options)?;

    Ok(AppliedReport {
        result,
        failures: report.plan.failures.len(),
        base: report.base.clone(),
    })
}
