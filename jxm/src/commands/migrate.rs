use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use jxmigrate_config::CONFIG_FILE_NAME;

use super::{UnwrapOrExit, config_dir, is_default_config, load_config};
use crate::{
    ops, prompt,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct MigrateCommand {
    /// Path to the configuration file
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the backup of modified files
    #[arg(long)]
    pub no_backup: bool,

    /// Apply without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Directory that receives the timestamped backup (defaults to ./backups
    /// next to the config file)
    #[arg(long)]
    pub backup_dir: Option<PathBuf>,

    /// Write the text of every template after each pass to this directory
    #[arg(long)]
    pub snapshots: Option<PathBuf>,
}

impl MigrateCommand {
    pub fn run(&self) -> Result<()> {
        let config = if is_default_config(&self.config) && !self.config.exists() {
            println!("No {} found, describe the project instead.", CONFIG_FILE_NAME);
            prompt::collect_config()?
        } else {
            load_config(&self.config)
        };

        let report = ops::plan(&config, self.snapshots.as_deref()).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        if report.is_empty() || !report.plan.has_work() {
            return Self::finish(report.has_failures());
        }

        if self.dry_run {
            println!("Dry run, no files were modified.");
            return Self::finish(report.has_failures());
        }

        if !self.yes && !prompt::confirm("Apply changes?")? {
            println!("Aborted, no files were modified.");
            return Ok(());
        }

        let backup_root = if self.no_backup {
            None
        } else {
            Some(
                self.backup_dir
                    .clone()
                    .unwrap_or_else(|| config_dir(&self.config).join("backups")),
            )
        };

        let applied = ops::apply(&report, backup_root)?;
        applied.render(&mut TerminalOutput::new());

        Self::finish(report.has_failures())
    }

    fn finish(failed: bool) -> Result<()> {
        if failed {
            std::process::exit(1);
        }
        Ok(())
    }
}
