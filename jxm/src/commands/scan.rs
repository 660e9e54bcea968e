use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use jxmigrate_config::CONFIG_FILE_NAME;

use super::{UnwrapOrExit, load_config};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ScanCommand {
    /// Path to the configuration file
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,
}

impl ScanCommand {
    pub fn run(&self) -> Result<()> {
        let config = load_config(&self.config);
        let report = ops::scan(&config).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
