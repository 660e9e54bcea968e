use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use jxmigrate_config::CONFIG_FILE_NAME;
use jxmigrate_core::{File, Overwrite, WriteResult};

use super::config_dir;
use crate::prompt;

#[derive(Args)]
pub struct InitCommand {
    /// Where to write the configuration file
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub output: PathBuf,

    /// Replace an existing configuration file
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            println!(
                "{} already exists, pass --force to replace it.",
                self.output.display()
            );
            return Ok(());
        }

        // Paths were typed relative to the working directory, the config
        // resolves them relative to its own folder.
        let mut config = prompt::collect_config()?;
        let cwd = std::env::current_dir().wrap_err("Failed to read the current directory")?;
        config.rebase_paths(&cwd, &cwd.join(config_dir(&self.output)));
        let overwrite = if self.force {
            Overwrite::Always
        } else {
            Overwrite::IfMissing
        };

        let file = File::new(&self.output, config.to_toml()).with_overwrite(overwrite);
        match file.write()? {
            WriteResult::Written => println!("Created {}", file.path().display()),
            WriteResult::Skipped => println!("{} already exists, left unchanged.", file.path().display()),
        }

        println!();
        println!("Next steps:");
        println!("  jxm scan       # check the components that were found");
        println!("  jxm migrate    # preview and apply the migration");
        Ok(())
    }
}
