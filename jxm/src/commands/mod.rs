mod completions;
mod init;
mod migrate;
mod scan;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use init::InitCommand;
use jxmigrate_config::{CONFIG_FILE_NAME, Config, ConfigFile};
use migrate::MigrateCommand;
use scan::ScanCommand;

/// Extension trait for exiting on config and migration errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for jxmigrate_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for jxmigrate_migrate::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "jxm")]
#[command(version)]
#[command(about = "Migrate JinjaX component templates to Jx")]
pub(crate) struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Migrate(cmd) => cmd.run(),
            Commands::Scan(cmd) => cmd.run(),
            Commands::Init(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite templates to Jx syntax and copy component assets
    Migrate(MigrateCommand),

    /// List the components found in the configured folders
    Scan(ScanCommand),

    /// Create a jxm.toml interactively
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Load and validate a config file, exiting with a diagnostic on failure.
pub(crate) fn load_config(path: &Path) -> Config {
    ConfigFile::open(path).unwrap_or_exit().into_config()
}

/// Directory the config file lives in.
pub(crate) fn config_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Whether `path` is the default config location, which may be absent.
pub(crate) fn is_default_config(path: &Path) -> bool {
    path == Path::new(CONFIG_FILE_NAME)
}
