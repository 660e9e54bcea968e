// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Configuration for the JinjaX to Jx migration tool.
//!
//! A run is described by a `jxm.toml` file listing the catalog folders to
//! migrate, the static folder assets are relocated to and the URL prefix the
//! static folder is served under.

mod config;
mod error;
mod file;

pub use config::{CatalogFolder, Config, DEFAULT_URL_PREFIX, normalize_url_prefix};
pub use error::{Error, Result, SourceContext};
pub use file::{CONFIG_FILE_NAME, ConfigFile};
