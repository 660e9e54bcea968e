//! Template rewrite pipeline.
//!
//! This module provides a [`Pipeline`] orchestrator that runs a fixed
//! sequence of passes over one template at a time:
//!
//! - `protect-raw` swaps raw blocks for placeholder tokens
//! - `slots` rewrites slot definitions and slot conditionals
//! - `assets` migrates the render call and asset declarations
//! - `imports` adds imports and renames component tags
//! - `restore-raw` puts raw blocks back
//!
//! Plugins hook in before and after each pass.
//!
//! # Example
//!
//! ```ignore
//! use jxmigrate_migrate::pipeline::{Pipeline, Settings};
//!
//! let pipeline = Pipeline::new();
//! let ctx = pipeline.run(&registry, &Settings::from_config(&config), path, &source)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{diag}");
//! }
//! ```

mod context;
mod diagnostic;
mod pass;
pub mod passes;
mod plugin;
mod runner;
mod snapshot;

pub use context::{FileStats, Settings, TransformContext};
pub use diagnostic::{Diagnostic, Severity};
pub use pass::{Pass, PassInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PassSnapshot, SnapshotPlugin};
