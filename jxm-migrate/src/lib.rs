//! Component registry and template rewrite pipeline for migrating JinjaX
//! templates to Jx.
//!
//! # Module Organization
//!
//! - [`registry`] - Component discovery and tag name resolution
//! - [`transform`] - Plain-text rewrites (raw blocks, slots, assets, imports)
//! - [`pipeline`] - Pass orchestration, diagnostics and plugins
//! - [`plan`] - Run-level planning over every configured folder
//! - [`apply`] - Backup, template writes and asset copies

pub mod apply;
mod error;
pub mod pipeline;
pub mod plan;
pub mod registry;
pub mod transform;

pub use error::{Error, Result};
pub use plan::{AssetCopy, FileChange, FileFailure, MigrationPlan, Summary, plan};
pub use registry::{ComponentRecord, Registry, RegistryBuilder};
