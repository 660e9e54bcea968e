//! Core operations.
//!
//! This module contains the business logic for jxm commands,
//! separated from CLI argument parsing and output rendering.

pub mod migrate;
pub mod scan;

pub use migrate::{apply, plan};
pub use scan::scan;
