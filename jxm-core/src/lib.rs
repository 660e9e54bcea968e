//! Core utilities and types for the JinjaX to Jx migration tool.
//!
//! This crate provides the naming helpers and file primitives shared by the
//! migration pipeline and the command line front end.

mod file;
mod utils;

// File operations
pub use file::{File, Overwrite, WriteResult, copy_file, write_file};
// String utilities
pub use utils::{normalize_name, split_words, to_pascal_case};
