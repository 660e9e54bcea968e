//! Per-template state passed through pipeline passes.

use std::{
    ops::AddAssign,
    path::{Path, PathBuf},
};

use jxmigrate_config::{Config, DEFAULT_URL_PREFIX, normalize_url_prefix};
use serde::Serialize;

use super::diagnostic::{Diagnostic, Severity};
use crate::{
    registry::{ComponentRecord, Registry},
    transform::{line_at, raw::RawBlocks},
};

/// Run-wide settings the passes need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// URL prefix co-located assets are served under, always ending in `/`.
    pub url_prefix: String,
    /// Folder co-located assets are copied into.
    pub static_folder: PathBuf,
}

impl Settings {
    pub fn new(url_prefix: &str, static_folder: impl Into<PathBuf>) -> Self {
        Self {
            url_prefix: normalize_url_prefix(url_prefix),
            static_folder: static_folder.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.url_prefix, config.static_folder.clone())
    }

    /// Where a co-located asset of `record` is copied to.
    pub fn asset_destination(&self, record: &ComponentRecord, extension: &str) -> PathBuf {
        let base = match &record.namespace {
            Some(ns) => self.static_folder.join(ns),
            None => self.static_folder.clone(),
        };
        base.join(record.asset_rel_path(extension))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_URL_PREFIX, "static")
    }
}

/// Counts of what the passes rewrote in one template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileStats {
    pub slots_migrated: usize,
    pub conditionals_migrated: usize,
    pub fills_generated: usize,
    pub asset_calls_migrated: usize,
    pub declarations_rewritten: usize,
    pub assets_declared: usize,
    pub imports_added: usize,
    pub tags_renamed: usize,
}

impl AddAssign for FileStats {
    fn add_assign(&mut self, other: Self) {
        self.slots_migrated += other.slots_migrated;
        self.conditionals_migrated += other.conditionals_migrated;
        self.fills_generated += other.fills_generated;
        self.asset_calls_migrated += other.asset_calls_migrated;
        self.declarations_rewritten += other.declarations_rewritten;
        self.assets_declared += other.assets_declared;
        self.imports_added += other.imports_added;
        self.tags_renamed += other.tags_renamed;
    }
}

/// Context passed through all pipeline passes for one template.
#[derive(Debug)]
pub struct TransformContext<'a> {
    pub registry: &'a Registry,
    pub settings: &'a Settings,
    /// Template being migrated.
    pub path: PathBuf,
    /// The component this template defines, if it lives in a component folder.
    pub component: Option<&'a ComponentRecord>,
    /// Template text as read from disk.
    pub original: String,
    /// Current text. Raw blocks are placeholders between the raw passes.
    pub text: String,
    pub raw: RawBlocks,
    pub stats: FileStats,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> TransformContext<'a> {
    pub fn new(registry: &'a Registry, settings: &'a Settings, path: &Path, source: &str) -> Self {
        Self {
            registry,
            settings,
            path: path.to_path_buf(),
            component: registry.by_file(path),
            original: source.to_string(),
            text: source.to_string(),
            raw: RawBlocks::default(),
            stats: FileStats::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Whether the passes changed anything.
    pub fn is_changed(&self) -> bool {
        self.text != self.original
    }

    /// Line in the original template for an offset into the current text.
    pub fn line_of(&self, offset: usize) -> usize {
        let restored = self.raw.restore(&self.text);
        line_at(&restored, self.raw.original_offset(&self.text, offset))
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Add a warning diagnostic for this template.
    pub fn add_warning(&mut self, pass: &str, message: impl Into<String>) {
        let diagnostic = Diagnostic::warning(pass, message).in_file(&self.path);
        self.diagnostics.push(diagnostic);
    }

    /// Add a warning located at an offset into the current text.
    pub fn add_warning_at(&mut self, pass: &str, message: impl Into<String>, offset: usize) {
        let line = self.line_of(offset);
        let diagnostic = Diagnostic::warning(pass, message)
            .in_file(&self.path)
            .at_line(line);
        self.diagnostics.push(diagnostic);
    }

    /// Add an info diagnostic for this template. Reports leave these out.
    pub fn add_info(&mut self, pass: &str, message: impl Into<String>) {
        let diagnostic = Diagnostic::info(pass, message).in_file(&self.path);
        self.diagnostics.push(diagnostic);
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }
}
