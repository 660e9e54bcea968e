//! The component registry.
//!
//! Every `.jinja` file under the configured folders becomes one
//! [`ComponentRecord`]. The registry is built once per run with a
//! [`RegistryBuilder`] and is read-only afterwards.

mod builder;
pub mod naming;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

pub use builder::{FolderCount, RegistryBuilder};
use indexmap::IndexMap;
use jxmigrate_core::normalize_name;
use serde::Serialize;

/// Everything the migration knows about one component template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentRecord {
    /// Name used in markup, e.g. `ui:forms.Input`.
    pub canonical_name: String,
    /// Absolute path of the template.
    pub file_path: PathBuf,
    /// Slash-separated path relative to its component folder.
    pub rel_path: String,
    /// Path written into import declarations.
    pub import_path: String,
    /// Folder prefix, if the folder is mounted under one.
    pub namespace: Option<String>,
    /// Sibling stylesheet with the same stem, if any.
    pub style_path: Option<PathBuf>,
    /// Sibling script with the same stem, if any.
    pub script_path: Option<PathBuf>,
    /// Preferred import alias.
    pub alias_candidate: String,
}

impl ComponentRecord {
    /// Create a record for `rel_path` inside a folder mounted under `prefix`.
    pub fn new(rel_path: impl Into<String>, file_path: impl Into<PathBuf>, prefix: Option<&str>) -> Self {
        let rel_path = rel_path.into();
        let canonical_name = naming::canonical_name(&rel_path, prefix);
        Self {
            import_path: naming::import_path(&rel_path, prefix),
            alias_candidate: naming::alias_candidate(&canonical_name),
            canonical_name,
            file_path: file_path.into(),
            rel_path,
            namespace: prefix.map(str::to_string),
            style_path: None,
            script_path: None,
        }
    }

    /// Attach a co-located stylesheet.
    pub fn with_style(mut self, path: impl Into<PathBuf>) -> Self {
        self.style_path = Some(path.into());
        self
    }

    /// Attach a co-located script.
    pub fn with_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.script_path = Some(path.into());
        self
    }

    /// Create a record from a template on disk, picking up sibling assets.
    pub(crate) fn from_file(rel_path: String, file_path: PathBuf, prefix: Option<&str>) -> Self {
        let style = file_path.with_extension("css");
        let script = file_path.with_extension("js");
        let mut record = Self::new(rel_path, file_path, prefix);
        if style.is_file() {
            record.style_path = Some(style);
        }
        if script.is_file() {
            record.script_path = Some(script);
        }
        record
    }

    pub fn has_style(&self) -> bool {
        self.style_path.is_some()
    }

    pub fn has_script(&self) -> bool {
        self.script_path.is_some()
    }

    /// Alias used when the short alias collides with another one.
    pub fn qualified_alias(&self) -> String {
        naming::qualified_alias(&self.canonical_name)
    }

    /// Directory part of the relative path, empty at the folder root.
    pub fn rel_dir(&self) -> &str {
        self.rel_path
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or("")
    }

    /// Relative path of a co-located asset with the given extension.
    pub fn asset_rel_path(&self, extension: &str) -> String {
        naming::with_extension(&self.rel_path, extension)
    }
}

/// Read-only index of components by canonical name, import path and file.
#[derive(Debug, Default)]
pub struct Registry {
    components: IndexMap<String, ComponentRecord>,
    by_import_path: HashMap<String, String>,
    by_file: HashMap<PathBuf, String>,
}

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub(crate) fn from_components(components: IndexMap<String, ComponentRecord>) -> Self {
        let by_import_path = components
            .values()
            .map(|r| (r.import_path.clone(), r.canonical_name.clone()))
            .collect();
        let by_file = components
            .values()
            .map(|r| (r.file_path.clone(), r.canonical_name.clone()))
            .collect();
        Self {
            components,
            by_import_path,
            by_file,
        }
    }

    /// Look up a component by its exact canonical name.
    pub fn get(&self, name: &str) -> Option<&ComponentRecord> {
        self.components.get(name)
    }

    /// Look up a component by the path used to import it.
    pub fn by_import_path(&self, import_path: &str) -> Option<&ComponentRecord> {
        self.by_import_path
            .get(import_path)
            .and_then(|name| self.components.get(name))
    }

    /// Look up the component defined by a template file.
    pub fn by_file(&self, path: &Path) -> Option<&ComponentRecord> {
        self.by_file
            .get(path)
            .and_then(|name| self.components.get(name))
    }

    /// Resolve a tag name written in markup.
    ///
    /// Tries an exact match first, then a case-insensitive one, then one that
    /// also ignores `-` and `_`. The first component in registration order
    /// wins each fallback step.
    pub fn resolve(&self, tag: &str) -> Option<&ComponentRecord> {
        if let Some(record) = self.components.get(tag) {
            return Some(record);
        }

        let lowered = tag.to_lowercase();
        if let Some(record) = self
            .components
            .values()
            .find(|r| r.canonical_name.to_lowercase() == lowered)
        {
            return Some(record);
        }

        let normalized = normalize_name(tag);
        self.components
            .values()
            .find(|r| normalize_name(&r.canonical_name) == normalized)
    }

    /// Iterate components in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentRecord> {
        self.components.values()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
