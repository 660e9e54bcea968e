use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use jxmigrate_config::CatalogFolder;
use serde::Serialize;
use walkdir::WalkDir;

use super::{ComponentRecord, Registry, naming::TEMPLATE_EXTENSION};
use crate::{Error, Result};

/// Number of components found in one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderCount {
    pub path: PathBuf,
    pub prefix: Option<String>,
    pub count: usize,
}

/// Collects component records, then freezes them into a [`Registry`].
///
/// Registering the same file twice is a no-op. Two different files with the
/// same canonical name are an error.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    components: IndexMap<String, ComponentRecord>,
    folders: Vec<FolderCount>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every folder in order.
    pub fn add_folders<'a>(mut self, folders: impl IntoIterator<Item = &'a CatalogFolder>) -> Result<Self> {
        for folder in folders {
            self.add_folder(folder)?;
        }
        Ok(self)
    }

    /// Register every template below `folder`, in sorted path order.
    ///
    /// Returns the number of newly registered components.
    pub fn add_folder(&mut self, folder: &CatalogFolder) -> Result<usize> {
        let root = folder
            .path
            .canonicalize()
            .map_err(|e| Error::io(&folder.path, e))?;
        let prefix = folder.prefix.as_deref();
        let mut count = 0;

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|source| Error::Walk {
                path: root.clone(),
                source,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION)
            {
                continue;
            }
            let Some(rel_path) = relative_slash_path(&root, path) else {
                continue;
            };

            let record = ComponentRecord::from_file(rel_path, path.to_path_buf(), prefix);
            if self.add_record(record)? {
                count += 1;
            }
        }

        tracing::info!(folder = %folder.path.display(), prefix = ?prefix, count, "scanned component folder");
        self.folders.push(FolderCount {
            path: folder.path.clone(),
            prefix: folder.prefix.clone(),
            count,
        });
        Ok(count)
    }

    /// Register a single record.
    ///
    /// Returns `false` when the same file was already registered.
    pub fn add_record(&mut self, record: ComponentRecord) -> Result<bool> {
        if let Some(existing) = self.components.get(&record.canonical_name) {
            if existing.file_path == record.file_path {
                return Ok(false);
            }
            return Err(Error::RegistryAmbiguity {
                name: record.canonical_name,
                first: existing.file_path.clone(),
                second: record.file_path,
            });
        }

        tracing::debug!(name = %record.canonical_name, path = %record.file_path.display(), "registered component");
        self.components.insert(record.canonical_name.clone(), record);
        Ok(true)
    }

    pub fn build(self) -> Registry {
        Registry::from_components(self.components)
    }

    /// Freeze the registry and keep the per-folder counts.
    pub fn finish(self) -> (Registry, Vec<FolderCount>) {
        (Registry::from_components(self.components), self.folders)
    }
}

fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = rel
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();
    Some(parts?.join("/"))
}
