//! Scan command report data structures.

use jxmigrate_migrate::{ComponentRecord, registry::FolderCount};

use super::output::{Output, Report};

/// Report data from scanning the component folders.
#[derive(Debug)]
pub struct ScanReport {
    /// Components found per folder, in lookup order.
    pub folders: Vec<FolderCount>,
    /// Every registered component.
    pub components: Vec<ComponentRecord>,
}

impl ScanReport {
    pub fn new(folders: Vec<FolderCount>, components: Vec<ComponentRecord>) -> Self {
        Self {
            folders,
            components,
        }
    }
}

impl Report for ScanReport {
    fn render(&self, out: &mut dyn Output) {
        out.section("Folders");
        for folder in &self.folders {
            let label = match &folder.prefix {
                Some(prefix) => format!("{} ({})", folder.path.display(), prefix),
                None => folder.path.display().to_string(),
            };
            out.key_value_indented(&label, &format!("{} component(s)", folder.count));
        }
        out.newline();

        if self.components.is_empty() {
            out.preformatted("No components found.");
            return;
        }

        out.section(&format!("Components ({})", self.components.len()));
        for record in &self.components {
            let mut assets = Vec::new();
            if record.has_style() {
                assets.push("css");
            }
            if record.has_script() {
                assets.push("js");
            }
            let assets = if assets.is_empty() {
                String::new()
            } else {
                format!(" [{}]", assets.join(", "))
            };
            out.list_item(&format!(
                "{} -> \"{}\"{}",
                record.canonical_name, record.import_path, assets
            ));
        }
    }
}
