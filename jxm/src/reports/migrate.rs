//! Migrate command report data structures.

use std::path::PathBuf;

use jxmigrate_migrate::{MigrationPlan, apply::ApplyReport, pipeline::Diagnostic};

use super::{
    display_path,
    output::{Output, Report},
};

/// Report data from planning a migration.
#[derive(Debug)]
pub struct MigrateReport {
    /// The planned changes.
    pub plan: MigrationPlan,
    /// Paths below this directory are shown relative to it.
    pub base: PathBuf,
}

impl MigrateReport {
    pub fn new(plan: MigrationPlan, base: impl Into<PathBuf>) -> Self {
        Self {
            plan,
            base: base.into(),
        }
    }

    /// Whether the registry is empty, leaving nothing to migrate.
    pub fn is_empty(&self) -> bool {
        self.plan.components == 0
    }

    /// Whether any template could not be migrated.
    pub fn has_failures(&self) -> bool {
        !self.plan.failures.is_empty()
    }

    fn path(&self, path: &std::path::Path) -> String {
        display_path(path, &self.base)
    }

    fn diagnostic(&self, diagnostic: &Diagnostic) -> String {
        match (&diagnostic.file, diagnostic.line) {
            (Some(file), Some(line)) => format!("{}:{}: {}", self.path(file), line, diagnostic.message),
            (Some(file), None) => format!("{}: {}", self.path(file), diagnostic.message),
            _ => diagnostic.message.clone(),
        }
    }

    fn render_changes(&self, out: &mut dyn Output) {
        for change in &self.plan.changes {
            out.divider(&self.path(&change.path));
            for line in change.removed_lines() {
                out.removed_item(line);
            }
            for line in change.added_lines() {
                out.added_item(line);
            }
            out.newline();
        }
    }

    fn render_summary(&self, out: &mut dyn Output) {
        let summary = self.plan.summary();
        out.title("Summary");
        out.key_value_indented("Templates to modify", &summary.templates_modified.to_string());
        out.key_value_indented("Imports added", &summary.imports_added.to_string());
        out.key_value_indented("Slot definitions migrated", &summary.slots_migrated.to_string());
        out.key_value_indented("Fill blocks generated", &summary.fills_generated.to_string());
        out.key_value_indented("Asset calls migrated", &summary.asset_calls_migrated.to_string());
        out.key_value_indented("Assets to copy", &summary.assets_to_copy.to_string());
        if summary.templates_failed > 0 {
            out.key_value_indented("Templates failed", &summary.templates_failed.to_string());
        }
        if summary.warnings > 0 {
            out.key_value_indented("Warnings", &summary.warnings.to_string());
        }
    }
}

impl Report for MigrateReport {
    fn render(&self, out: &mut dyn Output) {
        out.section("Component folders");
        for folder in &self.plan.folders {
            let label = match &folder.prefix {
                Some(prefix) => format!("{} ({})", self.path(&folder.path), prefix),
                None => self.path(&folder.path),
            };
            out.key_value_indented(&label, &format!("{} component(s)", folder.count));
        }
        out.newline();

        if self.is_empty() {
            out.preformatted("No components found. Nothing to migrate.");
            return;
        }

        self.render_changes(out);

        if !self.plan.asset_copies.is_empty() {
            out.section("Assets to copy");
            for copy in &self.plan.asset_copies {
                out.list_item(&format!(
                    "{} -> {}",
                    self.path(&copy.source),
                    self.path(&copy.destination)
                ));
            }
            out.newline();
        }

        if self.has_failures() {
            out.section("Not migrated");
            for failure in &self.plan.failures {
                out.list_item(&format!("{}: {}", self.path(&failure.path), failure.message));
            }
            out.newline();
        }

        let warnings: Vec<_> = self
            .plan
            .diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .collect();
        for diagnostic in &warnings {
            out.warning(&self.diagnostic(diagnostic));
        }
        if !warnings.is_empty() {
            out.newline();
        }

        if !self.plan.has_work() {
            out.preformatted("Templates are already up to date.");
            return;
        }

        self.render_summary(out);
    }
}

/// Report data from applying a migration.
#[derive(Debug)]
pub struct AppliedReport {
    pub result: ApplyReport,
    /// Templates left untouched because they could not be migrated.
    pub failures: usize,
    pub base: PathBuf,
}

impl Report for AppliedReport {
    fn render(&self, out: &mut dyn Output) {
        out.newline();
        if let Some(backup) = &self.result.backup {
            out.key_value("Backup created", &display_path(backup, &self.base));
        }
        out.preformatted(&format!(
            "Modified {} template(s)",
            self.result.templates_written
        ));
        out.preformatted(&format!(
            "Copied {} asset file(s), {} already up to date",
            self.result.assets_copied, self.result.assets_unchanged
        ));

        if self.failures > 0 {
            out.warning(&format!(
                "{} template(s) were not migrated, see above",
                self.failures
            ));
        } else {
            out.preformatted("✓ Migration complete");
        }
    }
}

#[cfg(test)]
mod tests {
    use jxmigrate_migrate::{
        AssetCopy, FileChange, FileFailure, pipeline::FileStats, registry::FolderCount,
    };

    use super::*;
    use crate::reports::testing::RecordingOutput;

    fn report(plan: MigrationPlan) -> MigrateReport {
        MigrateReport::new(plan, "/site")
    }

    fn folder(count: usize) -> FolderCount {
        FolderCount {
            path: PathBuf::from("/site/components"),
            prefix: None,
            count,
        }
    }

    #[test]
    fn test_empty_registry() {
        let report = report(MigrationPlan {
            folders: vec![folder(0)],
            ..Default::default()
        });

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert!(report.is_empty());
        assert!(out.text().contains("No components found. Nothing to migrate."));
        assert!(!out.text().contains("Summary"));
    }

    #[test]
    fn test_changes_assets_and_summary() {
        let stats = FileStats {
            imports_added: 1,
            tags_renamed: 2,
            ..Default::default()
        };
        let report = report(MigrationPlan {
            folders: vec![folder(2)],
            components: 2,
            changes: vec![FileChange {
                path: PathBuf::from("/site/components/page.jinja"),
                original: "<common.Form></common.Form>\n".to_string(),
                migrated: "{#import \"common/Form.jinja\" as Form #}\n<Form></Form>\n".to_string(),
                stats,
                diagnostics: Vec::new(),
            }],
            asset_copies: vec![AssetCopy {
                source: PathBuf::from("/site/components/Card.css"),
                destination: PathBuf::from("/site/static/Card.css"),
            }],
            ..Default::default()
        });

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        let text = out.text();

        assert!(text.contains("  components: 2 component(s)"));
        assert!(text.contains("-- components/page.jinja --"));
        assert!(text.contains("  - <common.Form></common.Form>"));
        assert!(text.contains("  + {#import \"common/Form.jinja\" as Form #}"));
        assert!(text.contains("  - components/Card.css -> static/Card.css"));
        assert!(text.contains("  Templates to modify: 1"));
        assert!(text.contains("  Imports added: 1"));
        assert!(text.contains("  Assets to copy: 1"));
    }

    #[test]
    fn test_failures_and_warnings() {
        let warning = Diagnostic::warning("slots", "conditional mixes slot and other tests")
            .in_file("/site/components/card.jinja")
            .at_line(4);
        let report = report(MigrationPlan {
            folders: vec![folder(2)],
            components: 2,
            failures: vec![FileFailure {
                path: PathBuf::from("/site/components/a.jinja"),
                message: "no unique alias for 'Card'".to_string(),
            }],
            diagnostics: vec![warning],
            ..Default::default()
        });

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        let text = out.text();

        assert!(report.has_failures());
        assert!(text.contains("  - components/a.jinja: no unique alias for 'Card'"));
        assert!(text.contains(
            "warning: components/card.jinja:4: conditional mixes slot and other tests"
        ));
        assert!(text.contains("Templates are already up to date."));
    }

    #[test]
    fn test_applied_report() {
        let report = AppliedReport {
            result: ApplyReport {
                backup: Some(PathBuf::from("/site/backups/backup-20250101-120000")),
                templates_written: 3,
                assets_copied: 2,
                assets_unchanged: 1,
            },
            failures: 0,
            base: PathBuf::from("/site"),
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        let text = out.text();

        assert!(text.contains("Backup created: backups/backup-20250101-120000"));
        assert!(text.contains("Modified 3 template(s)"));
        assert!(text.contains("Copied 2 asset file(s), 1 already up to date"));
        assert!(text.contains("✓ Migration complete"));
    }
}
