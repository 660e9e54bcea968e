//! End-to-end planning and applying over a component tree on disk.

use std::{fs, path::Path};

use jxmigrate_config::{CatalogFolder, Config};
use jxmigrate_migrate::{
    Error,
    apply::{ApplyOptions, apply},
    pipeline::Pipeline,
    plan,
};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn config(root: &Path, url_prefix: &str) -> Config {
    Config::new(
        vec![
            CatalogFolder::new(root.join("components"), None),
            CatalogFolder::new(root.join("vendor-ui"), Some("ui".to_string())),
        ],
        root.join("static"),
        url_prefix,
    )
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "components/common/Form.jinja", "<form>{{ content() }}</form>");
    write(
        root,
        "components/page.jinja",
        "<common.Form><ui:Button>Save</ui:Button></common.Form>",
    );
    write(root, "vendor-ui/Button.jinja", "<button>{{ content() }}</button>");
    write(root, "vendor-ui/Button.css", "button {}");
    temp
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn test_registry_names() {
    let temp = project();
    let (registry, counts) = plan::build_registry(&config(temp.path(), "/static/")).unwrap();

    let form = registry.get("common.Form").unwrap();
    assert_eq!(form.import_path, "common/Form.jinja");
    let button = registry.get("ui:Button").unwrap();
    assert_eq!(button.import_path, "@ui/Button.jinja");
    assert!(button.has_style());

    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].count, 2);
    assert_eq!(counts[1].count, 1);
}

#[test]
fn test_plan_and_apply() {
    let temp = project();
    let root = temp.path();
    let config = config(root, "/static/");

    let plan = plan(&config, &Pipeline::new()).unwrap();

    assert_eq!(plan.components, 3);
    assert_eq!(plan.changes.len(), 3);
    assert!(plan.failures.is_empty());
    assert_eq!(plan.asset_copies.len(), 1);
    assert!(plan.asset_copies[0].destination.ends_with("static/ui/Button.css"));

    let summary = plan.summary();
    assert_eq!(summary.templates_modified, 3);
    assert_eq!(summary.imports_added, 2);
    assert_eq!(summary.slots_migrated, 2);
    assert_eq!(summary.assets_to_copy, 1);

    let report = apply(
        &plan,
        &ApplyOptions {
            backup_root: Some(root.join("backups")),
        },
    )
    .unwrap();

    assert_eq!(report.templates_written, 3);
    assert_eq!(report.assets_copied, 1);
    assert!(report.backup.unwrap().starts_with(root.join("backups")));
    assert_eq!(
        read(root, "components/page.jinja"),
        "{#import \"@ui/Button.jinja\" as Button #}\n{#import \"common/Form.jinja\" as Form #}\n<Form><Button>Save</Button></Form>"
    );
    assert_eq!(read(root, "components/common/Form.jinja"), "<form>{{ content }}</form>");
    assert_eq!(
        read(root, "vendor-ui/Button.jinja"),
        "{#css /static/ui/Button.css #}\n<button>{{ content }}</button>"
    );
    assert_eq!(read(root, "static/ui/Button.css"), "button {}");

    let again = plan::plan(&config, &Pipeline::new()).unwrap();
    assert!(again.changes.is_empty());
}

#[test]
fn test_asset_url_under_custom_prefix() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "components/.keep", "");
    write(root, "vendor-ui/card.jinja", "{#css /already/absolute.css #}\n<div></div>");
    write(root, "vendor-ui/card.css", ".card {}");

    let plan = plan(&config(root, "/static/components"), &Pipeline::new()).unwrap();

    assert_eq!(
        plan.changes[0].migrated,
        "{#css /already/absolute.css #}\n{#css /static/components/ui/card.css #}\n<div></div>"
    );
}

#[test]
fn test_alias_exhausted_fails_only_that_file() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "vendor-ui/.keep", "");
    write(root, "components/common/card.jinja", "<div></div>");
    write(
        root,
        "components/a.jinja",
        "{#import \"x.jinja\" as Card #}\n{#import \"y.jinja\" as CommonCard #}\n<common.Card/>",
    );
    write(root, "components/b.jinja", "<common.Card/>");

    let plan = plan(&config(root, "/static/"), &Pipeline::new()).unwrap();

    assert_eq!(plan.failures.len(), 1);
    assert!(plan.failures[0].path.ends_with("a.jinja"));
    assert_eq!(plan.changes.len(), 1);
    assert!(plan.changes[0].path.ends_with("b.jinja"));
    assert_eq!(plan.summary().templates_failed, 1);
}

#[test]
fn test_ambiguous_registry_aborts() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "components/Card.jinja", "");
    write(root, "vendor-ui/.keep", "");
    write(root, "more/card.jinja", "");

    let mut config = config(root, "/static/");
    config.folders.push(CatalogFolder::new(root.join("more"), None));

    let err = plan(&config, &Pipeline::new()).unwrap_err();
    assert!(matches!(err, Error::RegistryAmbiguity { ref name, .. } if name == "Card"));
    assert!(!err.is_file_scoped());
}
