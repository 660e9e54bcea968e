//! Shared fixtures for pipeline tests.

use std::path::Path;

use jxmigrate_migrate::{
    ComponentRecord, Registry, RegistryBuilder,
    pipeline::{Pipeline, Settings, TransformContext},
};

/// A registry with a small component library:
/// `Layout`, `common.Card`, `special.Card`, `ui:Button`, `ui:Icon` and
/// `ui:Card` (which has a stylesheet and a script).
pub fn registry() -> Registry {
    let mut builder = RegistryBuilder::new();
    let records = [
        ComponentRecord::new("layout.jinja", "/site/components/layout.jinja", None),
        ComponentRecord::new("common/card.jinja", "/site/components/common/card.jinja", None),
        ComponentRecord::new("special/card.jinja", "/site/components/special/card.jinja", None),
        ComponentRecord::new("Button.jinja", "/site/vendor/Button.jinja", Some("ui")),
        ComponentRecord::new("icon.jinja", "/site/vendor/icon.jinja", Some("ui")),
        ComponentRecord::new("card.jinja", "/site/vendor/card.jinja", Some("ui"))
            .with_style("/site/vendor/card.css")
            .with_script("/site/vendor/card.js"),
    ];
    for record in records {
        builder.add_record(record).expect("unique component names");
    }
    builder.build()
}

pub fn settings() -> Settings {
    Settings::new("/static/components/", "/site/static")
}

/// Run the full pipeline over `source` as if it were the file at `path`.
pub fn run<'a>(registry: &'a Registry, settings: &'a Settings, path: &str, source: &str) -> TransformContext<'a> {
    Pipeline::new()
        .run(registry, settings, Path::new(path), source)
        .expect("pipeline should succeed")
}
