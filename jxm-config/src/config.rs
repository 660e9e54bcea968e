//! Configuration types for jxm.toml.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Result, SourceContext};

/// URL prefix used when none is configured.
pub const DEFAULT_URL_PREFIX: &str = "/static/";

/// Root configuration for jxm.toml
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Folder that co-located assets are copied into
    #[serde(default = "default_static_folder")]
    pub static_folder: PathBuf,

    /// URL prefix the static folder is served under
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    /// Component catalog folders, in lookup order
    #[serde(default)]
    pub folders: Vec<CatalogFolder>,
}

/// A component folder, optionally mounted under a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogFolder {
    /// Folder path
    pub path: PathBuf,

    /// Prefix for components in this folder (`ui` makes `<ui:Button>`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

fn default_static_folder() -> PathBuf {
    PathBuf::from("static")
}

fn default_url_prefix() -> String {
    DEFAULT_URL_PREFIX.to_string()
}

/// Normalize a URL prefix so it is rooted and always ends with a slash.
///
/// A prefix without a leading `/` or a scheme gets a leading `/`, so the URLs
/// built from it are never mistaken for relative paths. An empty prefix falls
/// back to [`DEFAULT_URL_PREFIX`].
pub fn normalize_url_prefix(prefix: &str) -> String {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return DEFAULT_URL_PREFIX.to_string();
    }
    let rooted = if prefix.starts_with('/') || prefix.contains("://") {
        prefix.to_string()
    } else {
        format!("/{}", prefix)
    };
    if rooted.ends_with('/') {
        rooted
    } else {
        format!("{}/", rooted)
    }
}

impl CatalogFolder {
    /// Create a folder entry.
    pub fn new(path: impl Into<PathBuf>, prefix: Option<String>) -> Self {
        Self {
            path: path.into(),
            prefix: prefix.filter(|p| !p.is_empty()),
        }
    }
}

impl Config {
    /// Create a configuration from already collected values.
    pub fn new(folders: Vec<CatalogFolder>, static_folder: PathBuf, url_prefix: &str) -> Self {
        Self {
            static_folder,
            url_prefix: normalize_url_prefix(url_prefix),
            folders,
        }
    }

    /// Parse a configuration from TOML source.
    ///
    /// Only the shape of the file is checked here; see [`Config::validate`].
    pub fn from_str_with_filename(src: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(src, filename);
        let mut config: Config = toml::from_str(src).map_err(|e| ctx.parse_error(e))?;
        config.url_prefix = normalize_url_prefix(&config.url_prefix);
        for folder in &mut config.folders {
            folder.prefix = folder.prefix.take().filter(|p| !p.is_empty());
        }
        Ok(config)
    }

    /// Check folder prefixes and that at least one folder is configured.
    pub fn validate(&self, ctx: &SourceContext) -> Result<()> {
        if self.folders.is_empty() {
            return Err(ctx.validation_error("at least one component folder is required", None));
        }

        let mut seen: Vec<&str> = Vec::new();
        for folder in &self.folders {
            let Some(prefix) = folder.prefix.as_deref() else {
                continue;
            };

            if !is_valid_prefix(prefix) {
                return Err(ctx.invalid_prefix_error(prefix, ctx.find_value_span(prefix, 0)));
            }

            if seen.contains(&prefix) {
                return Err(ctx.duplicate_prefix_error(
                    prefix,
                    ctx.find_value_span(prefix, 0),
                    ctx.find_value_span(prefix, 1),
                ));
            }
            seen.push(prefix);
        }

        Ok(())
    }

    /// Resolve relative folder paths against `base` (the config file directory).
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.static_folder.is_relative() {
            self.static_folder = base.join(&self.static_folder);
        }
        for folder in &mut self.folders {
            if folder.path.is_relative() {
                folder.path = base.join(&folder.path);
            }
        }
    }

    /// Rewrite relative paths typed in `from` so they resolve the same way
    /// from `to`. Both directories must be absolute.
    pub fn rebase_paths(&mut self, from: &Path, to: &Path) {
        if self.static_folder.is_relative() {
            self.static_folder = rebase(&self.static_folder, from, to);
        }
        for folder in &mut self.folders {
            if folder.path.is_relative() {
                folder.path = rebase(&folder.path, from, to);
            }
        }
    }

    /// Check that every configured folder exists on disk.
    pub fn check_folders_exist(&self, ctx: &SourceContext) -> Result<()> {
        for folder in &self.folders {
            if !folder.path.is_dir() {
                let span = folder
                    .path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|name| {
                        ctx.src()
                            .find(name)
                            .map(|offset| (offset, name.len()).into())
                    });
                return Err(ctx.missing_folder_error(folder.path.clone(), span));
            }
        }
        Ok(())
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> String {
        // Only string, path and array values, serialization cannot fail.
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

/// Lexically clean `path`, folding `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn rebase(path: &Path, from: &Path, to: &Path) -> PathBuf {
    let target = normalize(&from.join(path));
    let base = normalize(to);

    let common = target
        .components()
        .zip(base.components())
        .take_while(|(a, b)| a == b)
        .count();
    // Different roots (e.g. drives), nothing relative to express.
    if common == 0 {
        return target;
    }

    let mut rebased = PathBuf::new();
    for _ in base.components().skip(common) {
        rebased.push("..");
    }
    for component in target.components().skip(common) {
        rebased.push(component);
    }
    if rebased.as_os_str().is_empty() {
        rebased.push(".");
    }
    rebased
}

fn is_valid_prefix(prefix: &str) -> bool {
    !prefix.is_empty()
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Config {
        Config::from_str_with_filename(src, "jxm.toml").expect("Failed to parse test config")
    }

    #[test]
    fn test_rebase_paths_onto_config_dir() {
        let mut config = Config::new(
            vec![
                CatalogFolder::new("site/components", None),
                CatalogFolder::new("./vendor/ui", Some("ui".to_string())),
                CatalogFolder::new("/opt/shared", Some("shared".to_string())),
            ],
            PathBuf::from("site/static"),
            "/static/",
        );

        config.rebase_paths(Path::new("/work"), Path::new("/work/site"));

        assert_eq!(config.folders[0].path, PathBuf::from("components"));
        assert_eq!(config.folders[1].path, PathBuf::from("../vendor/ui"));
        assert_eq!(config.folders[2].path, PathBuf::from("/opt/shared"));
        assert_eq!(config.static_folder, PathBuf::from("static"));

        let mut resolved = config.clone();
        resolved.resolve_paths(Path::new("/work/site"));
        assert_eq!(normalize(&resolved.folders[1].path), PathBuf::from("/work/vendor/ui"));
    }

    #[test]
    fn test_rebase_paths_same_dir_is_unchanged() {
        let mut config = Config::new(
            vec![CatalogFolder::new("components", None)],
            PathBuf::from("static"),
            "/static/",
        );

        config.rebase_paths(Path::new("/work"), Path::new("/work/."));

        assert_eq!(config.folders[0].path, PathBuf::from("components"));
        assert_eq!(config.static_folder, PathBuf::from("static"));
    }

    #[test]
    fn test_defaults() {
        let config = parse(
            r#"
            [[folders]]
            path = "components"
        "#,
        );

        assert_eq!(config.static_folder, PathBuf::from("static"));
        assert_eq!(config.url_prefix, "/static/");
        assert_eq!(config.folders.len(), 1);
        assert_eq!(config.folders[0].prefix, None);
    }

    #[test]
    fn test_url_prefix_gets_trailing_slash() {
        let config = parse(
            r#"
            url_prefix = "/assets"

            [[folders]]
            path = "components"
        "#,
        );

        assert_eq!(config.url_prefix, "/assets/");
    }

    #[test]
    fn test_normalize_url_prefix() {
        assert_eq!(normalize_url_prefix(""), "/static/");
        assert_eq!(normalize_url_prefix("  "), "/static/");
        assert_eq!(normalize_url_prefix("/static/components"), "/static/components/");
        assert_eq!(normalize_url_prefix("/static/"), "/static/");
    }

    #[test]
    fn test_normalize_url_prefix_roots_bare_paths() {
        assert_eq!(normalize_url_prefix("static/"), "/static/");
        assert_eq!(normalize_url_prefix("static/components"), "/static/components/");
        assert_eq!(
            normalize_url_prefix("https://cdn.example.com/assets"),
            "https://cdn.example.com/assets/"
        );
    }

    #[test]
    fn test_empty_prefix_is_none() {
        let config = parse(
            r#"
            [[folders]]
            path = "components"
            prefix = ""
        "#,
        );

        assert_eq!(config.folders[0].prefix, None);
    }

    #[test]
    fn test_parse_error() {
        let result = Config::from_str_with_filename("folders = 3", "jxm.toml");
        assert!(matches!(*result.unwrap_err(), crate::Error::Parse { .. }));
    }

    #[test]
    fn test_validate_requires_folders() {
        let src = "url_prefix = \"/static/\"\n";
        let config = parse(src);
        let ctx = SourceContext::new(src, "jxm.toml");

        let err = config.validate(&ctx).unwrap_err();
        assert!(matches!(*err, crate::Error::Validation { .. }));
    }

    #[test]
    fn test_validate_duplicate_prefix() {
        let src = r#"
            [[folders]]
            path = "a"
            prefix = "ui"

            [[folders]]
            path = "b"
            prefix = "ui"
        "#;
        let config = parse(src);
        let ctx = SourceContext::new(src, "jxm.toml");

        let err = config.validate(&ctx).unwrap_err();
        match *err {
            crate::Error::DuplicatePrefix {
                prefix,
                first_span,
                second_span,
                ..
            } => {
                assert_eq!(prefix, "ui");
                assert!(first_span.is_some());
                assert!(second_span.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_prefix() {
        let src = r#"
            [[folders]]
            path = "a"
            prefix = "u i"
        "#;
        let config = parse(src);
        let ctx = SourceContext::new(src, "jxm.toml");

        let err = config.validate(&ctx).unwrap_err();
        assert!(matches!(*err, crate::Error::InvalidPrefix { .. }));
    }

    #[test]
    fn test_resolve_paths() {
        let mut config = parse(
            r#"
            static_folder = "/srv/static"

            [[folders]]
            path = "components"
        "#,
        );

        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.static_folder, PathBuf::from("/srv/static"));
        assert_eq!(config.folders[0].path, PathBuf::from("/project/components"));
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let config = Config::new(
            vec![
                CatalogFolder::new("components", None),
                CatalogFolder::new("vendor-ui", Some("ui".to_string())),
            ],
            PathBuf::from("static"),
            "/static",
        );

        let rendered = config.to_toml();
        assert_eq!(parse(&rendered), config);
    }
}
