//! Asset declarations and the asset render call.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{imports::IMPORT_DECL, insert_line_after};
use crate::registry::ComponentRecord;

static RENDER_ASSETS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*catalog\.render_assets\(\s*\)\s*\}\}").expect("valid regex")
});

static ASSET_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{#-?\s*(css|js)\s+(.*?)\s*-?#\}").expect("valid regex")
});

static HEADER_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A\s*\{#.*?#\}").expect("valid regex"));

static DEF_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{#-?\s*def\s+").expect("valid regex"));

static URL_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").expect("valid regex"));

/// Kind of co-located asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Style,
    Script,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [AssetKind::Style, AssetKind::Script];

    /// Keyword used in the declaration comment.
    pub fn keyword(self) -> &'static str {
        match self {
            AssetKind::Style => "css",
            AssetKind::Script => "js",
        }
    }

    pub fn extension(self) -> &'static str {
        self.keyword()
    }

    fn from_keyword(keyword: &str) -> Self {
        if keyword == "js" {
            AssetKind::Script
        } else {
            AssetKind::Style
        }
    }

    fn declaration(self, paths: &[String]) -> String {
        format!("{{#{} {} #}}", self.keyword(), paths.join(", "))
    }
}

/// End of the metadata header, the run of `{# ... #}` comments at the top of
/// a template. Asset and `def` declarations only count inside it; a comment
/// further down is plain text.
pub fn header_end(source: &str) -> usize {
    let mut end = 0;
    while let Some(m) = HEADER_COMMENT.find(&source[end..]) {
        end += m.end();
    }
    end
}

/// Replace every `{{ catalog.render_assets() }}` with `{{ assets.render() }}`.
pub fn migrate_render_calls(source: &str) -> (String, usize) {
    let count = RENDER_ASSETS.find_iter(source).count();
    let text = RENDER_ASSETS.replace_all(source, "{{ assets.render() }}");
    (text.into_owned(), count)
}

/// Public URL of a file below the static folder.
pub fn static_url(url_prefix: &str, namespace: Option<&str>, rel_path: &str) -> String {
    match namespace {
        Some(ns) => format!("{url_prefix}{ns}/{rel_path}"),
        None => format!("{url_prefix}{rel_path}"),
    }
}

/// Whether a declared path is already absolute or a full URL.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || URL_SCHEME.is_match(path)
}

/// Resolve a declared asset path to its public URL.
///
/// Relative paths are taken relative to the component's own directory.
pub fn resolve_declared(path: &str, url_prefix: &str, component: &ComponentRecord) -> String {
    if is_absolute(path) {
        return path.to_string();
    }
    let joined = join_relative(component.rel_dir(), path);
    static_url(url_prefix, component.namespace.as_deref(), &joined)
}

fn join_relative(dir: &str, path: &str) -> String {
    let mut parts: Vec<&str> = dir.split('/').filter(|p| !p.is_empty()).collect();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

fn split_paths(body: &str) -> Vec<String> {
    body.split(',')
        .map(|p| p.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rewrite relative paths in existing declarations to public URLs.
///
/// Declarations whose paths are all absolute are left byte-for-byte intact.
pub fn rewrite_declarations(source: &str, url_prefix: &str, component: &ComponentRecord) -> (String, usize) {
    let mut rewritten = 0;
    let (header, body) = source.split_at(header_end(source));
    let header = ASSET_DECL.replace_all(header, |caps: &Captures| {
        let paths = split_paths(&caps[2]);
        if paths.iter().all(|p| is_absolute(p)) {
            return caps[0].to_string();
        }
        rewritten += 1;
        let resolved: Vec<String> = paths
            .iter()
            .map(|p| resolve_declared(p, url_prefix, component))
            .collect();
        AssetKind::from_keyword(&caps[1]).declaration(&resolved)
    });
    (format!("{header}{body}"), rewritten)
}

/// URLs declared for `kind`, resolved the same way as [`rewrite_declarations`].
pub fn declared_urls(source: &str, kind: AssetKind, url_prefix: &str, component: &ComponentRecord) -> Vec<String> {
    ASSET_DECL
        .captures_iter(&source[..header_end(source)])
        .filter(|caps| &caps[1] == kind.keyword())
        .flat_map(|caps| split_paths(&caps[2]))
        .map(|p| resolve_declared(&p, url_prefix, component))
        .collect()
}

/// URL a co-located asset is served under once copied.
pub fn discovered_url(kind: AssetKind, url_prefix: &str, component: &ComponentRecord) -> Option<String> {
    let present = match kind {
        AssetKind::Style => component.has_style(),
        AssetKind::Script => component.has_script(),
    };
    present.then(|| {
        static_url(
            url_prefix,
            component.namespace.as_deref(),
            &component.asset_rel_path(kind.extension()),
        )
    })
}

/// Declare co-located assets that the template does not declare yet.
pub fn insert_discovered(source: &str, url_prefix: &str, component: &ComponentRecord) -> (String, usize) {
    let mut text = source.to_string();
    let mut inserted = 0;

    for kind in AssetKind::ALL {
        let Some(url) = discovered_url(kind, url_prefix, component) else {
            continue;
        };
        if declared_urls(&text, kind, url_prefix, component).contains(&url) {
            continue;
        }
        insert_declaration(&mut text, kind, &kind.declaration(&[url]));
        inserted += 1;
    }

    (text, inserted)
}

/// Insert after the last declaration of the same kind, else after the last
/// asset declaration, else before the definition block, else after the last
/// import, else at the top.
fn insert_declaration(text: &mut String, kind: AssetKind, line: &str) {
    let header = &text[..header_end(text)];
    let decls: Vec<(AssetKind, usize)> = ASSET_DECL
        .captures_iter(header)
        .filter_map(|caps| Some((AssetKind::from_keyword(&caps[1]), caps.get(0)?.end())))
        .collect();
    let def_start = DEF_START.find(header).map(|m| m.start());

    let after = decls
        .iter()
        .rev()
        .find(|(k, _)| *k == kind)
        .or(decls.last())
        .map(|(_, end)| *end)
        .or_else(|| match def_start {
            Some(_) => None,
            None => IMPORT_DECL.find_iter(header).last().map(|m| m.end()),
        });

    if let Some(end) = after {
        insert_line_after(text, end, line);
    } else if let Some(start) = def_start {
        text.insert_str(start, &format!("{line}\n"));
    } else {
        text.insert_str(0, &format!("{line}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> ComponentRecord {
        ComponentRecord::new("card.jinja", "/c/card.jinja", Some("ui"))
            .with_style("/c/card.css")
    }

    #[test]
    fn test_render_call() {
        let (text, count) = migrate_render_calls("<head>{{catalog.render_assets()}}</head>");
        assert_eq!(text, "<head>{{ assets.render() }}</head>");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_static_url() {
        assert_eq!(static_url("/static/", Some("ui"), "card.css"), "/static/ui/card.css");
        assert_eq!(static_url("/static/", None, "a/b.js"), "/static/a/b.js");
    }

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("/static/x.css"));
        assert!(is_absolute("https://cdn.example.com/x.css"));
        assert!(!is_absolute("x.css"));
        assert!(!is_absolute("../x.css"));
    }

    #[test]
    fn test_rewrite_relative_declaration() {
        let record = ComponentRecord::new("forms/input.jinja", "/c/forms/input.jinja", None);
        let (text, count) = rewrite_declarations(
            "{#css input.css, ../base.css #}\n{#js https://cdn.example.com/a.js #}",
            "/static/",
            &record,
        );

        assert_eq!(
            text,
            "{#css /static/forms/input.css, /static/base.css #}\n{#js https://cdn.example.com/a.js #}"
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_absolute_declaration_untouched() {
        let source = "{#-  css  /static/a.css  -#}";
        let (text, count) = rewrite_declarations(source, "/static/", &card());
        assert_eq!(text, source);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_insert_at_top() {
        let (text, count) = insert_discovered("<div></div>", "/static/", &card());
        assert_eq!(text, "{#css /static/ui/card.css #}\n<div></div>");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_insert_before_def() {
        let source = "{#import \"a.jinja\" as A #}\n{#def title #}\n<div></div>";
        let (text, _) = insert_discovered(source, "/static/", &card());
        assert_eq!(
            text,
            "{#import \"a.jinja\" as A #}\n{#css /static/ui/card.css #}\n{#def title #}\n<div></div>"
        );
    }

    #[test]
    fn test_insert_after_import() {
        let source = "{#import \"a.jinja\" as A #}\n<div></div>";
        let (text, _) = insert_discovered(source, "/static/", &card());
        assert_eq!(text, "{#import \"a.jinja\" as A #}\n{#css /static/ui/card.css #}\n<div></div>");
    }

    #[test]
    fn test_insert_after_same_kind() {
        let source = "{#css /static/a.css #}\n{#js /static/a.js #}\n<div></div>";
        let (text, _) = insert_discovered(source, "/static/", &card());
        assert_eq!(
            text,
            "{#css /static/a.css #}\n{#css /static/ui/card.css #}\n{#js /static/a.js #}\n<div></div>"
        );
    }

    #[test]
    fn test_script_after_style() {
        let record = card().with_script("/c/card.js");
        let (text, count) = insert_discovered("<div></div>", "/static/", &record);

        assert_eq!(
            text,
            "{#css /static/ui/card.css #}\n{#js /static/ui/card.js #}\n<div></div>"
        );
        assert_eq!(count, 2);
    }

    #[test]
    fn test_already_declared_relative() {
        let source = "{#css card.css #}\n<div></div>";
        let (text, count) = insert_discovered(source, "/static/", &card());
        assert_eq!(text, source);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_header_end() {
        let source = "{#import \"a.jinja\" as A #}\n{#def title #}\n<div>{# note #}</div>";
        assert_eq!(&source[..header_end(source)], "{#import \"a.jinja\" as A #}\n{#def title #}");
        assert_eq!(header_end("<div></div>"), 0);
    }

    #[test]
    fn test_body_comment_is_not_a_declaration() {
        let source = "{#def title #}\n<div>{# js handlers are attached in app.js #}</div>";
        let (text, count) = rewrite_declarations(source, "/static/", &card());

        assert_eq!(text, source);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_insert_ignores_body_comments() {
        let source = "<div>{# css tweaks live in theme.css #}</div>";
        let (text, count) = insert_discovered(source, "/static/", &card());

        assert_eq!(
            text,
            "{#css /static/ui/card.css #}\n<div>{# css tweaks live in theme.css #}</div>"
        );
        assert_eq!(count, 1);
    }
}
