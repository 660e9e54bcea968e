//! Name derivation for component templates.
//!
//! A template at `common/card.jinja` inside a folder mounted under the `ui`
//! prefix is known as `ui:common.Card`, imported from `@ui/common/card.jinja`
//! and aliased `Card` unless that alias collides.

use jxmigrate_core::to_pascal_case;

/// Template file extension, without the dot.
pub const TEMPLATE_EXTENSION: &str = "jinja";

/// Derive the canonical component name for a folder-relative path.
///
/// Directories keep their spelling and are joined with dots; the file stem is
/// PascalCased. An `index` template is named after its directory.
pub fn canonical_name(rel_path: &str, prefix: Option<&str>) -> String {
    let mut parts: Vec<&str> = rel_path.split('/').filter(|p| !p.is_empty()).collect();
    let file = parts.pop().unwrap_or_default();
    let stem = file_stem(file);

    let mut name = if stem.eq_ignore_ascii_case("index") && !parts.is_empty() {
        let last = parts.pop().unwrap_or_default();
        join_dotted(&parts, &to_pascal_case(last))
    } else {
        join_dotted(&parts, &to_pascal_case(stem))
    };

    if let Some(prefix) = prefix {
        name = format!("{prefix}:{name}");
    }
    name
}

/// The path used in an import declaration for a folder-relative path.
pub fn import_path(rel_path: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) => format!("@{prefix}/{rel_path}"),
        None => rel_path.to_string(),
    }
}

/// The preferred short alias for a canonical name: its last segment.
pub fn alias_candidate(canonical: &str) -> String {
    let unprefixed = canonical
        .split_once(':')
        .map(|(_, rest)| rest)
        .unwrap_or(canonical);
    let last = unprefixed.rsplit('.').next().unwrap_or(unprefixed);
    to_pascal_case(last)
}

/// The alias used when the short alias collides: the whole name, PascalCased.
pub fn qualified_alias(canonical: &str) -> String {
    to_pascal_case(canonical)
}

/// Strip the last extension from a file name.
pub(crate) fn file_stem(file: &str) -> &str {
    match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    }
}

/// Replace the extension of a slash-separated path.
pub(crate) fn with_extension(rel_path: &str, extension: &str) -> String {
    let (dir, file) = match rel_path.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, rel_path),
    };
    let file = format!("{}.{extension}", file_stem(file));
    match dir {
        Some(dir) => format!("{dir}/{file}"),
        None => file,
    }
}

fn join_dotted(dirs: &[&str], last: &str) -> String {
    if dirs.is_empty() {
        return last.to_string();
    }
    format!("{}.{last}", dirs.join("."))
}
