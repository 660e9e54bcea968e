//! Import declarations for the components a template uses.
//!
//! Every component tag is resolved against the registry. Components that are
//! not imported yet get an `{#import "path" as Alias #}` line, and tags whose
//! spelling differs from the chosen alias are renamed.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    sync::LazyLock,
};

use indexmap::IndexMap;
use regex::{Captures, Regex};

use super::insert_line_after;
use crate::registry::{ComponentRecord, Registry};

/// Optional `prefix:`, optional dotted path, PascalCase last segment.
const TAG_NAME: &str = r"(?:[0-9A-Za-z._-]+:)?(?:[0-9A-Za-z_-]+\.)*[A-Z][0-9A-Za-z_-]*";

pub(crate) static IMPORT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{#-?\s*import\s+"([^"]+)"\s+as\s+(\w+)\s*-?#\}"#).expect("valid regex")
});

static COMPONENT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"<(?P<slash>/?)(?P<tag>{TAG_NAME})(?P<after>\s|/|>)"))
        .expect("valid regex")
});

/// Render an import declaration line.
pub fn import_declaration(import_path: &str, alias: &str) -> String {
    format!("{{#import \"{import_path}\" as {alias} #}}")
}

/// Every distinct component tag name used in opening or closing tags.
pub fn find_component_tags(source: &str) -> BTreeSet<String> {
    COMPONENT_TAG
        .captures_iter(source)
        .map(|caps| caps["tag"].to_string())
        .collect()
}

/// Existing import declarations, import path to alias, in source order.
pub fn existing_imports(source: &str) -> IndexMap<String, String> {
    IMPORT_DECL
        .captures_iter(source)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// One component imported by a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    pub alias: String,
    pub import_path: String,
    pub canonical_name: String,
    /// Declared before the migration ran.
    pub existing: bool,
}

/// Several components wanted the same short alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasCollision {
    pub alias: String,
    /// Canonical name and the alias it was given instead.
    pub resolved: Vec<(String, String)>,
}

impl std::fmt::Display for AliasCollision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .resolved
            .iter()
            .map(|(name, alias)| format!("{name} as {alias}"))
            .collect();
        write!(f, "alias '{}' is ambiguous, imported {}", self.alias, names.join(", "))
    }
}

/// Aliases could not be made unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConflict {
    pub alias: String,
    pub names: Vec<String>,
}

/// What the import rewrite will do to one template.
#[derive(Debug, Clone, Default)]
pub struct ImportPlan {
    /// Imported components, sorted by import path.
    pub entries: Vec<ImportEntry>,
    /// Tag spelling to alias.
    pub renames: BTreeMap<String, String>,
    pub collisions: Vec<AliasCollision>,
    /// Tags that matched no component.
    pub unresolved: Vec<String>,
}

impl ImportPlan {
    /// Entries that need a new import line.
    pub fn new_imports(&self) -> impl Iterator<Item = &ImportEntry> {
        self.entries.iter().filter(|e| !e.existing)
    }

    /// True when applying the plan would not change the text.
    pub fn is_noop(&self) -> bool {
        self.renames.is_empty() && self.new_imports().next().is_none()
    }
}

/// Decide imports and renames for a template.
///
/// Tags that already equal an imported alias are left alone. When short
/// aliases collide, each colliding component gets its qualified alias; if
/// that still does not make them unique the template cannot be migrated.
pub fn plan_imports(source: &str, registry: &Registry) -> Result<ImportPlan, AliasConflict> {
    let existing = existing_imports(source);
    let existing_aliases: HashSet<&str> = existing.values().map(String::as_str).collect();

    let mut plan = ImportPlan::default();
    let mut used: IndexMap<&str, (&ComponentRecord, Vec<String>)> = IndexMap::new();
    for tag in find_component_tags(source) {
        if existing_aliases.contains(tag.as_str()) {
            continue;
        }
        match registry.resolve(&tag) {
            Some(record) => used
                .entry(record.canonical_name.as_str())
                .or_insert_with(|| (record, Vec::new()))
                .1
                .push(tag),
            None => plan.unresolved.push(tag),
        }
    }

    let mut pending: Vec<(&ComponentRecord, Vec<String>)> = Vec::new();
    for (record, tags) in used.into_values() {
        match existing.get(&record.import_path) {
            Some(alias) => {
                add_renames(&mut plan.renames, &tags, alias);
                plan.entries.push(ImportEntry {
                    alias: alias.clone(),
                    import_path: record.import_path.clone(),
                    canonical_name: record.canonical_name.clone(),
                    existing: true,
                });
            }
            None => pending.push((record, tags)),
        }
    }

    let mut by_alias: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, (record, _)) in pending.iter().enumerate() {
        by_alias
            .entry(record.alias_candidate.as_str())
            .or_default()
            .push(index);
    }

    let mut assigned = vec![String::new(); pending.len()];
    for (alias, indexes) in &by_alias {
        if indexes.len() == 1 && !existing_aliases.contains(alias) {
            assigned[indexes[0]] = alias.to_string();
            continue;
        }
        let mut resolved = Vec::new();
        for &index in indexes {
            let record = pending[index].0;
            assigned[index] = record.qualified_alias();
            resolved.push((record.canonical_name.clone(), assigned[index].clone()));
        }
        plan.collisions.push(AliasCollision {
            alias: alias.to_string(),
            resolved,
        });
    }

    let mut taken: HashMap<&str, &str> = existing
        .iter()
        .map(|(path, alias)| (alias.as_str(), path.as_str()))
        .collect();
    for (index, (record, tags)) in pending.iter().enumerate() {
        let alias = assigned[index].as_str();
        if let Some(owner) = taken.insert(alias, record.canonical_name.as_str()) {
            return Err(AliasConflict {
                alias: alias.to_string(),
                names: vec![owner.to_string(), record.canonical_name.clone()],
            });
        }
        add_renames(&mut plan.renames, tags, alias);
        plan.entries.push(ImportEntry {
            alias: alias.to_string(),
            import_path: record.import_path.clone(),
            canonical_name: record.canonical_name.clone(),
            existing: false,
        });
    }

    plan.entries.sort_by(|a, b| a.import_path.cmp(&b.import_path));
    Ok(plan)
}

fn add_renames(renames: &mut BTreeMap<String, String>, tags: &[String], alias: &str) {
    for tag in tags {
        if tag != alias {
            renames.insert(tag.clone(), alias.to_string());
        }
    }
}

/// Rename tags and insert new import lines.
///
/// Renames happen in a single pass, so a renamed tag is never renamed again.
/// New imports go after the last existing import, or at the very top.
pub fn apply_plan(source: &str, plan: &ImportPlan) -> String {
    let mut text = if plan.renames.is_empty() {
        source.to_string()
    } else {
        COMPONENT_TAG
            .replace_all(source, |caps: &Captures| match plan.renames.get(&caps["tag"]) {
                Some(alias) => format!("<{}{}{}", &caps["slash"], alias, &caps["after"]),
                None => caps[0].to_string(),
            })
            .into_owned()
    };

    let lines: Vec<String> = plan
        .new_imports()
        .map(|e| import_declaration(&e.import_path, &e.alias))
        .collect();
    if lines.is_empty() {
        return text;
    }

    let block = lines.join("\n");
    match IMPORT_DECL.find_iter(&text).last().map(|m| m.end()) {
        Some(end) => insert_line_after(&mut text, end, &block),
        None => text.insert_str(0, &format!("{block}\n")),
    }
    text
}
