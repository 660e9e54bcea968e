//! Slot definitions and slot usage.
//!
//! Definitions: `{{ content("name") }}` becomes `{% slot name %}{% endslot %}`
//! and a bare `{{ content() }}` becomes `{{ content }}`.
//!
//! Usage: an if-chain that only tests `_slot == "name"` becomes a sequence of
//! `{% fill name %}...{% endfill %}` blocks, with the trailing else branch
//! kept as default content.

use std::sync::LazyLock;

use regex::Regex;

use super::{Finding, indent_before};

/// Variable the old runtime used to pick a slot branch.
pub const SLOT_DISCRIMINATOR: &str = "_slot";

static CONTENT_NAMED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*content\(\s*["'](\w+)["']\s*\)\s*\}\}"#).expect("valid regex")
});

static CONTENT_EMPTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*content\(\s*\)\s*\}\}").expect("valid regex"));

static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{%-?\s*(if|elif|else|endif|for|endfor)\b(.*?)-?%\}").expect("valid regex")
});

static SLOT_TEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"^\s*{SLOT_DISCRIMINATOR}\s*==\s*["'](\w+)["']\s*$"#))
        .expect("valid regex")
});

/// Rewrite slot definitions. Returns the new text and the number of rewrites.
pub fn migrate_definitions(source: &str) -> (String, usize) {
    let named = CONTENT_NAMED.find_iter(source).count();
    let empty = CONTENT_EMPTY.find_iter(source).count();
    let text = CONTENT_NAMED.replace_all(source, "{% slot $1 %}{% endslot %}");
    let text = CONTENT_EMPTY.replace_all(&text, "{{ content }}");
    (text.into_owned(), named + empty)
}

/// One branch of a slot conditional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotBranch {
    pub name: String,
    pub body: String,
}

/// A fully recognized `_slot` if-chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotConditional {
    pub start: usize,
    pub end: usize,
    pub branches: Vec<SlotBranch>,
    pub default_body: Option<String>,
}

impl SlotConditional {
    /// Render as fill blocks, one per line, keeping the original indentation.
    pub fn render(&self, indent: &str) -> String {
        let mut parts: Vec<String> = self
            .branches
            .iter()
            .map(|b| format!("{{% fill {} %}}{}{{% endfill %}}", b.name, b.body))
            .collect();
        if let Some(body) = self.default_body.as_deref().filter(|b| !b.trim().is_empty()) {
            parts.push(body.to_string());
        }
        parts.join(&format!("\n{indent}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    If,
    Elif,
    Else,
    Endif,
    For,
    Endfor,
}

#[derive(Debug)]
struct Tag<'a> {
    start: usize,
    end: usize,
    keyword: Keyword,
    rest: &'a str,
}

impl Tag<'_> {
    fn slot_name(&self) -> Option<String> {
        SLOT_TEST.captures(self.rest).map(|c| c[1].to_string())
    }
}

fn block_tags(source: &str) -> Vec<Tag<'_>> {
    BLOCK_TAG
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let keyword = match &caps[1] {
                "if" => Keyword::If,
                "elif" => Keyword::Elif,
                "else" => Keyword::Else,
                "for" => Keyword::For,
                "endfor" => Keyword::Endfor,
                _ => Keyword::Endif,
            };
            Some(Tag {
                start: whole.start(),
                end: whole.end(),
                keyword,
                rest: caps.get(2).map(|m| m.as_str()).unwrap_or(""),
            })
        })
        .collect()
}

enum Scan {
    /// Every branch tests the slot variable.
    Slot(SlotConditional, usize),
    /// At least one elif tests something else; index of the closing tag.
    Mixed(usize),
    /// No matching endif.
    Unterminated,
}

/// Walk from the opening tag at `tags[open]` to its matching endif.
///
/// Inner `if` and `for` blocks sit on a stack, so only an `elif` or `else`
/// directly inside the chain starts a branch. A for-loop's `else` never does.
fn scan(source: &str, tags: &[Tag<'_>], open: usize, first: String) -> Scan {
    let mut open_blocks = vec![Keyword::If];
    let mut branches = Vec::new();
    let mut current = Some(first);
    let mut body_start = tags[open].end;
    let mut default_start = None;
    let mut mixed = false;

    for (index, tag) in tags.iter().enumerate().skip(open + 1) {
        match tag.keyword {
            Keyword::If | Keyword::For => open_blocks.push(tag.keyword),
            Keyword::Elif | Keyword::Else if open_blocks.len() > 1 => {}
            Keyword::Endfor => {
                if open_blocks.len() > 1 && open_blocks.last() == Some(&Keyword::For) {
                    open_blocks.pop();
                }
            }
            Keyword::Elif => {
                close_branch(source, &mut branches, current.take(), body_start, tag.start);
                match tag.slot_name() {
                    Some(name) => current = Some(name),
                    None => mixed = true,
                }
                body_start = tag.end;
            }
            Keyword::Else => {
                close_branch(source, &mut branches, current.take(), body_start, tag.start);
                default_start = Some(tag.end);
                body_start = tag.end;
            }
            Keyword::Endif => {
                open_blocks.pop();
                if !open_blocks.is_empty() {
                    continue;
                }
                if mixed {
                    return Scan::Mixed(index);
                }
                close_branch(source, &mut branches, current.take(), body_start, tag.start);
                let conditional = SlotConditional {
                    start: tags[open].start,
                    end: tag.end,
                    branches,
                    default_body: default_start.map(|s| source[s..tag.start].to_string()),
                };
                return Scan::Slot(conditional, index);
            }
        }
    }
    Scan::Unterminated
}

fn close_branch(
    source: &str,
    branches: &mut Vec<SlotBranch>,
    name: Option<String>,
    start: usize,
    end: usize,
) {
    if let Some(name) = name {
        branches.push(SlotBranch {
            name,
            body: source[start..end].to_string(),
        });
    }
}

/// Locate every slot conditional that can be rewritten.
///
/// Chains mixing slot tests with other conditions are reported and skipped
/// along with everything nested inside them.
pub fn find_conditionals(source: &str) -> (Vec<SlotConditional>, Vec<Finding>) {
    let tags = block_tags(source);
    let mut found = Vec::new();
    let mut findings = Vec::new();
    let mut index = 0;

    while index < tags.len() {
        let tag = &tags[index];
        let first = (tag.keyword == Keyword::If).then(|| tag.slot_name()).flatten();
        let Some(first) = first else {
            index += 1;
            continue;
        };

        match scan(source, &tags, index, first) {
            Scan::Slot(conditional, endif) => {
                found.push(conditional);
                index = endif + 1;
            }
            Scan::Mixed(endif) => {
                findings.push(Finding::new(
                    tag.start,
                    format!(
                        "conditional mixes '{SLOT_DISCRIMINATOR}' tests with other conditions, left unchanged"
                    ),
                ));
                index = endif + 1;
            }
            Scan::Unterminated => {
                findings.push(Finding::new(
                    tag.start,
                    format!("'{SLOT_DISCRIMINATOR}' conditional has no matching endif, left unchanged"),
                ));
                index += 1;
            }
        }
    }

    (found, findings)
}

/// Replace the given conditionals, found in `source`, with fill blocks.
pub fn rewrite(source: &str, conditionals: &[SlotConditional]) -> String {
    let mut text = source.to_string();
    for conditional in conditionals.iter().rev() {
        let indent = indent_before(source, conditional.start);
        let replacement = conditional.render(indent);
        text.replace_range(conditional.start..conditional.end, &replacement);
    }
    text
}

/// Rewrite every slot conditional into fill blocks.
///
/// Returns the new text, the number of conditionals rewritten and any
/// findings for chains that were left alone.
pub fn migrate_usage(source: &str) -> (String, usize, Vec<Finding>) {
    let (conditionals, findings) = find_conditionals(source);
    (rewrite(source, &conditionals), conditionals.len(), findings)
}
