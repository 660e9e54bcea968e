//! Text rewrites applied to a single template.
//!
//! Each submodule works on plain strings and reports anything it could not
//! rewrite as a [`Finding`]. The pipeline passes wrap these functions and
//! turn findings into diagnostics.

pub mod assets;
pub mod imports;
pub mod raw;
pub mod slots;

/// A non-fatal problem found while rewriting, located by byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub offset: usize,
    pub message: String,
}

impl Finding {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// 1-based line number of a byte offset.
pub fn line_at(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|b| **b == b'\n').count() + 1
}

/// Insert `line` on its own line directly after the line containing `offset`.
pub(crate) fn insert_line_after(text: &mut String, offset: usize, line: &str) {
    match text[offset..].find('\n') {
        Some(nl) => text.insert_str(offset + nl + 1, &format!("{line}\n")),
        None => {
            text.push('\n');
            text.push_str(line);
        }
    }
}

/// Leading whitespace of the line containing `offset`, if nothing else
/// precedes `offset` on that line.
pub(crate) fn indent_before(text: &str, offset: usize) -> &str {
    let line_start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let indent = &text[line_start..offset];
    if indent.chars().all(char::is_whitespace) {
        indent
    } else {
        ""
    }
}
