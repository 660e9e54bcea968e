//! Protection of `{% raw %}` blocks.
//!
//! Raw blocks are swapped for opaque placeholder tokens before any rewrite
//! runs and swapped back at the end, so their contents pass through
//! byte-for-byte.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use uuid::Uuid;

use super::Finding;

static RAW_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%-?\s*raw\s*-?%\}").expect("valid regex"));

static RAW_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%-?\s*endraw\s*-?%\}").expect("valid regex"));

/// Placeholder tokens and the raw blocks they stand for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBlocks {
    blocks: IndexMap<String, String>,
}

/// Text with every raw block replaced by a placeholder.
#[derive(Debug, Clone)]
pub struct Protected {
    pub text: String,
    pub blocks: RawBlocks,
    pub findings: Vec<Finding>,
}

impl RawBlocks {
    /// Replace every raw block in `source` with a unique token.
    ///
    /// A block with no closing tag runs to the end of the text and is
    /// reported as a finding.
    pub fn protect(source: &str) -> Protected {
        let mut blocks = RawBlocks::default();
        let mut findings = Vec::new();
        let mut text = String::with_capacity(source.len());
        let mut cursor = 0;

        while let Some(open) = RAW_OPEN.find_at(source, cursor) {
            let end = match RAW_CLOSE.find_at(source, open.end()) {
                Some(close) => close.end(),
                None => {
                    findings.push(Finding::new(
                        open.start(),
                        "unterminated {% raw %} block, protected up to end of file",
                    ));
                    source.len()
                }
            };

            let token = blocks.fresh_token(source);
            text.push_str(&source[cursor..open.start()]);
            text.push_str(&token);
            blocks.blocks.insert(token, source[open.start()..end].to_string());
            cursor = end;
        }
        text.push_str(&source[cursor..]);

        Protected {
            text,
            blocks,
            findings,
        }
    }

    /// Put the original raw blocks back in place of their tokens.
    pub fn restore(&self, text: &str) -> String {
        let mut tokens: Vec<&String> = self.blocks.keys().collect();
        tokens.sort_by_key(|t| std::cmp::Reverse(t.len()));

        let mut restored = text.to_string();
        for token in tokens {
            if let Some(original) = self.blocks.get(token) {
                restored = restored.replace(token.as_str(), original);
            }
        }
        restored
    }

    /// Length of `text` once restored, up to `offset`.
    ///
    /// Used to map offsets in protected text back to the original.
    pub fn original_offset(&self, text: &str, offset: usize) -> usize {
        self.restore(&text[..offset.min(text.len())]).len()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn fresh_token(&self, source: &str) -> String {
        loop {
            let token = format!("__RAW_{}__", Uuid::new_v4().simple());
            if !source.contains(&token) && !self.blocks.contains_key(&token) {
                return token;
            }
        }
    }
}
