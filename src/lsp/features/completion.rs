//! Document word completion
//!
//! Candidates are the distinct identifier tokens of the current document,
//! in order of first occurrence. The cursor position does not filter the
//! list; clients narrow it by the typed prefix themselves.
//!
//! Tokens match `\b[A-Za-z_][A-Za-z0-9_]*`: uppercase link names and
//! underscores are offered, numeric literals are not. A token must start at
//! a word boundary, so `1abc` yields nothing rather than `abc`.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*").expect("token pattern is valid"));

/// Distinct tokens of `text` in first-occurrence order.
pub fn candidates(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

/// Wraps candidates as bare text completion items.
pub fn completion_items(text: &str) -> Vec<CompletionItem> {
    candidates(text)
        .into_iter()
        .map(|label| CompletionItem {
            label,
            kind: Some(CompletionItemKind::TEXT),
            ..Default::default()
        })
        .collect()
}
