//! Rule-head symbol index for the active document
//!
//! Every scan rebuilds the table from the complete document text with a
//! single regex pass. There is no incremental update: the previous table is
//! replaced wholesale, so no entry from an earlier document or an earlier
//! version of the text survives a rescan.
//!
//! A rule head is recognised at the start of a line (after optional
//! indentation) as an atom name beginning with a lowercase letter or
//! underscore, optionally dotted, optionally followed by a parenthesised
//! argument list, and then the `:-` token. Lines end at `\n`, `\r\n` or a
//! lone `\r`, the same terminators the document rope uses.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use ropey::Rope;
use tower_lsp::lsp_types::Url;
use tracing::{debug, trace};

use crate::lsp::document::byte_offset_to_line;

// CRLF mode: `^` also anchors after a lone `\r`, never between `\r\n`.
static RULE_HEAD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mR)^[ \t]*([a-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)*)[ \t]*(?:\([^)]*\))?[ \t]*:-")
        .expect("rule head pattern is valid")
});

/// Location of a user-defined atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: String,
    /// 0-based line of the rule head.
    pub definition_line: u32,
    pub document: Url,
}

/// Rule heads found in one version of one document, keyed by atom name.
///
/// When a name is defined more than once the last definition in the text
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    document: Option<Url>,
    entries: HashMap<String, SymbolEntry>,
}

impl SymbolTable {
    /// Builds a table from the full text of `document`.
    pub fn scan(text: &Rope, document: &Url) -> Self {
        let mut entries = HashMap::new();
        let source = text.to_string();

        for captures in RULE_HEAD_PATTERN.captures_iter(&source) {
            let (Some(head), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let line = byte_offset_to_line(text, head.start()) as u32;

            trace!("Rule head '{}' at line {}", name.as_str(), line);
            entries.insert(
                name.as_str().to_string(),
                SymbolEntry {
                    name: name.as_str().to_string(),
                    definition_line: line,
                    document: document.clone(),
                },
            );
        }

        Self {
            document: Some(document.clone()),
            entries,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    /// Document this table was built from, if any scan has happened.
    pub fn document(&self) -> Option<&Url> {
        self.document.as_ref()
    }

    /// Atom names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Session-owned holder of the current symbol table.
///
/// Created with the language server session and shared by the change
/// handlers and the hover resolver. A rebuilt table is swapped in under the
/// write lock, so readers see either the old table or the new one.
#[derive(Debug, Default)]
pub struct SymbolIndexer {
    table: RwLock<SymbolTable>,
}

impl SymbolIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current table with one built from `text`. Returns the
    /// number of distinct atoms found.
    pub fn scan(&self, text: &Rope, document: &Url) -> usize {
        let table = SymbolTable::scan(text, document);
        let count = table.len();
        *self.table.write() = table;
        debug!("Indexed {} rule heads in {}", count, document);
        count
    }

    pub fn lookup(&self, name: &str) -> Option<SymbolEntry> {
        self.table.read().lookup(name).cloned()
    }

    pub fn scanned_document(&self) -> Option<Url> {
        self.table.read().document().cloned()
    }

    /// Copy of the current table.
    pub fn snapshot(&self) -> SymbolTable {
        self.table.read().clone()
    }

    pub fn clear(&self) {
        *self.table.write() = SymbolTable::default();
    }
}
