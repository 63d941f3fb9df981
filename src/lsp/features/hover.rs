//! Hover resolution
//!
//! ```text
//! cursor position
//!       ↓
//! word_at()            → None on whitespace/punctuation
//!       ↓
//! LibraryIndex         → signature block + description
//!       ↓ (miss)
//! SymbolIndexer        → "user-defined atom" + file + 1-based line
//!       ↓ (miss)
//! None
//! ```
//!
//! Library entries always shadow user-defined atoms of the same name.

use ropey::Rope;
use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position};
use tracing::debug;

use crate::library::{LibraryEntry, LibraryIndex};
use crate::lsp::features::word::word_at;
use crate::lsp::models::LMNTAL_LANGUAGE_ID;
use crate::lsp::symbol_index::{SymbolEntry, SymbolIndexer};

/// Markdown for a library atom: signature code block, rule, description.
pub fn library_markdown(entry: &LibraryEntry) -> String {
    format!(
        "```{}\n{}\n```\n\n---\n\n{}",
        LMNTAL_LANGUAGE_ID, entry.signature, entry.description
    )
}

/// Markdown for an atom defined by a rule head in the scanned document.
pub fn symbol_markdown(entry: &SymbolEntry) -> String {
    let file = entry
        .document
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| entry.document.to_string());
    format!(
        "**{}** is a user-defined atom.\n\nDefined in `{}` at line {}.",
        entry.name,
        file,
        entry.definition_line + 1
    )
}

/// Resolves hover content for the word at `position` in `text`.
pub fn hover(
    library: &LibraryIndex,
    symbols: &SymbolIndexer,
    text: &Rope,
    position: Position,
) -> Option<Hover> {
    let word = word_at(text, position)?;

    let value = if let Some(entry) = library.lookup(&word.text) {
        debug!("Hover '{}' resolved from library", word.text);
        library_markdown(entry)
    } else if let Some(entry) = symbols.lookup(&word.text) {
        debug!("Hover '{}' resolved to rule head at line {}", word.text, entry.definition_line);
        symbol_markdown(&entry)
    } else {
        debug!("No hover information for '{}'", word.text);
        return None;
    };

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: Some(word.range),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{QuickCheck, TestResult};
    use tower_lsp::lsp_types::{Range, Url};

    fn library() -> LibraryIndex {
        LibraryIndex::from_json_str(
            r#"{"eq": {"signature": "eq(X,Y)", "description": "Checks equality."}}"#,
        )
        .unwrap()
    }

    fn markdown(hover: &Hover) -> &str {
        match &hover.contents {
            HoverContents::Markup(markup) => &markup.value,
            other => panic!("expected markup hover, got {:?}", other),
        }
    }

    #[test]
    fn test_library_hover() {
        let text = Rope::from_str("eq");
        let symbols = SymbolIndexer::new();
        let hover = hover(&library(), &symbols, &text, Position::new(0, 1)).unwrap();

        assert_eq!(
            markdown(&hover),
            "```lmntal\neq(X,Y)\n```\n\n---\n\nChecks equality."
        );
        assert_eq!(hover.range, Some(Range::new(Position::new(0, 0), Position::new(0, 2))));
    }

    #[test]
    fn test_library_shadows_user_definition() {
        let uri = Url::parse("file:///shadow.lmn").unwrap();
        let source = "eq(A, B) :- A = B.\nstart :- eq(1, 1).";
        let text = Rope::from_str(source);
        let symbols = SymbolIndexer::new();
        symbols.scan(&text, &uri);
        assert!(symbols.lookup("eq").is_some());

        let hover = hover(&library(), &symbols, &text, Position::new(1, 10)).unwrap();
        assert!(markdown(&hover).contains("Checks equality."));
        assert!(!markdown(&hover).contains("user-defined"));
    }

    #[test]
    fn test_user_defined_hover() {
        let uri = Url::parse("file:///work/rules.lmn").unwrap();
        let source = "init.\n\nloop(N) :- N > 0 | loop(N - 1).";
        let text = Rope::from_str(source);
        let symbols = SymbolIndexer::new();
        symbols.scan(&text, &uri);

        let hover = hover(&library(), &symbols, &text, Position::new(2, 21)).unwrap();
        assert_eq!(
            markdown(&hover),
            "**loop** is a user-defined atom.\n\nDefined in `rules.lmn` at line 3."
        );
        assert_eq!(hover.range, Some(Range::new(Position::new(2, 19), Position::new(2, 23))));
    }

    #[test]
    fn test_unknown_word() {
        let text = Rope::from_str("mystery");
        assert!(hover(&library(), &SymbolIndexer::new(), &text, Position::new(0, 3)).is_none());
    }

    #[test]
    fn test_symbol_markdown_without_file_name() {
        let entry = SymbolEntry {
            name: "f".to_string(),
            definition_line: 0,
            document: Url::parse("untitled:Untitled-1").unwrap(),
        };
        assert_eq!(
            symbol_markdown(&entry),
            "**f** is a user-defined atom.\n\nDefined in `untitled:Untitled-1` at line 1."
        );
    }

    #[test]
    fn test_no_hover_between_known_names() {
        const ATOMS: [&str; 4] = ["eq", "loop", "N", "io.print"];
        const GAPS: [&str; 7] = [" ", "(", ")", ", ", " :- ", " | ", "\t"];

        fn is_word_char(c: char) -> bool {
            c.is_ascii_alphanumeric() || c == '_' || c == '.'
        }

        fn prop(pieces: Vec<(u8, u8)>) -> TestResult {
            let mut source = String::from("loop(N) :- eq(N, 0).\n");
            for (atom, gap) in &pieces {
                source.push_str(ATOMS[*atom as usize % ATOMS.len()]);
                source.push_str(GAPS[*gap as usize % GAPS.len()]);
            }
            let library = library();
            let text = Rope::from_str(&source);
            let symbols = SymbolIndexer::new();
            symbols.scan(&text, &Url::parse("file:///prop.lmn").unwrap());

            // Both kinds of name resolve when the cursor is on them.
            if hover(&library, &symbols, &text, Position::new(0, 1)).is_none()
                || hover(&library, &symbols, &text, Position::new(0, 12)).is_none()
            {
                return TestResult::failed();
            }

            for (line, content) in source.lines().enumerate() {
                let chars: Vec<char> = content.chars().collect();
                for (column, c) in chars.iter().enumerate() {
                    let after_word = column > 0 && is_word_char(chars[column - 1]);
                    if is_word_char(*c) || after_word {
                        continue;
                    }
                    let position = Position::new(line as u32, column as u32);
                    if hover(&library, &symbols, &text, position).is_some() {
                        return TestResult::failed();
                    }
                }
            }
            TestResult::passed()
        }

        QuickCheck::new()
            .tests(300)
            .quickcheck(prop as fn(Vec<(u8, u8)>) -> TestResult);
    }
}
