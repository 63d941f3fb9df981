//! Word extraction at a cursor position
//!
//! A word is a maximal run of `[A-Za-z0-9_.]` on a single line. Dots are part
//! of words so that module-qualified atoms such as `io.print` resolve as one
//! name.

use once_cell::sync::Lazy;
use regex::Regex;
use ropey::Rope;
use tower_lsp::lsp_types::{Position, Range};

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_.]+").expect("word pattern is valid"));

/// The word under the cursor and its range in LSP coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub range: Range,
}

fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

/// Byte index in `line` of the given UTF-16 column, clamped to the line end.
fn utf16_column_to_byte(line: &str, column: u32) -> usize {
    let mut units = 0u32;
    for (byte, ch) in line.char_indices() {
        if units >= column {
            return byte;
        }
        units += ch.len_utf16() as u32;
    }
    line.len()
}

/// Finds the word containing `position`.
///
/// A cursor resting directly after the last character of a word is inside
/// it, matching how editors report hovers at word boundaries. Returns `None`
/// on whitespace, punctuation, or positions outside the text.
pub fn word_at(text: &Rope, position: Position) -> Option<Word> {
    let line_idx = position.line as usize;
    if line_idx >= text.len_lines() {
        return None;
    }
    let line = text.line(line_idx).to_string();
    let line = line.trim_end_matches(['\n', '\r']);
    let cursor = utf16_column_to_byte(line, position.character);

    let found = WORD_PATTERN
        .find_iter(line)
        .find(|m| m.start() <= cursor && cursor <= m.end())?;

    let start = utf16_len(&line[..found.start()]);
    let end = start + utf16_len(found.as_str());
    Some(Word {
        text: found.as_str().to_string(),
        range: Range {
            start: Position::new(position.line, start),
            end: Position::new(position.line, end),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, line: u32, character: u32) -> Option<String> {
        word_at(&Rope::from_str(text), Position::new(line, character)).map(|w| w.text)
    }

    #[test]
    fn test_word_inside_and_at_edges() {
        let text = "  append(X, Y) :- io.print(X).";
        assert_eq!(word(text, 0, 2).as_deref(), Some("append"));
        assert_eq!(word(text, 0, 5).as_deref(), Some("append"));
        assert_eq!(word(text, 0, 8).as_deref(), Some("append"), "cursor right after word");
        assert_eq!(word(text, 0, 20).as_deref(), Some("io.print"));
        assert_eq!(word(text, 0, 28).as_deref(), Some("X"));
        assert_eq!(word("a.b. c", 0, 3).as_deref(), Some("a.b."), "dot is a word character");
    }

    #[test]
    fn test_no_word_on_whitespace_or_punctuation() {
        assert_eq!(word("a  :-  b", 0, 3), None);
        assert_eq!(word("a  :-  b", 0, 4), None);
        assert_eq!(word("", 0, 0), None);
        assert_eq!(word("abc", 3, 0), None, "line out of range");
    }

    #[test]
    fn test_word_range_is_reported() {
        let text = Rope::from_str("first\n  second :- .");
        let word = word_at(&text, Position::new(1, 4)).unwrap();
        assert_eq!(word.text, "second");
        assert_eq!(word.range, Range::new(Position::new(1, 2), Position::new(1, 8)));
    }

    #[test]
    fn test_word_after_non_ascii_prefix() {
        // 'ü' occupies one UTF-16 unit; the range must be in UTF-16 columns.
        let text = Rope::from_str("ü foo");
        let word = word_at(&text, Position::new(0, 3)).unwrap();
        assert_eq!(word.text, "foo");
        assert_eq!(word.range, Range::new(Position::new(0, 2), Position::new(0, 5)));
    }

    #[test]
    fn test_form_feed_stays_on_its_line() {
        let text = Rope::from_str("a.\x0Cb.\nfoo :- x.\nfoo\n");
        let word = word_at(&text, Position::new(2, 1)).unwrap();
        assert_eq!(word.text, "foo");
        assert_eq!(word.range, Range::new(Position::new(2, 0), Position::new(2, 3)));
        assert_eq!(word_at(&text, Position::new(0, 3)).map(|w| w.text).as_deref(), Some("b."));
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = Rope::from_str("foo\r\nbar");
        assert_eq!(word_at(&text, Position::new(0, 3)).map(|w| w.text).as_deref(), Some("foo"));
        assert_eq!(word_at(&text, Position::new(1, 0)).map(|w| w.text).as_deref(), Some("bar"));
    }
}
