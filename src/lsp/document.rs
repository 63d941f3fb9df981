use ropey::{Rope, RopeSlice};
use thiserror::Error;

use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};

pub use crate::lsp::models::{LMNTAL_EXTENSION, LMNTAL_LANGUAGE_ID, LspDocument, LspDocumentState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("version {received} not newer than {current}")]
    StaleVersion { received: i32, current: i32 },
}

/// Number of chars on a line, excluding its line terminator.
fn line_content_len(line: RopeSlice<'_>) -> usize {
    let len = line.len_chars();
    let mut trailing = 0;
    while trailing < len {
        match line.char(len - trailing - 1) {
            '\n' | '\r' => trailing += 1,
            _ => break,
        }
    }
    len - trailing
}

/// Converts an LSP position (UTF-16 column) to a char index in the rope.
///
/// Lines past the end clamp to the end of the text and columns past the end
/// of a line clamp to the end of that line's content.
pub fn position_to_char_idx(text: &Rope, position: &Position) -> usize {
    let line = position.line as usize;
    if line >= text.len_lines() {
        return text.len_chars();
    }
    let line_start = text.line_to_char(line);
    let line_end = line_start + line_content_len(text.line(line));
    let target = text.char_to_utf16_cu(line_start) + position.character as usize;
    let char_idx = text.utf16_cu_to_char(target.min(text.len_utf16_cu()));
    char_idx.clamp(line_start, line_end)
}

/// 0-based line containing the given byte offset.
pub fn byte_offset_to_line(text: &Rope, byte: usize) -> usize {
    text.byte_to_line(byte.min(text.len_bytes()))
}

/// Whether a document should be indexed as LMNtal source.
pub fn is_lmntal(uri: &Url, language_id: &str) -> bool {
    language_id == LMNTAL_LANGUAGE_ID
        || uri
            .path()
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext == LMNTAL_EXTENSION)
}

impl LspDocumentState {
    /// Applies a list of content changes, returning the updated text if the
    /// version is newer than the current one.
    pub fn apply(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Result<String, DocumentError> {
        if version <= self.version {
            return Err(DocumentError::StaleVersion {
                received: version,
                current: self.version,
            });
        }
        for change in changes {
            if let Some(range) = change.range {
                let start = position_to_char_idx(&self.text, &range.start);
                let end = position_to_char_idx(&self.text, &range.end).max(start);
                self.text.remove(start..end);
                self.text.insert(start, &change.text);
            } else {
                self.text = Rope::from_str(&change.text);
            }
        }
        self.version = version;
        Ok(self.text.to_string())
    }
}

impl LspDocument {
    pub fn new(id: u32, uri: Url, language_id: String, text: &str, version: i32) -> Self {
        Self {
            id,
            state: tokio::sync::RwLock::new(LspDocumentState {
                uri,
                language_id,
                text: Rope::from_str(text),
                version,
            }),
        }
    }

    /// Returns the current text of the document as a string.
    pub async fn text(&self) -> String {
        self.state.read().await.text.to_string()
    }

    /// Returns a cheap clone of the document's rope.
    pub async fn rope(&self) -> Rope {
        self.state.read().await.text.clone()
    }

    /// Returns the current version of the document.
    pub async fn version(&self) -> i32 {
        self.state.read().await.version
    }

    pub async fn is_lmntal(&self) -> bool {
        let state = self.state.read().await;
        is_lmntal(&state.uri, &state.language_id)
    }

    /// Applies changes to the document, returning the new text.
    pub async fn apply(
        &self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Result<String, DocumentError> {
        let mut state = self.state.write().await;
        state.apply(changes, version)
    }
}
