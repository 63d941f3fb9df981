//! Backend state management
//!
//! This module defines the LmntalBackend struct, which holds all state for
//! one language server session: the open documents, the static library and
//! the rule-head index of the active document.

use std::sync::Arc;
use std::sync::atomic::AtomicU32;

use dashmap::DashMap;
use tower_lsp::Client;
use tower_lsp::lsp_types::Url;

use crate::library::LibraryIndex;
use crate::lsp::models::LspDocument;
use crate::lsp::symbol_index::SymbolIndexer;

/// The LMNtal language server backend, managing state and handling LSP requests.
#[derive(Clone)]
pub struct LmntalBackend {
    pub(super) client: Client,
    pub(super) documents_by_uri: Arc<DashMap<Url, Arc<LspDocument>>>,
    pub(super) serial_document_id: Arc<AtomicU32>,
    /// Built-in atom documentation, loaded once at startup
    pub(super) library: Arc<LibraryIndex>,
    /// Rule heads of the most recently scanned document
    pub(super) symbols: Arc<SymbolIndexer>,
    pub(super) client_process_id: Option<u32>,
}

impl std::fmt::Debug for LmntalBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LmntalBackend")
            .field("documents_count", &self.documents_by_uri.len())
            .field("library_entries", &self.library.len())
            .field("scanned_document", &self.symbols.scanned_document())
            .finish()
    }
}
