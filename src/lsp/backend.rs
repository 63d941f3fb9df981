use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use tower_lsp::Client;
use tower_lsp::lsp_types::Url;
use tracing::{debug, info};

use crate::library::LibraryIndex;
use crate::lsp::models::LspDocument;
use crate::lsp::symbol_index::SymbolIndexer;

mod handlers;
mod state;

pub use state::LmntalBackend;

impl LmntalBackend {
    /// Creates the backend for one session.
    ///
    /// The library is shared read-only; the symbol indexer is owned by this
    /// session and starts empty.
    pub fn new(client: Client, library: Arc<LibraryIndex>, client_process_id: Option<u32>) -> Self {
        info!("Creating LMNtal backend with {} library entries", library.len());
        Self {
            client,
            documents_by_uri: Arc::new(DashMap::new()),
            serial_document_id: Arc::new(AtomicU32::new(0)),
            library,
            symbols: Arc::new(SymbolIndexer::new()),
            client_process_id,
        }
    }

    pub(super) fn next_document_id(&self) -> u32 {
        self.serial_document_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn document(&self, uri: &Url) -> Option<Arc<LspDocument>> {
        self.documents_by_uri.get(uri).map(|entry| entry.value().clone())
    }

    pub fn library(&self) -> &LibraryIndex {
        &self.library
    }

    pub fn symbols(&self) -> &SymbolIndexer {
        &self.symbols
    }

    /// Rebuilds the symbol table from the document's current text.
    ///
    /// Documents that are not LMNtal are never scanned; the table keeps
    /// describing the last LMNtal document.
    async fn index_document(&self, document: &LspDocument) {
        let state = document.state.read().await;
        if !crate::lsp::document::is_lmntal(&state.uri, &state.language_id) {
            debug!("Skipping non-LMNtal document {}", state.uri);
            return;
        }
        self.symbols.scan(&state.text, &state.uri);
    }

    /// Treats a request on a document other than the scanned one as an
    /// editor focus change and rescans.
    async fn ensure_active(&self, uri: &Url, document: &LspDocument) {
        if self.symbols.scanned_document().as_ref() != Some(uri) {
            debug!("Active document changed to {}", uri);
            self.index_document(document).await;
        }
    }
}
