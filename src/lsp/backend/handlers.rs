//! LSP request and notification handlers

use std::sync::Arc;

use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc;
use tower_lsp::lsp_types::{
    CompletionOptions, CompletionParams, CompletionResponse, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, Hover, HoverParams,
    HoverProviderCapability, InitializeParams, InitializeResult, InitializedParams, MessageType,
    ServerCapabilities, ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind,
};
use tracing::{debug, info, warn};

use super::LmntalBackend;
use crate::lsp::features;
use crate::lsp::models::LspDocument;

#[tower_lsp::async_trait]
impl LanguageServer for LmntalBackend {
    async fn initialize(&self, params: InitializeParams) -> jsonrpc::Result<InitializeResult> {
        info!("Received initialize: process_id={:?}", params.process_id);
        if let (Some(cmdline_pid), Some(client_pid)) = (self.client_process_id, params.process_id) {
            if cmdline_pid != client_pid {
                warn!(
                    "Client PID mismatch: command line ({}) vs LSP ({})",
                    cmdline_pid, client_pid
                );
            }
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions::default()),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("Initialized with {} library entries", self.library.len());
        self.client
            .log_message(MessageType::INFO, "LMNtal language server initialized")
            .await;
    }

    /// Tears down the session's symbol table.
    async fn shutdown(&self) -> jsonrpc::Result<()> {
        info!("Received shutdown request");
        self.symbols.clear();
        self.documents_by_uri.clear();
        Ok(())
    }

    /// Opening a document makes it the active one and indexes it.
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let item = params.text_document;
        info!("Opening document: URI={}, version={}", item.uri, item.version);

        let document = Arc::new(LspDocument::new(
            self.next_document_id(),
            item.uri.clone(),
            item.language_id,
            &item.text,
            item.version,
        ));
        self.documents_by_uri.insert(item.uri, document.clone());
        self.index_document(&document).await;
    }

    /// Every change rescans the complete document.
    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        debug!("textDocument/didChange: URI={}, version={}", uri, version);

        let Some(document) = self.document(&uri) else {
            warn!("Failed to find document with URI={}", uri);
            return;
        };
        match document.apply(params.content_changes, version).await {
            Ok(_) => {
                debug!("Applied changes to {}, now at version {}", uri, document.version().await);
                self.index_document(&document).await;
            }
            Err(e) => warn!("Rejected changes to {}: {}", uri, e),
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        match self.documents_by_uri.remove(&uri) {
            Some((_, document)) => info!("Closed document: {}, id: {}", uri, document.id),
            None => warn!("Failed to find document with URI={}", uri),
        }
        if self.symbols.scanned_document().as_ref() == Some(&uri) {
            self.symbols.clear();
        }
    }

    async fn hover(&self, params: HoverParams) -> jsonrpc::Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        debug!("Hover request at {}:{:?}", uri, position);

        let Some(document) = self.document(&uri) else {
            debug!("Document not found: {}", uri);
            return Ok(None);
        };
        if !document.is_lmntal().await {
            return Ok(None);
        }
        self.ensure_active(&uri, &document).await;

        let text = document.rope().await;
        Ok(features::hover(&self.library, &self.symbols, &text, position))
    }

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> jsonrpc::Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        debug!("Completion request at {}:{:?}", uri, params.text_document_position.position);

        let Some(document) = self.document(&uri) else {
            debug!("Document not found: {}", uri);
            return Ok(None);
        };
        if !document.is_lmntal().await {
            return Ok(None);
        }

        let items = features::completion_items(&document.text().await);
        debug!("Offering {} completion candidates", items.len());
        Ok(Some(CompletionResponse::Array(items)))
    }
}
