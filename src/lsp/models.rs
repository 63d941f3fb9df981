use ropey::Rope;

use tower_lsp::lsp_types::Url;

/// Language identifier the server registers its features for.
pub const LMNTAL_LANGUAGE_ID: &str = "lmntal";

/// File extension used by LMNtal sources.
pub const LMNTAL_EXTENSION: &str = "lmn";

/// State for an open text document managed by the LSP server.
#[derive(Debug)]
pub struct LspDocumentState {
    pub uri: Url,
    pub language_id: String,
    pub text: Rope,
    pub version: i32,
}

/// LSP document with state for open files.
#[derive(Debug)]
pub struct LspDocument {
    pub id: u32,
    pub state: tokio::sync::RwLock<LspDocumentState>,
}
