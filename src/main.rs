use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::info;

use lmntal_language_server::config::{ServerArgs, ServerConfig};
use lmntal_language_server::library::LibraryIndex;
use lmntal_language_server::logging::init_logger;
use lmntal_language_server::lsp::backend::LmntalBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();
    let _guard = init_logger(args.no_color, args.log_level.as_deref(), !args.no_file_logging)
        .context("failed to initialize logging")?;

    let config = ServerConfig::from_args(&args);
    info!("Starting LMNtal language server: {:?}", config);

    let library = LibraryIndex::load(config.library_path.as_deref())
        .context("failed to load LMNtal library data")?;
    info!("Loaded {} library entries", library.len());
    let library = Arc::new(library);

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| {
        LmntalBackend::new(client, library.clone(), config.client_process_id)
    });
    Server::new(stdin, stdout, socket).serve(service).await;

    info!("LMNtal language server exited");
    Ok(())
}
