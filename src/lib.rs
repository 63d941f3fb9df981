//! LMNtal language server
//!
//! Hover documentation for library atoms and user-defined rule heads, and
//! plain word completion, served over the Language Server Protocol.

pub mod config;
pub mod library;
pub mod logging;
pub mod lsp;
