//! Server configuration
//!
//! Command-line arguments take precedence over environment variables.

use std::path::PathBuf;

use clap::Parser;

/// Environment variable naming a replacement library data file.
pub const LIBRARY_PATH_ENV: &str = "LMNTAL_LIBRARY_PATH";

/// Command line arguments for the LMNtal language server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "lmntal-language-server",
    version,
    about = "LMNtal hover and completion language server"
)]
pub struct ServerArgs {
    /// Log filter for stderr (overrides RUST_LOG), e.g. "debug" or "lmntal_language_server=trace"
    #[arg(long)]
    pub log_level: Option<String>,

    /// Disable ANSI colors in stderr output
    #[arg(long)]
    pub no_color: bool,

    /// Do not write a session log file to the user cache directory
    #[arg(long)]
    pub no_file_logging: bool,

    /// JSON library file to use instead of the bundled library
    #[arg(long, value_name = "PATH")]
    pub library: Option<PathBuf>,

    /// Process id of the editor that launched the server
    #[arg(long)]
    pub client_process_id: Option<u32>,
}

/// Settings the backend needs once logging is up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub library_path: Option<PathBuf>,
    pub client_process_id: Option<u32>,
}

impl ServerConfig {
    /// Resolves the configuration from parsed arguments and an environment
    /// lookup function.
    pub fn resolve<F>(args: &ServerArgs, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let library_path = args
            .library
            .clone()
            .or_else(|| env(LIBRARY_PATH_ENV).filter(|p| !p.is_empty()).map(PathBuf::from));
        Self {
            library_path,
            client_process_id: args.client_process_id,
        }
    }

    pub fn from_args(args: &ServerArgs) -> Self {
        Self::resolve(args, |key| std::env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServerArgs {
        let argv = std::iter::once("lmntal-language-server").chain(args.iter().copied());
        ServerArgs::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert!(args.log_level.is_none());
        assert!(!args.no_color);
        assert_eq!(ServerConfig::resolve(&args, |_| None), ServerConfig::default());
    }

    #[test]
    fn test_unknown_flags_are_rejected() {
        let args = ["lmntal-language-server", "--stdio"];
        assert!(ServerArgs::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_overrides_env() {
        let args = parse(&["--library", "/cli/lib.json", "--client-process-id", "42"]);
        let config = ServerConfig::resolve(&args, |_| Some("/env/lib.json".to_string()));
        assert_eq!(config.library_path, Some(PathBuf::from("/cli/lib.json")));
        assert_eq!(config.client_process_id, Some(42));
    }

    #[test]
    fn test_env_fallback() {
        let args = parse(&["--log-level", "debug", "--no-color"]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.no_color);

        let config = ServerConfig::resolve(&args, |key| {
            (key == LIBRARY_PATH_ENV).then(|| "/env/lib.json".to_string())
        });
        assert_eq!(config.library_path, Some(PathBuf::from("/env/lib.json")));

        let config = ServerConfig::resolve(&args, |_| Some(String::new()));
        assert_eq!(config.library_path, None, "empty variable is ignored");
    }
}
