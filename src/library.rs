//! Static library index
//!
//! Immutable name -> documentation mapping for LMNtal built-in atoms and
//! library functions. The bundled data file is compiled into the binary and
//! parsed once at startup; a replacement file can be supplied at launch.
//! Nothing mutates the index after construction.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Library data shipped with the server.
const BUNDLED_LIBRARY: &str = include_str!("../data/lmntal-library.json");

/// Errors raised while loading library data. Both are load-time defects:
/// once an index exists, lookups cannot fail.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to read library file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed library data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Documentation for a single library atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub name: String,
    /// Single-line code form, rendered as an `lmntal` code block on hover.
    pub signature: String,
    pub description: String,
}

/// On-disk shape of an entry; the name is the enclosing object key.
#[derive(Debug, Deserialize)]
struct RawEntry {
    signature: String,
    description: String,
}

#[derive(Debug, Clone, Default)]
pub struct LibraryIndex {
    entries: HashMap<String, LibraryEntry>,
}

impl LibraryIndex {
    /// Parses the library bundled into the binary.
    pub fn bundled() -> Result<Self, LibraryError> {
        Self::from_json_str(BUNDLED_LIBRARY)
    }

    /// Parses a JSON object mapping names to `{signature, description}`.
    pub fn from_json_str(json: &str) -> Result<Self, LibraryError> {
        let raw: HashMap<String, RawEntry> = serde_json::from_str(json)?;
        let entries = raw
            .into_iter()
            .map(|(name, entry)| {
                let entry = LibraryEntry {
                    name: name.clone(),
                    signature: entry.signature,
                    description: entry.description,
                };
                (name, entry)
            })
            .collect::<HashMap<_, _>>();
        debug!("Loaded {} library entries", entries.len());
        Ok(Self { entries })
    }

    pub fn from_path(path: &Path) -> Result<Self, LibraryError> {
        let json = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Loads from `path` when given, otherwise falls back to the bundled data.
    pub fn load(path: Option<&Path>) -> Result<Self, LibraryError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&LibraryEntry> {
        self.entries.get(name)
    }

    /// Entry names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
