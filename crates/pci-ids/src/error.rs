use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdsError>;

/// Errors from loading a `pci.ids` database.
///
/// Parsing itself never fails: malformed lines are skipped, so only I/O and locating the
/// file can go wrong.
#[derive(Debug, Error)]
pub enum IdsError {
    #[error("failed to read pci.ids{}: {source}", display_path(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    #[error("no pci.ids database found (searched {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },
}

impl IdsError {
    pub(crate) fn io(path: Option<PathBuf>, source: io::Error) -> Self {
        Self::Io { path, source }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" from {}", path.display()),
        None => String::new(),
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_owned();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
