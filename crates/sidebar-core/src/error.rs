//! Error type shared by every synthesis stage.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SidebarError {
    /// A directory entry under the docs root could not be read.
    #[error("Failed to scan {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The persisted sidebar file exists but is not valid JSON.
    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize sidebar: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SidebarError>;
