//! Persistence for the merged sidebar.
//!
//! The sidebar lives in a single pretty-printed JSON file (by default
//! `docs/.vitepress/sidebar.json`). Its content is kept as a raw JSON value
//! so hand-written entries of any shape survive a load/save cycle.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, SidebarError};

/// Storage for the persisted sidebar document.
#[derive(Debug, Clone)]
pub struct SidebarStore {
    /// Path to the sidebar file.
    path: PathBuf,
}

impl SidebarStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the sidebar document, or an empty object if the file is absent.
    pub fn load(&self) -> Result<Value> {
        if !self.path.exists() {
            debug!("No sidebar file at {}, starting empty", self.path.display());
            return Ok(Value::Object(Map::new()));
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| SidebarError::Io {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| SidebarError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the sidebar file with `document`, indented by two spaces.
    ///
    /// The parent directory must already exist.
    pub fn save(&self, document: &Value) -> Result<()> {
        let contents = serde_json::to_string_pretty(document)?;

        fs::write(&self.path, contents).map_err(|source| SidebarError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!("Wrote sidebar to {}", self.path.display());
        Ok(())
    }
}
