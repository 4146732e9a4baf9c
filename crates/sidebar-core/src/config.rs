//! Generator options.
//!
//! Field names serialize in camelCase so an options file can be shared with
//! the docs site's own configuration (`docsDir`, `includeDirs`, ...).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

pub const DEFAULT_DOCS_DIR: &str = "docs";
pub const DEFAULT_SIDEBAR_FILE: &str = "docs/.vitepress/sidebar.json";

/// How arrays are reconciled when a fresh tree is merged into the persisted one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MergeStrategy {
    /// Element `i` of the fresh array merges into element `i` of the persisted array.
    #[default]
    Positional,
    /// Elements are paired by their `text` field; unmatched fresh elements are appended.
    ByText,
}

/// Options controlling one synthesis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SidebarConfig {
    /// Root directory that is scanned for Markdown files
    pub docs_dir: PathBuf,
    /// Top-level directories under `docs_dir` that get a section. Empty means nothing is generated.
    pub include_dirs: BTreeSet<String>,
    /// File basenames (e.g. `index.md`) that never appear in the sidebar
    pub ignore_files: BTreeSet<String>,
    /// Whether sections carry a `collapsed` attribute at all
    pub collapsible: bool,
    /// Initial collapsed state of sections when `collapsible` is set
    pub collapsed: bool,
    /// Where the merged sidebar is persisted
    pub sidebar_file: PathBuf,
    pub merge_strategy: MergeStrategy,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            include_dirs: BTreeSet::new(),
            ignore_files: BTreeSet::new(),
            collapsible: true,
            collapsed: false,
            sidebar_file: PathBuf::from(DEFAULT_SIDEBAR_FILE),
            merge_strategy: MergeStrategy::Positional,
        }
    }
}

impl SidebarConfig {
    /// Collapsed value for a newly created section.
    pub fn section_collapsed(&self) -> Option<bool> {
        self.collapsible.then_some(self.collapsed)
    }
}
