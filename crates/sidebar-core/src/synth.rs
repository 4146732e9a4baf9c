//! One synthesis run: scan, build, merge into the persisted sidebar, save.

use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::config::SidebarConfig;
use crate::error::Result;
use crate::filter::{collect_markdown_paths, relative_path};
use crate::merge::merge_into;
use crate::store::SidebarStore;
use crate::tree::{build_tree, SidebarTree};

/// Runs sidebar synthesis for a fixed configuration.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    config: SidebarConfig,
    store: SidebarStore,
}

impl Synthesizer {
    pub fn new(config: SidebarConfig) -> Self {
        let store = SidebarStore::new(config.sidebar_file.clone());
        Self { config, store }
    }

    pub fn config(&self) -> &SidebarConfig {
        &self.config
    }

    pub fn store(&self) -> &SidebarStore {
        &self.store
    }

    /// Build a fresh tree from the docs directory without touching the
    /// persisted file.
    pub fn generate(&self) -> Result<SidebarTree> {
        let docs_dir = &self.config.docs_dir;
        let paths =
            collect_markdown_paths(docs_dir, &self.config.include_dirs, &self.config.ignore_files)?;

        let relative: Vec<String> = paths
            .iter()
            .filter_map(|path| relative_path(docs_dir, path))
            .collect();

        Ok(build_tree(&relative, self.config.section_collapsed()))
    }

    /// Load, regenerate, merge and persist. Errors are returned to the caller.
    pub fn try_synthesize(&self) -> Result<Value> {
        let mut document = self.store.load()?;
        let tree = self.generate()?;
        debug!("Generated {} section(s)", tree.len());

        merge_into(&mut document, &tree.to_value()?, self.config.merge_strategy);

        self.store.save(&document)?;
        info!("Updated sidebar at {}", self.store.path().display());
        Ok(document)
    }

    /// Like [`Synthesizer::try_synthesize`], but failures are logged and
    /// produce an empty sidebar.
    pub fn synthesize(&self) -> Value {
        match self.try_synthesize() {
            Ok(document) => document,
            Err(e) => {
                error!("Error while updating sidebar: {}", e);
                Value::Object(Map::new())
            }
        }
    }
}
