//! Integration points for the docs site's build.
//!
//! - [`SidebarPlugin::resolve_config`] runs once while the site configuration
//!   is resolved and writes the synthesized sidebar into it.
//! - [`SidebarPlugin::configure_server`] runs when the dev server starts and
//!   hands back a [`DevServer`] that owns the file watcher. Dropping the
//!   `DevServer` stops watching.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use sidebar_core::{SidebarConfig, Synthesizer};
use std::future::Future;
use tracing::info;

use crate::watcher::{SidebarWatcher, WatchEvent, WatchEventKind};

pub const PLUGIN_NAME: &str = "sidebar-generator";

/// Something that can receive the synthesized sidebar.
pub trait SidebarHost {
    fn set_sidebar(&mut self, sidebar: Value);
}

/// A JSON site configuration receives the sidebar at `themeConfig.sidebar`.
///
/// Missing objects along the way are created; a non-object in the way is replaced.
impl SidebarHost for Value {
    fn set_sidebar(&mut self, sidebar: Value) {
        let root = ensure_object(self);
        let theme = ensure_object(
            root.entry("themeConfig")
                .or_insert_with(|| Value::Object(Map::new())),
        );
        theme.insert("sidebar".to_string(), sidebar);
    }
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            *other = Value::Object(Map::new());
            ensure_object(other)
        }
    }
}

pub struct SidebarPlugin {
    synthesizer: Synthesizer,
}

impl SidebarPlugin {
    pub fn new(config: SidebarConfig) -> Self {
        Self {
            synthesizer: Synthesizer::new(config),
        }
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn synthesizer(&self) -> &Synthesizer {
        &self.synthesizer
    }

    /// Synthesize the sidebar and hand it to `host`. A failed run hands over
    /// an empty sidebar.
    pub fn resolve_config<H: SidebarHost + ?Sized>(&self, host: &mut H) {
        host.set_sidebar(self.synthesizer.synthesize());
    }

    /// Start watching the docs directory for the lifetime of the returned server.
    /// A docs directory that does not exist yet is created.
    pub fn configure_server(&self) -> Result<DevServer> {
        let docs_dir = self.synthesizer.config().docs_dir.clone();
        let watcher = SidebarWatcher::new(docs_dir.clone())
            .with_context(|| format!("Failed to watch {}", docs_dir.display()))?;
        info!("Started file watcher for {}", watcher.docs_dir().display());

        Ok(DevServer {
            synthesizer: self.synthesizer.clone(),
            watcher,
        })
    }
}

/// Keeps the persisted sidebar current while the dev server runs.
pub struct DevServer {
    synthesizer: Synthesizer,
    watcher: SidebarWatcher,
}

impl DevServer {
    /// Resynthesize after a Markdown file was added or removed. The result is
    /// only persisted, not returned.
    pub fn handle_event(&self, event: &WatchEvent) {
        match event.kind {
            WatchEventKind::Added => info!("Markdown file added: {}", event.path),
            WatchEventKind::Removed => info!("Markdown file removed: {}", event.path),
        }
        self.synthesizer.synthesize();
    }

    /// Wait for the next add/unlink event.
    pub async fn next_event(&mut self) -> Option<WatchEvent> {
        self.watcher.recv().await
    }

    /// Handle events one at a time until `shutdown` completes.
    pub async fn run_until<F: Future>(mut self, shutdown: F) {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                Some(event) = self.watcher.recv() => {
                    self.handle_event(&event);
                }
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }
    }
}
