//! File watcher reporting Markdown files added to or removed from the docs directory.
//!
//! Uses notify-debouncer-mini for change detection. The debouncer only says
//! "something happened at this path", so add vs. unlink is decided against a
//! snapshot of the Markdown files known to exist. Content edits to a known
//! file produce no event since they cannot change the sidebar.

use anyhow::{anyhow, Context, Result};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};
use sidebar_core::filter::{markdown_files, relative_path, MARKDOWN_EXTENSION};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// Debounce period for filesystem notifications.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Markdown add/unlink event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    /// Path relative to the docs directory, `/`-separated
    pub path: String,
    pub kind: WatchEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEventKind {
    /// A Markdown file appeared
    Added,
    /// A Markdown file disappeared
    Removed,
}

/// Markdown files currently known to exist (absolute paths).
type KnownFiles = Arc<Mutex<HashSet<PathBuf>>>;

/// Watches the docs directory for Markdown files coming and going.
///
/// Watching stops when this is dropped.
pub struct SidebarWatcher {
    /// Docs directory (canonicalized)
    docs_dir: PathBuf,
    /// Debouncer handle (must keep alive)
    _debouncer: Debouncer<RecommendedWatcher>,
    /// Receiver for add/unlink events
    event_rx: mpsc::UnboundedReceiver<WatchEvent>,
}

impl SidebarWatcher {
    /// Start watching `docs_dir` recursively.
    ///
    /// A missing docs directory is created so files added later are seen.
    pub fn new(docs_dir: PathBuf) -> Result<Self> {
        if !docs_dir.exists() {
            warn!(
                "Docs directory {} does not exist yet, creating it",
                docs_dir.display()
            );
            fs::create_dir_all(&docs_dir)
                .with_context(|| format!("Failed to create {}", docs_dir.display()))?;
        }

        // FSEvents on macOS reports real paths (/private/var/...), so match them.
        let docs_dir = docs_dir.canonicalize().unwrap_or(docs_dir);

        let known: KnownFiles = Arc::default();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let docs_dir_clone = docs_dir.clone();
        let known_clone = known.clone();

        let mut debouncer = new_debouncer(
            DEBOUNCE,
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    for event in events {
                        for watch_event in classify(&event.path, &docs_dir_clone, &known_clone) {
                            if event_tx.send(watch_event).is_err() {
                                // Receiver dropped
                                return;
                            }
                        }
                    }
                }
                Err(e) => {
                    error!("File watcher error: {}", e);
                }
            },
        )?;

        debouncer
            .watcher()
            .watch(&docs_dir, RecursiveMode::Recursive)?;

        // After registration, so a file created meanwhile is known or reported.
        let count = snapshot(&docs_dir, &known)?;
        debug!(
            "Watching {} with {} known Markdown file(s)",
            docs_dir.display(),
            count
        );

        Ok(Self {
            docs_dir,
            _debouncer: debouncer,
            event_rx,
        })
    }

    /// Wait for the next add/unlink event.
    pub async fn recv(&mut self) -> Option<WatchEvent> {
        self.event_rx.recv().await
    }

    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }
}

/// Record every Markdown file under `docs_dir` as known. Returns the size of the known set.
fn snapshot(docs_dir: &Path, known: &KnownFiles) -> Result<usize> {
    let files = markdown_files(docs_dir)?;
    let mut known = known
        .lock()
        .map_err(|_| anyhow!("Known file set poisoned"))?;
    known.extend(files);
    Ok(known.len())
}

fn is_hidden(relative: &str) -> bool {
    relative.split('/').any(|segment| segment.starts_with('.'))
}

fn event(docs_dir: &Path, path: &Path, kind: WatchEventKind) -> Option<WatchEvent> {
    relative_path(docs_dir, path).map(|path| WatchEvent { path, kind })
}

/// Turn a raw change notification into add/unlink events, updating `known`.
///
/// A directory that appeared reports each new Markdown file inside it; a
/// directory that vanished reports each known file beneath it.
fn classify(path: &Path, docs_dir: &Path, known: &KnownFiles) -> Vec<WatchEvent> {
    let Some(relative) = relative_path(docs_dir, path) else {
        return Vec::new();
    };
    if is_hidden(&relative) {
        return Vec::new();
    }

    let Ok(mut known) = known.lock() else {
        warn!("Known file set poisoned, dropping event for {}", relative);
        return Vec::new();
    };

    let mut events = Vec::new();

    if path.is_dir() {
        match markdown_files(path) {
            Ok(files) => {
                for file in files {
                    if known.insert(file.clone()) {
                        events.extend(event(docs_dir, &file, WatchEventKind::Added));
                    }
                }
            }
            Err(e) => warn!("Failed to scan {}: {}", path.display(), e),
        }
    } else if path.is_file() {
        if relative.ends_with(MARKDOWN_EXTENSION) && known.insert(path.to_path_buf()) {
            events.extend(event(docs_dir, path, WatchEventKind::Added));
        }
    } else {
        let gone: Vec<PathBuf> = known
            .iter()
            .filter(|file| file.starts_with(path))
            .cloned()
            .collect();
        for file in gone {
            known.remove(&file);
            events.extend(event(docs_dir, &file, WatchEventKind::Removed));
        }
    }

    for e in &events {
        debug!("Watch event: {:?} - {}", e.kind, e.path);
    }

    events
}
