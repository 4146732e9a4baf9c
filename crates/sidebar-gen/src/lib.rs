//! sidebar-gen library: docs-site integration for sidebar synthesis.
//!
//! Exposes the CLI definition, the host hooks and the file watcher so the
//! binary stays thin and integration tests can drive each piece.

pub mod cli;
pub mod plugin;
pub mod watcher;

// Re-export key types for convenience
pub use cli::{Cli, Command, ConfigError};
pub use plugin::{DevServer, SidebarHost, SidebarPlugin, PLUGIN_NAME};
pub use watcher::{SidebarWatcher, WatchEvent, WatchEventKind};
