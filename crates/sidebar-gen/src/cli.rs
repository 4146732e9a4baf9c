//! Command-line interface and option layering.
//!
//! Options are resolved lowest precedence first:
//! 1. built-in defaults
//! 2. the JSON options file given with `--config`
//! 3. flags and environment variables

use clap::{Parser, Subcommand, ValueEnum};
use sidebar_core::{MergeStrategy, SidebarConfig};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sidebar-gen")]
#[command(about = "Generate a docs sidebar from the Markdown directory layout")]
pub struct Cli {
    /// JSON options file (docsDir, includeDirs, ignoreFiles, collapsible, collapsed, sidebarFile)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Root directory scanned for Markdown files
    #[arg(long, global = true, env = "SIDEBAR_DOCS_DIR")]
    pub docs_dir: Option<PathBuf>,

    /// Top-level directory to include (repeatable)
    #[arg(short, long = "include-dir", global = true)]
    pub include_dirs: Vec<String>,

    /// File basename to leave out (repeatable)
    #[arg(long = "ignore-file", global = true)]
    pub ignore_files: Vec<String>,

    /// Do not give sections a collapsed attribute
    #[arg(long, global = true)]
    pub no_collapsible: bool,

    /// Start sections collapsed
    #[arg(long, global = true)]
    pub collapsed: bool,

    /// Where the merged sidebar is persisted
    #[arg(long, global = true, env = "SIDEBAR_FILE")]
    pub sidebar_file: Option<PathBuf>,

    /// How arrays in the persisted sidebar are reconciled
    #[arg(long, global = true, value_enum)]
    pub merge_strategy: Option<StrategyArg>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run one synthesis and update the sidebar file
    Generate {
        /// Also print the resulting sidebar to stdout
        #[arg(long)]
        print: bool,
    },
    /// Synthesize, then keep the sidebar file current as Markdown files come and go
    Watch,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    Positional,
    ByText,
}

impl From<StrategyArg> for MergeStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Positional => MergeStrategy::Positional,
            StrategyArg::ByText => MergeStrategy::ByText,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read options file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid options file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Cli {
    /// Resolve the effective configuration.
    pub fn resolve_config(&self) -> Result<SidebarConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_options_file(path)?,
            None => SidebarConfig::default(),
        };

        if let Some(docs_dir) = &self.docs_dir {
            config.docs_dir = docs_dir.clone();
        }
        if !self.include_dirs.is_empty() {
            config.include_dirs = self.include_dirs.iter().cloned().collect();
        }
        if !self.ignore_files.is_empty() {
            config.ignore_files = self.ignore_files.iter().cloned().collect();
        }
        if self.no_collapsible {
            config.collapsible = false;
        }
        if self.collapsed {
            config.collapsed = true;
        }
        if let Some(sidebar_file) = &self.sidebar_file {
            config.sidebar_file = sidebar_file.clone();
        }
        if let Some(strategy) = self.merge_strategy {
            config.merge_strategy = strategy.into();
        }

        Ok(config)
    }
}

/// Read a JSON options file. Missing fields take their defaults.
pub fn load_options_file(path: &Path) -> Result<SidebarConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
