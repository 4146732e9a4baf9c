//! sidebar-core: Derives a documentation sidebar from the docs directory layout.
//!
//! This crate provides:
//! - Selection of the Markdown files that belong in the sidebar
//! - Construction of the nested section/level/leaf tree
//! - Loading and saving the persisted `sidebar.json`
//! - Deep merging of a fresh tree into hand-edited persisted content
//! - [`Synthesizer`], which runs all of the above as one step

pub mod casing;
pub mod config;
pub mod error;
pub mod filter;
pub mod merge;
pub mod store;
pub mod synth;
pub mod tree;

pub use config::{MergeStrategy, SidebarConfig};
pub use error::{Result, SidebarError};
pub use merge::merge_into;
pub use store::SidebarStore;
pub use synth::Synthesizer;
pub use tree::{build_tree, Leaf, Level, Node, Section, SidebarTree};
