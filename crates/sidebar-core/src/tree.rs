//! Sidebar tree model and construction from docs-relative paths.
//!
//! The tree maps a section key (`/guide/`) to a one-element array holding the
//! section, which is the shape the docs site expects for a multi-sidebar:
//!
//! ```json
//! {
//!   "/guide/": [
//!     {
//!       "text": "Guide",
//!       "items": [
//!         { "text": "intro", "link": "/guide/intro.md" },
//!         { "text": "Setup", "items": [...], "collapsed": true }
//!       ],
//!       "collapsed": false
//!     }
//!   ]
//! }
//! ```

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::casing::title_case;
use crate::error::Result;
use crate::filter::MARKDOWN_EXTENSION;

/// A single Markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    /// File name without the `.md` extension
    pub text: String,
    /// Site-absolute link, e.g. `/guide/setup/install.md`
    pub link: String,
}

/// A nested directory beneath a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Title-cased directory name
    pub text: String,
    pub items: Vec<Node>,
    pub collapsed: bool,
}

impl Level {
    /// Levels always start collapsed.
    pub fn new(text: String) -> Self {
        Self {
            text,
            items: Vec::new(),
            collapsed: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Level(Level),
    Leaf(Leaf),
}

impl Node {
    pub fn text(&self) -> &str {
        match self {
            Node::Level(level) => &level.text,
            Node::Leaf(leaf) => &leaf.text,
        }
    }
}

/// Top-level grouping for one included directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub text: String,
    pub items: Vec<Node>,
    /// Absent when sections are not collapsible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

/// Ordered mapping from section key to section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarTree {
    sections: Vec<(String, Section)>,
}

/// Key under which a top-level directory's section is stored.
pub fn section_key(name: &str) -> String {
    format!("/{}/", name)
}

impl SidebarTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Section keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(key, _)| key.as_str())
    }

    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, section)| section)
    }

    fn section_mut_or_insert(&mut self, name: &str, collapsed: Option<bool>) -> &mut Section {
        let key = section_key(name);
        let index = match self.sections.iter().position(|(k, _)| *k == key) {
            Some(index) => index,
            None => {
                self.sections.push((
                    key,
                    Section {
                        text: title_case(name),
                        items: Vec::new(),
                        collapsed,
                    },
                ));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index].1
    }

    /// Add one docs-relative path (`guide/setup/install.md`) to the tree.
    ///
    /// `collapsed` is the value given to the section if it has to be created.
    /// Re-inserting a path that is already present changes nothing.
    pub fn insert_path(&mut self, relative: &str, collapsed: Option<bool>) {
        let segments: Vec<&str> = relative.split('/').collect();
        let Some((section_name, rest)) = segments.split_first() else {
            return;
        };
        if rest.is_empty() {
            return;
        }

        let section = self.section_mut_or_insert(section_name, collapsed);
        insert_segments(&mut section.items, rest, relative);
    }

    /// Convert to a JSON value, preserving section order.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for SidebarTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (key, section) in &self.sections {
            map.serialize_entry(key, std::slice::from_ref(section))?;
        }
        map.end()
    }
}

/// Walk `segments` down from `items`, creating levels as needed, and add the
/// leaf for the final segment.
fn insert_segments(items: &mut Vec<Node>, segments: &[&str], relative: &str) {
    let mut items = items;

    for (i, segment) in segments.iter().enumerate() {
        let is_last = i + 1 == segments.len();

        if is_last {
            if let Some(stem) = segment.strip_suffix(MARKDOWN_EXTENSION) {
                let exists = items
                    .iter()
                    .any(|node| matches!(node, Node::Leaf(leaf) if leaf.text == stem));
                if !exists {
                    items.push(Node::Leaf(Leaf {
                        text: stem.to_string(),
                        link: format!("/{}", relative),
                    }));
                }
                return;
            }
        }

        let text = title_case(segment);
        let index = match items
            .iter()
            .position(|node| matches!(node, Node::Level(level) if level.text == text))
        {
            Some(index) => index,
            None => {
                items.push(Node::Level(Level::new(text)));
                items.len() - 1
            }
        };

        items = match &mut items[index] {
            Node::Level(level) => &mut level.items,
            Node::Leaf(_) => return,
        };
    }
}

/// Build a tree from docs-relative paths, processed in the given order.
pub fn build_tree<I, S>(relative_paths: I, collapsed: Option<bool>) -> SidebarTree
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tree = SidebarTree::new();
    for path in relative_paths {
        tree.insert_path(path.as_ref(), collapsed);
    }
    tree
}
