//! Selects the Markdown files that participate in the sidebar.
//!
//! A file participates when:
//! - it is a regular `.md` file outside any hidden directory,
//! - its first directory under the docs root is in the include set,
//! - its basename is not in the ignore set.
//!
//! Files sitting directly in the docs root have no top-level directory and
//! never participate.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, SidebarError};

pub const MARKDOWN_EXTENSION: &str = ".md";

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// Render a path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Path of `path` relative to `docs_dir`, `/`-separated.
pub fn relative_path(docs_dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(docs_dir).ok()?;
    let relative = to_slash(relative);
    if relative.is_empty() {
        None
    } else {
        Some(relative)
    }
}

/// Whether a docs-relative path passes the include and ignore rules.
pub fn is_included(
    relative: &str,
    include_dirs: &BTreeSet<String>,
    ignore_files: &BTreeSet<String>,
) -> bool {
    if !relative.ends_with(MARKDOWN_EXTENSION) {
        return false;
    }

    let segments: Vec<&str> = relative.split('/').collect();
    let (Some(top_level), Some(file_name)) = (segments.first(), segments.last()) else {
        return false;
    };

    segments.len() >= 2 && include_dirs.contains(*top_level) && !ignore_files.contains(*file_name)
}

/// All Markdown files under `docs_dir`, skipping hidden files and directories.
///
/// Unsorted. A missing docs directory yields an empty list.
pub fn markdown_files(docs_dir: &Path) -> Result<Vec<PathBuf>> {
    if !docs_dir.is_dir() {
        debug!("Docs directory {} does not exist, nothing to scan", docs_dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();

    let walker = WalkDir::new(docs_dir)
        .into_iter()
        .filter_entry(|e| !is_hidden(e) || e.path() == docs_dir);

    for entry in walker {
        let entry = entry.map_err(|source| SidebarError::Scan {
            path: docs_dir.to_path_buf(),
            source,
        })?;

        let path = entry.into_path();
        let is_markdown = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(MARKDOWN_EXTENSION));

        if is_markdown && path.is_file() {
            files.push(path);
        }
    }

    Ok(files)
}

/// Collect participating Markdown files under `docs_dir`, sorted by their
/// `/`-separated string form.
pub fn collect_markdown_paths(
    docs_dir: &Path,
    include_dirs: &BTreeSet<String>,
    ignore_files: &BTreeSet<String>,
) -> Result<Vec<PathBuf>> {
    let mut files: Vec<(String, PathBuf)> = markdown_files(docs_dir)?
        .into_iter()
        .filter(|path| {
            relative_path(docs_dir, path)
                .is_some_and(|relative| is_included(&relative, include_dirs, ignore_files))
        })
        .map(|path| (to_slash(&path), path))
        .collect();

    files.sort_by(|a, b| a.0.cmp(&b.0));
    debug!("Found {} sidebar file(s) under {}", files.len(), docs_dir.display());

    Ok(files.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# heading\n").unwrap();
    }

    fn relatives(root: &Path, paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| relative_path(root, p).unwrap())
            .collect()
    }

    #[test]
    fn test_is_included() {
        let include = set(&["guide"]);
        let ignore = set(&["index.md"]);

        assert!(is_included("guide/intro.md", &include, &ignore));
        assert!(is_included("guide/setup/install.md", &include, &ignore));
        assert!(!is_included("guide/index.md", &include, &ignore));
        assert!(!is_included("guide/setup/index.md", &include, &ignore));
        assert!(!is_included("api/reference.md", &include, &ignore));
        assert!(!is_included("guide/notes.txt", &include, &ignore));
        assert!(!is_included("guide.md", &set(&["guide.md"]), &ignore));
    }

    #[test]
    fn test_empty_include_set_selects_nothing() {
        assert!(!is_included("guide/intro.md", &BTreeSet::new(), &BTreeSet::new()));
    }

    #[test]
    fn test_collect_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        let docs = temp_dir.path().join("docs");
        touch(&docs, "guide/setup/install.md");
        touch(&docs, "guide/intro.md");
        touch(&docs, "api/reference.md");
        touch(&docs, "blog/post.md");
        touch(&docs, "guide/index.md");
        touch(&docs, "index.md");

        let paths =
            collect_markdown_paths(&docs, &set(&["guide", "api"]), &set(&["index.md"])).unwrap();

        assert_eq!(
            relatives(&docs, &paths),
            vec!["api/reference.md", "guide/intro.md", "guide/setup/install.md"]
        );
        assert!(paths.iter().all(|p| p.starts_with(&docs)));
    }

    #[test]
    fn test_sort_is_by_string_not_by_component() {
        let temp_dir = TempDir::new().unwrap();
        let docs = temp_dir.path().join("docs");
        touch(&docs, "guide/a/x.md");
        touch(&docs, "guide/a-b.md");

        let paths = collect_markdown_paths(&docs, &set(&["guide"]), &BTreeSet::new()).unwrap();

        // '-' sorts before '/'
        assert_eq!(relatives(&docs, &paths), vec!["guide/a-b.md", "guide/a/x.md"]);
    }

    #[test]
    fn test_hidden_directories_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let docs = temp_dir.path().join("docs");
        touch(&docs, "guide/.drafts/secret.md");
        touch(&docs, "guide/.hidden.md");
        touch(&docs, "guide/visible.md");

        let paths = collect_markdown_paths(&docs, &set(&["guide"]), &BTreeSet::new()).unwrap();

        assert_eq!(relatives(&docs, &paths), vec!["guide/visible.md"]);
    }

    #[test]
    fn test_markdown_files_ignores_include_rules() {
        let temp_dir = TempDir::new().unwrap();
        let docs = temp_dir.path().join("docs");
        touch(&docs, "index.md");
        touch(&docs, "blog/post.md");
        touch(&docs, "blog/image.png");

        let mut files = relatives(&docs, &markdown_files(&docs).unwrap());
        files.sort();

        assert_eq!(files, vec!["blog/post.md", "index.md"]);
    }

    #[test]
    fn test_missing_docs_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let docs = temp_dir.path().join("does-not-exist");

        let paths = collect_markdown_paths(&docs, &set(&["guide"]), &BTreeSet::new()).unwrap();
        assert!(paths.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_scan_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let docs = temp_dir.path().join("docs");
        let locked = docs.join("guide/locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("secret.md"), "# Secret").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = markdown_files(&docs);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        match result {
            Err(SidebarError::Scan { path, .. }) => assert_eq!(path, docs),
            other => panic!("expected a scan error, got {:?}", other),
        }
    }

    #[test]
    fn test_relative_path() {
        let docs = Path::new("docs");
        assert_eq!(
            relative_path(docs, Path::new("docs/guide/intro.md")).as_deref(),
            Some("guide/intro.md")
        );
        assert_eq!(relative_path(docs, Path::new("docs")), None);
        assert_eq!(relative_path(docs, Path::new("other/intro.md")), None);
    }
}
