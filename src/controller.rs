//! Refresh controller: validates a path string and produces a tree view.

use crate::tree::{DirNode, TreeBuilder, TreeConfig, TreeStats, WalkError, WalkdirTreeBuilder};
use std::path::{Path, PathBuf};
use tracing::info;

/// Reasons a refresh attempt produced no tree.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Please enter a valid path.")]
    Empty,
    #[error("Path does not exist: {0}")]
    NotFound(String),
    #[error("Path is not a directory: {0}")]
    NotADirectory(String),
    #[error(transparent)]
    Walk(#[from] WalkError),
}

/// A successfully built tree, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeView {
    /// Label shown next to the root glyph.
    pub root_label: String,
    pub root: DirNode,
    pub stats: TreeStats,
}

/// Validates user input and runs the tree builder.
#[derive(Debug, Clone, Default)]
pub struct Controller<B = WalkdirTreeBuilder> {
    builder: B,
    config: TreeConfig,
}

impl Controller<WalkdirTreeBuilder> {
    pub fn new(config: TreeConfig) -> Self {
        Self::with_builder(WalkdirTreeBuilder, config)
    }
}

impl<B: TreeBuilder> Controller<B> {
    pub fn with_builder(builder: B, config: TreeConfig) -> Self {
        Self { builder, config }
    }

    /// Validate `input` and build the tree below it.
    ///
    /// The root is labelled with its full canonical path when
    /// `show_full_path` is set, and with its last path segment otherwise.
    pub fn refresh(&self, input: &str, show_full_path: bool) -> Result<TreeView, RefreshError> {
        if input.trim().is_empty() {
            return Err(RefreshError::Empty);
        }

        let path = Path::new(input);
        if !path.exists() {
            return Err(RefreshError::NotFound(input.to_string()));
        }
        if !path.is_dir() {
            return Err(RefreshError::NotADirectory(input.to_string()));
        }

        let resolved = path.canonicalize().map_err(|source| WalkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let root = self.builder.build_tree(&resolved, &self.config)?;
        let stats = root.stats();
        info!(path = %resolved.display(), %stats, "visualized");

        Ok(TreeView {
            root_label: root_label(&resolved, show_full_path),
            root,
            stats,
        })
    }
}

/// Root label: the full path, or just its final segment.
pub fn root_label(resolved: &Path, show_full_path: bool) -> String {
    let label = if show_full_path {
        resolved.to_string_lossy().into_owned()
    } else {
        resolved
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| resolved.to_string_lossy().into_owned())
    };
    crate::tree::sanitize_text(&label)
}

/// Resolve the directory a refresh would show, without walking it.
pub fn resolve_input(input: &str) -> Option<PathBuf> {
    if input.trim().is_empty() {
        return None;
    }
    let path = Path::new(input);
    path.canonicalize().ok().filter(|p| p.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Entry;
    use std::cell::Cell;
    use std::ffi::OsStr;
    use tempfile::TempDir;

    /// Builder that records how often it was invoked.
    struct CountingBuilder {
        calls: Cell<usize>,
    }

    impl TreeBuilder for CountingBuilder {
        fn build_tree(&self, root: &Path, _config: &TreeConfig) -> Result<DirNode, WalkError> {
            self.calls.set(self.calls.get() + 1);
            Ok(DirNode::new(Entry::directory(root, OsStr::new("stub"), false)))
        }
    }

    fn counting() -> Controller<CountingBuilder> {
        Controller::with_builder(
            CountingBuilder {
                calls: Cell::new(0),
            },
            TreeConfig::default(),
        )
    }

    #[test]
    fn empty_input_is_rejected_without_walking() {
        let controller = counting();
        let err = controller.refresh("", false).unwrap_err();
        assert!(matches!(err, RefreshError::Empty));
        assert_eq!(err.to_string(), "Please enter a valid path.");
        assert_eq!(controller.builder.calls.get(), 0);
    }

    #[test]
    fn missing_path_is_rejected() {
        let controller = counting();
        let err = controller
            .refresh("/definitely/not/here/dirviz", false)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Path does not exist: /definitely/not/here/dirviz"
        );
        assert_eq!(controller.builder.calls.get(), 0);
    }

    #[test]
    fn file_path_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("afile.txt");
        std::fs::write(&file, "hello").unwrap();
        let input = file.to_string_lossy().to_string();

        let controller = counting();
        let err = controller.refresh(&input, false).unwrap_err();
        assert!(matches!(err, RefreshError::NotADirectory(_)));
        assert!(err.to_string().starts_with("Path is not a directory: "));
        assert_eq!(controller.builder.calls.get(), 0);
    }

    #[test]
    fn label_follows_full_path_flag() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("project");
        std::fs::create_dir(&dir).unwrap();
        let input = dir.to_string_lossy().to_string();
        let controller = counting();

        let short = controller.refresh(&input, false).unwrap();
        assert_eq!(short.root_label, "project");

        let full = controller.refresh(&input, true).unwrap();
        let canonical = dir.canonicalize().unwrap();
        assert_eq!(full.root_label, canonical.to_string_lossy());
        assert_eq!(controller.builder.calls.get(), 2);
    }

    #[test]
    fn refresh_and_resolve_agree_on_padded_input() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("proj");
        std::fs::create_dir(&dir).unwrap();
        let padded = format!(" {}", dir.display());

        assert_eq!(resolve_input(&padded), None);
        let err = counting().refresh(&padded, false).unwrap_err();
        assert!(matches!(err, RefreshError::NotFound(_)));

        let exact = dir.to_string_lossy().to_string();
        assert_eq!(resolve_input(&exact), Some(dir.canonicalize().unwrap()));
        assert!(counting().refresh(&exact, false).is_ok());
        assert_eq!(resolve_input("   "), None);
    }

    #[test]
    fn filesystem_root_label_is_the_path() {
        assert_eq!(root_label(Path::new("/"), false), "/");
    }
}
