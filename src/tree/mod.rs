//! Tree building, filtering, sorting, and layout computation.

pub mod layout;
pub(crate) mod walk;

use crate::classify::{classify, extension_key, Rgb, COLOR_DEFAULT, ICON_FOLDER};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub use layout::{flatten, Row};
pub use walk::{build_tree, sort_key, SortKey};

/// Whether an entry is a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A single filesystem object encountered during a walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Path as walked (the root carries its canonical path).
    pub path: PathBuf,
    /// Sanitized display name.
    pub name: String,
    pub kind: EntryKind,
    /// Lowercased suffix with leading dot; `None` for directories.
    pub extension: Option<String>,
    pub icon: &'static str,
    pub color: Rgb,
    /// Whether the path itself is a symbolic link.
    pub is_symlink: bool,
    /// Symlink whose target does not exist.
    pub broken_link: bool,
}

impl Entry {
    pub fn directory(path: &Path, name: &OsStr, is_symlink: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            name: display_name(name),
            kind: EntryKind::Directory,
            extension: None,
            icon: ICON_FOLDER,
            color: COLOR_DEFAULT,
            is_symlink,
            broken_link: false,
        }
    }

    pub fn file(path: &Path, name: &OsStr, is_symlink: bool) -> Self {
        let extension = extension_key(&name.to_string_lossy());
        let kind = classify(&extension);
        Self {
            path: path.to_path_buf(),
            name: display_name(name),
            kind: EntryKind::File,
            extension: Some(extension),
            icon: kind.icon(),
            color: kind.color(),
            is_symlink,
            broken_link: false,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Inline marker emitted in place of a directory's contents.
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    /// The directory listing was refused by the OS.
    AccessDenied,
    /// The directory listing failed for another reason.
    Error(String),
}

/// A directory and its ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct DirNode {
    pub entry: Entry,
    pub children: Vec<TreeNode>,
    /// Canonical path was already visited in this walk; not descended.
    pub cycle: bool,
}

impl DirNode {
    pub fn new(entry: Entry) -> Self {
        Self {
            entry,
            children: Vec::new(),
            cycle: false,
        }
    }

    /// Count directories, files and markers below this node.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut pending: Vec<&DirNode> = vec![self];
        while let Some(dir) = pending.pop() {
            for child in &dir.children {
                match child {
                    TreeNode::Dir(d) => {
                        stats.directories += 1;
                        pending.push(d);
                    }
                    TreeNode::File(_) => stats.files += 1,
                    TreeNode::Marker(_) => stats.markers += 1,
                }
            }
        }
        stats
    }
}

/// A node of the display tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Dir(DirNode),
    File(Entry),
    Marker(Marker),
}

impl TreeNode {
    /// Path of the node, if it has one (markers don't).
    pub fn path(&self) -> Option<&Path> {
        match self {
            TreeNode::Dir(d) => Some(&d.entry.path),
            TreeNode::File(e) => Some(&e.path),
            TreeNode::Marker(_) => None,
        }
    }
}

/// Summary counts of a built tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub directories: usize,
    pub files: usize,
    pub markers: usize,
}

impl std::fmt::Display for TreeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}, {} {}",
            self.directories,
            if self.directories == 1 { "directory" } else { "directories" },
            self.files,
            if self.files == 1 { "file" } else { "files" },
        )?;
        if self.markers > 0 {
            write!(f, ", {} unreadable", self.markers)?;
        }
        Ok(())
    }
}

/// Errors that prevent a walk from starting.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("{}: No such file or directory", .0.display())]
    NotFound(PathBuf),
    #[error("{}: Not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration for tree building.
#[derive(Debug, Clone, Default)]
pub struct TreeConfig {
    /// Maximum traversal depth (`None` for unlimited).
    pub max_depth: Option<usize>,
}

/// Abstraction over tree construction so it can be swapped or mocked.
pub trait TreeBuilder {
    fn build_tree(&self, root: &Path, config: &TreeConfig) -> Result<DirNode, WalkError>;
}

/// Default `TreeBuilder` that delegates to the walkdir-based implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkdirTreeBuilder;

impl TreeBuilder for WalkdirTreeBuilder {
    fn build_tree(&self, root: &Path, config: &TreeConfig) -> Result<DirNode, WalkError> {
        build_tree(root, config)
    }
}

/// Strip NUL characters from display text.
pub fn sanitize_text(input: &str) -> String {
    input.replace('\0', "")
}

/// Display form of a file name: lossy UTF-8, NULs stripped, `"?"` if nothing is left.
pub fn display_name(name: &OsStr) -> String {
    let clean = sanitize_text(&name.to_string_lossy());
    if clean.is_empty() {
        "?".to_string()
    } else {
        clean
    }
}
