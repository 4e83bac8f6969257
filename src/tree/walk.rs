use std::cmp::Ordering;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::{DirNode, Entry, Marker, TreeConfig, TreeNode, WalkError};

/// Ordering key for siblings: directories first, then files by extension,
/// then case-insensitive name. The raw name breaks remaining ties so the
/// order never depends on the OS listing order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    is_file: bool,
    extension: String,
    folded_name: String,
    name: String,
}

/// Build the sort key for an entry named `name`.
pub fn sort_key(name: &str, is_dir: bool) -> SortKey {
    SortKey {
        is_file: !is_dir,
        extension: if is_dir {
            String::new()
        } else {
            crate::classify::extension_key(name)
        },
        folded_name: name.to_lowercase(),
        name: name.to_string(),
    }
}

/// Build the tree from a root path.
///
/// Symlinks are followed; every directory's canonical path is recorded so a
/// directory reached twice (symlink loops, or two links to the same target)
/// is shown once more without being descended. Unreadable directories get a
/// single marker child; any other failing entry is logged and skipped.
pub fn build_tree(root: &Path, config: &TreeConfig) -> Result<DirNode, WalkError> {
    let metadata = std::fs::metadata(root).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => WalkError::NotFound(root.to_path_buf()),
        _ => WalkError::Io {
            path: root.to_path_buf(),
            source,
        },
    })?;
    if !metadata.is_dir() {
        return Err(WalkError::NotADirectory(root.to_path_buf()));
    }
    let canonical = root.canonicalize().map_err(|source| WalkError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut walker = WalkDir::new(&canonical)
        .follow_links(true)
        .sort_by(sort_cmp);
    if let Some(max_depth) = config.max_depth {
        walker = walker.max_depth(max_depth);
    }

    let root_name = canonical
        .file_name()
        .unwrap_or(canonical.as_os_str())
        .to_os_string();
    let mut tree = OpenDirs::new(DirNode::new(Entry::directory(
        &canonical, &root_name, false,
    )));

    let mut visited: HashSet<PathBuf> = HashSet::new();
    visited.insert(canonical.clone());

    // Prune hidden entries before descending into them. The root is exempt.
    let mut iter = walker
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));

    while let Some(result) = iter.next() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tree.record_error(err);
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        tree.close_until_parent_of(entry.path());
        let is_symlink = entry.path_is_symlink();

        if entry.file_type().is_dir() {
            let mut node = DirNode::new(Entry::directory(
                entry.path(),
                entry.file_name(),
                is_symlink,
            ));
            // A path that cannot be resolved is descended without the guard.
            let first_visit = entry
                .path()
                .canonicalize()
                .map(|resolved| visited.insert(resolved))
                .unwrap_or(true);
            if first_visit {
                tree.open(node);
            } else {
                debug!(path = %entry.path().display(), "directory already visited, not descending");
                node.cycle = true;
                iter.skip_current_dir();
                tree.attach(TreeNode::Dir(node));
            }
        } else {
            tree.attach(TreeNode::File(Entry::file(
                entry.path(),
                entry.file_name(),
                is_symlink,
            )));
        }
    }

    let root = tree.finish();
    let stats = root.stats();
    debug!(
        root = %canonical.display(),
        directories = stats.directories,
        files = stats.files,
        markers = stats.markers,
        "walk complete"
    );
    Ok(root)
}

/// Explicit stack of directories whose children are still being collected.
struct OpenDirs {
    root: DirNode,
    open: Vec<DirNode>,
}

impl OpenDirs {
    fn new(root: DirNode) -> Self {
        Self {
            root,
            open: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut DirNode {
        match self.open.last_mut() {
            Some(dir) => dir,
            None => &mut self.root,
        }
    }

    fn attach(&mut self, node: TreeNode) {
        self.current().children.push(node);
    }

    fn open(&mut self, dir: DirNode) {
        self.open.push(dir);
    }

    /// Close finished directories until the innermost open one is `path`'s parent.
    fn close_until_parent_of(&mut self, path: &Path) {
        let parent = path.parent();
        while let Some(top) = self.open.last() {
            if Some(top.entry.path.as_path()) == parent {
                break;
            }
            if let Some(done) = self.open.pop() {
                self.attach(TreeNode::Dir(done));
            }
        }
    }

    fn finish(mut self) -> DirNode {
        while let Some(done) = self.open.pop() {
            self.attach(TreeNode::Dir(done));
        }
        self.root
    }

    fn record_error(&mut self, err: walkdir::Error) {
        let Some(path) = err.path().map(Path::to_path_buf) else {
            warn!(error = %err, "skipping unreadable entry");
            return;
        };

        // Reading the innermost open directory failed: replace its contents
        // with a single marker.
        if self.current().entry.path == path {
            let marker = match err.io_error().map(io::Error::kind) {
                Some(io::ErrorKind::PermissionDenied) => Marker::AccessDenied,
                _ => Marker::Error(io_message(&err)),
            };
            warn!(path = %path.display(), error = %err, "cannot list directory");
            let dir = self.current();
            dir.children.clear();
            dir.children.push(TreeNode::Marker(marker));
            return;
        }

        let name = path.file_name().unwrap_or(path.as_os_str()).to_os_string();
        if is_hidden(&name) {
            return;
        }

        if err.loop_ancestor().is_some() {
            self.close_until_parent_of(&path);
            let mut node = DirNode::new(Entry::directory(&path, &name, true));
            node.cycle = true;
            debug!(path = %path.display(), "symlink loop, not descending");
            self.attach(TreeNode::Dir(node));
            return;
        }

        if is_broken_symlink(&path, &err) {
            self.close_until_parent_of(&path);
            let mut entry = Entry::file(&path, &name, true);
            entry.broken_link = true;
            self.attach(TreeNode::File(entry));
            return;
        }

        warn!(path = %path.display(), error = %err, "skipping entry");
    }
}

fn io_message(err: &walkdir::Error) -> String {
    match err.io_error() {
        Some(io_err) => io_err.to_string(),
        None => err.to_string(),
    }
}

/// A symlink whose target cannot be resolved: missing, self-referential, or
/// running through a non-directory.
fn is_broken_symlink(path: &Path, err: &walkdir::Error) -> bool {
    err.io_error().is_some()
        && std::fs::symlink_metadata(path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Whether the entry is, or links to, a directory.
fn resolves_to_dir(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir())
}

/// Comparison function for walkdir sorting.
fn sort_cmp(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_key = sort_key(&a.file_name().to_string_lossy(), resolves_to_dir(a));
    let b_key = sort_key(&b.file_name().to_string_lossy(), resolves_to_dir(b));
    a_key.cmp(&b_key)
}
