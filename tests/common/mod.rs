#![allow(dead_code)]

use dirviz::render::RenderConfig;
use dirviz::tree::{DirNode, TreeConfig, TreeNode};
use std::fs;
use tempfile::TempDir;

/// TreeConfig with no depth limit.
pub fn default_tree_config() -> TreeConfig {
    TreeConfig { max_depth: None }
}

/// RenderConfig with color disabled.
pub fn no_color() -> RenderConfig {
    RenderConfig { use_color: false }
}

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
    tmp
}

/// Names of a directory's direct children, in display order.
/// Markers show up as `"<access denied>"` or `"<error>"`.
pub fn child_names(dir: &DirNode) -> Vec<String> {
    dir.children
        .iter()
        .map(|child| match child {
            TreeNode::Dir(d) => d.entry.name.clone(),
            TreeNode::File(e) => e.name.clone(),
            TreeNode::Marker(dirviz::tree::Marker::AccessDenied) => "<access denied>".to_string(),
            TreeNode::Marker(dirviz::tree::Marker::Error(_)) => "<error>".to_string(),
        })
        .collect()
}

/// Find a child directory by name.
pub fn child_dir<'a>(dir: &'a DirNode, name: &str) -> &'a DirNode {
    dir.children
        .iter()
        .find_map(|child| match child {
            TreeNode::Dir(d) if d.entry.name == name => Some(d),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no directory named {name:?} under {}", dir.entry.name))
}

/// True when running as root, where permission bits don't stop reads.
#[cfg(unix)]
pub fn permissions_ignored(dir: &std::path::Path) -> bool {
    fs::read_dir(dir).is_ok()
}
