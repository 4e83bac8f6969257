use super::{DirNode, TreeNode};
use std::collections::HashSet;
use std::path::PathBuf;

/// One display row: a node below the root plus its tree-drawing prefix.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    pub node: &'a TreeNode,
    /// Nesting depth (1 = direct child of root).
    pub depth: usize,
    /// Whether this is the last sibling in its parent group.
    pub is_last: bool,
    /// Pre-computed box-drawing prefix string.
    pub prefix: String,
}

impl Row<'_> {
    /// Whether the row is a directory that has rows of its own to show or hide.
    pub fn is_expandable(&self) -> bool {
        matches!(self.node, TreeNode::Dir(dir) if !dir.children.is_empty())
    }
}

/// Flatten the tree below `root` into pre-order rows.
///
/// Children of directories listed in `collapsed` are left out.
pub fn flatten<'a>(root: &'a DirNode, collapsed: &HashSet<PathBuf>) -> Vec<Row<'a>> {
    let mut rows = Vec::new();
    // (siblings, index of the next sibling to emit) for every open level.
    let mut stack: Vec<(&'a [TreeNode], usize)> = vec![(root.children.as_slice(), 0)];
    // ancestor_is_last[d] = true means the ancestor at depth d + 1 was the last sibling
    let mut ancestor_is_last: Vec<bool> = Vec::new();

    while let Some(level) = stack.last_mut() {
        let (siblings, index) = *level;
        if index >= siblings.len() {
            stack.pop();
            ancestor_is_last.pop();
            continue;
        }
        level.1 += 1;

        let node = &siblings[index];
        let is_last = index + 1 == siblings.len();
        rows.push(Row {
            node,
            depth: stack.len(),
            is_last,
            prefix: prefix_for(&ancestor_is_last, is_last),
        });

        if let TreeNode::Dir(dir) = node {
            if !dir.children.is_empty() && !collapsed.contains(&dir.entry.path) {
                ancestor_is_last.push(is_last);
                stack.push((dir.children.as_slice(), 0));
            }
        }
    }

    rows
}

/// Build a prefix from the ancestors' is_last flags and this entry's own flag.
fn prefix_for(ancestor_is_last: &[bool], is_last: bool) -> String {
    let mut prefix = String::new();
    for last in ancestor_is_last {
        if *last {
            prefix.push_str("    ");
        } else {
            prefix.push_str("\u{2502}   "); // │
        }
    }
    if is_last {
        prefix.push_str("\u{2514}\u{2500}\u{2500} "); // └──
    } else {
        prefix.push_str("\u{251c}\u{2500}\u{2500} "); // ├──
    }
    prefix
}
