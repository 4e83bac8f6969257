//! In-terminal directory picker, used in place of a native folder dialog.

use std::io;
use std::path::{Path, PathBuf};

/// Label of the parent-directory row.
pub const PARENT_LABEL: &str = "..";

/// Outcome of a key press inside the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    /// Keep browsing.
    Pending,
    /// The user chose this directory.
    Chosen(PathBuf),
    /// The user dismissed the picker.
    Cancelled,
}

/// Browsable listing of one directory's sub-directories.
#[derive(Debug, Clone)]
pub struct DirPicker {
    current: PathBuf,
    /// Sub-directory names, hidden ones excluded, sorted case-insensitively.
    entries: Vec<String>,
    /// Index into the rows: 0 is the parent row when there is a parent.
    selected: usize,
    /// Last listing error, shown until the next successful move.
    pub error: Option<String>,
}

impl DirPicker {
    /// Open the picker at `start`.
    pub fn new(start: &Path) -> io::Result<Self> {
        let current = start.canonicalize()?;
        let entries = list_subdirs(&current)?;
        Ok(Self {
            current,
            entries,
            selected: 0,
            error: None,
        })
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn has_parent(&self) -> bool {
        self.current.parent().is_some()
    }

    /// Rows as displayed: the parent row (if any) followed by sub-directories.
    pub fn rows(&self) -> Vec<String> {
        let mut rows = Vec::with_capacity(self.entries.len() + 1);
        if self.has_parent() {
            rows.push(PARENT_LABEL.to_string());
        }
        rows.extend(self.entries.iter().map(|name| format!("{name}/")));
        rows
    }

    fn row_count(&self) -> usize {
        self.entries.len() + usize::from(self.has_parent())
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.row_count() {
            self.selected += 1;
        }
    }

    /// Descend into the selected row (or go up for the parent row).
    pub fn enter(&mut self) {
        let offset = usize::from(self.has_parent());
        if self.has_parent() && self.selected == 0 {
            self.go_up();
            return;
        }
        let Some(name) = self.entries.get(self.selected - offset) else {
            return;
        };
        let target = self.current.join(name);
        self.navigate(target);
    }

    /// Move to the parent directory.
    pub fn go_up(&mut self) {
        if let Some(parent) = self.current.parent().map(Path::to_path_buf) {
            self.navigate(parent);
        }
    }

    fn navigate(&mut self, target: PathBuf) {
        match list_subdirs(&target) {
            Ok(entries) => {
                self.current = target;
                self.entries = entries;
                self.selected = 0;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(path = %target.display(), error = %err, "picker cannot open directory");
                self.error = Some(format!("{}: {}", target.display(), err));
            }
        }
    }

    /// Choose the directory currently being browsed.
    pub fn choose(&self) -> PickerOutcome {
        PickerOutcome::Chosen(self.current.clone())
    }
}

/// Non-hidden sub-directories of `dir`, sorted case-insensitively.
fn list_subdirs(dir: &Path) -> io::Result<Vec<String>> {
    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort_by_key(|name| (name.to_lowercase(), name.clone()));
    Ok(names)
}
