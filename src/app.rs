//! Application view model: every piece of UI state the frame is drawn from.

use crate::controller::{resolve_input, Controller, RefreshError, TreeView};
use crate::picker::{DirPicker, PickerOutcome};
use crate::render::RenderConfig;
use crate::tree::{flatten, TreeBuilder, WalkdirTreeBuilder};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// Shown in the tree area before the first visualization.
pub const INITIAL_HINT: &str = "Enter a path and press v to visualize the structure.";

/// What the tree area currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Message { text: String, is_error: bool },
    Tree(TreeView),
}

/// Which widget receives key presses.
#[derive(Debug, Clone)]
pub enum Mode {
    Tree,
    /// Editing the path input; `backup` is restored on cancel.
    EditPath { backup: String },
    Picker(DirPicker),
}

/// Progress of a clean screenshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenshotPhase {
    Idle,
    /// Chrome is hidden; the next drawn frame is captured.
    Capture,
}

/// One-line status message below the controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

/// Startup options for [`App`].
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub show_full_path: bool,
    pub screenshot_path: PathBuf,
    pub render_config: RenderConfig,
}

pub struct App<B = WalkdirTreeBuilder> {
    controller: Controller<B>,
    pub path_input: String,
    pub show_full_path: bool,
    pub view: ViewState,
    pub mode: Mode,
    /// Directories the user folded; everything else is expanded.
    pub collapsed: HashSet<PathBuf>,
    /// Selected line in the tree area (0 is the root line).
    pub selected: usize,
    /// First tree line shown.
    pub scroll: usize,
    viewport_height: usize,
    pub status: Option<Status>,
    pub chrome_visible: bool,
    pub screenshot: ScreenshotPhase,
    pub screenshot_path: PathBuf,
    pub render_config: RenderConfig,
    pub should_quit: bool,
}

impl<B: TreeBuilder> App<B> {
    /// Create the app and visualize `path_input` right away. A blank input
    /// leaves the initial hint in place.
    pub fn new(controller: Controller<B>, path_input: String, options: AppOptions) -> Self {
        let mut app = Self {
            controller,
            path_input,
            show_full_path: options.show_full_path,
            view: ViewState::Message {
                text: INITIAL_HINT.to_string(),
                is_error: false,
            },
            mode: Mode::Tree,
            collapsed: HashSet::new(),
            selected: 0,
            scroll: 0,
            viewport_height: 0,
            status: None,
            chrome_visible: true,
            screenshot: ScreenshotPhase::Idle,
            screenshot_path: options.screenshot_path,
            render_config: options.render_config,
            should_quit: false,
        };
        if !app.path_input.trim().is_empty() {
            app.refresh();
        }
        app
    }

    /// Re-walk the path in the input box. Folds and the status message are reset.
    pub fn refresh(&mut self) {
        self.status = None;
        self.collapsed.clear();
        self.selected = 0;
        self.scroll = 0;
        self.view = match self.controller.refresh(&self.path_input, self.show_full_path) {
            Ok(view) => ViewState::Tree(view),
            Err(err) => {
                tracing::info!(input = %self.path_input, error = %err, "refresh rejected");
                ViewState::Message {
                    is_error: !matches!(err, RefreshError::Empty),
                    text: err.to_string(),
                }
            }
        };
    }

    /// Number of lines in the tree area, root line included.
    pub fn line_count(&self) -> usize {
        match &self.view {
            ViewState::Tree(view) => flatten(&view.root, &self.collapsed).len() + 1,
            ViewState::Message { .. } => 1,
        }
    }

    /// Path of the selected directory, if it has children to fold.
    fn selected_dir(&self) -> Option<PathBuf> {
        let ViewState::Tree(view) = &self.view else {
            return None;
        };
        let index = self.selected.checked_sub(1)?;
        let rows = flatten(&view.root, &self.collapsed);
        let row = rows.get(index)?;
        if !row.is_expandable() {
            return None;
        }
        row.node.path().map(Path::to_path_buf)
    }

    pub fn toggle_selected(&mut self) {
        if let Some(path) = self.selected_dir() {
            if !self.collapsed.remove(&path) {
                self.collapsed.insert(path);
            }
        }
    }

    pub fn collapse_selected(&mut self) {
        if let Some(path) = self.selected_dir() {
            self.collapsed.insert(path);
        }
    }

    pub fn expand_selected(&mut self) {
        if let Some(path) = self.selected_dir() {
            self.collapsed.remove(&path);
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let last = self.line_count().saturating_sub(1);
        let next = self.selected.saturating_add_signed(delta);
        self.selected = next.min(last);
    }

    fn page(&self) -> isize {
        self.viewport_height.max(1) as isize
    }

    /// Record the tree area height and scroll so the selection is visible.
    pub fn ensure_visible(&mut self, height: usize) {
        self.viewport_height = height;
        self.selected = self.selected.min(self.line_count().saturating_sub(1));
        if height == 0 {
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + height {
            self.scroll = self.selected + 1 - height;
        }
    }

    /// Hide the chrome; the event loop captures the next frame.
    pub fn begin_screenshot(&mut self) {
        self.chrome_visible = false;
        self.screenshot = ScreenshotPhase::Capture;
    }

    /// Restore the chrome after a capture and report the result.
    pub fn finish_screenshot(&mut self, result: io::Result<()>) {
        self.chrome_visible = true;
        self.screenshot = ScreenshotPhase::Idle;
        self.status = Some(match result {
            Ok(()) => Status {
                text: format!(
                    "Clean screenshot saved to {}",
                    self.screenshot_path.display()
                ),
                is_error: false,
            },
            Err(err) => {
                tracing::warn!(path = %self.screenshot_path.display(), error = %err, "screenshot failed");
                Status {
                    text: format!("Screenshot failed: {err}"),
                    is_error: true,
                }
            }
        });
    }

    fn open_picker(&mut self) {
        let start = resolve_input(&self.path_input).or_else(|| std::env::current_dir().ok());
        let Some(start) = start else {
            self.set_error("Cannot determine a directory to browse from.".to_string());
            return;
        };
        match DirPicker::new(&start) {
            Ok(picker) => self.mode = Mode::Picker(picker),
            Err(err) => self.set_error(format!("{}: {}", start.display(), err)),
        }
    }

    fn set_error(&mut self, text: String) {
        self.status = Some(Status {
            text,
            is_error: true,
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.mode {
            Mode::Tree => self.handle_tree_key(key),
            Mode::EditPath { .. } => self.handle_edit_key(key),
            Mode::Picker(_) => self.handle_picker_key(key),
        }
    }

    fn handle_tree_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('e') | KeyCode::Char('/') => {
                self.mode = Mode::EditPath {
                    backup: self.path_input.clone(),
                };
            }
            KeyCode::Char('v') | KeyCode::F(5) => self.refresh(),
            KeyCode::Char('f') => {
                self.show_full_path = !self.show_full_path;
                self.refresh();
            }
            KeyCode::Char('b') => self.open_picker(),
            KeyCode::Char('s') => self.begin_screenshot(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-self.page()),
            KeyCode::PageDown => self.move_selection(self.page()),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.line_count().saturating_sub(1),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Left | KeyCode::Char('h') => self.collapse_selected(),
            KeyCode::Right | KeyCode::Char('l') => self.expand_selected(),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
            self.path_input.clear();
            return;
        }
        match key.code {
            KeyCode::Enter => {
                self.mode = Mode::Tree;
                self.refresh();
            }
            KeyCode::Esc => {
                if let Mode::EditPath { backup } = std::mem::replace(&mut self.mode, Mode::Tree) {
                    self.path_input = backup;
                }
            }
            KeyCode::Backspace => {
                self.path_input.pop();
            }
            KeyCode::Char(c) => self.path_input.push(c),
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let Mode::Picker(picker) = &mut self.mode else {
            return;
        };
        let outcome = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                picker.move_up();
                PickerOutcome::Pending
            }
            KeyCode::Down | KeyCode::Char('j') => {
                picker.move_down();
                PickerOutcome::Pending
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                picker.enter();
                PickerOutcome::Pending
            }
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                picker.go_up();
                PickerOutcome::Pending
            }
            KeyCode::Char(' ') | KeyCode::Char('s') => picker.choose(),
            KeyCode::Esc | KeyCode::Char('q') => PickerOutcome::Cancelled,
            _ => PickerOutcome::Pending,
        };

        match outcome {
            PickerOutcome::Pending => {}
            PickerOutcome::Chosen(path) => {
                self.mode = Mode::Tree;
                self.path_input = path.to_string_lossy().into_owned();
                self.refresh();
            }
            PickerOutcome::Cancelled => self.mode = Mode::Tree,
        }
    }
}
