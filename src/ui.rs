//! Frame layout: chrome (header, controls, status, help) above the tree area.

use crate::app::{App, Mode, ViewState};
use crate::classify::{COLOR_HEADER, COLOR_HINT};
use crate::picker::DirPicker;
use crate::render::{self, rgb, sanitize_terminal_text, RenderConfig};
use crate::tree::TreeBuilder;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListState, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

pub const TITLE: &str = "Directory Visualizer";
const PATH_LABEL: &str = "Path: ";
const PATH_PLACEHOLDER: &str = "Enter directory path...";

const TREE_HELP: &str =
    " q: Quit  |  e: Edit path  |  b: Browse  |  v: Visualize  |  f: Full path  |  s: Screenshot  |  ↑↓/jk  Enter: Fold";
const EDIT_HELP: &str = " Enter: Visualize  |  Esc: Cancel  |  Ctrl-U: Clear";
const PICKER_HELP: &str =
    " ↑↓: Select  |  Enter: Open  |  Backspace: Up  |  Space: Choose this directory  |  Esc: Cancel";

const SELECTED_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Draw one frame. The tree area fills the whole frame while chrome is hidden.
pub fn draw<B: TreeBuilder>(frame: &mut Frame, app: &mut App<B>) {
    let area = frame.area();
    let tree_area = if app.chrome_visible {
        let [header, path, options, status, help, separator, tree] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);
        draw_header(frame, header);
        draw_path_input(frame, app, path);
        draw_options(frame, app, options);
        draw_status(frame, app, status);
        draw_help(frame, app, help);
        frame.render_widget(
            Paragraph::new(Line::styled(
                "\u{2500}".repeat(separator.width as usize),
                Style::new().fg(Color::DarkGray),
            )),
            separator,
        );
        tree
    } else {
        area
    };

    app.ensure_visible(tree_area.height as usize);
    draw_tree(frame, app, tree_area);

    if let Mode::Picker(picker) = &app.mode {
        draw_picker(frame, picker, tree_area, &app.render_config);
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let style = Style::new()
        .fg(rgb(COLOR_HEADER))
        .add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(Line::styled(TITLE, style)), area);
}

fn draw_path_input<B: TreeBuilder>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let editing = matches!(app.mode, Mode::EditPath { .. });
    let input = sanitize_terminal_text(&app.path_input);
    let value = if input.is_empty() && !editing {
        Span::styled(PATH_PLACEHOLDER, Style::new().fg(rgb(COLOR_HINT)))
    } else if editing {
        Span::styled(input.clone(), Style::new().add_modifier(Modifier::UNDERLINED))
    } else {
        Span::raw(input.clone())
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![Span::raw(PATH_LABEL), value])),
        area,
    );

    if editing {
        let offset = (PATH_LABEL.width() + input.width()).min(u16::MAX as usize) as u16;
        let x = area.x.saturating_add(offset).min(area.right().saturating_sub(1));
        frame.set_cursor_position((x, area.y));
    }
}

fn draw_options<B: TreeBuilder>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let checkbox = format!(
        "[{}] Show Full Path",
        if app.show_full_path { "x" } else { " " }
    );
    let line = Line::from(vec![
        Span::raw(checkbox),
        Span::styled(
            "  (press f to change the root label)",
            Style::new().fg(rgb(COLOR_HINT)),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_status<B: TreeBuilder>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let line = match (&app.status, &app.view) {
        (Some(status), _) => render::status_line(&status.text, status.is_error, &app.render_config),
        (None, ViewState::Tree(view)) => Line::styled(
            view.stats.to_string(),
            Style::new().fg(rgb(COLOR_HINT)),
        ),
        (None, ViewState::Message { .. }) => Line::default(),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_help<B: TreeBuilder>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let text = match app.mode {
        Mode::Tree => TREE_HELP,
        Mode::EditPath { .. } => EDIT_HELP,
        Mode::Picker(_) => PICKER_HELP,
    };
    frame.render_widget(Paragraph::new(render::help_line(text)), area);
}

fn draw_tree<B: TreeBuilder>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let lines = match &app.view {
        ViewState::Tree(view) => render::tree_lines(view, &app.collapsed, &app.render_config),
        ViewState::Message { text, is_error } => {
            vec![render::message_line(text, *is_error, &app.render_config)]
        }
    };

    let highlight = app.chrome_visible && matches!(app.mode, Mode::Tree);
    let visible: Vec<Line<'static>> = lines
        .into_iter()
        .enumerate()
        .skip(app.scroll)
        .take(area.height as usize)
        .map(|(index, line)| {
            if highlight && index == app.selected {
                line.patch_style(SELECTED_STYLE)
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(visible), area);
}

fn draw_picker(frame: &mut Frame, picker: &DirPicker, area: Rect, config: &RenderConfig) {
    if area.width < 4 || area.height < 3 {
        return;
    }
    let title = format!(
        " Select directory: {} ",
        sanitize_terminal_text(&picker.current().to_string_lossy())
    );
    let block = Block::bordered().title(title);
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let [list_area, error_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let rows: Vec<String> = picker
        .rows()
        .iter()
        .map(|row| sanitize_terminal_text(row))
        .collect();
    let list = List::new(rows).highlight_style(SELECTED_STYLE);
    let mut state = ListState::default().with_selected(Some(picker.selected()));
    frame.render_stateful_widget(list, list_area, &mut state);

    if let Some(error) = &picker.error {
        frame.render_widget(
            Paragraph::new(render::status_line(error, true, config)),
            error_area,
        );
    }
}
