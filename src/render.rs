//! Tree rendering using ratatui Line/Span styling.

use crate::classify::{Rgb, COLOR_ERROR, COLOR_ROOT, ICON_ACCESS_DENIED, ICON_ERROR, ICON_ROOT};
use crate::controller::TreeView;
use crate::tree::{flatten, Marker, Row, TreeNode};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use std::collections::HashSet;
use std::path::PathBuf;

/// Configuration for the rendering pipeline.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Whether to emit color styling.
    pub use_color: bool,
}

const PREFIX_STYLE: Style = Style::new().fg(Color::DarkGray);
const DIR_STYLE: Style = Style::new().fg(Color::Rgb(220, 220, 230)).add_modifier(Modifier::BOLD);
const NOTE_STYLE: Style = Style::new().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);

pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

/// Sanitize control characters to avoid terminal control-sequence injection.
pub fn sanitize_terminal_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let code = c as u32;
                if code <= 0xFF {
                    out.push_str(&format!("\\x{:02X}", code));
                } else {
                    out.push_str(&format!("\\u{{{:X}}}", code));
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn styled(text: String, style: Style, config: &RenderConfig) -> Span<'static> {
    if config.use_color {
        Span::styled(text, style)
    } else {
        Span::raw(text)
    }
}

/// The root line: open-folder glyph followed by the root label.
pub fn root_line(view: &TreeView, config: &RenderConfig) -> Line<'static> {
    let text = format!("{} {}", ICON_ROOT, sanitize_terminal_text(&view.root_label));
    let style = Style::new().fg(rgb(COLOR_ROOT)).add_modifier(Modifier::BOLD);
    Line::from(styled(text, style, config))
}

/// Convert a flattened row into a styled `Line`.
pub fn row_to_line(row: &Row<'_>, collapsed: &HashSet<PathBuf>, config: &RenderConfig) -> Line<'static> {
    let mut spans = vec![styled(row.prefix.clone(), PREFIX_STYLE, config)];

    match row.node {
        TreeNode::Dir(dir) => {
            let marker = if collapsed.contains(&dir.entry.path) && !dir.children.is_empty() {
                "\u{25b8}" // ▸
            } else {
                "\u{25be}" // ▾
            };
            let text = format!(
                "{} {} {}",
                marker,
                dir.entry.icon,
                sanitize_terminal_text(&dir.entry.name)
            );
            spans.push(styled(text, DIR_STYLE, config));
            if dir.cycle {
                spans.push(styled(" (already shown)".to_string(), NOTE_STYLE, config));
            }
        }
        TreeNode::File(entry) => {
            let text = format!("{}  {}", entry.icon, sanitize_terminal_text(&entry.name));
            spans.push(styled(text, Style::new().fg(rgb(entry.color)), config));
            if entry.broken_link {
                spans.push(styled(" (broken link)".to_string(), NOTE_STYLE, config));
            }
        }
        TreeNode::Marker(marker) => {
            let text = match marker {
                Marker::AccessDenied => format!("{} Access Denied", ICON_ACCESS_DENIED),
                Marker::Error(message) => {
                    format!("{} Error: {}", ICON_ERROR, sanitize_terminal_text(message))
                }
            };
            spans.push(styled(text, Style::new().fg(rgb(COLOR_ERROR)), config));
        }
    }

    Line::from(spans)
}

/// Root line followed by one line per visible row.
pub fn tree_lines(
    view: &TreeView,
    collapsed: &HashSet<PathBuf>,
    config: &RenderConfig,
) -> Vec<Line<'static>> {
    let rows = flatten(&view.root, collapsed);
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(root_line(view, config));
    lines.extend(rows.iter().map(|row| row_to_line(row, collapsed, config)));
    lines
}

/// Render the whole tree as plain text, one line per row.
pub fn plain_text(view: &TreeView) -> String {
    let config = RenderConfig { use_color: false };
    let mut out = String::new();
    for line in tree_lines(view, &HashSet::new(), &config) {
        out.push_str(&line_to_plain_text(&line));
        out.push('\n');
    }
    out
}

/// Build a styled status bar `Line`.
pub fn status_line(message: &str, is_error: bool, config: &RenderConfig) -> Line<'static> {
    let color = if is_error {
        rgb(COLOR_ERROR)
    } else {
        rgb(crate::classify::COLOR_STATUS)
    };
    Line::from(styled(sanitize_terminal_text(message), Style::new().fg(color), config))
}

/// Message shown in the tree area instead of a tree.
pub fn message_line(message: &str, is_error: bool, config: &RenderConfig) -> Line<'static> {
    let color = if is_error {
        rgb(COLOR_ERROR)
    } else {
        rgb(crate::classify::COLOR_HINT)
    };
    Line::from(styled(sanitize_terminal_text(message), Style::new().fg(color), config))
}

/// Build a help bar `Line` showing available keyboard shortcuts.
pub fn help_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), Style::new().fg(Color::DarkGray)))
}

/// Extract plain text from a `Line` (useful for testing).
pub fn line_to_plain_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
