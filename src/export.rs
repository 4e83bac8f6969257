//! Clean screenshot export: a captured frame buffer written as text.

use ratatui::buffer::Buffer;
use std::io;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Default screenshot file name.
pub const DEFAULT_SCREENSHOT_FILE: &str = "directory_structure.txt";

/// Convert a rendered buffer into text: one line per row, trailing spaces
/// trimmed, trailing blank rows dropped.
///
/// Cells covered by a preceding wide glyph are skipped so emoji are not
/// followed by padding.
pub fn buffer_to_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut lines: Vec<String> = Vec::with_capacity(area.height as usize);

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        let mut skip = 0usize;
        for x in area.left()..area.right() {
            if skip > 0 {
                skip -= 1;
                continue;
            }
            let symbol = buffer[(x, y)].symbol();
            line.push_str(symbol);
            skip = symbol.width().saturating_sub(1);
        }
        lines.push(line.trim_end().to_string());
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Write a captured frame to `path`.
pub fn save_screenshot(buffer: &Buffer, path: &Path) -> io::Result<()> {
    std::fs::write(path, buffer_to_text(buffer))?;
    tracing::info!(path = %path.display(), "screenshot saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    #[test]
    fn trims_trailing_space_and_blank_rows() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 10, 4));
        buffer.set_string(0, 0, "root", Style::default());
        buffer.set_string(2, 1, "child", Style::default());
        assert_eq!(buffer_to_text(&buffer), "root\n  child\n");
    }

    #[test]
    fn wide_glyphs_are_not_padded() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 12, 1));
        buffer.set_string(0, 0, "📁 src", Style::default());
        assert_eq!(buffer_to_text(&buffer), "📁 src\n");
    }

    #[test]
    fn saves_to_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join(DEFAULT_SCREENSHOT_FILE);
        let mut buffer = Buffer::empty(Rect::new(0, 0, 5, 1));
        buffer.set_string(0, 0, "tree", Style::default());
        save_screenshot(&buffer, &out).unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "tree\n");
    }
}
