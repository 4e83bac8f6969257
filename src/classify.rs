//! File classification: extension → icon glyph and display color.

use std::path::Path;

/// An RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const COLOR_DEFAULT: Rgb = Rgb(200, 200, 220);
pub const COLOR_PYTHON: Rgb = Rgb(75, 150, 230);
pub const COLOR_IMAGE: Rgb = Rgb(180, 100, 255);
pub const COLOR_DATA: Rgb = Rgb(100, 220, 120);
pub const COLOR_WEB: Rgb = Rgb(240, 200, 80);
pub const COLOR_ARCHIVE: Rgb = Rgb(180, 180, 180);
pub const COLOR_PDF: Rgb = Rgb(230, 80, 80);
pub const COLOR_EXECUTABLE: Rgb = Rgb(160, 160, 160);

/// Root label color, slightly different from regular directories.
pub const COLOR_ROOT: Rgb = Rgb(120, 200, 255);
pub const COLOR_ERROR: Rgb = Rgb(255, 50, 50);
pub const COLOR_HEADER: Rgb = Rgb(100, 200, 255);
pub const COLOR_HINT: Rgb = Rgb(150, 150, 150);
pub const COLOR_STATUS: Rgb = Rgb(100, 255, 100);

pub const ICON_FOLDER: &str = "📁";
pub const ICON_ROOT: &str = "📂";
pub const ICON_ACCESS_DENIED: &str = "🚫";
pub const ICON_ERROR: &str = "⚠️";

/// Broad file categories, one per row of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Python,
    Image,
    Data,
    Web,
    Text,
    Spreadsheet,
    Archive,
    Pdf,
    Executable,
    Other,
}

/// Ordered rule table; the first row containing the extension wins.
const RULES: &[(&[&str], FileKind)] = &[
    (&[".py"], FileKind::Python),
    (
        &[".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".webp"],
        FileKind::Image,
    ),
    (&[".json", ".xml", ".yaml", ".yml", ".toml"], FileKind::Data),
    (&[".html", ".css", ".js", ".ts"], FileKind::Web),
    (&[".txt", ".md", ".rst"], FileKind::Text),
    (&[".ods", ".xlsx", ".csv", ".xls"], FileKind::Spreadsheet),
    (&[".zip", ".rar", ".7z", ".tar", ".gz"], FileKind::Archive),
    (&[".pdf"], FileKind::Pdf),
    (&[".exe", ".bat", ".ps1"], FileKind::Executable),
];

impl FileKind {
    pub fn icon(self) -> &'static str {
        match self {
            FileKind::Python => "🐍",
            FileKind::Image => "🖼️",
            FileKind::Data => "{}",
            FileKind::Web => "🌐",
            FileKind::Text => "📝",
            FileKind::Spreadsheet => "📊",
            FileKind::Archive => "📦",
            FileKind::Pdf => "📕",
            FileKind::Executable => "⚙️",
            FileKind::Other => "📄",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            FileKind::Python => COLOR_PYTHON,
            FileKind::Image => COLOR_IMAGE,
            FileKind::Data | FileKind::Spreadsheet => COLOR_DATA,
            FileKind::Web => COLOR_WEB,
            FileKind::Text | FileKind::Other => COLOR_DEFAULT,
            FileKind::Archive => COLOR_ARCHIVE,
            FileKind::Pdf => COLOR_PDF,
            FileKind::Executable => COLOR_EXECUTABLE,
        }
    }
}

/// Classify a file by its extension.
///
/// Matching is case-insensitive. The extension is expected in its dotted form
/// (`".py"`); a bare `"py"` is accepted as well. Unknown extensions, including
/// the empty string, map to [`FileKind::Other`].
pub fn classify(extension: &str) -> FileKind {
    if extension.is_empty() {
        return FileKind::Other;
    }
    let lowered = extension.to_lowercase();
    let dotted = if lowered.starts_with('.') {
        lowered
    } else {
        format!(".{lowered}")
    };

    RULES
        .iter()
        .find(|(extensions, _)| extensions.contains(&dotted.as_str()))
        .map(|(_, kind)| *kind)
        .unwrap_or(FileKind::Other)
}

/// Lowercased final suffix of `name`, including the leading dot.
///
/// Returns an empty string when there is no suffix: `"Makefile"`,
/// `".bashrc"` and `"notes."` all yield `""`.
pub fn extension_key(name: &str) -> String {
    match Path::new(name).extension() {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_string_lossy().to_lowercase()),
        _ => String::new(),
    }
}
