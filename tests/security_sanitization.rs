use dirviz::controller::TreeView;
use dirviz::render::{line_to_plain_text, plain_text, status_line, tree_lines, RenderConfig};
use dirviz::tree::{DirNode, Entry, Marker, TreeNode};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;

fn hostile_view() -> TreeView {
    let mut root = DirNode::new(Entry::directory(
        Path::new("/tmp/root"),
        OsStr::new("root"),
        false,
    ));
    let mut dir = DirNode::new(Entry::directory(
        Path::new("/tmp/root/dir"),
        OsStr::new("dir\u{001B}]0;title\u{0007}"),
        false,
    ));
    dir.children.push(TreeNode::Marker(Marker::Error(
        "bad\tinput\nvalue\r".to_string(),
    )));
    root.children.push(TreeNode::Dir(dir));
    root.children.push(TreeNode::File(Entry::file(
        Path::new("/tmp/root/evil"),
        OsStr::new("evil\u{001B}[31mname\twith\ncontrols.txt"),
        true,
    )));
    let stats = root.stats();
    TreeView {
        root_label: "label\u{001B}[2J".to_string(),
        root,
        stats,
    }
}

fn assert_clean(text: &str) {
    assert!(!text.contains('\u{001B}'), "raw ESC in {text:?}");
    assert!(!text.contains('\u{0007}'), "raw BEL in {text:?}");
    assert!(!text.contains('\r'), "raw CR in {text:?}");
    assert!(!text.contains('\t'), "raw TAB in {text:?}");
}

#[test]
fn test_terminal_control_chars_are_sanitized_in_rendered_output() {
    let view = hostile_view();
    for use_color in [false, true] {
        let lines = tree_lines(&view, &HashSet::new(), &RenderConfig { use_color });
        assert_eq!(lines.len(), 4);
        for line in &lines {
            let text = line_to_plain_text(line);
            assert_clean(&text);
            assert!(!text.contains('\n'));
        }
    }

    let lines = tree_lines(&view, &HashSet::new(), &RenderConfig { use_color: false });
    let rendered: Vec<String> = lines.iter().map(line_to_plain_text).collect();

    // Escaped forms stay visible.
    assert!(rendered[0].contains("label\\x1B[2J"));
    assert!(rendered[1].contains("dir\\x1B]0;title\\x07"));
    assert!(rendered[2].contains("bad\\tinput\\nvalue\\r"));
    assert!(rendered[3].contains("evil\\x1B[31mname\\twith\\ncontrols.txt"));
}

#[test]
fn test_plain_text_output_is_sanitized() {
    let text = plain_text(&hostile_view());
    assert_clean(&text);
    // One newline per row, none smuggled in by names.
    assert_eq!(text.matches('\n').count(), 4);
}

#[test]
fn test_status_line_is_sanitized() {
    let line = status_line(
        "/tmp/\u{001B}[2Jpath\tsaved\nnow\r",
        true,
        &RenderConfig { use_color: true },
    );
    let text = line_to_plain_text(&line);
    assert_clean(&text);
    assert!(!text.contains('\n'));
    assert!(text.contains("\\x1B[2J"));
}

#[test]
fn test_unicode_format_controls_are_kept() {
    // Non-control code points such as zero-width joiners pass through untouched.
    let line = status_line("a\u{200D}b", false, &RenderConfig { use_color: false });
    assert_eq!(line_to_plain_text(&line), "a\u{200D}b");
}
