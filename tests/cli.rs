mod common;

use assert_cmd::Command;
use clap::Parser;
use common::create_fixture;
use dirviz::cli::Args;
use predicates::prelude::*;
use std::path::PathBuf;

fn dirviz() -> Command {
    let mut cmd = Command::cargo_bin("dirviz").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_flag() {
    dirviz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Directory visualizer"))
        .stdout(predicate::str::contains("--full-path"))
        .stdout(predicate::str::contains("--level"))
        .stdout(predicate::str::contains("--print"))
        .stdout(predicate::str::contains("--screenshot-file"))
        .stdout(predicate::str::contains("--log-file"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn test_version_flag() {
    dirviz()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dirviz"));
}

#[test]
fn test_print_renders_tree_and_summary() {
    let tmp = create_fixture(&["src/main.py", "README.md"]);
    dirviz()
        .arg("--print")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("├── ▾ 📁 src"))
        .stdout(predicate::str::contains("│   └── 🐍  main.py"))
        .stdout(predicate::str::contains("└── 📝  README.md"))
        .stdout(predicate::str::contains("1 directory, 2 files"));
}

#[test]
fn test_print_root_label_uses_last_segment() {
    let tmp = create_fixture(&["project/a.txt"]);
    dirviz()
        .arg("--print")
        .arg(tmp.path().join("project"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("📂 project\n"));
}

#[test]
fn test_print_full_path_label() {
    let tmp = create_fixture(&["project/a.txt"]);
    let canonical = tmp.path().join("project").canonicalize().unwrap();
    dirviz()
        .args(["--print", "--full-path"])
        .arg(tmp.path().join("project"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "📂 {}\n",
            canonical.display()
        )));
}

#[test]
fn test_print_respects_level() {
    let tmp = create_fixture(&["a/b/deep.txt"]);
    dirviz()
        .args(["--print", "-L", "1"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("📁 a"))
        .stdout(predicate::str::contains("deep.txt").not());
}

#[test]
fn test_nonexistent_path_exits_with_error() {
    dirviz()
        .args(["--print", "/this/path/does/not/exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Path does not exist: /this/path/does/not/exist",
        ));
}

#[test]
fn test_file_path_exits_with_error() {
    let tmp = create_fixture(&["afile.txt"]);
    let file = tmp.path().join("afile.txt");
    dirviz()
        .arg("--print")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path is not a directory"));
}

#[test]
fn test_empty_path_exits_with_error() {
    dirviz()
        .args(["--print", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a valid path."));
}

#[test]
fn test_log_file_is_written() {
    let tmp = create_fixture(&["tree/a.txt"]);
    let log = tmp.path().join("run.log");
    dirviz()
        .args(["--print", "-v"])
        .arg("--log-file")
        .arg(&log)
        .arg(tmp.path().join("tree"))
        .assert()
        .success();
    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("visualized"), "log was: {contents}");
}

#[test]
fn test_args_defaults() {
    let args = Args::try_parse_from(["dirviz"]).unwrap();
    assert_eq!(args.path, None);
    assert!(!args.full_path);
    assert_eq!(args.max_depth, None);
    assert_eq!(
        args.screenshot_file,
        PathBuf::from("directory_structure.txt")
    );
}

#[test]
fn test_args_accept_empty_path() {
    let args = Args::try_parse_from(["dirviz", ""]).unwrap();
    assert_eq!(args.path.as_deref(), Some(""));
}

#[test]
fn test_args_level_zero_is_clamped() {
    let args = Args::try_parse_from(["dirviz", "-L", "0"]).unwrap().validated();
    assert_eq!(args.max_depth, Some(1));
}

#[test]
fn test_args_quiet_resets_verbosity() {
    let args = Args::try_parse_from(["dirviz", "-vvv", "-q"]).unwrap().validated();
    assert_eq!(args.verbose, 0);
    assert!(args.quiet);
}
