use crate::export::DEFAULT_SCREENSHOT_FILE;
use clap::Parser;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  dirviz                      Visualize the current directory
  dirviz ~/projects/app       Visualize another directory
  dirviz --full-path -L 2 .   Label the root with its full path, two levels deep
  dirviz --print src          Print the tree to stdout and exit";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dirviz",
    version,
    about = "Directory visualizer: a collapsible, color-coded tree with clean screenshots",
    after_help = EXAMPLES
)]
pub struct Args {
    /// Directory to visualize (default: current directory). Kept as text so an
    /// empty value reaches path validation.
    pub path: Option<String>,

    /// Label the root with its full path instead of its name
    #[arg(long = "full-path")]
    pub full_path: bool,

    /// Max display depth
    #[arg(short = 'L', long = "level")]
    pub max_depth: Option<usize>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Print the tree to stdout and exit instead of opening the viewer
    #[arg(long = "print")]
    pub print: bool,

    /// File the clean screenshot is written to
    #[arg(long = "screenshot-file", default_value = DEFAULT_SCREENSHOT_FILE)]
    pub screenshot_file: PathBuf,

    /// Write logs to this file (the viewer never logs to the screen)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        if self.max_depth == Some(0) {
            self.max_depth = Some(1);
        }
        if self.quiet {
            self.verbose = 0;
        }
        // Respect NO_COLOR env var
        if std::env::var_os("NO_COLOR").is_some() {
            self.no_color = true;
        }
        self
    }
}
