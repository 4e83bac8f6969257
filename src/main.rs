#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use dirviz::app::{App, AppOptions};
use dirviz::cli::Args;
use dirviz::controller::Controller;
use dirviz::logging::{self, LogTarget};
use dirviz::render::{self, RenderConfig};
use dirviz::tree::TreeConfig;
use dirviz::{event_loop, terminal};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("dirviz: {e:#}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();

    let log_target = match (&args.log_file, args.print) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Discard,
    };
    logging::init(log_target, args.verbose, args.quiet)?;

    // The path box starts out with the working directory, like a fresh session.
    let input = match &args.path {
        Some(path) => path.clone(),
        None => std::env::current_dir()
            .context("failed to read current directory")?
            .to_string_lossy()
            .into_owned(),
    };

    let controller = Controller::new(TreeConfig {
        max_depth: args.max_depth,
    });

    if args.print {
        let view = controller.refresh(&input, args.full_path)?;
        print!("{}", render::plain_text(&view));
        println!("\n{}", view.stats);
        return Ok(());
    }

    let mut app = App::new(
        controller,
        input,
        AppOptions {
            show_full_path: args.full_path,
            screenshot_path: args.screenshot_file.clone(),
            render_config: RenderConfig {
                use_color: !args.no_color,
            },
        },
    );

    tracing::info!(path = %app.path_input, "starting viewer");
    let (mut term, _guard) = terminal::init().context("failed to initialize terminal")?;
    event_loop::run(&mut term, &mut app).context("terminal I/O failed")?;
    Ok(())
}
