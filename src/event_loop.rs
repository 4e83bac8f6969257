//! Main event loop: draws frames, runs screenshot captures, dispatches keys.

use crate::app::{App, ScreenshotPhase};
use crate::export::save_screenshot;
use crate::tree::TreeBuilder;
use crate::ui;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::io;
use std::time::Duration;

/// How long to wait for input before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Draw the current state. If a screenshot is pending, the frame just drawn
/// (with chrome hidden) is written out and the restored UI drawn right after.
pub fn draw_frame<B: Backend, T: TreeBuilder>(
    terminal: &mut Terminal<B>,
    app: &mut App<T>,
) -> io::Result<()> {
    let completed = terminal.draw(|frame| ui::draw(frame, app))?;
    if app.screenshot == ScreenshotPhase::Capture {
        let result = save_screenshot(completed.buffer, &app.screenshot_path);
        app.finish_screenshot(result);
        terminal.draw(|frame| ui::draw(frame, app))?;
    }
    Ok(())
}

/// Run the application loop. Blocks until the user quits.
pub fn run<B: Backend, T: TreeBuilder>(terminal: &mut Terminal<B>, app: &mut App<T>) -> io::Result<()> {
    while !app.should_quit {
        draw_frame(terminal, app)?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            // The next draw picks up the new size.
            Event::Resize(_, _) => {}
            _ => {}
        }
    }
    Ok(())
}
