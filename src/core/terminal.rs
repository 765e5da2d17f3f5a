//! Terminal rendering and event loop for mdp.
//!
//! Handles setup/teardown of raw mode, alternate screen, redraws,
//! and events (keypress, resize) to the pager.

use crate::app::{KeypressResult, Pager};
use crate::ui;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::{io, time::Duration};

/// Initializes the terminal in raw mode and alternate screen and runs the event loop.
///
/// Blocks until quit.
///
/// Returns an std::io::Error if terminal setup or teardown fails.
pub fn run_terminal(pager: &mut Pager) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, pager);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    result
}

/// Main event loop: draws the pager, polls for events and dispatches them.
/// Returns on quit
fn event_loop<B: Backend>(terminal: &mut Terminal<B>, pager: &mut Pager) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    let mut changed = true;
    loop {
        if changed {
            terminal.draw(|f| ui::render(f, pager))?;
            changed = false;
        }

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match pager.handle_keypress(key) {
                        KeypressResult::Quit => break,
                        KeypressResult::Consumed => changed = true,
                        KeypressResult::Continue => {}
                    }
                }

                // the next draw reports the new pane size, which re-flows tables
                Event::Resize(_, _) => changed = true,

                _ => {}
            }
        }
    }
    Ok(())
}
