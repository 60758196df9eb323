use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use crate::app::{App, AppEvent};

/// Longest wait for a key press between ticks.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Waits for a crossterm key press and maps it to an `AppEvent`.
pub fn poll(timeout: Duration) -> Result<Option<AppEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(AppEvent::KeyPress(key.code)));
            }
        }
    }
    Ok(None)
}

/// Runs the main event loop.
///
/// Every pass ends with a tick, even while the user is typing, so the
/// server poll timer keeps running. Its cadence is rounded up to the tick
/// rate.
pub fn run(app: &mut App, terminal: &mut crate::tui::Terminal) -> Result<()> {
    while app.running {
        terminal.draw(|frame| crate::ui::draw(frame, app))?;

        if let Some(event) = poll(TICK_RATE)? {
            app.update(event);
        }
        app.update(AppEvent::Tick);
    }
    Ok(())
}
