mod board;
mod state;

use crossterm::event::KeyCode;

pub use board::{ActivityBoard, Control};
pub use state::{App, StatusKind};

/// Possible input events the app reacts to.
pub enum AppEvent {
    Tick,
    KeyPress(KeyCode),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppView {
    Board,
    Help,
}

/// Where key presses go on the board view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusMode {
    Activities,
    CreateInput,
}
