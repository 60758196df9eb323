use std::time::Instant;

use chrono::{DateTime, Local};
use crossterm::event::KeyCode;

use crate::sync::{
    Command, CycleReport, DaySummary, Dispatcher, Gesture, PollLoop, Registry, Submission,
    SyncError,
};

use super::{ActivityBoard, AppEvent, AppView, FocusMode};

/// What a footer message reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    /// Cleared by the next applied snapshot.
    SyncFailure,
}

/// The top-level application state.
///
/// The registry and the board are only touched here, on the UI thread, and
/// always together.
pub struct App {
    pub running: bool,
    pub view: AppView,
    pub focus_mode: FocusMode,
    pub board: ActivityBoard,
    pub summary: Option<DaySummary>,
    pub create_input: String,
    pub status: Option<(StatusKind, String)>,
    pub last_sync: Option<DateTime<Local>>,
    registry: Registry,
    poller: PollLoop,
    dispatcher: Dispatcher,
}

impl App {
    pub fn new(poller: PollLoop, dispatcher: Dispatcher) -> Self {
        Self {
            running: true,
            view: AppView::Board,
            focus_mode: FocusMode::Activities,
            board: ActivityBoard::new(),
            summary: None,
            create_input: String::new(),
            status: None,
            last_sync: None,
            registry: Registry::new(),
            poller,
            dispatcher,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Central update function - process an event and mutate state.
    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => {
                self.poller.poll_if_due(Instant::now());
            }
            AppEvent::KeyPress(key) => self.handle_key(key),
        }
        self.sync_board();
    }

    /// Applies every completed fetch to the registry and the board.
    pub fn sync_board(&mut self) {
        for report in self.poller.drain(&mut self.registry) {
            self.apply_report(report);
        }
    }

    fn apply_report(&mut self, report: CycleReport) {
        match report {
            CycleReport::Applied {
                summary,
                instructions,
                ..
            } => {
                for instruction in &instructions {
                    self.board.apply(instruction);
                }
                self.summary = Some(summary);
                self.last_sync = Some(Local::now());
                if matches!(self.status, Some((StatusKind::SyncFailure, _))) {
                    self.status = None;
                }
            }
            CycleReport::Stale { .. } => {}
            CycleReport::Failed { error, .. } => {
                self.status = Some((StatusKind::SyncFailure, format!("Sync failed: {error}")));
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.view == AppView::Help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.view = AppView::Board;
            }
            return;
        }
        if self.focus_mode == FocusMode::CreateInput {
            self.handle_create_key(key);
            return;
        }

        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => self.view = AppView::Help,
            KeyCode::Char('n') | KeyCode::Tab => self.focus_mode = FocusMode::CreateInput,
            KeyCode::Char('r') => {
                self.poller.poll_now(Instant::now());
            }
            KeyCode::Up | KeyCode::Char('k') => self.board.focus_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.board.focus_next(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_focused(),
            _ => {}
        }
    }

    fn handle_create_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Tab => self.focus_mode = FocusMode::Activities,
            KeyCode::Enter => self.submit_create_input(),
            KeyCode::Backspace => {
                self.create_input.pop();
            }
            KeyCode::Char(ch) => {
                if ch.is_control() {
                    return;
                }
                self.create_input.push(ch);
            }
            _ => {}
        }
    }

    /// Toggles the focused control, reading its state from the board.
    fn toggle_focused(&mut self) {
        let Some(control) = self.board.focused() else {
            return;
        };
        let gesture = Gesture::Toggle {
            name: &control.name,
            currently_active: control.active,
        };
        let result = self.dispatcher.handle(gesture);
        self.report_dispatch(result);
    }

    fn submit_create_input(&mut self) {
        let result = self.dispatcher.handle(Gesture::Create {
            input: &mut self.create_input,
        });
        let sent = matches!(result, Ok((_, Submission::Sent)));
        self.report_dispatch(result);
        if sent {
            self.focus_mode = FocusMode::Activities;
        }
    }

    fn report_dispatch(&mut self, result: Result<(Command, Submission), SyncError>) {
        let text = match result {
            Ok((command, Submission::Sent)) => match command {
                Command::Start { name } => format!("Starting '{name}'"),
                Command::Stop { name } => format!("Stopping '{name}'"),
            },
            Ok((command, Submission::AlreadyPending)) => {
                format!("'{}' is already pending", command.name())
            }
            Err(SyncError::EmptyActivityName) => "Type a name for the new activity".to_string(),
            Err(err) => err.to_string(),
        };
        self.status = Some((StatusKind::Info, text));
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|(_, text)| text.as_str())
    }
}
