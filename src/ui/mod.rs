mod board;
mod help;
mod helpers;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, AppView, FocusMode, StatusKind};
use theme::Theme;

/// Renders the entire UI for a single frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let header_lines = vec![Line::from(vec![
        Span::styled(
            "  Timeboard  ",
            Style::default().fg(Color::Black).bg(Theme::primary()),
        ),
        Span::raw(" "),
        Span::styled(
            "time tracker",
            Style::default()
                .fg(Theme::secondary())
                .add_modifier(Modifier::BOLD),
        ),
    ])];
    let header = Paragraph::new(Text::from(header_lines))
        .alignment(Alignment::Left)
        .block(rounded_block());
    frame.render_widget(header, layout[0]);

    let (title, mut body_lines) = match app.view {
        AppView::Board => (" Today ", board::build_board_text(app).lines),
        AppView::Help => (" Help ", help::build_help_text().lines),
    };
    body_lines.push(Line::from(""));
    body_lines.push(Line::from(Span::styled(
        "----------------------------------------",
        Style::default().fg(Theme::dim()),
    )));
    body_lines.push(keybinds_line(app));
    let body = Paragraph::new(Text::from(body_lines))
        .style(Style::default().fg(Theme::text()))
        .alignment(Alignment::Left)
        .block(rounded_block().title(title));
    frame.render_widget(body, layout[1]);

    frame.render_widget(create_input(app), layout[2]);

    let footer = Paragraph::new(Text::from(status_line(app)))
        .alignment(Alignment::Left)
        .block(rounded_block());
    frame.render_widget(footer, layout[3]);
}

fn rounded_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Theme::secondary()))
}

fn create_input(app: &App) -> Paragraph<'_> {
    let focused = app.focus_mode == FocusMode::CreateInput;
    let text_style = if focused {
        Style::default()
            .fg(Theme::text())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::dim())
    };
    let mut spans = vec![Span::styled(app.create_input.as_str(), text_style)];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Theme::highlight())));
    } else if app.create_input.is_empty() {
        spans.push(Span::styled(
            "press n to start a new activity",
            Style::default().fg(Theme::dim()),
        ));
    }
    let border = if focused {
        Theme::highlight()
    } else {
        Theme::secondary()
    };
    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(border))
            .title(" New activity "),
    )
}

fn status_line(app: &App) -> Line<'_> {
    let mut spans = Vec::new();
    match &app.status {
        Some((StatusKind::SyncFailure, text)) => {
            spans.push(Span::styled(
                text.as_str(),
                Style::default()
                    .fg(Theme::warn())
                    .add_modifier(Modifier::BOLD),
            ));
        }
        Some((StatusKind::Info, text)) => {
            spans.push(Span::styled(text.as_str(), Style::default().fg(Theme::text())));
        }
        None => {}
    }
    match app.last_sync {
        Some(at) => {
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                format!("synced {}", at.format("%H:%M:%S")),
                Style::default().fg(Theme::dim()),
            ));
        }
        None if spans.is_empty() => {
            spans.push(Span::styled(
                "● Waiting for server",
                Style::default().fg(Theme::dim()),
            ));
        }
        None => {}
    }
    Line::from(spans)
}

fn keybinds_line(app: &App) -> Line<'static> {
    let hint = match (&app.view, app.focus_mode) {
        (AppView::Help, _) => "Press ? or ESC to close this help screen",
        (AppView::Board, FocusMode::CreateInput) => "Type a name  Enter: Start  Esc: Back",
        (AppView::Board, FocusMode::Activities) => {
            "Up/Down: Select  space: Start/Stop  n: New  r: Refresh  ?: Help  q: Quit"
        }
    };
    Line::from(Span::styled(hint, Style::default().fg(Theme::dim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppEvent;
    use crate::sync::testing::{RecordingSink, ScriptedTransport};
    use crate::sync::{Dispatcher, FixedDate, PollLoop};
    use crossterm::event::KeyCode;
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn app_after_one_poll() -> App {
        let transport = ScriptedTransport::new(vec![Ok(json!({
            "start_time_pretty": "start time:         2024-03-05 08:00:00",
            "day_length": "07h:30m",
            "total_activity_time": "01h:10m",
            "time_left": "06h:20m",
            "activities": [
                {"name": "Reading", "logged_pretty": "00h:10m", "status": "Idle"},
                {"name": "Coding", "logged_pretty": "01h:00m", "status": "Working"},
            ],
        }))]);
        let poller = PollLoop::new(
            Arc::new(transport),
            Box::new(FixedDate("2024-03-05".to_string())),
            Duration::from_millis(750),
        );
        let mut app = App::new(poller, Dispatcher::new(Box::new(RecordingSink::default())));
        app.update(AppEvent::KeyPress(KeyCode::Char('r')));
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.last_sync.is_none() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            app.sync_board();
        }
        app
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|frame| draw(frame, app)).expect("draw");
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn renders_header_and_controls() {
        let app = app_after_one_poll();
        let screen = render(&app);
        assert!(screen.contains("Timeboard"));
        assert!(screen.contains("07h:30m"));
        assert!(screen.contains("06h:20m"));
        assert!(screen.contains("Reading - 00h:10m"));
        assert!(screen.contains("Coding - 01h:00m"));
        assert!(screen.contains("synced"));
    }

    #[test]
    fn renders_help() {
        let mut app = app_after_one_poll();
        app.update(AppEvent::KeyPress(KeyCode::Char('?')));
        let screen = render(&app);
        assert!(screen.contains("Key bindings"));
        assert!(!screen.contains("Reading - 00h:10m"));
    }

    #[test]
    fn renders_creation_input_text() {
        let mut app = app_after_one_poll();
        app.update(AppEvent::KeyPress(KeyCode::Char('n')));
        for ch in "Review".chars() {
            app.update(AppEvent::KeyPress(KeyCode::Char(ch)));
        }
        let screen = render(&app);
        assert!(screen.contains("Review_"));
    }
}
