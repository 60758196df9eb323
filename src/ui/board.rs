use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, or_placeholder};
use super::theme::Theme;
use crate::app::{App, FocusMode};

pub fn build_board_text(app: &App) -> Text<'_> {
    let mut lines = Vec::new();

    // Day summary section
    let summary = app.summary.clone().unwrap_or_default();
    lines.push(Line::from(vec![
        Span::styled("  Start: ", Style::default().fg(Theme::dim())),
        Span::styled(
            or_placeholder(&summary.start_time_pretty),
            Style::default().fg(Theme::text()),
        ),
        Span::raw("  "),
        Span::styled("Day: ", Style::default().fg(Theme::dim())),
        Span::styled(
            or_placeholder(&summary.day_length),
            Style::default().fg(Theme::accent()),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Logged: ", Style::default().fg(Theme::dim())),
        Span::styled(
            or_placeholder(&summary.total_activity_time),
            Style::default().fg(Theme::accent()),
        ),
        Span::raw("  "),
        Span::styled("Left: ", Style::default().fg(Theme::dim())),
        Span::styled(
            or_placeholder(&summary.time_left),
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "  Activities",
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "  ───────────",
        Style::default().fg(Theme::dim()),
    )));

    if app.board.is_empty() {
        let hint = if app.last_sync.is_some() {
            "  No activities today. Press 'n' to start one."
        } else {
            "  Waiting for the first snapshot..."
        };
        lines.push(Line::from(Span::styled(hint, Style::default().fg(Theme::dim()))));
        return Text::from(lines);
    }

    let show_selection = app.focus_mode == FocusMode::Activities;
    let focused = app.board.focused().map(|control| control.id);
    for control in app.board.controls() {
        let selected = show_selection && focused == Some(control.id);
        let marker_style = if selected {
            Style::default().fg(Theme::selection_marker())
        } else {
            Style::default().fg(Theme::dim())
        };
        let (dot, dot_style) = if control.active {
            (
                "● ",
                Style::default()
                    .fg(Theme::active())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("○ ", Style::default().fg(Theme::dim()))
        };
        let mut label_style = if control.active {
            Style::default().fg(Theme::active())
        } else {
            Style::default().fg(Theme::text())
        };
        if selected {
            label_style = label_style.add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(vec![
            Span::styled(if selected { "> " } else { "  " }, marker_style),
            Span::styled(dot, dot_style),
            Span::styled(clamp_name(&control.label, 60), label_style),
        ]));
    }

    Text::from(lines)
}
