use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::Theme;

pub fn build_help_text() -> Text<'static> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        "Key bindings",
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    lines.push(section_title("Global"));
    lines.extend(section_lines(&[
        "q: Quit",
        "?: Toggle help",
        "r: Poll the server now",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Activities"));
    lines.extend(section_lines(&[
        "Up/Down (k/j): Move selection",
        "space/Enter: Start or stop the selected activity",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("New activity"));
    lines.extend(section_lines(&[
        "n/Tab: Focus the input",
        "Enter: Start tracking the typed name",
        "Esc: Back to the activity list",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Notes"));
    lines.extend(section_lines(&[
        "Starting one activity stops the others on the server",
        "Changes show up with the next poll",
    ]));

    Text::from(lines)
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    ))
}

fn section_lines(items: &[&str]) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| {
            Line::from(Span::styled(
                format!("  - {item}"),
                Style::default().fg(Theme::text()),
            ))
        })
        .collect()
}
