use ratatui::style::Color;

/// Colors shared by every part of the board.
pub struct Theme;

impl Theme {
    /// Banner background
    pub fn primary() -> Color {
        Color::Magenta
    }

    /// Borders and section titles
    pub fn secondary() -> Color {
        Color::Cyan
    }

    /// An activity the server reports as running
    pub fn active() -> Color {
        Color::LightGreen
    }

    /// Sync failures
    pub fn warn() -> Color {
        Color::Yellow
    }

    /// Focused input border and cursor
    pub fn highlight() -> Color {
        Color::Cyan
    }

    pub fn selection_marker() -> Color {
        Color::Green
    }

    /// Dimmed/idle text
    pub fn dim() -> Color {
        Color::DarkGray
    }

    pub fn text() -> Color {
        Color::White
    }

    /// Header durations
    pub fn accent() -> Color {
        Color::LightBlue
    }
}
