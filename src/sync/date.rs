use chrono::Local;

/// Supplies the calendar day a poll asks the server about.
pub trait DateProvider: Send {
    /// Day in `YYYY-MM-DD` form.
    fn today(&self) -> String;
}

/// Follows the local calendar, re-evaluated on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalCalendar;

impl DateProvider for LocalCalendar {
    fn today(&self) -> String {
        Local::now().date_naive().format("%Y-%m-%d").to_string()
    }
}

/// Always reports the same day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedDate(pub String);

impl DateProvider for FixedDate {
    fn today(&self) -> String {
        self.0.clone()
    }
}
