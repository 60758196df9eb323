use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use reqwest::Url;

use crate::cli::Cli;
use crate::sync::{DateProvider, FixedDate, LocalCalendar};

/// Resolved runtime settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub server_url: String,
    pub poll_interval: Duration,
    pub log_path: PathBuf,
    /// Pinned day; `None` follows the local calendar.
    pub date: Option<String>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let url = Url::parse(&cli.server)
            .with_context(|| format!("invalid server URL '{}'", cli.server))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("server URL must use http or https, got '{}'", url.scheme());
        }
        let date = match &cli.date {
            Some(value) => {
                let day = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                    .with_context(|| format!("invalid date '{value}', expected YYYY-MM-DD"))?;
                Some(day.format("%Y-%m-%d").to_string())
            }
            None => None,
        };
        Ok(Self {
            server_url: cli.server.clone(),
            poll_interval: Duration::from_millis(cli.interval_ms),
            log_path: cli.log_file.clone().unwrap_or_else(default_log_path),
            date,
        })
    }

    pub fn date_provider(&self) -> Box<dyn DateProvider> {
        match &self.date {
            Some(day) => Box::new(FixedDate(day.clone())),
            None => Box::new(LocalCalendar),
        }
    }
}

/// Returns the default log path inside the user's data directory.
/// Falls back to `./timeboard.log` when no data dir is found.
pub fn default_log_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join("timeboard");
        std::fs::create_dir_all(&app_dir).ok();
        app_dir.join("timeboard.log")
    } else {
        PathBuf::from("timeboard.log")
    }
}
