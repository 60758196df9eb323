//! CLI argument parsing and one-shot command handling.
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::sync::{self, Gesture, Snapshot};
use crate::transport::{DEFAULT_SERVER_URL, HttpTransport, Transport};

#[derive(Parser, Debug)]
#[command(
    name = "timeboard",
    version,
    about = "Timeboard - A terminal dashboard for a time-tracking server"
)]
pub struct Cli {
    /// Base URL of the tracking server
    #[arg(
        short = 's',
        long = "server",
        env = "TIMEBOARD_SERVER",
        default_value = DEFAULT_SERVER_URL,
        global = true
    )]
    pub server: String,
    /// Milliseconds between polls
    #[arg(
        short = 'i',
        long = "interval-ms",
        default_value_t = 750,
        value_parser = clap::value_parser!(u64).range(100..=60_000)
    )]
    pub interval_ms: u64,
    /// Where the dashboard writes its log
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
    /// Track this day (YYYY-MM-DD) instead of today
    #[arg(short = 'd', long = "date", global = true)]
    pub date: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start tracking an activity, creating it if needed
    Start { name: String },
    /// Stop tracking an activity
    Stop { name: String },
    /// Print the day's activities once
    Show,
}

/// Execute a one-shot command against the server.
pub fn run(command: Command, config: &Config) -> Result<()> {
    let transport = HttpTransport::new(&config.server_url)?;
    match command {
        Command::Start { name } => handle_start(name, &transport)?,
        Command::Stop { name } => handle_stop(&name, &transport)?,
        Command::Show => handle_show(config, &transport)?,
    }
    Ok(())
}

fn handle_start(name: String, transport: &dyn Transport) -> Result<()> {
    let mut input = name;
    let command = sync::dispatch(Gesture::Create { input: &mut input })?;
    transport
        .send(&command)
        .with_context(|| format!("could not start '{}'", command.name()))?;
    println!("Started '{}'", command.name());
    Ok(())
}

fn handle_stop(name: &str, transport: &dyn Transport) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!(sync::SyncError::EmptyActivityName);
    }
    let command = sync::dispatch(Gesture::Toggle {
        name,
        currently_active: true,
    })?;
    transport
        .send(&command)
        .with_context(|| format!("could not stop '{name}'"))?;
    println!("Stopped '{name}'");
    Ok(())
}

fn handle_show(config: &Config, transport: &dyn Transport) -> Result<()> {
    let date = config.date_provider().today();
    let raw = transport
        .fetch_activities(&date)
        .with_context(|| format!("could not fetch activities for {date}"))?;
    let snapshot = sync::parse_snapshot(&raw)?;
    print!("{}", pretty(&snapshot));
    Ok(())
}

/// Plain-text rendering of a snapshot, one activity per line.
pub fn pretty(snapshot: &Snapshot) -> String {
    let summary = &snapshot.summary;
    let mut result = format!("start time:          {}", summary.start_time_pretty);
    result.push_str(&format!("\nday length:          {}", summary.day_length));
    result.push_str(&format!("\ntotal activity time: {}", summary.total_activity_time));
    result.push_str(&format!("\ntime left:           {}", summary.time_left));
    result.push('\n');
    for record in &snapshot.activities {
        let marker = if record.is_active() { ">" } else { " " };
        result.push_str(&format!(
            "\n{marker} {:>45}: {}",
            record.name, record.logged_pretty
        ));
    }
    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::testing::ScriptedTransport;
    use serde_json::json;

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["timeboard", "start", "Deep work"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Start {
                name: "Deep work".to_string()
            })
        );
        assert_eq!(cli.interval_ms, 750);

        let cli = Cli::try_parse_from(["timeboard", "show", "--date", "2024-03-05"]).unwrap();
        assert_eq!(cli.command, Some(Command::Show));
        assert_eq!(cli.date.as_deref(), Some("2024-03-05"));
    }

    #[test]
    fn interval_is_range_checked() {
        assert!(Cli::try_parse_from(["timeboard", "--interval-ms", "10"]).is_err());
        let cli = Cli::try_parse_from(["timeboard", "-i", "1500"]).unwrap();
        assert_eq!(cli.interval_ms, 1500);
    }

    #[test]
    fn blank_start_is_rejected_before_sending() {
        let transport = ScriptedTransport::default();
        let err = handle_start("   ".to_string(), &transport).unwrap_err();
        assert_eq!(
            err.downcast_ref::<sync::SyncError>(),
            Some(&sync::SyncError::EmptyActivityName)
        );
        assert!(handle_stop(" ", &transport).is_err());
    }

    #[test]
    fn pretty_marks_active_activities() {
        let snapshot = sync::parse_snapshot(&json!({
            "start_time_pretty": "2024-03-05 08:00:00",
            "day_length": "07h:30m",
            "total_activity_time": "01h:10m",
            "time_left": "06h:20m",
            "activities": [
                {"name": "Reading", "logged_pretty": "00h:10m", "status": "Idle"},
                {"name": "Coding", "logged_pretty": "01h:00m", "status": "Working"},
            ],
        }))
        .unwrap();
        let text = pretty(&snapshot);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "start time:          2024-03-05 08:00:00");
        assert_eq!(lines[3], "time left:           06h:20m");
        assert!(lines[5].starts_with("  "));
        assert!(lines[5].ends_with("Reading: 00h:10m"));
        assert!(lines[6].starts_with("> "));
        assert!(lines[6].ends_with("Coding: 01h:00m"));
    }
}
