use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use timeboard::sync::{BackgroundSink, Dispatcher, PollLoop};
use timeboard::{App, Config, HttpTransport, Transport, cli, event, logging, tui};

fn main() -> Result<()> {
    let cli_opts = cli::Cli::parse();
    let config = Config::from_cli(&cli_opts)?;
    if let Some(command) = cli_opts.command {
        logging::init_stderr();
        return cli::run(command, &config);
    }

    logging::init_file(&config.log_path)?;
    info!(server = %config.server_url, interval = ?config.poll_interval, "starting dashboard");

    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config.server_url)?);
    let poller = PollLoop::new(
        Arc::clone(&transport),
        config.date_provider(),
        config.poll_interval,
    );
    let dispatcher = Dispatcher::new(Box::new(BackgroundSink::new(transport)));

    let mut app = App::new(poller, dispatcher);
    let mut terminal = tui::init()?;
    let result = event::run(&mut app, &mut terminal);

    tui::restore()?;

    result
}
