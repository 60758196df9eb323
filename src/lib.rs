pub mod app;
pub mod cli;
pub mod config;
pub mod event;
pub mod logging;
pub mod sync;
pub mod transport;
pub mod tui;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use transport::{HttpTransport, Transport};
