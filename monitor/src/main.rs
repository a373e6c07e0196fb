use anyhow::{bail, Result};

mod bus;
mod event;
mod ground_station;
mod logger;
mod marker;
mod network;
mod notifications;
mod settings;
mod spacecraft;
mod state;
mod timeline;
mod ui;
mod widgets;

use self::settings::Settings;

use clap::Parser;

/// Monitors the ground stations and spacecraft of a SATNet server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, max_term_width = 100)]
struct Cli {
    /// Sets the SATNet JSON-RPC endpoint url
    #[arg(short, long = "api", value_name = "URL")]
    api_url: Option<String>,

    /// Authenticates as this SATNet user
    #[arg(short, long = "user", value_name = "NAME")]
    username: Option<String>,

    /// Sets the password for the SATNet user
    #[arg(short, long = "password", value_name = "PASSWORD")]
    password: Option<String>,

    /// Follows the launch and early orbit phase with this identifier
    #[arg(short, long = "leop", value_name = "ID")]
    leop: Option<String>,

    /// Sets custom config file
    #[arg(short, long = "config", value_name = "FILE")]
    config: Option<String>,

    /// Polls the server for configuration changes every SECONDS
    #[arg(long = "sync-interval", value_name = "SECONDS")]
    sync_interval: Option<u64>,

    /// Sets the level of log verbosity
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let settings = settings()?;

    let tui = ui::Ui::new(settings)?;
    log::set_boxed_logger(Box::new(logger::Logger::new(tui.sender())))?;

    tui.run()
}

/// Generates the internal settings representation for the app. CLI options will
/// override the options loaded from config files.
fn settings() -> Result<Settings> {
    let cli = Cli::parse();

    let mut settings = match cli.config {
        Some(path) => Settings::from_file(&path)?,
        None => Settings::new()?,
    };

    let log_level = std::cmp::max(cli.verbosity as u64, settings.log_level.unwrap_or(0));

    let log_filter = match log_level {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    log::set_max_level(log_filter);

    if let Some(api_endpoint) = cli.api_url {
        settings.api_endpoint = api_endpoint;
    }

    if let Some(username) = cli.username {
        settings.username = Some(username);
    }

    if let Some(password) = cli.password {
        settings.password = Some(password);
    }

    if let Some(leop) = cli.leop {
        settings.leop = Some(leop);
    }

    if let Some(i) = cli.sync_interval {
        settings.sync_interval = i;
    }

    if settings.sync_interval == 0 {
        bail!("sync interval must be at least 1 second");
    }

    if settings.message_interval == 0 {
        bail!("message interval must be at least 1 second");
    }

    Ok(settings)
}
