//! Command-line interface.

mod handlers;
mod parser;

pub use parser::{Cli, Commands};

use clap::Parser;

use crate::config::{Environment, load_settings};
use crate::logger;

/// Parses arguments, loads configuration, initializes logging, and runs
/// the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let environment = cli.env.unwrap_or_else(Environment::from_env);
    let mut settings = load_settings(cli.config.as_deref(), environment)?;
    if cli.verbose {
        settings.logger.level = "debug".to_string();
    }

    logger::init(&settings.logger)?;

    match cli.command {
        Some(Commands::Serve { host, port }) => handlers::serve::run(settings, host, port).await,
        Some(Commands::SendReminders) => handlers::remind::run(settings).await,
        None => handlers::serve::run(settings, None, None).await,
    }
}
