//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Environment;

/// Notification dispatch service for multi-tenant operations platforms
#[derive(Parser, Debug)]
#[command(name = "opsdesk")]
#[command(about = "Notification dispatch service for multi-tenant operations platforms")]
#[command(long_about = "
Opsdesk delivers booking, inbox, and onboarding notifications across a
workspace's configured channels (transactional email, SMS, calendar) and
records every attempt on the conversation timeline.

EXAMPLES:
    # Start the server with default configuration
    opsdesk serve

    # Start server on custom host and port
    opsdesk serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    opsdesk --config /etc/opsdesk/production.toml serve

    # Run one reminder sweep and exit
    opsdesk send-reminders
")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute; defaults to serve
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override environment detection
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server with the in-process reminder schedule
    Serve {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured bind port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one booking reminder sweep and exit
    SendReminders,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::parse_from(["opsdesk"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_serve_with_overrides() {
        let cli = Cli::parse_from(["opsdesk", "serve", "--host", "0.0.0.0", "--port", "8080"]);
        match cli.command {
            Some(Commands::Serve { host, port }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("Expected serve command, got {:?}", other),
        }
    }

    #[test]
    fn test_send_reminders_subcommand() {
        let cli = Cli::parse_from(["opsdesk", "--verbose", "send-reminders"]);
        assert!(matches!(cli.command, Some(Commands::SendReminders)));
        assert!(cli.verbose);
    }

    #[test]
    fn test_env_flag_accepts_aliases() {
        let cli = Cli::parse_from(["opsdesk", "--env", "prod"]);
        assert_eq!(cli.env, Some(Environment::Production));
    }
}
