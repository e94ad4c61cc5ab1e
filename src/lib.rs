//! Opsdesk library.
//!
//! Cross-channel notification dispatch for a multi-tenant operations
//! platform: per-workspace provider credentials, channel senders for
//! email/SMS/calendar, a dispatch policy per domain event, conversation
//! timeline logging, and the booking reminder sweep.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod external;
pub mod jobs;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod server;
pub mod services;
pub mod state;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
