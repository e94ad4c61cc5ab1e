//! Configuration loading and settings structures.

mod environment;
mod error;
mod loader;
pub mod settings;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::load_settings;
pub use settings::{
    ApplicationSettings, DatabaseSettings, LoggerSettings, ReminderSettings, ServerSettings,
    Settings,
};
