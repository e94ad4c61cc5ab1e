//! Layered configuration loading.
//!
//! Sources are merged lowest precedence first:
//! 1. `config/default.toml` (optional)
//! 2. `config/{environment}.toml` (optional)
//! 3. an explicit `--config` file (required when given)
//! 4. `OPSDESK_*` environment variables (e.g. `OPSDESK_SERVER__PORT=8080`)

use std::path::Path;

use ::config::{Config, File};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Loads and validates settings for the given environment.
pub fn load_settings(
    config_path: Option<&Path>,
    environment: Environment,
) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", environment.as_str())).required(false));

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path));
    }

    builder = builder.add_source(
        ::config::Environment::with_prefix("OPSDESK")
            .separator("__")
            .try_parsing(true),
    );

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
