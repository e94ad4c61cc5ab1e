use thiserror::Error;

/// Errors produced while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Underlying configuration source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// Configuration loaded but failed validation
    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: String, reason: String },
}
