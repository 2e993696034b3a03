use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{ChartSettings, Config, DefaultLabels, JournalSettings};

/// Loads the journal configuration from `config.toml` and the environment.
///
/// The file is optional. Environment variables prefixed with `JOURNAL` override
/// file values, using `__` to separate sections (`JOURNAL_JOURNAL__CURRENCY`).
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from("config.toml")
}

/// Same as [`load_config`], reading the given file instead of `config.toml`.
pub fn load_config_from(path: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("JOURNAL")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        starting_balance = %config.journal.starting_balance,
        currency = %config.journal.currency,
        "Configuration loaded"
    );

    Ok(config)
}
