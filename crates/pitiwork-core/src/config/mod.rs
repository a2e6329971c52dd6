use anyhow::Result;
use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

use crate::constants::{DEFAULT_HORIZON_YEARS, DEFAULT_LOG_LEVEL, DEFAULT_MAX_ITERATIONS};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub recurrence: RecurrenceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecurrenceConfig {
    /// Hard cap on cursor steps per expansion request.
    pub max_iterations: usize,
    /// Horizon, in years past the query window, for patterns without an end date.
    pub horizon_years: u32,
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }
}

impl RecurrenceConfig {
    /// ## Summary
    /// Checks that the configured bounds allow at least one step.
    ///
    /// ## Errors
    /// Returns a configuration error if either bound is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_iterations == 0 {
            return Err(CoreError::ConfigError(
                "recurrence.max_iterations must be greater than zero".to_string(),
            ));
        }
        if self.horizon_years == 0 {
            return Err(CoreError::ConfigError(
                "recurrence.horizon_years must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>> {
    let max_iterations = i64::try_from(DEFAULT_MAX_ITERATIONS)?;

    Ok(Config::builder()
        .set_default("recurrence.max_iterations", max_iterations)?
        .set_default("recurrence.horizon_years", i64::from(DEFAULT_HORIZON_YEARS))?
        .set_default("logging.level", DEFAULT_LOG_LEVEL)?)
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `PITIWORK_*` environment variables and an
    /// optional `config.toml` into a `Settings`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating it fails.
    pub fn load() -> Result<Self> {
        let settings = with_defaults()?
            .add_source(
                config::Environment::with_prefix("PITIWORK")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.recurrence.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Builds settings from defaults overlaid with a TOML document.
    ///
    /// ## Errors
    /// Returns an error if the TOML is invalid or the result fails validation.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = with_defaults()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.recurrence.validate()?;
        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    tracing::debug!("Loading configuration");
    Settings::load()
}

#[cfg(test)]
mod tests;
