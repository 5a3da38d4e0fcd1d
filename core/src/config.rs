//! Layered configuration
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. `interfuck.toml` in the working directory (optional), or the file
//!    given with `--config` (required)
//! 3. `INTERFUCK_<SECTION>__<KEY>` environment variables (`.env` is loaded first)
//! 4. Explicit overrides from the builder

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::RunOptions;

/// Config file looked up when no path is given
pub const DEFAULT_CONFIG_NAME: &str = "interfuck";

/// Prefix for environment variables
pub const ENV_PREFIX: &str = "INTERFUCK";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub interpreter: RunOptions,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for constructing a Config
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config_path: Option<String>,
    hide_command_output: Option<bool>,
    log_filter: Option<String>,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Set the config file path (overrides default search)
    pub fn config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Force quiet mode on or off
    pub fn hide_command_output(mut self, hide: bool) -> Self {
        self.hide_command_output = Some(hide);
        self
    }

    /// Set the logging filter directive
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Ignore `.env` and environment variables
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    pub fn build(self) -> Result<Config> {
        let mut builder = ::config::Config::builder();

        builder = match &self.config_path {
            Some(path) => builder.add_source(::config::File::with_name(path).required(true)),
            None => builder.add_source(::config::File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        if !self.skip_env {
            dotenvy::dotenv().ok();
            builder = builder.add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );
        }

        builder = builder
            .set_override_option("interpreter.hide_command_output", self.hide_command_output)
            .context("Invalid interpreter override")?
            .set_override_option("logging.filter", self.log_filter)
            .context("Invalid logging override")?;

        let settings = builder.build().with_context(|| match &self.config_path {
            Some(path) => format!("Failed to load config from {path}"),
            None => "Failed to load configuration".to_string(),
        })?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }
}
