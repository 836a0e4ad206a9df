//! Configuration loading utilities

use crate::{settings::ConfigValidationError, Settings};
use config::{Config, ConfigError, Environment, File};
use thiserror::Error;

/// Prefix of environment overrides, e.g. `CANCERRAG__COMPLETION__MODEL`
pub const ENV_PREFIX: &str = "CANCERRAG";

const DEFAULT_CONFIG_PATH: &str = "config/config";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
	#[error("Failed to read configuration: {0}")]
	Source(#[from] ConfigError),

	#[error("Invalid configuration: {0}")]
	Validation(#[from] ConfigValidationError),
}

/// Load configuration from `config/config.*` and the environment
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	load_config_from(DEFAULT_CONFIG_PATH)
}

/// Load configuration from an optional file (any format the `config` crate
/// recognizes by extension), overlaid by `CANCERRAG__SECTION__KEY` variables
pub fn load_config_from(path: &str) -> Result<Settings, ConfigLoadError> {
	// Defaults first so a partially configured section keeps its other keys
	let s = Config::builder()
		.add_source(Config::try_from(&Settings::default())?)
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix(ENV_PREFIX)
				.prefix_separator("__")
				.separator("__")
				.try_parsing(true),
		)
		.build()?;

	let settings: Settings = s.try_deserialize()?;
	settings.validate()?;
	Ok(settings)
}
