//! Configuration settings structures

use crate::{configurable_value::ConfigurableValue, ConfigurableValueError};
use cancerrag_adapters::{
	civic_adapter::{DEFAULT_CIVIC_ENDPOINT, DEFAULT_CIVIC_TIMEOUT_MS},
	clinical_trials_adapter::{
		DEFAULT_CLINICAL_TRIALS_ENDPOINT, DEFAULT_CLINICAL_TRIALS_TIMEOUT_MS, DEFAULT_PAGE_SIZE,
	},
	oncokb_adapter::{DEFAULT_ONCOKB_ENDPOINT, DEFAULT_ONCOKB_TIMEOUT_MS},
	openai_client::{DEFAULT_COMPLETION_ENDPOINT, DEFAULT_COMPLETION_MODEL},
};
use cancerrag_types::{SecretString, SourceRuntimeConfig, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use url::Url;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
	pub completion: CompletionSettings,
	pub sources: SourcesSettings,
	pub logging: LoggingSettings,
}

/// Completion-service configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CompletionSettings {
	/// Base URL of an OpenAI-compatible API
	pub endpoint: String,
	pub model: String,
	pub temperature: f32,
	pub max_tokens: u32,
	/// No timeout when unset
	pub timeout_ms: Option<u64>,
	/// Where the API key comes from, e.g. `{"type": "env", "value": "OPENAI_API_KEY"}`
	pub api_key: ConfigurableValue,
}

/// One evidence provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SourceSettings {
	pub endpoint: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub headers: Option<HashMap<String, String>>,
}

/// Evidence providers
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SourcesSettings {
	pub oncokb: SourceSettings,
	pub civic: SourceSettings,
	pub clinical_trials: SourceSettings,
	/// Recruiting studies requested per query
	pub trial_page_size: usize,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
	#[error("Invalid endpoint for {name}: {reason}")]
	InvalidEndpoint { name: String, reason: String },

	#[error("Timeout for {name} must be greater than zero")]
	ZeroTimeout { name: String },

	#[error("Temperature {0} is outside 0.0..=2.0")]
	TemperatureOutOfRange(f32),

	#[error("max_tokens must be greater than zero")]
	ZeroMaxTokens,

	#[error("trial_page_size must be greater than zero")]
	ZeroPageSize,

	#[error("Model name must not be empty")]
	EmptyModel,
}

impl SourceSettings {
	pub fn new(endpoint: &str, timeout_ms: u64) -> Self {
		Self {
			endpoint: endpoint.to_string(),
			timeout_ms,
			headers: None,
		}
	}

	/// Runtime configuration handed to the adapter
	pub fn runtime_config(&self) -> SourceRuntimeConfig {
		let config = SourceRuntimeConfig::new(self.endpoint.clone(), self.timeout_ms);
		match &self.headers {
			Some(headers) => config.with_headers(headers.clone()),
			None => config,
		}
	}

	fn validate(&self, name: &str) -> Result<(), ConfigValidationError> {
		validate_endpoint(name, &self.endpoint)?;
		if self.timeout_ms == 0 {
			return Err(ConfigValidationError::ZeroTimeout {
				name: name.to_string(),
			});
		}
		Ok(())
	}
}

fn validate_endpoint(name: &str, endpoint: &str) -> Result<(), ConfigValidationError> {
	let url = Url::parse(endpoint).map_err(|e| ConfigValidationError::InvalidEndpoint {
		name: name.to_string(),
		reason: e.to_string(),
	})?;
	match url.scheme() {
		"http" | "https" => Ok(()),
		scheme => Err(ConfigValidationError::InvalidEndpoint {
			name: name.to_string(),
			reason: format!("unsupported scheme '{}'", scheme),
		}),
	}
}

impl Default for CompletionSettings {
	fn default() -> Self {
		Self {
			endpoint: DEFAULT_COMPLETION_ENDPOINT.to_string(),
			model: DEFAULT_COMPLETION_MODEL.to_string(),
			temperature: DEFAULT_TEMPERATURE,
			max_tokens: DEFAULT_MAX_TOKENS,
			timeout_ms: None,
			api_key: ConfigurableValue::default(),
		}
	}
}

impl Default for SourcesSettings {
	fn default() -> Self {
		Self {
			oncokb: SourceSettings::new(DEFAULT_ONCOKB_ENDPOINT, DEFAULT_ONCOKB_TIMEOUT_MS),
			civic: SourceSettings::new(DEFAULT_CIVIC_ENDPOINT, DEFAULT_CIVIC_TIMEOUT_MS),
			clinical_trials: SourceSettings::new(
				DEFAULT_CLINICAL_TRIALS_ENDPOINT,
				DEFAULT_CLINICAL_TRIALS_TIMEOUT_MS,
			),
			trial_page_size: DEFAULT_PAGE_SIZE,
		}
	}
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Compact,
		}
	}
}

impl Settings {
	/// Check values the deserializer cannot
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		validate_endpoint("completion", &self.completion.endpoint)?;
		if self.completion.model.trim().is_empty() {
			return Err(ConfigValidationError::EmptyModel);
		}
		if !(0.0..=2.0).contains(&self.completion.temperature) {
			return Err(ConfigValidationError::TemperatureOutOfRange(
				self.completion.temperature,
			));
		}
		if self.completion.max_tokens == 0 {
			return Err(ConfigValidationError::ZeroMaxTokens);
		}
		if self.completion.timeout_ms == Some(0) {
			return Err(ConfigValidationError::ZeroTimeout {
				name: "completion".to_string(),
			});
		}

		self.sources.oncokb.validate("oncokb")?;
		self.sources.civic.validate("civic")?;
		self.sources.clinical_trials.validate("clinical_trials")?;
		if self.sources.trial_page_size == 0 {
			return Err(ConfigValidationError::ZeroPageSize);
		}

		Ok(())
	}

	/// Resolve the completion-service key
	///
	/// A missing key is fatal for the annotator; callers surface this at startup.
	pub fn completion_api_key(&self) -> Result<SecretString, ConfigurableValueError> {
		self.completion.api_key.resolve_secret()
	}
}
