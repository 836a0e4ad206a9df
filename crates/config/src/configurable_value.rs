//! Configurable value types that can load from environment variables or plain values

use cancerrag_types::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable holding the completion-service key by default
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// A configurable value that can be loaded from environment variables or used as plain text
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConfigurableValue {
	/// Type of value: "env" for environment variable, "plain" for direct value
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// The value: either environment variable name or the actual value
	pub value: String,
}

/// Type of configurable value
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	/// Load value from environment variable (name specified in `value` field)
	Env,
	/// Use the value directly from the `value` field
	Plain,
}

impl ConfigurableValue {
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	/// Resolve the actual value based on the type
	///
	/// For `Env` type, reads from environment variable; an unset or blank
	/// variable is reported as missing. For `Plain` type, returns the value
	/// directly.
	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		match self.value_type {
			ValueType::Env => std::env::var(&self.value)
				.ok()
				.filter(|v| !v.trim().is_empty())
				.ok_or_else(|| {
					ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())
				}),
			ValueType::Plain if self.value.trim().is_empty() => {
				Err(ConfigurableValueError::EmptyValue)
			},
			ValueType::Plain => Ok(self.value.clone()),
		}
	}

	/// Resolve straight into a `SecretString`
	pub fn resolve_secret(&self) -> Result<SecretString, ConfigurableValueError> {
		self.resolve().map(SecretString::from)
	}

	/// Description of where the value comes from, safe for logs
	pub fn description(&self) -> String {
		match self.value_type {
			ValueType::Env => format!("environment variable '{}'", self.value),
			ValueType::Plain => "configured plain value".to_string(),
		}
	}
}

impl Default for ConfigurableValue {
	fn default() -> Self {
		Self::from_env(DEFAULT_API_KEY_ENV)
	}
}

/// Errors that can occur when resolving configurable values
#[derive(Debug, thiserror::Error)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),

	#[error("Configured value is empty")]
	EmptyValue,
}

// Plain values are never printed
impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value_type {
			ValueType::Env => write!(f, "env:{}", self.value),
			ValueType::Plain => write!(f, "plain:[REDACTED]"),
		}
	}
}

/// Strings prefixed with "env:" name an environment variable
impl From<&str> for ConfigurableValue {
	fn from(value: &str) -> Self {
		if let Some(env_var) = value.strip_prefix("env:") {
			Self::from_env(env_var)
		} else {
			Self::from_plain(value)
		}
	}
}

impl From<String> for ConfigurableValue {
	fn from(value: String) -> Self {
		ConfigurableValue::from(value.as_str())
	}
}
