//! Error types for evidence adapter operations

use thiserror::Error;

/// Reasons an evidence source produced no usable data
///
/// None of these reach the orchestrator: adapters degrade to their empty
/// shape through [`crate::EvidenceAdapter::evidence_or_empty`].
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("No record matching {gene} {alteration}")]
	NoMatch { gene: String, alteration: String },

	#[error("Configuration error: {reason}")]
	ConfigError { reason: String },
}

impl AdapterError {
	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			AdapterError::HttpStatusError { status_code, .. } => Some(*status_code),
			AdapterError::HttpError(reqwest_error) => {
				reqwest_error.status().map(|status| status.as_u16())
			},
			_ => None,
		}
	}

	/// Create an HTTP failure error from response status with default reason
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			401 => "Unauthorized".to_string(),
			403 => "Forbidden".to_string(),
			404 => "Not Found".to_string(),
			408 => "Request Timeout".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			504 => "Gateway Timeout".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatusError {
			status_code,
			reason,
		}
	}

	/// Whether the source could not be reached or answered with a failure
	pub fn is_source_unavailable(&self) -> bool {
		matches!(
			self,
			AdapterError::HttpError(_)
				| AdapterError::Timeout { .. }
				| AdapterError::HttpStatusError { .. }
		)
	}
}
