//! Evidence adapter model, runtime configuration and errors

use std::collections::HashMap;

pub mod errors;
pub mod traits;

pub use errors::AdapterError;
pub use traits::EvidenceAdapter;

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Descriptive information about an adapter implementation
#[derive(Debug, Clone, PartialEq)]
pub struct Adapter {
	/// Unique identifier for the adapter
	pub adapter_id: String,

	/// Human-readable name
	pub name: String,

	/// Description of the adapter
	pub description: Option<String>,

	/// Version of the adapter implementation
	pub version: String,
}

impl Adapter {
	pub fn new(adapter_id: String, description: String, name: String, version: String) -> Self {
		Self {
			adapter_id,
			name,
			description: Some(description),
			version,
		}
	}
}

/// Runtime configuration needed by an HTTP-backed adapter
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRuntimeConfig {
	/// Base endpoint of the source API
	pub endpoint: String,

	/// Per-call timeout in milliseconds
	pub timeout_ms: u64,

	/// Optional custom HTTP headers for requests
	pub headers: Option<HashMap<String, String>>,
}

impl SourceRuntimeConfig {
	pub fn new(endpoint: impl Into<String>, timeout_ms: u64) -> Self {
		Self {
			endpoint: endpoint.into(),
			timeout_ms,
			headers: None,
		}
	}

	pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
		self.headers = Some(headers);
		self
	}
}
