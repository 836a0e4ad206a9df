//! HTTP plumbing shared by the source adapters

use cancerrag_types::{AdapterError, AdapterResult, SourceRuntimeConfig};
use reqwest::{
	header::{HeaderMap, HeaderName, HeaderValue},
	Client, Response,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use std::{str::FromStr, time::Duration};
use tracing::debug;
use url::Url;

pub(crate) const USER_AGENT: &str = concat!("CancerRAG/", env!("CARGO_PKG_VERSION"));

/// Build a client with JSON headers, the source's custom headers and its per-call timeout
pub(crate) fn create_client(config: &SourceRuntimeConfig) -> AdapterResult<Client> {
	let mut headers = HeaderMap::new();
	headers.insert("Accept", HeaderValue::from_static("application/json"));
	headers.insert("User-Agent", HeaderValue::from_static(USER_AGENT));

	if let Some(source_headers) = &config.headers {
		for (key, value) in source_headers {
			if let (Ok(header_name), Ok(header_value)) =
				(HeaderName::from_str(key), HeaderValue::from_str(value))
			{
				headers.insert(header_name, header_value);
			}
		}
	}

	Client::builder()
		.default_headers(headers)
		.timeout(Duration::from_millis(config.timeout_ms))
		.build()
		.map_err(AdapterError::HttpError)
}

/// Join a path onto a base endpoint, treating the base as a directory
pub(crate) fn build_url(base_url: &str, path: &str) -> AdapterResult<String> {
	let mut base = Url::parse(base_url).map_err(|e| AdapterError::ConfigError {
		reason: format!("Invalid base URL '{}': {}", base_url, e),
	})?;

	if !base.path().ends_with('/') {
		base.set_path(&format!("{}/", base.path()));
	}

	let joined = base
		.join(path.trim_start_matches('/'))
		.map_err(|e| AdapterError::ConfigError {
			reason: format!(
				"Failed to join URL path '{}' to base '{}': {}",
				path, base_url, e
			),
		})?;

	Ok(joined.to_string())
}

/// Providers send `null` where a list or count is empty; read it as the default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Map a send failure, reporting timeouts with the configured limit
pub(crate) fn send_error(error: reqwest::Error, timeout_ms: u64) -> AdapterError {
	if error.is_timeout() {
		AdapterError::Timeout { timeout_ms }
	} else {
		AdapterError::HttpError(error)
	}
}

/// Require a 200 response and decode its JSON body
pub(crate) async fn read_json<T: DeserializeOwned>(
	response: Response,
	source: &str,
) -> AdapterResult<T> {
	let status = response.status();
	if status != reqwest::StatusCode::OK {
		return Err(AdapterError::from_http_failure(status.as_u16()));
	}

	let body = response.text().await.map_err(AdapterError::HttpError)?;
	debug!("{} responded with {} bytes", source, body.len());

	serde_json::from_str(&body).map_err(|e| AdapterError::InvalidResponse {
		reason: format!("Failed to parse {} response: {}", source, e),
	})
}
