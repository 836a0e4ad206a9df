//! Error types for the completion service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("Completion service returned HTTP {status_code}: {body}")]
	HttpStatusError { status_code: u16, body: String },

	#[error("Invalid completion response: {reason}")]
	InvalidResponse { reason: String },

	#[error("Completion response contained no message content")]
	EmptyResponse,
}
