//! Turn raw completion text into a verdict or a structured error

use cancerrag_types::{AnnotationResult, AnnotationVerdict, ErrorKind, ErrorResult};
use serde_json::Value;
use tracing::warn;

/// Remove a surrounding Markdown code fence, with or without a language tag
pub fn strip_code_fence(text: &str) -> &str {
	let Some(rest) = text.strip_prefix("```") else {
		return text;
	};
	let Some(body) = rest.trim_end().strip_suffix("```") else {
		return text;
	};
	// Drop the info string (e.g. `json`) on the opening line
	match body.split_once('\n') {
		Some((info, rest)) if info.trim().chars().all(|c| c.is_ascii_alphanumeric()) => rest.trim(),
		Some(_) => body.trim(),
		None => strip_inline_info(body.trim()),
	}
}

/// Single-line fences put the info string directly before the payload
fn strip_inline_info(body: &str) -> &str {
	let payload = body.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
	if payload.len() < body.len() && payload.trim_start().starts_with(['{', '[']) {
		payload.trim_start()
	} else {
		body
	}
}

/// Parse model output into an [`AnnotationResult`]
///
/// The text is trimmed and unfenced, then parsed as a JSON object. Anything
/// that is not an object is `invalid_json`; an object that misses a key or
/// leaves a vocabulary is `schema_mismatch`. Both carry the trimmed text.
pub fn parse_model_output(raw: &str) -> AnnotationResult {
	let trimmed = raw.trim();
	let candidate = strip_code_fence(trimmed);

	let value: Value = match serde_json::from_str(candidate) {
		Ok(value) => value,
		Err(e) => {
			warn!("Model output is not valid JSON: {}", e);
			return ErrorResult::new(ErrorKind::InvalidJson, trimmed)
				.with_detail(e.to_string())
				.into();
		},
	};

	if !value.is_object() {
		warn!("Model output is JSON but not an object");
		return ErrorResult::new(ErrorKind::InvalidJson, trimmed)
			.with_detail("expected a JSON object")
			.into();
	}

	match serde_json::from_value::<AnnotationVerdict>(value) {
		Ok(verdict) => verdict.into(),
		Err(e) => {
			warn!("Model output does not match the verdict schema: {}", e);
			ErrorResult::new(ErrorKind::SchemaMismatch, trimmed)
				.with_detail(e.to_string())
				.into()
		},
	}
}
