//! Annotation verdict and the error envelope returned in its place
//!
//! The language model is asked for a JSON object with a fixed key set and two
//! closed vocabularies. [`AnnotationVerdict`] is that object; anything that
//! does not deserialize into it is reported as an [`ErrorResult`] carrying
//! the raw model text. Either way the caller receives one
//! [`AnnotationResult`] that serializes to a plain JSON object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Oncogenicity classification vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
	#[serde(rename = "Oncogenic")]
	Oncogenic,
	#[serde(rename = "Likely Oncogenic")]
	LikelyOncogenic,
	#[serde(rename = "VUS")]
	Vus,
	#[serde(rename = "Benign")]
	Benign,
}

impl Classification {
	pub const ALL: [Classification; 4] = [
		Classification::Oncogenic,
		Classification::LikelyOncogenic,
		Classification::Vus,
		Classification::Benign,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Classification::Oncogenic => "Oncogenic",
			Classification::LikelyOncogenic => "Likely Oncogenic",
			Classification::Vus => "VUS",
			Classification::Benign => "Benign",
		}
	}
}

/// Highest level of evidence vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvidenceLevel {
	#[serde(rename = "Level 1")]
	Level1,
	#[serde(rename = "Level 2")]
	Level2,
	#[serde(rename = "Level 3A")]
	Level3A,
	#[serde(rename = "Level 4")]
	Level4,
	#[serde(rename = "R1/R2")]
	Resistance,
	#[serde(rename = "No evidence")]
	NoEvidence,
}

impl EvidenceLevel {
	pub const ALL: [EvidenceLevel; 6] = [
		EvidenceLevel::Level1,
		EvidenceLevel::Level2,
		EvidenceLevel::Level3A,
		EvidenceLevel::Level4,
		EvidenceLevel::Resistance,
		EvidenceLevel::NoEvidence,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			EvidenceLevel::Level1 => "Level 1",
			EvidenceLevel::Level2 => "Level 2",
			EvidenceLevel::Level3A => "Level 3A",
			EvidenceLevel::Level4 => "Level 4",
			EvidenceLevel::Resistance => "R1/R2",
			EvidenceLevel::NoEvidence => "No evidence",
		}
	}
}

/// Join a vocabulary with the separator used in the prompt template
pub fn vocabulary<T, const N: usize>(values: [T; N], as_str: fn(&T) -> &'static str) -> String {
	values.iter().map(as_str).collect::<Vec<_>>().join(" | ")
}

/// The model's classification of a variant
///
/// Keys the model adds beyond the fixed set are kept in `extra` so the
/// verdict serializes back to the object the model produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationVerdict {
	pub gene: String,
	pub variant: String,
	pub classification: Classification,
	pub highest_level_of_evidence: EvidenceLevel,
	pub recommended_therapies: Vec<String>,
	pub clinical_trials: Vec<Value>,
	pub summary: String,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Why a verdict could not be produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
	/// Model text is not a JSON object
	InvalidJson,
	/// JSON object lacks a required key or uses a value outside the vocabulary
	SchemaMismatch,
	/// The completion service could not be reached or answered with a failure
	CompletionFailed,
}

impl ErrorKind {
	pub fn message(&self) -> &'static str {
		match self {
			ErrorKind::InvalidJson => "LLM returned invalid JSON",
			ErrorKind::SchemaMismatch => "LLM output did not match the verdict schema",
			ErrorKind::CompletionFailed => "Completion service call failed",
		}
	}
}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.message())
	}
}

/// Structured error returned in place of a verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
	pub error: String,
	pub kind: ErrorKind,
	pub raw_output: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub detail: Option<String>,
}

impl ErrorResult {
	pub fn new(kind: ErrorKind, raw_output: impl Into<String>) -> Self {
		Self {
			error: kind.message().to_string(),
			kind,
			raw_output: raw_output.into(),
			detail: None,
		}
	}

	pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
		self.detail = Some(detail.into());
		self
	}
}

/// Outcome of one annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationResult {
	Verdict(AnnotationVerdict),
	Error(ErrorResult),
}

impl AnnotationResult {
	pub fn is_verdict(&self) -> bool {
		matches!(self, AnnotationResult::Verdict(_))
	}

	pub fn verdict(&self) -> Option<&AnnotationVerdict> {
		match self {
			AnnotationResult::Verdict(verdict) => Some(verdict),
			AnnotationResult::Error(_) => None,
		}
	}

	pub fn error(&self) -> Option<&ErrorResult> {
		match self {
			AnnotationResult::Verdict(_) => None,
			AnnotationResult::Error(error) => Some(error),
		}
	}
}

impl From<AnnotationVerdict> for AnnotationResult {
	fn from(verdict: AnnotationVerdict) -> Self {
		AnnotationResult::Verdict(verdict)
	}
}

impl From<ErrorResult> for AnnotationResult {
	fn from(error: ErrorResult) -> Self {
		AnnotationResult::Error(error)
	}
}
