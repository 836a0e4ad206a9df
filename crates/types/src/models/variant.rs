//! Variant query model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tumor type used when the caller does not name one
pub const DEFAULT_TUMOR_TYPE: &str = "Cancer";

/// Immutable input to a single annotation
///
/// Any strings are accepted; validating gene symbols and protein-change
/// notation is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantQuery {
	/// Gene symbol, e.g. `EGFR`
	pub gene: String,

	/// Protein alteration, e.g. `L858R`
	pub alteration: String,

	/// Tumor type, defaults to [`DEFAULT_TUMOR_TYPE`]
	#[serde(default = "default_tumor_type")]
	pub tumor_type: String,
}

fn default_tumor_type() -> String {
	DEFAULT_TUMOR_TYPE.to_string()
}

impl VariantQuery {
	/// Create a query for the generic tumor type
	pub fn new(gene: impl Into<String>, alteration: impl Into<String>) -> Self {
		Self {
			gene: gene.into(),
			alteration: alteration.into(),
			tumor_type: default_tumor_type(),
		}
	}

	/// Set the tumor type; a blank value keeps the generic placeholder
	pub fn with_tumor_type(mut self, tumor_type: impl Into<String>) -> Self {
		let tumor_type = tumor_type.into();
		if !tumor_type.trim().is_empty() {
			self.tumor_type = tumor_type;
		}
		self
	}

	/// Free-text search used by registries that only offer keyword search
	pub fn search_terms(&self) -> String {
		format!("{} {} {}", self.gene, self.alteration, self.tumor_type)
	}
}

impl fmt::Display for VariantQuery {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {} ({})", self.gene, self.alteration, self.tumor_type)
	}
}
