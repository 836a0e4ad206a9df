//! CIViC curated evidence

use serde::{Deserialize, Serialize};

/// Normalized output of the curated-evidence source
///
/// Lists are kept whole here; only the summarized text is capped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurationEvidence {
	pub variant_name: String,
	pub variant_types: Vec<String>,
	pub evidence_count: u64,
	pub diseases: Vec<String>,
	pub therapies: Vec<String>,
	pub cosmic_id: String,
	pub clinvar_id: String,
}

impl CurationEvidence {
	pub fn has_evidence(&self) -> bool {
		self.evidence_count > 0
	}
}
