//! Normalized evidence produced by the source adapters
//!
//! Every structure here has a `Default` that is the source's documented
//! empty shape, so a missing or failed source never leaves a hole in the
//! bundle handed to the summarizer.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod curation;
pub mod pathogenicity;
pub mod trials;

pub use curation::CurationEvidence;
pub use pathogenicity::PathogenicityEvidence;
pub use trials::{ClinicalTrial, TrialEvidence, PHASE_NOT_APPLICABLE, STUDY_URL_BASE};

/// The external knowledge source an adapter talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
	OncoKb,
	Civic,
	ClinicalTrials,
}

impl EvidenceSource {
	pub const ALL: [EvidenceSource; 3] = [
		EvidenceSource::OncoKb,
		EvidenceSource::Civic,
		EvidenceSource::ClinicalTrials,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			EvidenceSource::OncoKb => "oncokb",
			EvidenceSource::Civic => "civic",
			EvidenceSource::ClinicalTrials => "clinical_trials",
		}
	}
}

impl fmt::Display for EvidenceSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Evidence from exactly one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Evidence {
	OncoKb(PathogenicityEvidence),
	Civic(CurationEvidence),
	ClinicalTrials(TrialEvidence),
}

impl Evidence {
	/// The empty shape for a source
	pub fn empty(source: EvidenceSource) -> Self {
		match source {
			EvidenceSource::OncoKb => Evidence::OncoKb(PathogenicityEvidence::default()),
			EvidenceSource::Civic => Evidence::Civic(CurationEvidence::default()),
			EvidenceSource::ClinicalTrials => Evidence::ClinicalTrials(TrialEvidence::default()),
		}
	}

	pub fn source(&self) -> EvidenceSource {
		match self {
			Evidence::OncoKb(_) => EvidenceSource::OncoKb,
			Evidence::Civic(_) => EvidenceSource::Civic,
			Evidence::ClinicalTrials(_) => EvidenceSource::ClinicalTrials,
		}
	}
}

/// All evidence gathered for one variant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceBundle {
	pub pathogenicity: PathogenicityEvidence,
	pub curation: CurationEvidence,
	pub trials: TrialEvidence,
}

impl EvidenceBundle {
	/// Place one source's evidence into its slot, replacing what was there
	pub fn insert(&mut self, evidence: Evidence) {
		match evidence {
			Evidence::OncoKb(e) => self.pathogenicity = e,
			Evidence::Civic(e) => self.curation = e,
			Evidence::ClinicalTrials(e) => self.trials = e,
		}
	}

	/// Assemble a bundle; sources without a result keep their empty shape
	pub fn from_evidence(items: impl IntoIterator<Item = Evidence>) -> Self {
		let mut bundle = Self::default();
		for evidence in items {
			bundle.insert(evidence);
		}
		bundle
	}
}
