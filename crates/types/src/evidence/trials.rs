//! ClinicalTrials.gov recruiting trials

use serde::{Deserialize, Serialize};

/// Phase recorded when a study lists none
pub const PHASE_NOT_APPLICABLE: &str = "N/A";

/// Base of the canonical public study URL
pub const STUDY_URL_BASE: &str = "https://clinicaltrials.gov/study/";

/// One recruiting trial
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalTrial {
	pub nct_id: String,
	pub title: String,
	pub status: String,
	pub phase: String,
	pub url: String,
}

impl ClinicalTrial {
	/// Build a trial, deriving the public URL from the identifier
	pub fn new(nct_id: String, title: String, status: String, phase: Option<String>) -> Self {
		let url = format!("{}{}", STUDY_URL_BASE, nct_id);
		Self {
			nct_id,
			title,
			status,
			phase: phase.unwrap_or_else(|| PHASE_NOT_APPLICABLE.to_string()),
			url,
		}
	}
}

/// Normalized output of the clinical-trial source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialEvidence {
	pub trial_count: usize,
	pub trials: Vec<ClinicalTrial>,
}

impl TrialEvidence {
	pub fn from_trials(trials: Vec<ClinicalTrial>) -> Self {
		Self {
			trial_count: trials.len(),
			trials,
		}
	}
}
