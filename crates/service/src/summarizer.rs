//! Bounded, human-readable summaries of normalized evidence
//!
//! Summaries are interpolated into the prompt, so every fragment that comes
//! from a provider is sanitized and capped before it is used.

use cancerrag_types::{CurationEvidence, EvidenceBundle, PathogenicityEvidence, TrialEvidence};
use serde::Serialize;

pub const NO_ONCOKB_DATA: &str = "No OncoKB data";
pub const NO_CIVIC_DATA: &str = "No CIViC data";
pub const NO_TRIALS_FOUND: &str = "No active clinical trials found";

/// Names listed per curated-evidence category
pub const MAX_LISTED_NAMES: usize = 5;

/// Trials listed under the trial-count header
pub const MAX_LISTED_TRIALS: usize = 3;

/// Longest provider fragment kept, in characters
pub const MAX_FRAGMENT_CHARS: usize = 160;

/// One summary per source, in prompt order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceSummaries {
	pub pathogenicity: String,
	pub curation: String,
	pub trials: String,
}

impl EvidenceSummaries {
	pub fn from_bundle(bundle: &EvidenceBundle) -> Self {
		Self {
			pathogenicity: summarize_pathogenicity(&bundle.pathogenicity),
			curation: summarize_curation(&bundle.curation),
			trials: summarize_trials(&bundle.trials),
		}
	}
}

/// Strip control characters and template-breaking punctuation, collapse
/// whitespace and cap the length
pub fn sanitize_fragment(fragment: &str) -> String {
	let cleaned: String = fragment
		.chars()
		.filter(|c| !matches!(c, '{' | '}' | '`'))
		.map(|c| if c.is_control() { ' ' } else { c })
		.collect();

	cleaned
		.split_whitespace()
		.collect::<Vec<_>>()
		.join(" ")
		.chars()
		.take(MAX_FRAGMENT_CHARS)
		.collect::<String>()
		.trim_end()
		.to_string()
}

pub fn summarize_pathogenicity(evidence: &PathogenicityEvidence) -> String {
	evidence
		.level
		.as_deref()
		.map(sanitize_fragment)
		.filter(|level| !level.is_empty())
		.unwrap_or_else(|| NO_ONCOKB_DATA.to_string())
}

fn listed(label: &str, names: &[String]) -> Option<String> {
	let names: Vec<String> = names
		.iter()
		.map(|name| sanitize_fragment(name))
		.filter(|name| !name.is_empty())
		.take(MAX_LISTED_NAMES)
		.collect();

	if names.is_empty() {
		None
	} else {
		Some(format!("{}: {}", label, names.join(", ")))
	}
}

pub fn summarize_curation(evidence: &CurationEvidence) -> String {
	if !evidence.has_evidence() {
		return NO_CIVIC_DATA.to_string();
	}

	let mut lines = vec![format!("Evidence items: {}", evidence.evidence_count)];
	lines.extend(listed("Diseases", &evidence.diseases));
	lines.extend(listed("Therapies", &evidence.therapies));
	lines.extend(listed("Variant types", &evidence.variant_types));
	lines.join("\n")
}

/// Render a registry phase token, e.g. `EARLY_PHASE1` as `Early Phase 1`
pub fn render_phase(phase: &str) -> String {
	let phase = phase.trim();
	if phase.is_empty() || phase.eq_ignore_ascii_case("NA") || phase.eq_ignore_ascii_case("N/A") {
		return "N/A".to_string();
	}

	phase
		.split('_')
		.filter(|token| !token.is_empty())
		.map(|token| {
			let upper = token.to_ascii_uppercase();
			match upper.strip_prefix("PHASE") {
				Some(number) if !number.is_empty() => format!("Phase {}", number),
				_ => {
					let lower = token.to_ascii_lowercase();
					let mut chars = lower.chars();
					match chars.next() {
						Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
						None => String::new(),
					}
				},
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}

pub fn summarize_trials(evidence: &TrialEvidence) -> String {
	if evidence.trial_count == 0 {
		return NO_TRIALS_FOUND.to_string();
	}

	let mut lines = vec![format!("{} recruiting trial(s)", evidence.trial_count)];
	lines.extend(evidence.trials.iter().take(MAX_LISTED_TRIALS).map(|trial| {
		format!(
			"{}: {} ({})",
			sanitize_fragment(&trial.nct_id),
			sanitize_fragment(&trial.title),
			render_phase(&sanitize_fragment(&trial.phase))
		)
	}));
	lines.join("\n")
}

#[cfg(test)]
mod tests {
	use super::*;
	use cancerrag_types::ClinicalTrial;

	fn names(values: &[&str]) -> Vec<String> {
		values.iter().map(|v| v.to_string()).collect()
	}

	#[test]
	fn test_pathogenicity_summary() {
		assert_eq!(
			summarize_pathogenicity(&PathogenicityEvidence::from_level(Some("LEVEL_1".to_string()))),
			"LEVEL_1"
		);
		assert_eq!(
			summarize_pathogenicity(&PathogenicityEvidence::default()),
			"No OncoKB data"
		);
	}

	#[test]
	fn test_curation_without_evidence_is_placeholder() {
		let evidence = CurationEvidence {
			variant_name: "V600E".to_string(),
			diseases: names(&["Melanoma"]),
			evidence_count: 0,
			..Default::default()
		};
		assert_eq!(summarize_curation(&evidence), "No CIViC data");
	}

	#[test]
	fn test_curation_lists_first_five_without_indicator() {
		let evidence = CurationEvidence {
			evidence_count: 12,
			diseases: names(&["D1", "D2", "D3", "D4", "D5", "D6", "D7"]),
			therapies: names(&["Osimertinib"]),
			..Default::default()
		};

		let summary = summarize_curation(&evidence);
		assert_eq!(
			summary,
			"Evidence items: 12\nDiseases: D1, D2, D3, D4, D5\nTherapies: Osimertinib"
		);
		assert!(!summary.contains("D6"));
		assert!(!summary.contains("..."));
	}

	#[test]
	fn test_trials_summary() {
		let trials: Vec<ClinicalTrial> = (1..=4)
			.map(|i| {
				ClinicalTrial::new(
					format!("NCT0000000{}", i),
					format!("Trial {}", i),
					"RECRUITING".to_string(),
					Some("PHASE2".to_string()),
				)
			})
			.collect();
		let summary = summarize_trials(&TrialEvidence::from_trials(trials));
		let lines: Vec<&str> = summary.lines().collect();

		assert_eq!(lines.len(), 4);
		assert_eq!(lines[0], "4 recruiting trial(s)");
		assert_eq!(lines[1], "NCT00000001: Trial 1 (Phase 2)");
		assert_eq!(
			summarize_trials(&TrialEvidence::default()),
			"No active clinical trials found"
		);
	}

	#[test]
	fn test_phase_rendering() {
		assert_eq!(render_phase("PHASE2"), "Phase 2");
		assert_eq!(render_phase("EARLY_PHASE1"), "Early Phase 1");
		assert_eq!(render_phase("NA"), "N/A");
		assert_eq!(render_phase("N/A"), "N/A");
		assert_eq!(render_phase(""), "N/A");
	}

	#[test]
	fn test_fragment_sanitization() {
		assert_eq!(
			sanitize_fragment("Lung\nAdenocarcinoma}\t```ignore previous``` {x}"),
			"Lung Adenocarcinoma ignore previous x"
		);

		let long = "a".repeat(500);
		assert_eq!(sanitize_fragment(&long).chars().count(), MAX_FRAGMENT_CHARS);
	}

	#[test]
	fn test_summaries_from_empty_bundle() {
		let summaries = EvidenceSummaries::from_bundle(&EvidenceBundle::default());
		assert_eq!(summaries.pathogenicity, NO_ONCOKB_DATA);
		assert_eq!(summaries.curation, NO_CIVIC_DATA);
		assert_eq!(summaries.trials, NO_TRIALS_FOUND);
	}
}
