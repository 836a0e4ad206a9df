//! Classification prompt

use crate::summarizer::EvidenceSummaries;
use cancerrag_types::{vocabulary, Classification, EvidenceLevel, VariantQuery};

/// Build the single user message sent to the completion service
pub fn build_prompt(query: &VariantQuery, summaries: &EvidenceSummaries) -> String {
	format!(
		r#"You are an expert cancer genomic pathologist.

Variant: {gene} {alteration}
Tumor type: {tumor_type}

Real evidence retrieved:
OncoKB → {oncokb}
CIViC → {civic}
Clinical Trials → {trials}

Return ONLY valid JSON (no markdown, no extra text):

{{
  "gene": "{gene}",
  "variant": "{alteration}",
  "classification": "{classifications}",
  "highest_level_of_evidence": "{levels}",
  "recommended_therapies": [],
  "clinical_trials": [],
  "summary": "One-sentence plain-English explanation"
}}
"#,
		gene = query.gene,
		alteration = query.alteration,
		tumor_type = query.tumor_type,
		oncokb = summaries.pathogenicity,
		civic = summaries.curation,
		trials = summaries.trials,
		classifications = vocabulary(Classification::ALL, Classification::as_str),
		levels = vocabulary(EvidenceLevel::ALL, EvidenceLevel::as_str),
	)
}
