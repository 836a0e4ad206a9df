//! CancerRAG Service
//!
//! Evidence gathering, summarization, prompt construction and verdict parsing.

pub mod annotator;
pub mod prompt;
pub mod response_parser;
pub mod summarizer;

pub use annotator::{AnnotationService, GenerationSettings};
pub use prompt::build_prompt;
pub use response_parser::{parse_model_output, strip_code_fence};
pub use summarizer::{sanitize_fragment, EvidenceSummaries};

use cancerrag_types::EvidenceBundle;

/// Summaries for every source of a bundle
pub fn summarize(bundle: &EvidenceBundle) -> EvidenceSummaries {
	EvidenceSummaries::from_bundle(bundle)
}
