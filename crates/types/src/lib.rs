//! CancerRAG Types
//!
//! Shared models and traits for CancerRAG: the variant query, the normalized
//! evidence each source adapter produces, the completion-service contract and
//! the verdict envelope returned to callers.

pub mod adapters;
pub mod completion;
pub mod evidence;
pub mod models;
pub mod verdict;

pub use serde_json;

pub use adapters::{Adapter, AdapterError, AdapterResult, EvidenceAdapter, SourceRuntimeConfig};

pub use completion::{
	ChatMessage, CompletionClient, CompletionError, CompletionRequest, CompletionResult, Role,
	DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};

pub use evidence::{
	ClinicalTrial, CurationEvidence, Evidence, EvidenceBundle, EvidenceSource,
	PathogenicityEvidence, TrialEvidence, PHASE_NOT_APPLICABLE,
};

pub use models::{SecretString, VariantQuery, DEFAULT_TUMOR_TYPE};

pub use verdict::{
	AnnotationResult, AnnotationVerdict, Classification, ErrorKind, ErrorResult, EvidenceLevel,
	vocabulary,
};
