//! Annotation orchestration: fan out to the sources, summarize, prompt, parse

use crate::prompt::build_prompt;
use crate::response_parser::parse_model_output;
use crate::summarizer::EvidenceSummaries;
use cancerrag_adapters::AdapterRegistry;
use cancerrag_types::{
	AnnotationResult, CompletionClient, CompletionRequest, ErrorKind, ErrorResult, Evidence,
	EvidenceBundle, EvidenceSource, VariantQuery, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Sampling parameters for the classification call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
	pub temperature: f32,
	pub max_tokens: u32,
}

impl Default for GenerationSettings {
	fn default() -> Self {
		Self {
			temperature: DEFAULT_TEMPERATURE,
			max_tokens: DEFAULT_MAX_TOKENS,
		}
	}
}

/// Service that annotates variants from source evidence and a model verdict
///
/// Holds only shared, immutable collaborators; concurrent calls to
/// [`AnnotationService::annotate`] do not coordinate.
#[derive(Debug, Clone)]
pub struct AnnotationService {
	adapter_registry: Arc<AdapterRegistry>,
	completion_client: Arc<dyn CompletionClient>,
	generation: GenerationSettings,
}

impl AnnotationService {
	pub fn new(
		adapter_registry: Arc<AdapterRegistry>,
		completion_client: Arc<dyn CompletionClient>,
		generation: GenerationSettings,
	) -> Self {
		Self {
			adapter_registry,
			completion_client,
			generation,
		}
	}

	pub fn generation(&self) -> GenerationSettings {
		self.generation
	}

	pub fn adapter_registry(&self) -> &AdapterRegistry {
		&self.adapter_registry
	}

	pub fn completion_client(&self) -> &dyn CompletionClient {
		self.completion_client.as_ref()
	}

	/// Fetch evidence from every registered source concurrently
	///
	/// Waits for all sources. A source that fails, panics or is not
	/// registered contributes its empty shape.
	pub async fn gather_evidence(&self, query: &VariantQuery) -> EvidenceBundle {
		let adapters = self.adapter_registry.get_all();
		info!(
			"Gathering evidence for {} from {} sources",
			query,
			adapters.len()
		);

		let (sources, tasks): (Vec<EvidenceSource>, Vec<_>) = adapters
			.into_iter()
			.map(|adapter| {
				let query = query.clone();
				let source = adapter.source();
				let task = tokio::spawn(async move {
					debug!("Starting evidence fetch from {}", adapter.id());
					adapter.evidence_or_empty(&query).await
				});
				(source, task)
			})
			.unzip();

		let results = join_all(tasks).await;

		let evidence: Vec<Evidence> = sources
			.into_iter()
			.zip(results)
			.map(|(source, result)| match result {
				Ok(evidence) => evidence,
				Err(e) => {
					warn!("Evidence task for {} did not complete: {}", source, e);
					Evidence::empty(source)
				},
			})
			.collect();

		for source in EvidenceSource::ALL {
			if !evidence.iter().any(|e| e.source() == source) {
				debug!("No adapter registered for {}, using empty evidence", source);
			}
		}

		EvidenceBundle::from_evidence(evidence)
	}

	/// Summaries for every source of a bundle
	pub fn summarize(&self, bundle: &EvidenceBundle) -> EvidenceSummaries {
		EvidenceSummaries::from_bundle(bundle)
	}

	/// Annotate one variant
	///
	/// Never fails: model output that cannot be read as a verdict, and a
	/// failed completion call, come back as an [`ErrorResult`].
	pub async fn annotate(&self, query: &VariantQuery) -> AnnotationResult {
		let bundle = self.gather_evidence(query).await;
		let summaries = self.summarize(&bundle);
		let prompt = build_prompt(query, &summaries);

		let request = CompletionRequest::from_prompt(prompt)
			.with_temperature(self.generation.temperature)
			.with_max_tokens(self.generation.max_tokens);

		debug!(
			"Requesting verdict for {} from model {}",
			query,
			self.completion_client.model()
		);

		let result = match self.completion_client.complete(&request).await {
			Ok(text) => parse_model_output(&text),
			Err(e) => {
				warn!("Completion call for {} failed: {}", query, e);
				ErrorResult::new(ErrorKind::CompletionFailed, "")
					.with_detail(e.to_string())
					.into()
			},
		};

		match &result {
			AnnotationResult::Verdict(verdict) => info!(
				"Annotated {} as {}",
				query,
				verdict.classification.as_str()
			),
			AnnotationResult::Error(error) => {
				info!("Annotation of {} returned {:?}", query, error.kind)
			},
		}

		result
	}
}
