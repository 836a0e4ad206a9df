//! CancerRAG Adapters
//!
//! Source-specific adapters for OncoKB, CIViC and ClinicalTrials.gov, plus
//! the OpenAI-compatible completion client.

use std::{collections::HashMap, sync::Arc};

pub mod civic_adapter;
pub mod clinical_trials_adapter;
mod http;
pub mod oncokb_adapter;
pub mod openai_client;

pub use cancerrag_types::{AdapterError, AdapterResult, EvidenceAdapter, EvidenceSource};
pub use civic_adapter::CivicAdapter;
pub use clinical_trials_adapter::ClinicalTrialsAdapter;
pub use oncokb_adapter::OncoKbAdapter;
pub use openai_client::OpenAiClient;

/// Registry holding at most one adapter per evidence source
#[derive(Debug, Default, Clone)]
pub struct AdapterRegistry {
	adapters: HashMap<EvidenceSource, Arc<dyn EvidenceAdapter>>,
}

impl AdapterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an adapter, replacing any adapter already serving its source
	pub fn register(&mut self, adapter: Arc<dyn EvidenceAdapter>) -> Option<Arc<dyn EvidenceAdapter>> {
		self.adapters.insert(adapter.source(), adapter)
	}

	pub fn get(&self, source: EvidenceSource) -> Option<&Arc<dyn EvidenceAdapter>> {
		self.adapters.get(&source)
	}

	/// Registered adapters in source order
	pub fn get_all(&self) -> Vec<Arc<dyn EvidenceAdapter>> {
		EvidenceSource::ALL
			.iter()
			.filter_map(|source| self.adapters.get(source).cloned())
			.collect()
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use cancerrag_types::SourceRuntimeConfig;

	fn local_registry() -> AdapterRegistry {
		let runtime = || SourceRuntimeConfig::new("http://127.0.0.1:9", 100);
		let mut registry = AdapterRegistry::new();
		registry.register(Arc::new(ClinicalTrialsAdapter::new(runtime()).unwrap()));
		registry.register(Arc::new(OncoKbAdapter::new(runtime()).unwrap()));
		registry.register(Arc::new(CivicAdapter::new(runtime()).unwrap()));
		registry
	}

	#[test]
	fn test_get_all_follows_source_order() {
		let registry = local_registry();
		assert_eq!(registry.len(), 3);
		let sources: Vec<EvidenceSource> = registry.get_all().iter().map(|a| a.source()).collect();
		assert_eq!(sources, EvidenceSource::ALL.to_vec());
	}

	#[test]
	fn test_register_replaces_by_source() {
		let mut registry = local_registry();
		let replacement = OncoKbAdapter::new(SourceRuntimeConfig::new("http://127.0.0.1:9", 100)).unwrap();

		let previous = registry.register(Arc::new(replacement));
		assert!(previous.is_some());
		assert_eq!(registry.len(), 3);
		assert_eq!(
			registry.get(EvidenceSource::OncoKb).map(|a| a.id().to_string()),
			Some("oncokb-v1".to_string())
		);
	}

	#[test]
	fn test_empty_registry() {
		let registry = AdapterRegistry::new();
		assert!(registry.is_empty());
		assert!(registry.get(EvidenceSource::Civic).is_none());
		assert!(registry.get_all().is_empty());
	}
}
