//! CancerRAG Library
//!
//! Annotates a cancer variant (gene, protein alteration, tumor type) from
//! OncoKB, CIViC and ClinicalTrials.gov evidence and a language-model verdict.
//!
//! ```no_run
//! use cancerrag::AnnotatorBuilder;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let annotator = AnnotatorBuilder::new().build()?;
//! let result = annotator.annotate("EGFR", "L858R", Some("Lung Cancer")).await;
//! println!("{}", cancerrag::serde_json::to_string_pretty(&result)?);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

// Core domain types
pub use cancerrag_types::{
	serde_json, AdapterError, AnnotationResult, AnnotationVerdict, Classification,
	CompletionClient, CompletionError, CompletionRequest, ErrorKind, ErrorResult, Evidence,
	EvidenceAdapter, EvidenceBundle, EvidenceLevel, EvidenceSource, SecretString, VariantQuery,
	DEFAULT_TUMOR_TYPE,
};

// Adapters
pub use cancerrag_adapters::{
	AdapterRegistry, CivicAdapter, ClinicalTrialsAdapter, OncoKbAdapter, OpenAiClient,
};

// Service layer
pub use cancerrag_service::{
	build_prompt, parse_model_output, summarize, AnnotationService, EvidenceSummaries,
	GenerationSettings,
};

// Config
pub use cancerrag_config::{
	load_config, load_config_from, log_service_info, log_service_shutdown, ConfigLoadError,
	ConfigValidationError, ConfigurableValueError, LogFormat, LoggingSettings, Settings,
	SourcesSettings,
};

pub mod types {
	pub use cancerrag_types::*;
}

pub mod adapters {
	pub use cancerrag_adapters::*;
}

pub mod service {
	pub use cancerrag_service::*;
}

pub mod config {
	pub use cancerrag_config::*;
}

pub mod mocks;

pub use async_trait;

/// Errors raised while assembling an [`Annotator`]
#[derive(Debug, Error)]
pub enum BuildError {
	#[error("Completion API key is missing: {0}")]
	CredentialMissing(#[from] ConfigurableValueError),

	#[error("Invalid configuration: {0}")]
	InvalidConfig(#[from] ConfigValidationError),

	#[error("Failed to create evidence adapter: {0}")]
	Adapter(#[from] AdapterError),

	#[error("Failed to create completion client: {0}")]
	Completion(#[from] CompletionError),
}

/// Build the registry for the three public sources from settings
pub fn registry_from_settings(sources: &SourcesSettings) -> Result<AdapterRegistry, AdapterError> {
	let mut registry = AdapterRegistry::new();
	registry.register(Arc::new(OncoKbAdapter::new(
		sources.oncokb.runtime_config(),
	)?));
	registry.register(Arc::new(CivicAdapter::new(sources.civic.runtime_config())?));
	registry.register(Arc::new(
		ClinicalTrialsAdapter::new(sources.clinical_trials.runtime_config())?
			.with_page_size(sources.trial_page_size),
	));
	Ok(registry)
}

/// Builder pattern for configuring the annotator
#[derive(Debug, Default)]
pub struct AnnotatorBuilder {
	settings: Option<Settings>,
	adapters: Vec<Arc<dyn EvidenceAdapter>>,
	completion_client: Option<Arc<dyn CompletionClient>>,
}

impl AnnotatorBuilder {
	/// Create a builder using default settings
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a builder from `config/config.*` and `CANCERRAG__*` variables
	pub fn from_config() -> Result<Self, ConfigLoadError> {
		Ok(Self::new().with_settings(load_config()?))
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Register a custom adapter, replacing the configured one for its source
	pub fn with_adapter(mut self, adapter: Arc<dyn EvidenceAdapter>) -> Self {
		self.adapters.push(adapter);
		self
	}

	/// Use this completion client instead of one built from settings
	///
	/// No API key is resolved when a client is supplied.
	pub fn with_completion_client(mut self, client: Arc<dyn CompletionClient>) -> Self {
		self.completion_client = Some(client);
		self
	}

	/// Assemble the annotator
	///
	/// Fails with [`BuildError::CredentialMissing`] when no completion client
	/// was supplied and the configured API key cannot be resolved.
	pub fn build(self) -> Result<Annotator, BuildError> {
		let settings = self.settings.unwrap_or_default();
		settings.validate()?;

		let mut registry = registry_from_settings(&settings.sources)?;
		for adapter in self.adapters {
			if let Some(previous) = registry.register(adapter) {
				info!("Replaced default adapter {}", previous.id());
			}
		}

		let completion_client = match self.completion_client {
			Some(client) => client,
			None => {
				let api_key = settings.completion_api_key()?;
				Arc::new(OpenAiClient::new(
					settings.completion.endpoint.clone(),
					settings.completion.model.clone(),
					api_key,
					settings.completion.timeout_ms,
				)?) as Arc<dyn CompletionClient>
			},
		};

		let generation = GenerationSettings {
			temperature: settings.completion.temperature,
			max_tokens: settings.completion.max_tokens,
		};

		info!(
			"Annotator ready with {} sources and model {}",
			registry.len(),
			completion_client.model()
		);

		Ok(Annotator {
			service: AnnotationService::new(Arc::new(registry), completion_client, generation),
			settings,
		})
	}
}

/// Configured entry point for variant annotation
#[derive(Debug, Clone)]
pub struct Annotator {
	service: AnnotationService,
	settings: Settings,
}

impl Annotator {
	pub fn builder() -> AnnotatorBuilder {
		AnnotatorBuilder::new()
	}

	/// Annotate a variant; `None` or a blank tumor type means the generic `"Cancer"`
	pub async fn annotate(
		&self,
		gene: &str,
		alteration: &str,
		tumor_type: Option<&str>,
	) -> AnnotationResult {
		let mut query = VariantQuery::new(gene, alteration);
		if let Some(tumor_type) = tumor_type {
			query = query.with_tumor_type(tumor_type);
		}
		self.annotate_query(&query).await
	}

	pub async fn annotate_query(&self, query: &VariantQuery) -> AnnotationResult {
		self.service.annotate(query).await
	}

	/// Evidence only, without calling the completion service
	pub async fn gather_evidence(&self, query: &VariantQuery) -> EvidenceBundle {
		self.service.gather_evidence(query).await
	}

	pub fn service(&self) -> &AnnotationService {
		&self.service
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}
}

/// Initialize tracing on stderr with configuration-based settings
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(logging: &LoggingSettings) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

	match logging.format {
		LogFormat::Json => tracing_subscriber::fmt()
			.json()
			.with_env_filter(env_filter)
			.with_writer(std::io::stderr)
			.try_init()?,
		LogFormat::Pretty => tracing_subscriber::fmt()
			.pretty()
			.with_env_filter(env_filter)
			.with_writer(std::io::stderr)
			.try_init()?,
		LogFormat::Compact => tracing_subscriber::fmt()
			.compact()
			.with_env_filter(env_filter)
			.with_writer(std::io::stderr)
			.try_init()?,
	}

	info!(
		"Logging configuration applied: level={}, format={:?}",
		logging.level, logging.format
	);

	Ok(())
}
