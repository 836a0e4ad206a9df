//! Mock adapters and completion client for examples and testing
//!
//! These need no network access and can be registered through
//! [`AnnotatorBuilder`](crate::AnnotatorBuilder) in place of the real sources.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cancerrag_types::{
	Adapter, AdapterError, AdapterResult, CompletionClient, CompletionError, CompletionRequest,
	CompletionResult, Evidence, EvidenceAdapter, EvidenceSource, VariantQuery,
};

fn mock_adapter_info(id: &str, name: &str, description: &str) -> Adapter {
	Adapter::new(
		id.to_string(),
		description.to_string(),
		name.to_string(),
		"1.0.0".to_string(),
	)
}

/// Adapter that always returns the same evidence
#[derive(Debug, Clone)]
pub struct StaticEvidenceAdapter {
	adapter: Adapter,
	evidence: Evidence,
	delay: Option<Duration>,
}

impl StaticEvidenceAdapter {
	pub fn new(evidence: Evidence) -> Self {
		let source = evidence.source();
		Self {
			adapter: mock_adapter_info(
				&format!("mock-static-{}", source),
				"Mock Static Adapter",
				"Returns fixed evidence",
			),
			evidence,
			delay: None,
		}
	}

	/// Suspend for `delay` before answering
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}
}

#[async_trait]
impl EvidenceAdapter for StaticEvidenceAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.adapter
	}

	fn source(&self) -> EvidenceSource {
		self.evidence.source()
	}

	async fn fetch_evidence(&self, _query: &VariantQuery) -> AdapterResult<Evidence> {
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		Ok(self.evidence.clone())
	}
}

/// Adapter whose source is always unavailable
#[derive(Debug, Clone)]
pub struct FailingAdapter {
	adapter: Adapter,
	source: EvidenceSource,
	status_code: u16,
}

impl FailingAdapter {
	pub fn new(source: EvidenceSource) -> Self {
		Self::with_status(source, 503)
	}

	pub fn with_status(source: EvidenceSource, status_code: u16) -> Self {
		Self {
			adapter: mock_adapter_info(
				&format!("mock-failing-{}", source),
				"Mock Failing Adapter",
				"Always fails",
			),
			source,
			status_code,
		}
	}
}

#[async_trait]
impl EvidenceAdapter for FailingAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.adapter
	}

	fn source(&self) -> EvidenceSource {
		self.source
	}

	async fn fetch_evidence(&self, _query: &VariantQuery) -> AdapterResult<Evidence> {
		Err(AdapterError::from_http_failure(self.status_code))
	}
}

#[derive(Debug, Clone)]
enum MockReply {
	Text(String),
	Status(u16, String),
}

/// Completion client with a scripted reply that records every request
#[derive(Debug, Clone)]
pub struct MockCompletionClient {
	reply: MockReply,
	requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockCompletionClient {
	/// Reply with `text` to every request
	pub fn replying(text: impl Into<String>) -> Self {
		Self {
			reply: MockReply::Text(text.into()),
			requests: Arc::new(Mutex::new(Vec::new())),
		}
	}

	/// Fail every request with an HTTP status
	pub fn failing(status_code: u16, body: impl Into<String>) -> Self {
		Self {
			reply: MockReply::Status(status_code, body.into()),
			requests: Arc::new(Mutex::new(Vec::new())),
		}
	}

	/// Requests received so far
	pub fn requests(&self) -> Vec<CompletionRequest> {
		self.requests
			.lock()
			.map(|requests| requests.clone())
			.unwrap_or_default()
	}

	pub fn call_count(&self) -> usize {
		self.requests
			.lock()
			.map(|requests| requests.len())
			.unwrap_or_default()
	}

	/// Prompt of the most recent request
	pub fn last_prompt(&self) -> Option<String> {
		self.requests()
			.last()
			.and_then(|request| request.prompt().map(str::to_string))
	}
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
	fn model(&self) -> &str {
		"mock-model"
	}

	async fn complete(&self, request: &CompletionRequest) -> CompletionResult<String> {
		if let Ok(mut requests) = self.requests.lock() {
			requests.push(request.clone());
		}

		match &self.reply {
			MockReply::Text(text) => Ok(text.clone()),
			MockReply::Status(status_code, body) => Err(CompletionError::HttpStatusError {
				status_code: *status_code,
				body: body.clone(),
			}),
		}
	}
}
