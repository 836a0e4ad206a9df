//! Timing-controlled mock adapters for concurrency tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use cancerrag::types::{
	Adapter, AdapterResult, CompletionClient, CompletionRequest, CompletionResult, Evidence,
	EvidenceAdapter, EvidenceSource, VariantQuery,
};

/// Call tracking for verifying when adapters ran
#[derive(Debug, Clone, Default)]
pub struct CallTracker {
	calls: Arc<AtomicUsize>,
	started: Arc<Mutex<Vec<Instant>>>,
	finished: Arc<Mutex<Vec<Instant>>>,
}

#[allow(dead_code)]
impl CallTracker {
	fn record_start(&self) {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.started.lock().unwrap().push(Instant::now());
	}

	fn record_finish(&self) {
		self.finished.lock().unwrap().push(Instant::now());
	}

	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn started(&self) -> Vec<Instant> {
		self.started.lock().unwrap().clone()
	}

	pub fn finished(&self) -> Vec<Instant> {
		self.finished.lock().unwrap().clone()
	}
}

/// Mock adapter that answers with its source's empty shape after a delay
#[derive(Debug, Clone)]
pub struct TimingControlledAdapter {
	adapter: Adapter,
	source: EvidenceSource,
	response_delay: Duration,
	pub tracker: CallTracker,
}

#[allow(dead_code)]
impl TimingControlledAdapter {
	pub fn new(source: EvidenceSource, response_delay_ms: u64) -> Self {
		let adapter_id = format!("timing-{}", source);
		Self {
			adapter: Adapter::new(
				adapter_id.clone(),
				format!("Timing controlled adapter with {}ms delay", response_delay_ms),
				format!("Timing Controlled Adapter {}", source),
				"1.0.0".to_string(),
			),
			source,
			response_delay: Duration::from_millis(response_delay_ms),
			tracker: CallTracker::default(),
		}
	}

	pub fn call_count(&self) -> usize {
		self.tracker.call_count()
	}
}

#[async_trait]
impl EvidenceAdapter for TimingControlledAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.adapter
	}

	fn source(&self) -> EvidenceSource {
		self.source
	}

	async fn fetch_evidence(&self, _query: &VariantQuery) -> AdapterResult<Evidence> {
		self.tracker.record_start();
		tokio::time::sleep(self.response_delay).await;
		self.tracker.record_finish();
		Ok(Evidence::empty(self.source))
	}
}

/// Completion client that notes when it was called
#[derive(Debug, Clone)]
pub struct RecordingCompletion {
	reply: String,
	called_at: Arc<Mutex<Vec<Instant>>>,
}

#[allow(dead_code)]
impl RecordingCompletion {
	pub fn new(reply: impl Into<String>) -> Self {
		Self {
			reply: reply.into(),
			called_at: Arc::new(Mutex::new(Vec::new())),
		}
	}

	pub fn called_at(&self) -> Vec<Instant> {
		self.called_at.lock().unwrap().clone()
	}
}

#[async_trait]
impl CompletionClient for RecordingCompletion {
	fn model(&self) -> &str {
		"recording"
	}

	async fn complete(&self, _request: &CompletionRequest) -> CompletionResult<String> {
		self.called_at.lock().unwrap().push(Instant::now());
		Ok(self.reply.clone())
	}
}
