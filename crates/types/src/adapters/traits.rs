//! Core adapter trait for evidence sources

use super::{Adapter, AdapterResult};
use crate::evidence::{Evidence, EvidenceSource};
use crate::models::VariantQuery;
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{info, warn};

/// Fetch and normalize evidence for a variant from exactly one external source
///
/// Implementations report failures through `fetch_evidence`; callers that
/// must never see an error use `evidence_or_empty`, which degrades to the
/// source's empty shape.
#[async_trait]
pub trait EvidenceAdapter: Send + Sync + Debug {
	/// Get adapter information
	fn adapter_info(&self) -> &Adapter;

	/// The source this adapter talks to
	fn source(&self) -> EvidenceSource;

	/// Get adapter ID
	fn id(&self) -> &str {
		&self.adapter_info().adapter_id
	}

	/// Get human-readable name for this adapter
	fn name(&self) -> &str {
		&self.adapter_info().name
	}

	/// Query the source and normalize its response
	async fn fetch_evidence(&self, query: &VariantQuery) -> AdapterResult<Evidence>;

	/// Like `fetch_evidence`, but any failure becomes the empty shape
	async fn evidence_or_empty(&self, query: &VariantQuery) -> Evidence {
		match self.fetch_evidence(query).await {
			Ok(evidence) if evidence.source() == self.source() => evidence,
			Ok(evidence) => {
				warn!(
					"Adapter {} returned {} evidence but serves {}, ignoring it",
					self.id(),
					evidence.source(),
					self.source()
				);
				Evidence::empty(self.source())
			},
			Err(e) if e.is_source_unavailable() => {
				warn!("Adapter {} unavailable for {}: {}", self.id(), query, e);
				Evidence::empty(self.source())
			},
			Err(e) => {
				info!(
					"Adapter {} found no evidence for {}: {}",
					self.id(),
					query,
					e
				);
				Evidence::empty(self.source())
			},
		}
	}
}
