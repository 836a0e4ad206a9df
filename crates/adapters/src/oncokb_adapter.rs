//! OncoKB adapter: therapeutic evidence level for a protein change

use async_trait::async_trait;
use cancerrag_types::{
	Adapter, AdapterResult, Evidence, EvidenceAdapter, EvidenceSource, PathogenicityEvidence,
	SourceRuntimeConfig, VariantQuery,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::http::{build_url, create_client, read_json, send_error};

pub const DEFAULT_ONCOKB_ENDPOINT: &str = "https://www.oncokb.org/api/v1";
pub const DEFAULT_ONCOKB_TIMEOUT_MS: u64 = 10_000;

const ANNOTATE_PATH: &str = "annotate/mutations/byProteinChange";

/// Fields of the OncoKB annotation we read; everything else is ignored
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct OncoKbAnnotation {
	highest_sensitive_level: Option<String>,
	level: Option<String>,
}

impl From<OncoKbAnnotation> for PathogenicityEvidence {
	fn from(annotation: OncoKbAnnotation) -> Self {
		let level = annotation
			.highest_sensitive_level
			.filter(|l| !l.trim().is_empty())
			.or(annotation.level);
		PathogenicityEvidence::from_level(level)
	}
}

#[derive(Debug)]
pub struct OncoKbAdapter {
	config: Adapter,
	runtime: SourceRuntimeConfig,
	client: Client,
}

impl OncoKbAdapter {
	pub fn new(runtime: SourceRuntimeConfig) -> AdapterResult<Self> {
		let client = create_client(&runtime)?;
		Ok(Self {
			config: Adapter::new(
				"oncokb-v1".to_string(),
				"OncoKB annotate/mutations/byProteinChange".to_string(),
				"OncoKB Adapter".to_string(),
				"1.0.0".to_string(),
			),
			runtime,
			client,
		})
	}
}

#[async_trait]
impl EvidenceAdapter for OncoKbAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn source(&self) -> EvidenceSource {
		EvidenceSource::OncoKb
	}

	async fn fetch_evidence(&self, query: &VariantQuery) -> AdapterResult<Evidence> {
		let url = build_url(&self.runtime.endpoint, ANNOTATE_PATH)?;
		debug!("Querying OncoKB at {} for {}", url, query);

		let response = self
			.client
			.get(&url)
			.query(&[
				("hugoSymbol", query.gene.as_str()),
				("alteration", query.alteration.as_str()),
				("tumorType", query.tumor_type.as_str()),
			])
			.send()
			.await
			.map_err(|e| send_error(e, self.runtime.timeout_ms))?;

		let annotation: OncoKbAnnotation = read_json(response, "OncoKB").await?;
		let evidence = PathogenicityEvidence::from(annotation);

		info!(
			"OncoKB level for {}: {}",
			query,
			evidence.level.as_deref().unwrap_or("none")
		);

		Ok(Evidence::OncoKb(evidence))
	}
}
