//! ClinicalTrials.gov adapter: actively recruiting trials for a variant

use async_trait::async_trait;
use cancerrag_types::{
	Adapter, AdapterResult, ClinicalTrial, Evidence, EvidenceAdapter, EvidenceSource,
	SourceRuntimeConfig, TrialEvidence, VariantQuery,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::http::{create_client, null_as_default, read_json, send_error};

pub const DEFAULT_CLINICAL_TRIALS_ENDPOINT: &str = "https://clinicaltrials.gov/api/v2/studies";
pub const DEFAULT_CLINICAL_TRIALS_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_PAGE_SIZE: usize = 5;

const RECRUITING_STATUS: &str = "RECRUITING";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StudiesResponse {
	#[serde(deserialize_with = "null_as_default")]
	studies: Vec<Study>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Study {
	protocol_section: ProtocolSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProtocolSection {
	identification_module: IdentificationModule,
	status_module: StatusModule,
	design_module: DesignModule,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct IdentificationModule {
	#[serde(deserialize_with = "null_as_default")]
	nct_id: String,
	#[serde(deserialize_with = "null_as_default")]
	brief_title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StatusModule {
	#[serde(deserialize_with = "null_as_default")]
	overall_status: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DesignModule {
	#[serde(deserialize_with = "null_as_default")]
	phases: Vec<String>,
}

impl From<Study> for ClinicalTrial {
	fn from(study: Study) -> Self {
		let section = study.protocol_section;
		ClinicalTrial::new(
			section.identification_module.nct_id,
			section.identification_module.brief_title,
			section.status_module.overall_status,
			section.design_module.phases.into_iter().next(),
		)
	}
}

fn normalize(response: StudiesResponse, limit: usize) -> TrialEvidence {
	TrialEvidence::from_trials(
		response
			.studies
			.into_iter()
			.take(limit)
			.map(ClinicalTrial::from)
			.collect(),
	)
}

#[derive(Debug)]
pub struct ClinicalTrialsAdapter {
	config: Adapter,
	runtime: SourceRuntimeConfig,
	client: Client,
	page_size: usize,
}

impl ClinicalTrialsAdapter {
	pub fn new(runtime: SourceRuntimeConfig) -> AdapterResult<Self> {
		let client = create_client(&runtime)?;
		Ok(Self {
			config: Adapter::new(
				"clinicaltrials-v2".to_string(),
				"ClinicalTrials.gov studies search".to_string(),
				"ClinicalTrials.gov Adapter".to_string(),
				"1.0.0".to_string(),
			),
			runtime,
			client,
			page_size: DEFAULT_PAGE_SIZE,
		})
	}

	/// Number of studies requested and kept
	pub fn with_page_size(mut self, page_size: usize) -> Self {
		self.page_size = page_size.max(1);
		self
	}

	pub fn page_size(&self) -> usize {
		self.page_size
	}
}

#[async_trait]
impl EvidenceAdapter for ClinicalTrialsAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn source(&self) -> EvidenceSource {
		EvidenceSource::ClinicalTrials
	}

	async fn fetch_evidence(&self, query: &VariantQuery) -> AdapterResult<Evidence> {
		let search_terms = query.search_terms();
		let page_size = self.page_size.to_string();
		debug!(
			"Searching ClinicalTrials.gov at {} for '{}'",
			self.runtime.endpoint, search_terms
		);

		let response = self
			.client
			.get(&self.runtime.endpoint)
			.query(&[
				("query.term", search_terms.as_str()),
				("filter.overallStatus", RECRUITING_STATUS),
				("pageSize", page_size.as_str()),
				("format", "json"),
			])
			.send()
			.await
			.map_err(|e| send_error(e, self.runtime.timeout_ms))?;

		let body: StudiesResponse = read_json(response, "ClinicalTrials.gov").await?;
		let evidence = normalize(body, self.page_size);

		info!(
			"ClinicalTrials.gov returned {} recruiting trials for {}",
			evidence.trial_count, query
		);

		Ok(Evidence::ClinicalTrials(evidence))
	}
}
