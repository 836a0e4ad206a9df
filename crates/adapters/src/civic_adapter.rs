//! CIViC adapter: curated variant evidence over GraphQL
//!
//! `browseVariants` returns up to five candidates for a feature/variant name
//! pair. The candidate whose name equals the alteration case-insensitively
//! wins; otherwise the first candidate in provider order is used.

use async_trait::async_trait;
use cancerrag_types::{
	Adapter, AdapterError, AdapterResult, CurationEvidence, Evidence, EvidenceAdapter,
	EvidenceSource, SourceRuntimeConfig, VariantQuery,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::http::{create_client, null_as_default, read_json, send_error};

pub const DEFAULT_CIVIC_ENDPOINT: &str = "https://civicdb.org/api/graphql";
pub const DEFAULT_CIVIC_TIMEOUT_MS: u64 = 15_000;

const BROWSE_VARIANTS_QUERY: &str = r#"
query ($featureName: String!, $variantName: String!) {
  browseVariants(featureName: $featureName, variantName: $variantName, first: 5) {
    edges {
      node {
        id
        name
        variantTypes { name }
        evidenceItemCount
        diseases { name }
        therapies { name }
        myVariantInfo { cosmicId clinvarId }
      }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrowseVariables<'a> {
	feature_name: &'a str,
	variant_name: &'a str,
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
	query: &'static str,
	variables: BrowseVariables<'a>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GraphQlResponse {
	data: Option<BrowseData>,
	#[serde(deserialize_with = "null_as_default")]
	errors: Vec<GraphQlError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GraphQlError {
	message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BrowseData {
	browse_variants: Option<VariantConnection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VariantConnection {
	#[serde(deserialize_with = "null_as_default")]
	edges: Vec<VariantEdge>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VariantEdge {
	node: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct VariantNode {
	#[serde(deserialize_with = "null_as_default")]
	name: String,
	#[serde(deserialize_with = "null_as_default")]
	variant_types: Vec<Named>,
	#[serde(deserialize_with = "null_as_default")]
	evidence_item_count: u64,
	#[serde(deserialize_with = "null_as_default")]
	diseases: Vec<Named>,
	#[serde(deserialize_with = "null_as_default")]
	therapies: Vec<Named>,
	my_variant_info: Option<MyVariantInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Named {
	name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MyVariantInfo {
	cosmic_id: Option<Value>,
	clinvar_id: Option<Value>,
}

fn names(items: Vec<Named>) -> Vec<String> {
	items
		.into_iter()
		.filter_map(|n| n.name)
		.filter(|n| !n.trim().is_empty())
		.collect()
}

/// Identifiers arrive as strings or integers depending on the record
fn identifier(value: Option<Value>) -> String {
	match value {
		Some(Value::String(s)) => s,
		Some(Value::Number(n)) => n.to_string(),
		_ => String::new(),
	}
}

impl From<VariantNode> for CurationEvidence {
	fn from(node: VariantNode) -> Self {
		let info = node.my_variant_info.unwrap_or_default();
		Self {
			variant_name: node.name,
			variant_types: names(node.variant_types),
			evidence_count: node.evidence_item_count,
			diseases: names(node.diseases),
			therapies: names(node.therapies),
			cosmic_id: identifier(info.cosmic_id),
			clinvar_id: identifier(info.clinvar_id),
		}
	}
}

/// Decode each candidate on its own, skipping nodes that do not fit
fn decode_candidates(connection: VariantConnection) -> Vec<VariantNode> {
	connection
		.edges
		.into_iter()
		.filter_map(|edge| edge.node)
		.filter_map(|node| match serde_json::from_value::<VariantNode>(node) {
			Ok(node) => Some(node),
			Err(e) => {
				warn!("Skipping malformed CIViC candidate: {}", e);
				None
			},
		})
		.collect()
}

/// Pick the candidate named like the alteration, else the first candidate
pub(crate) fn select_variant<'a>(
	candidates: &'a [VariantNode],
	alteration: &str,
) -> Option<&'a VariantNode> {
	let wanted = alteration.to_uppercase();
	candidates
		.iter()
		.find(|node| node.name.to_uppercase() == wanted)
		.or_else(|| candidates.first())
}

#[derive(Debug)]
pub struct CivicAdapter {
	config: Adapter,
	runtime: SourceRuntimeConfig,
	client: Client,
}

impl CivicAdapter {
	pub fn new(runtime: SourceRuntimeConfig) -> AdapterResult<Self> {
		let client = create_client(&runtime)?;
		Ok(Self {
			config: Adapter::new(
				"civic-graphql-v2".to_string(),
				"CIViC GraphQL browseVariants".to_string(),
				"CIViC Adapter".to_string(),
				"1.0.0".to_string(),
			),
			runtime,
			client,
		})
	}

	async fn browse_variants(&self, query: &VariantQuery) -> AdapterResult<Vec<VariantNode>> {
		let request = GraphQlRequest {
			query: BROWSE_VARIANTS_QUERY,
			variables: BrowseVariables {
				feature_name: &query.gene,
				variant_name: &query.alteration,
			},
		};

		debug!("Querying CIViC at {} for {}", self.runtime.endpoint, query);

		let response = self
			.client
			.post(&self.runtime.endpoint)
			.json(&request)
			.send()
			.await
			.map_err(|e| send_error(e, self.runtime.timeout_ms))?;

		let body: GraphQlResponse = read_json(response, "CIViC").await?;

		let connection = match body.data.and_then(|d| d.browse_variants) {
			Some(connection) => connection,
			None if !body.errors.is_empty() => {
				let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
				return Err(AdapterError::InvalidResponse {
					reason: format!("CIViC GraphQL errors: {}", messages.join("; ")),
				});
			},
			None => VariantConnection::default(),
		};

		Ok(decode_candidates(connection))
	}
}

#[async_trait]
impl EvidenceAdapter for CivicAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn source(&self) -> EvidenceSource {
		EvidenceSource::Civic
	}

	async fn fetch_evidence(&self, query: &VariantQuery) -> AdapterResult<Evidence> {
		let candidates = self.browse_variants(query).await?;

		let node = select_variant(&candidates, &query.alteration)
			.cloned()
			.ok_or_else(|| AdapterError::NoMatch {
				gene: query.gene.clone(),
				alteration: query.alteration.clone(),
			})?;

		if node.name.to_uppercase() != query.alteration.to_uppercase() {
			debug!(
				"No exact CIViC match for {}, using first candidate {}",
				query, node.name
			);
		}

		let evidence = CurationEvidence::from(node);
		info!(
			"CIViC returned {} evidence items for {} ({} candidates)",
			evidence.evidence_count,
			query,
			candidates.len()
		);

		Ok(Evidence::Civic(evidence))
	}
}
