//! Mock provider server for integration tests
//!
//! Serves canned OncoKB, CIViC, ClinicalTrials.gov and chat-completion
//! responses on an ephemeral local port and records what it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
	extract::{Query, State},
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	routing::{get, post},
	Json, Router,
};
use cancerrag::{config::ConfigurableValue, serde_json::json, serde_json::Value, Settings};
use tokio::task::JoinHandle;

/// How the evidence routes answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum SourceMode {
	Ok,
	ServerError,
	Malformed,
	/// CIViC answers with an empty candidate list
	NoCandidates,
	/// CIViC answers with GraphQL errors and no data
	GraphQlErrors,
}

pub const TEST_API_KEY: &str = "sk-test-key";

/// Verdict the completion route returns by default
#[allow(dead_code)]
pub fn egfr_verdict() -> Value {
	json!({
		"gene": "EGFR",
		"variant": "L858R",
		"classification": "Oncogenic",
		"highest_level_of_evidence": "Level 1",
		"recommended_therapies": ["Osimertinib"],
		"clinical_trials": [{"nct_id": "NCT04487080"}],
		"summary": "EGFR L858R is a sensitizing mutation with approved targeted therapy."
	})
}

#[derive(Debug)]
struct MockSourceState {
	mode: SourceMode,
	completion_reply: String,
	completion_status: Option<StatusCode>,
	requests: Mutex<Vec<RecordedRequest>>,
}

/// One request seen by the mock server
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
	pub route: &'static str,
	pub query: HashMap<String, String>,
	pub body: Value,
	pub authorization: Option<String>,
}

impl MockSourceState {
	fn record(
		&self,
		route: &'static str,
		query: HashMap<String, String>,
		body: Value,
		authorization: Option<String>,
	) {
		if let Ok(mut requests) = self.requests.lock() {
			requests.push(RecordedRequest {
				route,
				query,
				body,
				authorization,
			});
		}
	}

	fn respond(&self, body: Value) -> Response {
		match self.mode {
			SourceMode::Ok | SourceMode::NoCandidates | SourceMode::GraphQlErrors => {
				Json(body).into_response()
			},
			SourceMode::ServerError => {
				(StatusCode::INTERNAL_SERVER_ERROR, "upstream failure").into_response()
			},
			SourceMode::Malformed => (StatusCode::OK, "<html>maintenance</html>").into_response(),
		}
	}
}

async fn oncokb_annotation(
	State(state): State<Arc<MockSourceState>>,
	Query(query): Query<HashMap<String, String>>,
) -> Response {
	state.record("oncokb", query, Value::Null, None);
	state.respond(json!({
		"query": {"hugoSymbol": "EGFR", "alteration": "L858R"},
		"oncogenic": "Oncogenic",
		"highestSensitiveLevel": "LEVEL_1",
		"level": "LEVEL_1"
	}))
}

async fn civic_graphql(
	State(state): State<Arc<MockSourceState>>,
	Json(body): Json<Value>,
) -> Response {
	state.record("civic", HashMap::new(), body, None);
	match state.mode {
		SourceMode::NoCandidates => {
			return Json(json!({"data": {"browseVariants": {"edges": []}}})).into_response()
		},
		SourceMode::GraphQlErrors => {
			return Json(json!({"data": null, "errors": [{"message": "feature not found"}]}))
				.into_response()
		},
		_ => {},
	}
	state.respond(json!({
		"data": {
			"browseVariants": {
				"edges": [
					{"node": {
						"id": 1, "name": "L858R", "evidenceItemCount": 47,
						"variantTypes": [{"name": "Missense Variant"}],
						"diseases": [{"name": "Lung Non-small Cell Carcinoma"}, {"name": "Lung Adenocarcinoma"}],
						"therapies": [{"name": "Osimertinib"}, {"name": "Erlotinib"}, {"name": "Gefitinib"}],
						"myVariantInfo": {"cosmicId": "COSM6224", "clinvarId": 16609}
					}},
					{"node": {"id": 2, "name": "L858R+T790M", "evidenceItemCount": 3}}
				]
			}
		}
	}))
}

async fn trial_studies(
	State(state): State<Arc<MockSourceState>>,
	Query(query): Query<HashMap<String, String>>,
) -> Response {
	state.record("clinical_trials", query, Value::Null, None);
	state.respond(json!({
		"studies": [
			{"protocolSection": {
				"identificationModule": {"nctId": "NCT04487080", "briefTitle": "Amivantamab and Lazertinib in EGFR-mutant NSCLC"},
				"statusModule": {"overallStatus": "RECRUITING"},
				"designModule": {"phases": ["PHASE3"]}
			}},
			{"protocolSection": {
				"identificationModule": {"nctId": "NCT05132777", "briefTitle": "Osimertinib With or Without Chemotherapy"},
				"statusModule": {"overallStatus": "RECRUITING"},
				"designModule": {"phases": ["EARLY_PHASE1"]}
			}}
		]
	}))
}

async fn chat_completions(
	State(state): State<Arc<MockSourceState>>,
	headers: HeaderMap,
	Json(body): Json<Value>,
) -> Response {
	let authorization = headers
		.get("authorization")
		.and_then(|value| value.to_str().ok())
		.map(str::to_string);
	state.record("chat_completions", HashMap::new(), body, authorization);

	if let Some(status) = state.completion_status {
		return (status, r#"{"error":{"message":"rejected"}}"#).into_response();
	}

	Json(json!({
		"id": "chatcmpl-test",
		"object": "chat.completion",
		"choices": [{
			"index": 0,
			"message": {"role": "assistant", "content": state.completion_reply},
			"finish_reason": "stop"
		}]
	}))
	.into_response()
}

/// Running mock provider server
pub struct MockSourceServer {
	pub base_url: String,
	state: Arc<MockSourceState>,
	pub handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl MockSourceServer {
	/// Evidence routes healthy, completion replies with the EGFR verdict
	pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with(SourceMode::Ok, egfr_verdict().to_string(), None).await
	}

	pub async fn spawn_with_mode(mode: SourceMode) -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with(mode, egfr_verdict().to_string(), None).await
	}

	pub async fn spawn_with_reply(
		reply: impl Into<String>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with(SourceMode::Ok, reply.into(), None).await
	}

	pub async fn spawn_with_completion_status(
		status: StatusCode,
	) -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with(SourceMode::Ok, String::new(), Some(status)).await
	}

	async fn spawn_with(
		mode: SourceMode,
		completion_reply: String,
		completion_status: Option<StatusCode>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let state = Arc::new(MockSourceState {
			mode,
			completion_reply,
			completion_status,
			requests: Mutex::new(Vec::new()),
		});

		let app = Router::new()
			.route(
				"/oncokb/annotate/mutations/byProteinChange",
				get(oncokb_annotation),
			)
			.route("/civic/graphql", post(civic_graphql))
			.route("/trials/studies", get(trial_studies))
			.route("/openai/chat/completions", post(chat_completions))
			.with_state(Arc::clone(&state));

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let base_url = format!("http://{}", addr);

		let handle = tokio::spawn(async move {
			axum::serve(listener, app).await.unwrap();
		});

		Ok(Self {
			base_url,
			state,
			handle,
		})
	}

	pub fn oncokb_endpoint(&self) -> String {
		format!("{}/oncokb", self.base_url)
	}

	pub fn civic_endpoint(&self) -> String {
		format!("{}/civic/graphql", self.base_url)
	}

	pub fn trials_endpoint(&self) -> String {
		format!("{}/trials/studies", self.base_url)
	}

	pub fn completion_endpoint(&self) -> String {
		format!("{}/openai", self.base_url)
	}

	/// Settings pointing every source and the completion service here
	pub fn settings(&self) -> Settings {
		let mut settings = Settings::default();
		settings.sources.oncokb.endpoint = self.oncokb_endpoint();
		settings.sources.oncokb.timeout_ms = 2_000;
		settings.sources.civic.endpoint = self.civic_endpoint();
		settings.sources.civic.timeout_ms = 2_000;
		settings.sources.clinical_trials.endpoint = self.trials_endpoint();
		settings.sources.clinical_trials.timeout_ms = 2_000;
		settings.completion.endpoint = self.completion_endpoint();
		settings.completion.api_key = ConfigurableValue::from_plain(TEST_API_KEY);
		settings.completion.timeout_ms = Some(2_000);
		settings
	}

	/// Requests received on one route
	pub fn requests(&self, route: &str) -> Vec<RecordedRequest> {
		self.state
			.requests
			.lock()
			.map(|requests| {
				requests
					.iter()
					.filter(|request| request.route == route)
					.cloned()
					.collect()
			})
			.unwrap_or_default()
	}

	pub fn abort(self) {
		self.handle.abort();
	}
}
