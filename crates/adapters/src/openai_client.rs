//! OpenAI-compatible chat-completion client

use async_trait::async_trait;
use cancerrag_types::{
	ChatMessage, CompletionClient, CompletionError, CompletionRequest, CompletionResult,
	SecretString,
};
use reqwest::{header::HeaderValue, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::http::{build_url, USER_AGENT};

pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o-mini";

const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
	model: &'a str,
	messages: &'a [ChatMessage],
	temperature: f32,
	max_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChatCompletionResponse {
	choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Choice {
	message: Option<ResponseMessage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponseMessage {
	content: Option<String>,
}

impl ChatCompletionResponse {
	fn into_content(self) -> CompletionResult<String> {
		self.choices
			.into_iter()
			.next()
			.and_then(|choice| choice.message)
			.and_then(|message| message.content)
			.ok_or(CompletionError::EmptyResponse)
	}
}

/// Client for `POST {endpoint}/chat/completions` with bearer authentication
#[derive(Debug)]
pub struct OpenAiClient {
	endpoint: String,
	model: String,
	api_key: SecretString,
	client: Client,
}

impl OpenAiClient {
	pub fn new(
		endpoint: impl Into<String>,
		model: impl Into<String>,
		api_key: SecretString,
		timeout_ms: Option<u64>,
	) -> CompletionResult<Self> {
		let mut builder = Client::builder().user_agent(HeaderValue::from_static(USER_AGENT));
		if let Some(timeout_ms) = timeout_ms {
			builder = builder.timeout(Duration::from_millis(timeout_ms));
		}

		Ok(Self {
			endpoint: endpoint.into(),
			model: model.into(),
			api_key,
			client: builder.build()?,
		})
	}

	/// Public OpenAI endpoint with the default model and no timeout
	pub fn with_api_key(api_key: SecretString) -> CompletionResult<Self> {
		Self::new(
			DEFAULT_COMPLETION_ENDPOINT,
			DEFAULT_COMPLETION_MODEL,
			api_key,
			None,
		)
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}
}

#[async_trait]
impl CompletionClient for OpenAiClient {
	fn model(&self) -> &str {
		&self.model
	}

	async fn complete(&self, request: &CompletionRequest) -> CompletionResult<String> {
		let url = build_url(&self.endpoint, CHAT_COMPLETIONS_PATH).map_err(|e| {
			CompletionError::InvalidResponse {
				reason: e.to_string(),
			}
		})?;

		let body = ChatCompletionBody {
			model: &self.model,
			messages: &request.messages,
			temperature: request.temperature,
			max_tokens: request.max_tokens,
		};

		debug!(
			"Requesting completion from {} with model {} (max_tokens={})",
			url, self.model, request.max_tokens
		);

		let response = self
			.client
			.post(&url)
			.bearer_auth(self.api_key.expose_secret())
			.json(&body)
			.send()
			.await?;

		let status = response.status();
		let text = response.text().await?;

		if !status.is_success() {
			return Err(CompletionError::HttpStatusError {
				status_code: status.as_u16(),
				body: text,
			});
		}

		let parsed: ChatCompletionResponse =
			serde_json::from_str(&text).map_err(|e| CompletionError::InvalidResponse {
				reason: format!("Failed to parse completion response: {}", e),
			})?;

		parsed.into_content()
	}
}
