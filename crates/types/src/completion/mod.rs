//! Chat-completion request model and client trait

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod traits;

pub use errors::CompletionError;
pub use traits::CompletionClient;

pub type CompletionResult<T> = Result<T, CompletionError>;

/// Sampling temperature used for classification prompts
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Output ceiling for one verdict
pub const DEFAULT_MAX_TOKENS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
	pub role: Role,
	pub content: String,
}

impl ChatMessage {
	pub fn user(content: impl Into<String>) -> Self {
		Self {
			role: Role::User,
			content: content.into(),
		}
	}
}

/// One completion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
	pub messages: Vec<ChatMessage>,
	pub temperature: f32,
	pub max_tokens: u32,
}

impl CompletionRequest {
	/// A request carrying a single user-role message
	pub fn from_prompt(prompt: impl Into<String>) -> Self {
		Self {
			messages: vec![ChatMessage::user(prompt)],
			temperature: DEFAULT_TEMPERATURE,
			max_tokens: DEFAULT_MAX_TOKENS,
		}
	}

	pub fn with_temperature(mut self, temperature: f32) -> Self {
		self.temperature = temperature;
		self
	}

	pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
		self.max_tokens = max_tokens;
		self
	}

	/// Content of the first user message, if any
	pub fn prompt(&self) -> Option<&str> {
		self.messages
			.iter()
			.find(|m| m.role == Role::User)
			.map(|m| m.content.as_str())
	}
}
