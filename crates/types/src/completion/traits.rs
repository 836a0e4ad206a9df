use super::{CompletionRequest, CompletionResult};
use async_trait::async_trait;
use std::fmt::Debug;

/// An opaque text-completion service
#[async_trait]
pub trait CompletionClient: Send + Sync + Debug {
	/// Model identifier used for logging
	fn model(&self) -> &str;

	/// Send the request and return the raw text of the first completion
	async fn complete(&self, request: &CompletionRequest) -> CompletionResult<String>;
}
