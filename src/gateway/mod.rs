//! Boundary to the generative-language backend.
//!
//! [`Gateway`] builds prompts and calls a [`TextModel`]. The `try_*`
//! operations report failures as [`GatewayError`]; [`Gateway::explain`] and
//! [`Gateway::chat`] fold every failure into a fixed human-readable string.

use log::warn;
use thiserror::Error;

mod config;
mod gemini;
pub mod prompt;
mod types;

pub use config::{DEFAULT_BACKGROUND, DEFAULT_MODEL, GatewayConfig};
pub use gemini::GeminiModel;
pub use types::{ChatMessage, Role};

/// Returned by [`Gateway::explain`] when no credential is configured.
pub const EXPLAIN_MISSING_KEY: &str = "Error: API_KEY not found in environment variables.";
/// Returned by [`Gateway::explain`] when the call fails.
pub const EXPLAIN_UNAVAILABLE: &str = "无法从 Gemini 获取解释，请检查 API Key。";
/// Substituted for an empty explanation.
pub const NO_EXPLANATION: &str = "No explanation generated.";
/// Returned by [`Gateway::chat`] when no credential is configured.
pub const CHAT_MISSING_KEY: &str = "Error: API_KEY not found.";
/// Returned by [`Gateway::chat`] when the call fails.
pub const CHAT_UNAVAILABLE: &str = "Error interacting with Gemini.";
/// Substituted for an empty chat reply.
pub const NO_RESPONSE: &str = "No response.";

/// Failure of a single gateway request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
	/// No credential configured; nothing was sent.
	#[error("API_KEY is not configured")]
	MissingApiKey,
	/// The request could not be sent or the body could not be read.
	#[error("network error: {0}")]
	Network(String),
	/// The backend answered with a non-success status.
	#[error("HTTP {status}: {body}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// The response body was not the expected JSON.
	#[error("malformed response: {0}")]
	Decode(String),
}

/// Opaque text-in, text-out model call.
#[allow(async_fn_in_trait)]
pub trait TextModel {
	/// Run `prompt` through `model`. One attempt, no retry.
	async fn generate(&self, model: &str, prompt: &str, api_key: &str) -> Result<String, GatewayError>;
}

/// Gateway wired to the Gemini REST API.
pub type GeminiGateway = Gateway<GeminiModel>;

/// Prompt builder and dispatcher shared by the detail panel and the chat.
#[derive(Clone, Debug)]
pub struct Gateway<M> {
	model: M,
	config: GatewayConfig,
}

impl GeminiGateway {
	/// Gemini gateway for `config`.
	pub fn gemini(config: GatewayConfig) -> Self {
		Gateway::new(GeminiModel::new(&config.base_url), config)
	}
}

impl<M: TextModel> Gateway<M> {
	/// Gateway calling `model` with the injected `config`.
	pub fn new(model: M, config: GatewayConfig) -> Self {
		Self { model, config }
	}

	/// Active configuration.
	pub fn config(&self) -> &GatewayConfig {
		&self.config
	}

	async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
		let key = self.config.api_key().ok_or(GatewayError::MissingApiKey)?;
		self.model
			.generate(&self.config.model, prompt, key)
			.await
			.inspect_err(|e| warn!("model call failed: {}", e))
	}

	/// Tutored explanation of `topic`, steered by `analogy`.
	pub async fn try_explain(&self, topic: &str, analogy: &str) -> Result<String, GatewayError> {
		let prompt = prompt::explain(topic, analogy, &self.config.background);
		let text = self.generate(&prompt).await?;
		Ok(non_empty_or(text, NO_EXPLANATION))
	}

	/// Answer to `message`, given the prior `history` and current `topic`.
	pub async fn try_chat(
		&self,
		history: &[ChatMessage],
		message: &str,
		topic: &str,
	) -> Result<String, GatewayError> {
		let prompt = prompt::chat(history, message, topic, &self.config.background);
		let text = self.generate(&prompt).await?;
		Ok(non_empty_or(text, NO_RESPONSE))
	}

	/// Like [`Gateway::try_explain`], with failures replaced by fixed text.
	pub async fn explain(&self, topic: &str, analogy: &str) -> String {
		match self.try_explain(topic, analogy).await {
			Ok(text) => text,
			Err(GatewayError::MissingApiKey) => EXPLAIN_MISSING_KEY.into(),
			Err(_) => EXPLAIN_UNAVAILABLE.into(),
		}
	}

	/// Like [`Gateway::try_chat`], with failures replaced by fixed text.
	pub async fn chat(&self, history: &[ChatMessage], message: &str, topic: &str) -> String {
		match self.try_chat(history, message, topic).await {
			Ok(text) => text,
			Err(GatewayError::MissingApiKey) => CHAT_MISSING_KEY.into(),
			Err(_) => CHAT_UNAVAILABLE.into(),
		}
	}
}

fn non_empty_or(text: String, fallback: &str) -> String {
	if text.trim().is_empty() {
		fallback.into()
	} else {
		text
	}
}

#[cfg(test)]
pub(crate) mod fake {
	use std::cell::RefCell;
	use std::collections::VecDeque;

	use super::{GatewayError, TextModel};

	/// Scripted model recording every prompt it receives.
	#[derive(Default)]
	pub struct FakeModel {
		pub replies: RefCell<VecDeque<Result<String, GatewayError>>>,
		pub prompts: RefCell<Vec<String>>,
	}

	impl FakeModel {
		pub fn replying(replies: impl IntoIterator<Item = Result<String, GatewayError>>) -> Self {
			Self {
				replies: RefCell::new(replies.into_iter().collect()),
				prompts: RefCell::default(),
			}
		}

		pub fn calls(&self) -> usize {
			self.prompts.borrow().len()
		}
	}

	impl TextModel for FakeModel {
		async fn generate(&self, _model: &str, prompt: &str, _api_key: &str) -> Result<String, GatewayError> {
			self.prompts.borrow_mut().push(prompt.to_owned());
			self.replies
				.borrow_mut()
				.pop_front()
				.unwrap_or_else(|| Err(GatewayError::Network("no scripted reply".into())))
		}
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::fake::FakeModel;
	use super::*;

	fn keyed() -> GatewayConfig {
		GatewayConfig::default().with_api_key("test-key")
	}

	#[test]
	fn missing_key_short_circuits_without_a_call() {
		let gateway = Gateway::new(FakeModel::default(), GatewayConfig::default());
		assert_eq!(block_on(gateway.explain("RAG", "...")), EXPLAIN_MISSING_KEY);
		assert_eq!(block_on(gateway.chat(&[], "hi", "RAG")), CHAT_MISSING_KEY);
		assert_eq!(
			block_on(gateway.try_explain("RAG", "...")),
			Err(GatewayError::MissingApiKey)
		);
		assert_eq!(gateway.model.calls(), 0);
	}

	#[test]
	fn explain_returns_model_text() {
		let model = FakeModel::replying([Ok("RAG 就像图像检索".to_string())]);
		let gateway = Gateway::new(model, keyed());
		assert_eq!(block_on(gateway.explain("RAG", "图像检索")), "RAG 就像图像检索");
		let prompts = gateway.model.prompts.borrow();
		assert!(prompts[0].contains("\"RAG\""));
		assert!(prompts[0].contains(DEFAULT_BACKGROUND));
	}

	#[test]
	fn transport_failure_folds_into_fixed_text() {
		let model = FakeModel::replying([
			Err(GatewayError::Status {
				status: 500,
				body: "boom".into(),
			}),
			Err(GatewayError::Network("offline".into())),
		]);
		let gateway = Gateway::new(model, keyed());
		assert_eq!(block_on(gateway.explain("RAG", "")), EXPLAIN_UNAVAILABLE);
		assert_eq!(block_on(gateway.chat(&[], "hi", "RAG")), CHAT_UNAVAILABLE);
		assert_eq!(gateway.model.calls(), 2);
	}

	#[test]
	fn empty_replies_get_placeholders() {
		let model = FakeModel::replying([Ok("  ".to_string()), Ok(String::new())]);
		let gateway = Gateway::new(model, keyed());
		assert_eq!(block_on(gateway.try_explain("RAG", "")), Ok(NO_EXPLANATION.to_string()));
		assert_eq!(block_on(gateway.try_chat(&[], "hi", "RAG")), Ok(NO_RESPONSE.to_string()));
	}

	#[test]
	fn chat_prompt_carries_history_and_topic() {
		let model = FakeModel::replying([Ok("answer".to_string())]);
		let gateway = Gateway::new(model, keyed());
		let history = [ChatMessage::user("earlier question")];
		assert_eq!(
			block_on(gateway.try_chat(&history, "follow-up", "Attention & Mechanism")),
			Ok("answer".to_string())
		);
		let prompts = gateway.model.prompts.borrow();
		assert!(prompts[0].contains("Attention & Mechanism"));
		assert!(prompts[0].contains("user: earlier question"));
		assert!(prompts[0].contains("follow-up"));
	}
}
