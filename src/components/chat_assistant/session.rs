use crate::gateway::{CHAT_MISSING_KEY, ChatMessage, GatewayError};

pub const INITIAL_GREETING: &str =
	"Hi! I am your LLM study companion. Ask me anything about the current topic.";
pub const CLEARED_GREETING: &str = "Context cleared. How can I help?";
pub const CHAT_FAILED: &str = "Sorry, I encountered an error.";

/// What the gateway needs for one reply.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
	/// Transcript before the new message.
	pub history: Vec<ChatMessage>,
	pub message: String,
	pub topic: String,
}

/// Append-only transcript with a composing indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatSession {
	messages: Vec<ChatMessage>,
	composing: bool,
}

impl Default for ChatSession {
	fn default() -> Self {
		Self {
			messages: vec![ChatMessage::assistant(INITIAL_GREETING)],
			composing: false,
		}
	}
}

impl ChatSession {
	pub fn messages(&self) -> &[ChatMessage] {
		&self.messages
	}

	pub fn is_composing(&self) -> bool {
		self.composing
	}

	/// Record the learner's message and build the request for it.
	/// Blank input is ignored.
	pub fn begin_send(&mut self, text: &str, topic: &str) -> Option<ChatRequest> {
		if text.trim().is_empty() {
			return None;
		}
		let request = ChatRequest {
			history: self.messages.clone(),
			message: text.to_owned(),
			topic: topic.to_owned(),
		};
		self.messages.push(ChatMessage::user(text));
		self.composing = true;
		Some(request)
	}

	pub fn complete(&mut self, outcome: Result<String, GatewayError>) {
		let reply = match outcome {
			Ok(text) => text,
			Err(GatewayError::MissingApiKey) => CHAT_MISSING_KEY.into(),
			Err(_) => CHAT_FAILED.into(),
		};
		self.messages.push(ChatMessage::assistant(reply));
		self.composing = false;
	}

	/// Drop the history. Requests already in flight still land afterwards.
	pub fn clear(&mut self) {
		self.messages = vec![ChatMessage::assistant(CLEARED_GREETING)];
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::gateway::fake::FakeModel;
	use crate::gateway::{Gateway, GatewayConfig, Role};

	#[test]
	fn blank_input_is_ignored() {
		let mut session = ChatSession::default();
		let before = session.clone();
		assert_eq!(session.begin_send("", "RAG"), None);
		assert_eq!(session.begin_send("   ", "RAG"), None);
		assert_eq!(session.begin_send("\n\t", "RAG"), None);
		assert_eq!(session, before);
		assert!(!session.is_composing());
	}

	#[test]
	fn send_appends_and_composes() {
		let mut session = ChatSession::default();
		let request = session.begin_send("What is LoRA?", "参数高效微调 (PEFT)").unwrap();

		assert_eq!(request.history, vec![ChatMessage::assistant(INITIAL_GREETING)]);
		assert_eq!(request.message, "What is LoRA?");
		assert_eq!(request.topic, "参数高效微调 (PEFT)");
		assert!(session.is_composing());
		assert_eq!(session.messages().last(), Some(&ChatMessage::user("What is LoRA?")));

		session.complete(Ok("Low-rank adapters.".into()));
		assert!(!session.is_composing());
		let last = session.messages().last().unwrap();
		assert_eq!((last.role, last.text.as_str()), (Role::Assistant, "Low-rank adapters."));
	}

	#[test]
	fn failure_appends_fallback() {
		let mut session = ChatSession::default();
		session.begin_send("hi", "General");
		session.complete(Err(GatewayError::Network("offline".into())));
		assert_eq!(session.messages().last().unwrap().text, CHAT_FAILED);
		assert!(!session.is_composing());

		session.begin_send("hi again", "General");
		session.complete(Err(GatewayError::MissingApiKey));
		assert_eq!(session.messages().last().unwrap().text, CHAT_MISSING_KEY);
	}

	#[test]
	fn clear_leaves_only_the_greeting() {
		let mut session = ChatSession::default();
		session.begin_send("one", "General");
		session.complete(Ok("a".into()));
		session.begin_send("two", "General");
		session.complete(Ok("b".into()));
		assert_eq!(session.messages().len(), 5);

		session.clear();
		assert_eq!(session.messages(), [ChatMessage::assistant(CLEARED_GREETING)]);
	}

	#[test]
	fn late_reply_lands_after_clear() {
		let mut session = ChatSession::default();
		session.begin_send("question", "General");
		session.clear();
		session.complete(Ok("late answer".into()));
		assert_eq!(
			session.messages(),
			[
				ChatMessage::assistant(CLEARED_GREETING),
				ChatMessage::assistant("late answer"),
			]
		);
	}

	#[test]
	fn round_trip_through_gateway() {
		let model = FakeModel::replying([Ok("```python\nprint(1)\n```".to_string())]);
		let gateway = Gateway::new(model, GatewayConfig::default().with_api_key("k"));
		let mut session = ChatSession::default();

		let request = session.begin_send("show code", "Transformer 架构详解").unwrap();
		let outcome = block_on(gateway.try_chat(&request.history, &request.message, &request.topic));
		session.complete(outcome);

		let reply = session.messages().last().unwrap();
		assert!(reply.is_code);
		assert_eq!(session.messages().len(), 3);
	}
}
