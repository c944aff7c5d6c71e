use serde::{Deserialize, Serialize};

use crate::markdown;

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	/// The learner.
	User,
	/// The model.
	Assistant,
}

impl Role {
	/// Lower-case name, as used in transcripts.
	pub fn as_str(self) -> &'static str {
		match self {
			Role::User => "user",
			Role::Assistant => "assistant",
		}
	}
}

/// One entry of a chat transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
	/// Who wrote it.
	pub role: Role,
	/// Message body.
	pub text: String,
	/// Set when the body carries fenced code and should go through the
	/// markdown renderer.
	#[serde(default)]
	pub is_code: bool,
}

impl ChatMessage {
	/// A learner message.
	pub fn user(text: impl Into<String>) -> Self {
		Self {
			role: Role::User,
			text: text.into(),
			is_code: false,
		}
	}

	/// A model message; `is_code` is derived from the presence of fences.
	pub fn assistant(text: impl Into<String>) -> Self {
		let text = text.into();
		Self {
			role: Role::Assistant,
			is_code: markdown::has_code(&text),
			text,
		}
	}
}
