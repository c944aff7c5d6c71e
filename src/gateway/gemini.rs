use gloo_net::http::Request;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{GatewayError, TextModel};

/// [`TextModel`] backed by the Gemini `generateContent` REST call.
#[derive(Clone, Debug)]
pub struct GeminiModel {
	base_url: String,
}

impl GeminiModel {
	/// Client for the endpoint rooted at `base_url`.
	pub fn new(base_url: &str) -> Self {
		Self {
			base_url: base_url.trim_end_matches('/').to_owned(),
		}
	}

	fn endpoint(&self, model: &str) -> String {
		format!("{}/models/{}:generateContent", self.base_url, model)
	}
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
	contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
	role: &'a str,
	parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
	text: &'a str,
}

impl<'a> GenerateRequest<'a> {
	fn single_turn(prompt: &'a str) -> Self {
		Self {
			contents: vec![Content {
				role: "user",
				parts: vec![Part { text: prompt }],
			}],
		}
	}
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
	#[serde(default)]
	candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
	#[serde(default)]
	content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
	#[serde(default)]
	parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
	#[serde(default)]
	text: Option<String>,
}

impl GenerateResponse {
	/// Concatenated text parts of the first candidate; empty when there is none.
	fn into_text(self) -> String {
		self.candidates
			.into_iter()
			.next()
			.and_then(|c| c.content)
			.map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
			.unwrap_or_default()
	}
}

fn decode(body: &str) -> Result<String, GatewayError> {
	serde_json::from_str::<GenerateResponse>(body)
		.map(GenerateResponse::into_text)
		.map_err(|e| GatewayError::Decode(e.to_string()))
}

impl TextModel for GeminiModel {
	async fn generate(&self, model: &str, prompt: &str, api_key: &str) -> Result<String, GatewayError> {
		let url = self.endpoint(model);
		debug!("POST {} ({} prompt chars)", url, prompt.chars().count());

		let response = Request::post(&url)
			.header("x-goog-api-key", api_key)
			.json(&GenerateRequest::single_turn(prompt))
			.map_err(|e| GatewayError::Network(e.to_string()))?
			.send()
			.await
			.map_err(|e| GatewayError::Network(e.to_string()))?;

		let status = response.status();
		let body = response
			.text()
			.await
			.map_err(|e| GatewayError::Network(e.to_string()))?;
		if !response.ok() {
			return Err(GatewayError::Status { status, body });
		}
		decode(&body)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	#[test]
	fn request_body_matches_wire_shape() {
		let body = serde_json::to_value(GenerateRequest::single_turn("hi")).unwrap();
		assert_eq!(
			body,
			json!({ "contents": [{ "role": "user", "parts": [{ "text": "hi" }] }] })
		);
	}

	#[test]
	fn endpoint_includes_model() {
		let model = GeminiModel::new("https://example.test/v1beta/");
		assert_eq!(
			model.endpoint("gemini-2.5-flash"),
			"https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
		);
	}

	#[test]
	fn decodes_first_candidate_parts() {
		let body = json!({
			"candidates": [
				{ "content": { "parts": [{ "text": "Hello, " }, { "text": "world" }], "role": "model" } },
				{ "content": { "parts": [{ "text": "ignored" }] } }
			],
			"usageMetadata": { "totalTokenCount": 5 }
		});
		assert_eq!(decode(&body.to_string()).unwrap(), "Hello, world");
	}

	#[test]
	fn missing_candidates_decode_to_empty_text() {
		assert_eq!(decode(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap(), "");
		assert_eq!(decode(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap(), "");
	}

	#[test]
	fn malformed_body_is_a_decode_error() {
		assert!(matches!(decode("<html>"), Err(GatewayError::Decode(_))));
	}
}
