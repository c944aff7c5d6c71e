use crate::gateway::{EXPLAIN_MISSING_KEY, GatewayError};
use crate::roadmap::TopicNode;

pub const EXPLAIN_FAILED: &str = "AI 解释加载失败。";

#[derive(Clone, Debug, Default, PartialEq)]
pub enum PanelPhase {
	#[default]
	Closed,
	Loading,
	Ready(String),
	Error(GatewayError),
}

impl PanelPhase {
	/// Text shown for a failed load.
	pub fn error_message(reason: &GatewayError) -> &'static str {
		match reason {
			GatewayError::MissingApiKey => EXPLAIN_MISSING_KEY,
			_ => EXPLAIN_FAILED,
		}
	}
}

/// Identity of one explanation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplainTicket {
	pub generation: u64,
	pub topic_id: String,
	pub title: String,
	pub analogy: String,
}

/// Closed → Loading → Ready/Error → Closed. Every `begin` and `close` bumps
/// the generation; a result is applied only if its ticket is current.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetailPanel {
	phase: PanelPhase,
	generation: u64,
}

impl DetailPanel {
	pub fn phase(&self) -> &PanelPhase {
		&self.phase
	}

	pub fn begin(&mut self, node: &TopicNode) -> ExplainTicket {
		self.generation += 1;
		self.phase = PanelPhase::Loading;
		ExplainTicket {
			generation: self.generation,
			topic_id: node.id.clone(),
			title: node.title.clone(),
			analogy: node.analogy.clone().unwrap_or_default(),
		}
	}

	/// Apply `outcome` if `ticket` is still the latest request. Returns
	/// whether it was applied.
	pub fn resolve(&mut self, ticket: &ExplainTicket, outcome: Result<String, GatewayError>) -> bool {
		if ticket.generation != self.generation || self.phase != PanelPhase::Loading {
			return false;
		}
		self.phase = match outcome {
			Ok(text) => PanelPhase::Ready(text),
			Err(reason) => PanelPhase::Error(reason),
		};
		true
	}

	pub fn close(&mut self) {
		if self.phase != PanelPhase::Closed {
			self.generation += 1;
			self.phase = PanelPhase::Closed;
		}
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::gateway::fake::FakeModel;
	use crate::gateway::{Gateway, GatewayConfig};
	use crate::roadmap::Roadmap;

	fn topic(key: &str) -> TopicNode {
		let roadmap = Roadmap::builtin().unwrap();
		roadmap.get(roadmap.find(key).unwrap()).clone()
	}

	#[test]
	fn load_success_reaches_ready() {
		let mut panel = DetailPanel::default();
		let ticket = panel.begin(&topic("rag"));
		assert_eq!(panel.phase(), &PanelPhase::Loading);
		assert_eq!(ticket.title, "RAG (检索增强生成)");
		assert_eq!(ticket.analogy, "类似于图像检索 (Image Retrieval) 配合分类网络。");

		assert!(panel.resolve(&ticket, Ok("explained".into())));
		assert_eq!(panel.phase(), &PanelPhase::Ready("explained".into()));
	}

	#[test]
	fn load_failure_reaches_error() {
		let mut panel = DetailPanel::default();
		let ticket = panel.begin(&topic("rag"));
		assert!(panel.resolve(&ticket, Err(GatewayError::Network("down".into()))));
		let PanelPhase::Error(reason) = panel.phase() else {
			panic!("expected error, got {:?}", panel.phase());
		};
		assert_eq!(PanelPhase::error_message(reason), EXPLAIN_FAILED);
		assert_eq!(
			PanelPhase::error_message(&GatewayError::MissingApiKey),
			EXPLAIN_MISSING_KEY
		);
	}

	#[test]
	fn late_response_for_superseded_topic_is_dropped() {
		let mut panel = DetailPanel::default();
		let tokenization = panel.begin(&topic("tokenization"));
		let attention = panel.begin(&topic("attention"));

		assert!(panel.resolve(&attention, Ok("attention text".into())));
		assert!(!panel.resolve(&tokenization, Ok("tokenization text".into())));
		assert_eq!(panel.phase(), &PanelPhase::Ready("attention text".into()));
	}

	#[test]
	fn early_response_for_superseded_topic_is_dropped() {
		let mut panel = DetailPanel::default();
		let tokenization = panel.begin(&topic("tokenization"));
		let attention = panel.begin(&topic("attention"));

		assert!(!panel.resolve(&tokenization, Ok("tokenization text".into())));
		assert_eq!(panel.phase(), &PanelPhase::Loading);
		assert!(panel.resolve(&attention, Ok("attention text".into())));
		assert_eq!(panel.phase(), &PanelPhase::Ready("attention text".into()));
	}

	#[test]
	fn close_discards_in_flight_result() {
		let mut panel = DetailPanel::default();
		let ticket = panel.begin(&topic("rag"));
		panel.close();
		assert!(!panel.resolve(&ticket, Ok("late".into())));
		assert_eq!(panel.phase(), &PanelPhase::Closed);
	}

	#[test]
	fn reselect_from_ready_restarts_loading() {
		let mut panel = DetailPanel::default();
		let first = panel.begin(&topic("rag"));
		panel.resolve(&first, Ok("one".into()));
		let second = panel.begin(&topic("rag"));
		assert_eq!(panel.phase(), &PanelPhase::Loading);
		assert!(second.generation > first.generation);
	}

	#[test]
	fn race_through_gateway_shows_latest_selection() {
		// replies are handed out in polling order
		let model = FakeModel::replying([
			Ok("about attention".to_string()),
			Ok("about tokenization".to_string()),
		]);
		let gateway = Gateway::new(model, GatewayConfig::default().with_api_key("k"));
		let mut panel = DetailPanel::default();

		let first = panel.begin(&topic("tokenization"));
		let first_reply = gateway.try_explain(&first.title, &first.analogy);
		let second = panel.begin(&topic("attention"));
		let second_reply = gateway.try_explain(&second.title, &second.analogy);

		// second request completes before the first
		let second_outcome = block_on(second_reply);
		let first_outcome = block_on(first_reply);
		panel.resolve(&second, second_outcome);
		panel.resolve(&first, first_outcome);

		assert_eq!(panel.phase(), &PanelPhase::Ready("about attention".into()));
		assert_eq!(gateway.config().api_key(), Some("k"));
	}
}
