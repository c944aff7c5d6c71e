//! Which topic the user has activated, and whether its panel is showing.

use crate::roadmap::TopicNode;

/// Topic scope used by the chat when nothing is selected.
pub const GENERAL_TOPIC: &str = "General";

/// Selected topic plus the detail-panel visibility flag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
	node: Option<TopicNode>,
	panel_open: bool,
}

impl SelectionState {
	/// Activate `node` and open the panel on it.
	pub fn select(&mut self, node: TopicNode) {
		self.node = Some(node);
		self.panel_open = true;
	}

	/// Hide the panel. The topic stays selected so the chat keeps its scope.
	pub fn close_panel(&mut self) {
		self.panel_open = false;
	}

	/// Currently selected topic, open panel or not.
	pub fn node(&self) -> Option<&TopicNode> {
		self.node.as_ref()
	}

	/// Whether the detail panel is visible.
	pub fn is_panel_open(&self) -> bool {
		self.panel_open && self.node.is_some()
	}

	/// Topic the detail panel should show, if it is open.
	pub fn open_node(&self) -> Option<&TopicNode> {
		self.node.as_ref().filter(|_| self.is_panel_open())
	}

	/// Title of the selected topic.
	pub fn topic_title(&self) -> Option<&str> {
		self.node.as_ref().map(|n| n.title.as_str())
	}

	/// Title the chat is scoped to.
	pub fn chat_scope(&self) -> &str {
		self.topic_title().unwrap_or(GENERAL_TOPIC)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::roadmap::Roadmap;

	fn topic(key: &str) -> TopicNode {
		let roadmap = Roadmap::builtin().unwrap();
		roadmap.get(roadmap.find(key).unwrap()).clone()
	}

	#[test]
	fn starts_closed_with_general_scope() {
		let state = SelectionState::default();
		assert!(!state.is_panel_open());
		assert_eq!(state.open_node(), None);
		assert_eq!(state.chat_scope(), GENERAL_TOPIC);
	}

	#[test]
	fn select_opens_and_close_keeps_topic() {
		let mut state = SelectionState::default();
		state.select(topic("rag"));
		assert!(state.is_panel_open());
		assert_eq!(state.open_node().map(|n| n.id.as_str()), Some("rag"));

		state.close_panel();
		assert!(!state.is_panel_open());
		assert_eq!(state.open_node(), None);
		assert_eq!(state.chat_scope(), "RAG (检索增强生成)");
	}

	#[test]
	fn selecting_again_replaces_the_topic() {
		let mut state = SelectionState::default();
		state.select(topic("tokenization"));
		state.close_panel();
		state.select(topic("attention"));
		assert!(state.is_panel_open());
		assert_eq!(state.topic_title(), Some("Attention & Mechanism"));
	}
}
