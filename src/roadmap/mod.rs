//! The curriculum tree: topic records stored in a flat arena with explicit
//! parent and child links.

use std::collections::HashMap;

use thiserror::Error;

mod content;

/// Pedagogical phase a topic belongs to. Drives the accent colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	/// NLP and Transformer groundwork.
	Foundation,
	/// Model architectures.
	Architecture,
	/// Pre-training and distributed systems.
	Training,
	/// Fine-tuning and preference alignment.
	Alignment,
	/// Compression and inference speed-ups.
	Optimization,
	/// Applications built on top of models.
	Deployment,
}

const CATEGORY_COLORS: [&str; 6] = [
	"#94a3b8", "#38bdf8", "#fbbf24", "#f472b6", "#4ade80", "#818cf8",
];

impl Category {
	/// Upper-case badge text shown in the detail panel.
	pub fn label(self) -> &'static str {
		match self {
			Category::Foundation => "FOUNDATION",
			Category::Architecture => "ARCHITECTURE",
			Category::Training => "TRAINING",
			Category::Alignment => "ALIGNMENT",
			Category::Optimization => "OPTIMIZATION",
			Category::Deployment => "DEPLOYMENT",
		}
	}

	/// Accent colour as a CSS hex string.
	pub fn color(self) -> &'static str {
		CATEGORY_COLORS[self as usize]
	}
}

/// One entry of the curriculum.
#[derive(Clone, Debug, PartialEq)]
pub struct TopicNode {
	/// Identifier, unique within a [`Roadmap`].
	pub id: String,
	/// Display title.
	pub title: String,
	/// Phase the topic belongs to.
	pub category: Category,
	/// Short summary of what the topic covers.
	pub description: String,
	/// Analogy to a computer-vision concept, used to steer explanations.
	pub analogy: Option<String>,
	/// Must-read papers, in reading order.
	pub papers: Vec<String>,
	/// Suggested hands-on project.
	pub project_idea: Option<String>,
	/// Courses, repositories and blog posts.
	pub resources: Vec<String>,
}

/// Index of a topic inside its [`Roadmap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
	/// Position in the arena; pre-order index of the topic.
	pub fn index(self) -> usize {
		self.0
	}

	pub(crate) fn from_index(index: usize) -> Self {
		NodeId(index)
	}
}

/// Errors raised while building a roadmap.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoadmapError {
	/// Two topics share the same identifier.
	#[error("duplicate topic id `{0}`")]
	DuplicateId(String),
}

/// Nested topic literal used to author a roadmap.
#[derive(Clone, Debug)]
pub struct TopicDef {
	topic: TopicNode,
	children: Vec<TopicDef>,
}

/// Start a topic definition with the mandatory fields.
pub fn topic(id: &str, title: &str, category: Category, description: &str) -> TopicDef {
	TopicDef {
		topic: TopicNode {
			id: id.into(),
			title: title.into(),
			category,
			description: description.into(),
			analogy: None,
			papers: Vec::new(),
			project_idea: None,
			resources: Vec::new(),
		},
		children: Vec::new(),
	}
}

impl TopicDef {
	/// Set the computer-vision analogy.
	pub fn analogy(mut self, analogy: &str) -> Self {
		self.topic.analogy = Some(analogy.into());
		self
	}

	/// Set the paper list.
	pub fn papers(mut self, papers: &[&str]) -> Self {
		self.topic.papers = papers.iter().map(|p| (*p).to_owned()).collect();
		self
	}

	/// Set the project suggestion.
	pub fn project(mut self, idea: &str) -> Self {
		self.topic.project_idea = Some(idea.into());
		self
	}

	/// Set the resource list.
	pub fn resources(mut self, resources: &[&str]) -> Self {
		self.topic.resources = resources.iter().map(|r| (*r).to_owned()).collect();
		self
	}

	/// Attach child topics, in display order.
	pub fn children(mut self, children: Vec<TopicDef>) -> Self {
		self.children = children;
		self
	}
}

/// Immutable topic tree. Index 0 is the root; nodes are stored in pre-order.
#[derive(Clone, Debug, PartialEq)]
pub struct Roadmap {
	nodes: Vec<TopicNode>,
	parents: Vec<Option<NodeId>>,
	children: Vec<Vec<NodeId>>,
	depths: Vec<usize>,
	by_id: HashMap<String, NodeId>,
}

impl Roadmap {
	/// The curated CV-to-LLM curriculum.
	pub fn builtin() -> Result<Self, RoadmapError> {
		Self::from_tree(content::curriculum())
	}

	/// Flatten a nested definition into the arena.
	pub fn from_tree(root: TopicDef) -> Result<Self, RoadmapError> {
		let mut roadmap = Roadmap {
			nodes: Vec::new(),
			parents: Vec::new(),
			children: Vec::new(),
			depths: Vec::new(),
			by_id: HashMap::new(),
		};
		let mut stack = vec![(root, None::<NodeId>, 0usize)];

		while let Some((def, parent, depth)) = stack.pop() {
			let id = NodeId(roadmap.nodes.len());
			if roadmap.by_id.insert(def.topic.id.clone(), id).is_some() {
				return Err(RoadmapError::DuplicateId(def.topic.id));
			}
			roadmap.nodes.push(def.topic);
			roadmap.parents.push(parent);
			roadmap.children.push(Vec::new());
			roadmap.depths.push(depth);
			if let Some(p) = parent {
				roadmap.children[p.0].push(id);
			}
			// reversed so the first child is popped (and numbered) first
			for child in def.children.into_iter().rev() {
				stack.push((child, Some(id), depth + 1));
			}
		}
		Ok(roadmap)
	}

	/// The root topic id.
	pub fn root(&self) -> NodeId {
		NodeId(0)
	}

	/// Number of topics.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Always false: a roadmap has at least its root.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Topic record for `id`.
	pub fn get(&self, id: NodeId) -> &TopicNode {
		&self.nodes[id.0]
	}

	/// Look a topic up by its string identifier.
	pub fn find(&self, key: &str) -> Option<NodeId> {
		self.by_id.get(key).copied()
	}

	/// Parent of `id`, `None` for the root.
	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.parents[id.0]
	}

	/// Children of `id`, in display order.
	pub fn children(&self, id: NodeId) -> &[NodeId] {
		&self.children[id.0]
	}

	/// Distance from the root.
	pub fn depth(&self, id: NodeId) -> usize {
		self.depths[id.0]
	}

	/// All ids in pre-order (parents before children).
	pub fn iter(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
		(0..self.nodes.len()).map(NodeId)
	}

	/// All ids in post-order, siblings left to right.
	pub fn post_order(&self) -> Vec<NodeId> {
		let mut pending = vec![self.root()];
		let mut visited = Vec::with_capacity(self.nodes.len());
		while let Some(id) = pending.pop() {
			visited.push(id);
			pending.extend_from_slice(self.children(id));
		}
		visited.reverse();
		visited
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn small() -> TopicDef {
		topic("root", "Root", Category::Foundation, "r").children(vec![
			topic("a", "A", Category::Architecture, "a").children(vec![
				topic("a1", "A1", Category::Training, "a1"),
				topic("a2", "A2", Category::Training, "a2"),
			]),
			topic("b", "B", Category::Deployment, "b"),
		])
	}

	fn ids(roadmap: &Roadmap, order: impl IntoIterator<Item = NodeId>) -> Vec<String> {
		order.into_iter().map(|id| roadmap.get(id).id.clone()).collect()
	}

	#[test]
	fn flattens_in_pre_order_with_links() {
		let roadmap = Roadmap::from_tree(small()).unwrap();
		assert_eq!(ids(&roadmap, roadmap.iter()), ["root", "a", "a1", "a2", "b"]);

		let a = roadmap.find("a").unwrap();
		assert_eq!(roadmap.parent(a), Some(roadmap.root()));
		assert_eq!(ids(&roadmap, roadmap.children(a).to_vec()), ["a1", "a2"]);
		assert_eq!(roadmap.depth(roadmap.find("a2").unwrap()), 2);
		assert_eq!(roadmap.parent(roadmap.root()), None);
	}

	#[test]
	fn post_order_visits_children_left_to_right() {
		let roadmap = Roadmap::from_tree(small()).unwrap();
		assert_eq!(ids(&roadmap, roadmap.post_order()), ["a1", "a2", "a", "b", "root"]);
	}

	#[test]
	fn rejects_duplicate_ids() {
		let def = topic("root", "Root", Category::Foundation, "r").children(vec![
			topic("x", "X", Category::Foundation, ""),
			topic("x", "X again", Category::Foundation, ""),
		]);
		assert_eq!(
			Roadmap::from_tree(def),
			Err(RoadmapError::DuplicateId("x".into()))
		);
	}

	#[test]
	fn builtin_curriculum_is_well_formed() {
		let roadmap = Roadmap::builtin().unwrap();
		assert_eq!(roadmap.len(), 23);
		assert_eq!(roadmap.children(roadmap.root()).len(), 6);
		for id in roadmap.iter().skip(1) {
			let parent = roadmap.parent(id).unwrap();
			assert_eq!(roadmap.depth(id), roadmap.depth(parent) + 1);
			assert!(roadmap.children(parent).contains(&id));
		}

		let attention = roadmap.get(roadmap.find("attention").unwrap());
		assert_eq!(attention.category, Category::Architecture);
		assert_eq!(attention.papers.len(), 1);
		assert!(roadmap.find("tokenization").is_some());
		assert!(roadmap.find("rag").is_some());
	}

	#[test]
	fn category_colors_are_distinct() {
		let all = [
			Category::Foundation,
			Category::Architecture,
			Category::Training,
			Category::Alignment,
			Category::Optimization,
			Category::Deployment,
		];
		let mut colors: Vec<_> = all.iter().map(|c| c.color()).collect();
		colors.sort();
		colors.dedup();
		assert_eq!(colors.len(), all.len());
		assert_eq!(Category::Training.color(), "#fbbf24");
	}
}
