use crate::layout::{Layout, LayoutNode, Viewport, tree_layout};
use crate::roadmap::{NodeId, Roadmap, TopicNode};

pub const ROOT_RADIUS: f64 = 12.0;
pub const NODE_RADIUS: f64 = 8.0;
pub const ROOT_HALO: f64 = 40.0;
pub const NODE_HALO: f64 = 25.0;
pub const LABEL_FONT_PX: f64 = 14.0;
pub const LABEL_HEIGHT: f64 = 28.0;
pub const LABEL_PAD_X: f64 = 12.0;
const LABEL_MAX_WIDTH: f64 = 244.0;

pub const ORIGIN_X: f64 = 180.0;
pub const ORIGIN_Y: f64 = 50.0;
const MIN_ZOOM: f64 = 0.2;
const MAX_ZOOM: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub w: f64,
	pub h: f64,
}

impl Rect {
	fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: ORIGIN_X,
			y: ORIGIN_Y,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<NodeId>,
	pub prev_node: Option<NodeId>,
	pub highlight_t: f64,
}

pub struct RoadmapCanvasState {
	pub roadmap: Roadmap,
	pub layout: Layout,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
}

/// Rough rendered width of `text`; CJK glyphs take a full em.
pub fn estimate_text_width(text: &str, font_px: f64) -> f64 {
	text.chars()
		.map(|c| if c.is_ascii() { 0.58 } else { 1.0 })
		.sum::<f64>()
		* font_px
}

pub fn node_radius(node: &LayoutNode) -> f64 {
	if node.depth == 0 { ROOT_RADIUS } else { NODE_RADIUS }
}

pub fn halo_radius(node: &LayoutNode) -> f64 {
	if node.depth == 0 { ROOT_HALO } else { NODE_HALO }
}

/// Label box in graph space: centred above the root, right of other nodes.
pub fn label_rect(node: &LayoutNode, title: &str) -> Rect {
	let w = (estimate_text_width(title, LABEL_FONT_PX) + 2.0 * LABEL_PAD_X).min(LABEL_MAX_WIDTH);
	if node.depth == 0 {
		Rect {
			x: node.x - w / 2.0,
			y: node.y - ROOT_HALO - LABEL_HEIGHT / 2.0,
			w,
			h: LABEL_HEIGHT,
		}
	} else {
		Rect {
			x: node.x + NODE_RADIUS + 7.0,
			y: node.y - LABEL_HEIGHT / 2.0,
			w,
			h: LABEL_HEIGHT,
		}
	}
}

/// First 30 characters of the analogy, for the hover preview.
pub fn analogy_preview(topic: &TopicNode) -> Option<String> {
	let analogy = topic.analogy.as_deref()?;
	Some(format!("{}...", analogy.chars().take(30).collect::<String>()))
}

impl RoadmapCanvasState {
	pub fn new(roadmap: Roadmap, width: f64, height: f64) -> Self {
		let layout = tree_layout(&roadmap, Viewport::new(width, height));
		Self {
			roadmap,
			layout,
			transform: ViewTransform::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		// last drawn is on top
		self.layout.nodes.iter().rev().find_map(|node| {
			let (dx, dy) = (node.x - gx, node.y - gy);
			let title = &self.roadmap.get(node.id).title;
			let hit = (dx * dx + dy * dy).sqrt() < halo_radius(node)
				|| label_rect(node, title).contains(gx, gy);
			hit.then_some(node.id)
		})
	}

	pub fn topic_at_position(&self, sx: f64, sy: f64) -> Option<TopicNode> {
		self.node_at_position(sx, sy)
			.map(|id| self.roadmap.get(id).clone())
	}

	/// Pointer-down at a screen position. A hit returns the topic and leaves
	/// the view alone; a miss starts panning.
	pub fn press(&mut self, sx: f64, sy: f64) -> Option<TopicNode> {
		let hit = self.topic_at_position(sx, sy);
		if hit.is_none() {
			self.begin_pan(sx, sy);
		}
		hit
	}

	pub fn set_hover(&mut self, node: Option<NodeId>) {
		if self.hover.node == node {
			return;
		}
		// keep the old node around while it fades out
		if self.hover.node.is_some() && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
		} else {
			self.hover.prev_node = None;
			self.hover.highlight_t = 0.0;
		}
		self.hover.node = node;
	}

	pub fn is_hovered(&self, id: NodeId) -> bool {
		self.hover.node == Some(id) || self.hover.prev_node == Some(id)
	}

	pub fn tick(&mut self, dt: f64) {
		let (target, speed) = if self.hover.node.is_some() {
			(1.0, 6.0)
		} else {
			(0.0, 4.0)
		};
		self.hover.highlight_t += (target - self.hover.highlight_t) * (speed * dt).min(1.0);
		if self.hover.node.is_none() && self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
			self.hover.prev_node = None;
		}
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, x: f64, y: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Zoom around the pointer; positive `delta_y` zooms out.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// New surface size; the layout is recomputed from scratch.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.relayout();
	}

	/// Swap in a new tree and lay it out for the current size. Returns
	/// whether anything changed.
	pub fn set_roadmap(&mut self, roadmap: Roadmap) -> bool {
		if self.roadmap == roadmap {
			return false;
		}
		self.roadmap = roadmap;
		self.relayout();
		true
	}

	fn relayout(&mut self) {
		self.layout = tree_layout(&self.roadmap, Viewport::new(self.width, self.height));
		// ids may no longer exist
		self.hover = HoverState::default();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn state() -> RoadmapCanvasState {
		RoadmapCanvasState::new(Roadmap::builtin().unwrap(), 1200.0, 800.0)
	}

	fn screen_pos(s: &RoadmapCanvasState, key: &str) -> (f64, f64) {
		let node = s.layout.node(s.roadmap.find(key).unwrap());
		(
			node.x * s.transform.k + s.transform.x,
			node.y * s.transform.k + s.transform.y,
		)
	}

	#[test]
	fn clicking_a_node_yields_its_full_topic() {
		let s = state();
		let (x, y) = screen_pos(&s, "attention");
		let topic = s.topic_at_position(x, y).unwrap();
		assert_eq!(topic.id, "attention");
		assert_eq!(topic.papers, ["Attention Is All You Need (Vaswani et al., 2017)"]);
	}

	#[test]
	fn clicking_a_label_selects_its_node() {
		let s = state();
		let id = s.roadmap.find("rag").unwrap();
		let rect = label_rect(s.layout.node(id), &s.roadmap.get(id).title);
		let (sx, sy) = (rect.x + rect.w - 2.0 + s.transform.x, rect.y + 2.0 + s.transform.y);
		assert_eq!(s.node_at_position(sx, sy), Some(id));
	}

	#[test]
	fn pressing_a_node_selects_without_panning() {
		let mut s = state();
		let (x, y) = screen_pos(&s, "attention");
		assert_eq!(s.press(x, y).map(|t| t.id), Some("attention".into()));
		assert!(!s.pan.active);
		assert_eq!(s.transform, ViewTransform::default());
	}

	#[test]
	fn pressing_empty_space_starts_a_pan() {
		let mut s = state();
		assert_eq!(s.press(-500.0, -500.0), None);
		assert!(s.pan.active);
		s.pan_to(-450.0, -480.0);
		assert_eq!((s.transform.x, s.transform.y), (ORIGIN_X + 50.0, ORIGIN_Y + 20.0));
	}

	#[test]
	fn new_roadmap_is_laid_out_at_current_size() {
		use crate::roadmap::{Category, topic};

		let mut s = state();
		s.set_hover(s.roadmap.find("rag"));
		let small = Roadmap::from_tree(
			topic("root", "Root", Category::Foundation, "")
				.children(vec![topic("only", "Only", Category::Training, "")]),
		)
		.unwrap();
		assert!(!s.set_roadmap(s.roadmap.clone()));
		assert!(s.set_roadmap(small.clone()));

		assert_eq!(s.layout, tree_layout(&small, Viewport::new(1200.0, 800.0)));
		assert_eq!(s.layout.nodes.len(), 2);
		assert_eq!(s.hover.node, None);
		let (x, y) = screen_pos(&s, "only");
		assert_eq!(s.topic_at_position(x, y).map(|t| t.id), Some("only".into()));
	}

	#[test]
	fn empty_space_hits_nothing() {
		let s = state();
		assert_eq!(s.node_at_position(-500.0, -500.0), None);
	}

	#[test]
	fn hit_testing_follows_pan_and_zoom() {
		let mut s = state();
		s.begin_pan(0.0, 0.0);
		s.pan_to(40.0, -25.0);
		s.end_pan();
		s.zoom_at(300.0, 300.0, -1.0);
		let (x, y) = screen_pos(&s, "sft");
		assert_eq!(s.topic_at_position(x, y).map(|t| t.id), Some("sft".into()));
		s.pan_to(1000.0, 1000.0);
		assert_eq!(s.topic_at_position(x, y).map(|t| t.id), Some("sft".into()));
	}

	#[test]
	fn zoom_is_clamped() {
		let mut s = state();
		for _ in 0..100 {
			s.zoom_at(0.0, 0.0, 1.0);
		}
		assert!((s.transform.k - MIN_ZOOM).abs() < 1e-9);
		for _ in 0..200 {
			s.zoom_at(0.0, 0.0, -1.0);
		}
		assert!((s.transform.k - MAX_ZOOM).abs() < 1e-9);
	}

	#[test]
	fn resize_replaces_the_layout() {
		let mut s = state();
		let before = s.layout.clone();
		s.resize(1600.0, 900.0);
		assert_ne!(s.layout, before);
		assert_eq!(s.layout, tree_layout(&s.roadmap, Viewport::new(1600.0, 900.0)));
	}

	#[test]
	fn hover_fades_in_and_out() {
		let mut s = state();
		let id = s.roadmap.find("rag").unwrap();
		s.set_hover(Some(id));
		for _ in 0..60 {
			s.tick(0.016);
		}
		assert!(s.hover.highlight_t > 0.9);

		s.set_hover(None);
		assert!(s.is_hovered(id));
		for _ in 0..120 {
			s.tick(0.016);
		}
		assert_eq!(s.hover.highlight_t, 0.0);
		assert!(!s.is_hovered(id));
	}

	#[test]
	fn analogy_preview_is_truncated() {
		let s = state();
		let topic = s.roadmap.get(s.roadmap.find("pruning_sparsity").unwrap());
		let preview = analogy_preview(topic).unwrap();
		assert_eq!(preview.chars().count(), 33);
		assert!(preview.ends_with("..."));
	}
}
