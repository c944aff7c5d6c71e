//! Horizontal tidy-tree layout.
//!
//! Positions are computed with the Reingold-Tilford algorithm in its linear
//! time form (Walker, with the Buchheim/Jünger/Leipert fixes), then scaled to
//! the viewport. Breadth runs top to bottom, depth left to right.

use crate::roadmap::{NodeId, Roadmap};

/// Space reserved around the tree on the breadth (vertical) axis.
pub const BREADTH_MARGIN: f64 = 150.0;
/// Space reserved around the tree on the depth (horizontal) axis.
pub const DEPTH_MARGIN: f64 = 300.0;

const SIBLING_SEPARATION: f64 = 1.5;
const COUSIN_SEPARATION: f64 = 2.0;
const MIN_EXTENT: f64 = 1.0;

/// Size of the display surface in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

impl Viewport {
	/// New viewport.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// 2-D point in layout space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

/// A topic with its computed position.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
	/// Topic this entry positions.
	pub id: NodeId,
	/// Horizontal position; grows with depth.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Distance from the root.
	pub depth: usize,
	/// Where the parent sits, for edge drawing.
	pub parent: Option<Point>,
}

impl LayoutNode {
	/// Position as a point.
	pub fn point(&self) -> Point {
		Point {
			x: self.x,
			y: self.y,
		}
	}
}

/// Horizontal cubic Bézier between a parent and one of its children.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeCurve {
	/// Parent topic.
	pub parent: NodeId,
	/// Child topic.
	pub child: NodeId,
	/// Start point (parent position).
	pub from: Point,
	/// First control point.
	pub c1: Point,
	/// Second control point.
	pub c2: Point,
	/// End point (child position).
	pub to: Point,
}

impl EdgeCurve {
	fn between(parent: NodeId, child: NodeId, from: Point, to: Point) -> Self {
		let mid = (from.x + to.x) / 2.0;
		Self {
			parent,
			child,
			from,
			c1: Point { x: mid, y: from.y },
			c2: Point { x: mid, y: to.y },
			to,
		}
	}

	/// Point on the curve for `t` in `0.0..=1.0`.
	pub fn point_at(&self, t: f64) -> Point {
		let u = 1.0 - t;
		let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
		Point {
			x: a * self.from.x + b * self.c1.x + c * self.c2.x + d * self.to.x,
			y: a * self.from.y + b * self.c1.y + c * self.c2.y + d * self.to.y,
		}
	}
}

/// Complete geometry of a roadmap for one viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
	/// One entry per topic, indexed like the roadmap arena.
	pub nodes: Vec<LayoutNode>,
	/// One curve per parent/child pair.
	pub edges: Vec<EdgeCurve>,
	/// Horizontal extent the tree was scaled to.
	pub width: f64,
	/// Vertical extent the tree was scaled to.
	pub height: f64,
}

impl Layout {
	/// Layout entry of `id`.
	pub fn node(&self, id: NodeId) -> &LayoutNode {
		&self.nodes[id.index()]
	}
}

#[derive(Clone, Debug)]
struct Walk {
	prelim: f64,
	modifier: f64,
	change: f64,
	shift: f64,
	thread: Option<usize>,
	ancestor: usize,
	default_ancestor: Option<usize>,
	sibling_index: usize,
}

struct Walker<'a> {
	roadmap: &'a Roadmap,
	walk: Vec<Walk>,
}

impl<'a> Walker<'a> {
	fn new(roadmap: &'a Roadmap) -> Self {
		let mut walk: Vec<Walk> = (0..roadmap.len())
			.map(|i| Walk {
				prelim: 0.0,
				modifier: 0.0,
				change: 0.0,
				shift: 0.0,
				thread: None,
				ancestor: i,
				default_ancestor: None,
				sibling_index: 0,
			})
			.collect();
		for id in roadmap.iter() {
			for (i, child) in roadmap.children(id).iter().enumerate() {
				walk[child.index()].sibling_index = i;
			}
		}
		Self { roadmap, walk }
	}

	fn parent(&self, v: usize) -> Option<usize> {
		self.roadmap.parent(NodeId::from_index(v)).map(NodeId::index)
	}

	fn children(&self, v: usize) -> &'a [NodeId] {
		self.roadmap.children(NodeId::from_index(v))
	}

	fn first_sibling(&self, v: usize) -> usize {
		match self.parent(v) {
			Some(p) => self.children(p)[0].index(),
			None => v,
		}
	}

	fn left_sibling(&self, v: usize) -> Option<usize> {
		let i = self.walk[v].sibling_index;
		let p = self.parent(v)?;
		(i > 0).then(|| self.children(p)[i - 1].index())
	}

	fn next_left(&self, v: usize) -> Option<usize> {
		match self.children(v).first() {
			Some(c) => Some(c.index()),
			None => self.walk[v].thread,
		}
	}

	fn next_right(&self, v: usize) -> Option<usize> {
		match self.children(v).last() {
			Some(c) => Some(c.index()),
			None => self.walk[v].thread,
		}
	}

	fn separation(&self, a: usize, b: usize) -> f64 {
		if self.parent(a) == self.parent(b) {
			SIBLING_SEPARATION
		} else {
			COUSIN_SEPARATION
		}
	}

	fn first_walk(&mut self, v: usize) {
		let left = self.left_sibling(v);
		let children = self.children(v);
		if let (Some(first), Some(last)) = (children.first(), children.last()) {
			self.execute_shifts(v);
			let midpoint = (self.walk[first.index()].prelim + self.walk[last.index()].prelim) / 2.0;
			match left {
				Some(w) => {
					self.walk[v].prelim = self.walk[w].prelim + self.separation(v, w);
					self.walk[v].modifier = self.walk[v].prelim - midpoint;
				}
				None => self.walk[v].prelim = midpoint,
			}
		} else if let Some(w) = left {
			self.walk[v].prelim = self.walk[w].prelim + self.separation(v, w);
		}

		if let Some(p) = self.parent(v) {
			let ancestor = self.walk[p]
				.default_ancestor
				.unwrap_or_else(|| self.first_sibling(v));
			let next = self.apportion(v, left, ancestor);
			self.walk[p].default_ancestor = Some(next);
		}
	}

	fn apportion(&mut self, v: usize, left: Option<usize>, mut ancestor: usize) -> usize {
		let Some(w) = left else {
			return ancestor;
		};
		// inside/outside contours of the right (p) and left (m) subtrees
		let (mut vip, mut vop, mut vim, mut vom) = (v, v, w, self.first_sibling(v));
		let mut sip = self.walk[vip].modifier;
		let mut sop = self.walk[vop].modifier;
		let mut sim = self.walk[vim].modifier;
		let mut som = self.walk[vom].modifier;

		let (rest_im, rest_ip) = loop {
			let (next_im, next_ip) = (self.next_right(vim), self.next_left(vip));
			let (Some(im), Some(ip)) = (next_im, next_ip) else {
				break (next_im, next_ip);
			};
			let (Some(om), Some(op)) = (self.next_left(vom), self.next_right(vop)) else {
				break (next_im, next_ip);
			};
			(vim, vip, vom, vop) = (im, ip, om, op);
			self.walk[vop].ancestor = v;

			let shift = self.walk[vim].prelim + sim - self.walk[vip].prelim - sip
				+ self.separation(vim, vip);
			if shift > 0.0 {
				let from = self.next_ancestor(vim, v, ancestor);
				self.move_subtree(from, v, shift);
				sip += shift;
				sop += shift;
			}
			sim += self.walk[vim].modifier;
			sip += self.walk[vip].modifier;
			som += self.walk[vom].modifier;
			sop += self.walk[vop].modifier;
		};

		if let Some(im) = rest_im {
			if self.next_right(vop).is_none() {
				self.walk[vop].thread = Some(im);
				self.walk[vop].modifier += sim - sop;
			}
		}
		if let Some(ip) = rest_ip {
			if self.next_left(vom).is_none() {
				self.walk[vom].thread = Some(ip);
				self.walk[vom].modifier += sip - som;
				ancestor = v;
			}
		}
		ancestor
	}

	fn next_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
		let candidate = self.walk[vim].ancestor;
		if self.parent(candidate) == self.parent(v) {
			candidate
		} else {
			ancestor
		}
	}

	fn move_subtree(&mut self, wm: usize, wp: usize, shift: f64) {
		let span = self.walk[wp].sibling_index as f64 - self.walk[wm].sibling_index as f64;
		let change = shift / span;
		self.walk[wp].change -= change;
		self.walk[wp].shift += shift;
		self.walk[wm].change += change;
		self.walk[wp].prelim += shift;
		self.walk[wp].modifier += shift;
	}

	fn execute_shifts(&mut self, v: usize) {
		let (mut shift, mut change) = (0.0, 0.0);
		for child in self.children(v).iter().rev() {
			let w = &mut self.walk[child.index()];
			w.prelim += shift;
			w.modifier += shift;
			change += w.change;
			shift += w.shift + change;
		}
	}

	/// Unscaled breadth coordinate per node.
	fn run(mut self) -> Vec<f64> {
		for v in self.roadmap.post_order() {
			self.first_walk(v.index());
		}

		let root = self.roadmap.root().index();
		let mut breadth = vec![0.0; self.walk.len()];
		for v in self.roadmap.iter().map(NodeId::index) {
			let parent_mod = match self.parent(v) {
				Some(p) => self.walk[p].modifier,
				None => -self.walk[root].prelim,
			};
			breadth[v] = self.walk[v].prelim + parent_mod;
			self.walk[v].modifier += parent_mod;
		}
		breadth
	}
}

/// Lay `roadmap` out to fit `viewport`.
///
/// The tree is scaled into `(width - DEPTH_MARGIN) x (height - BREADTH_MARGIN)`,
/// each extent clamped to at least one pixel.
pub fn tree_layout(roadmap: &Roadmap, viewport: Viewport) -> Layout {
	let breadth_extent = (viewport.height - BREADTH_MARGIN).max(MIN_EXTENT);
	let depth_extent = (viewport.width - DEPTH_MARGIN).max(MIN_EXTENT);

	let walker = Walker::new(roadmap);
	let raw = walker.run();

	let root = roadmap.root();
	let (mut left, mut right, mut bottom) = (root, root, root);
	for v in roadmap.iter() {
		if raw[v.index()] < raw[left.index()] {
			left = v;
		}
		if raw[v.index()] > raw[right.index()] {
			right = v;
		}
		if roadmap.depth(v) > roadmap.depth(bottom) {
			bottom = v;
		}
	}

	let s = if left == right {
		1.0
	} else if roadmap.parent(left) == roadmap.parent(right) {
		SIBLING_SEPARATION / 2.0
	} else {
		COUSIN_SEPARATION / 2.0
	};
	let tx = s - raw[left.index()];
	let kx = breadth_extent / (raw[right.index()] + s + tx);
	let ky = depth_extent / roadmap.depth(bottom).max(1) as f64;

	let position = |v: NodeId| Point {
		x: roadmap.depth(v) as f64 * ky,
		y: (raw[v.index()] + tx) * kx,
	};

	let nodes: Vec<LayoutNode> = roadmap
		.iter()
		.map(|v| {
			let p = position(v);
			LayoutNode {
				id: v,
				x: p.x,
				y: p.y,
				depth: roadmap.depth(v),
				parent: roadmap.parent(v).map(position),
			}
		})
		.collect();

	let edges = roadmap
		.iter()
		.filter_map(|child| {
			let parent = roadmap.parent(child)?;
			Some(EdgeCurve::between(
				parent,
				child,
				nodes[parent.index()].point(),
				nodes[child.index()].point(),
			))
		})
		.collect();

	Layout {
		nodes,
		edges,
		width: depth_extent,
		height: breadth_extent,
	}
}
