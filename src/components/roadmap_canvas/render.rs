use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{
	LABEL_FONT_PX, LABEL_PAD_X, Rect, RoadmapCanvasState, analogy_preview, halo_radius,
	label_rect, node_radius,
};
use crate::layout::LayoutNode;

const BACKGROUND: &str = "#0f172a";
const EDGE_COLOR: &str = "#334155";
const NODE_FILL: &str = "#1e293b";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &RoadmapCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &RoadmapCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_global_alpha(0.6);
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_line_width(2.0);
	for edge in &state.layout.edges {
		ctx.begin_path();
		ctx.move_to(edge.from.x, edge.from.y);
		ctx.bezier_curve_to(
			edge.c1.x, edge.c1.y, edge.c2.x, edge.c2.y, edge.to.x, edge.to.y,
		);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, r: &Rect, radius: f64) {
	let (x, y, w, h) = (r.x, r.y, r.w, r.h);
	ctx.begin_path();
	ctx.move_to(x + radius, y);
	ctx.line_to(x + w - radius, y);
	ctx.quadratic_curve_to(x + w, y, x + w, y + radius);
	ctx.line_to(x + w, y + h - radius);
	ctx.quadratic_curve_to(x + w, y + h, x + w - radius, y + h);
	ctx.line_to(x + radius, y + h);
	ctx.quadratic_curve_to(x, y + h, x, y + h - radius);
	ctx.line_to(x, y + radius);
	ctx.quadratic_curve_to(x, y, x + radius, y);
	ctx.close_path();
}

fn draw_nodes(state: &RoadmapCanvasState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);

	for node in &state.layout.nodes {
		let topic = state.roadmap.get(node.id);
		let color = topic.category.color();
		let is_root = node.depth == 0;
		let hover_t = if state.is_hovered(node.id) { t } else { 0.0 };
		let (x, y) = (node.x, node.y);

		if hover_t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, halo_radius(node), 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", 0.05 * hover_t));
			ctx.fill();

			let radius = node_radius(node);
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius, x, y, radius * 3.0) {
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", 0.4 * hover_t));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, radius * 3.0, 0.0, 2.0 * PI);
				ctx.set_fill_style_canvas_gradient(&gradient);
				ctx.fill();
			}
		}

		let radius = node_radius(node) * (1.0 + 0.25 * hover_t);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(NODE_FILL);
		ctx.fill();
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(if is_root { 4.0 } else { 2.0 });
		ctx.stroke();

		draw_label(state, ctx, node, hover_t);
	}
}

fn draw_label(
	state: &RoadmapCanvasState,
	ctx: &CanvasRenderingContext2d,
	node: &LayoutNode,
	hover_t: f64,
) {
	let topic = state.roadmap.get(node.id);
	let rect = label_rect(node, &topic.title);

	rounded_rect(ctx, &rect, 6.0);
	ctx.set_fill_style_str(if hover_t > 0.5 {
		"rgba(30, 41, 59, 0.95)"
	} else {
		"rgba(15, 23, 42, 0.9)"
	});
	ctx.fill();
	ctx.set_stroke_style_str(if hover_t > 0.5 {
		"rgba(100, 116, 139, 0.8)"
	} else {
		"rgba(51, 65, 85, 0.5)"
	});
	ctx.set_line_width(1.0);
	ctx.stroke();

	ctx.set_font(&format!("500 {}px sans-serif", LABEL_FONT_PX));
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(if hover_t > 0.5 { "#ffffff" } else { "#e2e8f0" });
	let text_y = rect.y + rect.h / 2.0;
	if node.depth == 0 {
		ctx.set_text_align("center");
		let _ = ctx.fill_text_with_max_width(
			&topic.title,
			rect.x + rect.w / 2.0,
			text_y,
			rect.w - 2.0 * LABEL_PAD_X,
		);
	} else {
		ctx.set_text_align("left");
		let _ = ctx.fill_text_with_max_width(
			&topic.title,
			rect.x + LABEL_PAD_X,
			text_y,
			rect.w - 2.0 * LABEL_PAD_X,
		);
		if let Some(preview) = analogy_preview(topic).filter(|_| hover_t > 0.01) {
			ctx.set_global_alpha(hover_t);
			ctx.set_font("10px sans-serif");
			ctx.set_fill_style_str("#64748b");
			let _ = ctx.fill_text(&preview, rect.x + 4.0, rect.y + rect.h + 10.0);
			ctx.set_global_alpha(1.0);
		}
	}
}
