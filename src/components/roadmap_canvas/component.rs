use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::RoadmapCanvasState;
use crate::roadmap::{Roadmap, TopicNode};

type CanvasState = Rc<RefCell<Option<RoadmapCanvasState>>>;

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	let w = window.inner_width().ok()?.as_f64()?;
	let h = window.inner_height().ok()?.as_f64()?;
	Some((w, h))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Pointer position relative to the canvas.
fn local_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Full-window canvas drawing `roadmap` as a left-to-right tree.
///
/// Clicking a node calls `on_select` with its topic; dragging the background
/// pans and the wheel zooms.
#[component]
pub fn RoadmapCanvas(
	#[prop(into)] roadmap: Signal<Roadmap>,
	#[prop(into)] on_select: Callback<TopicNode>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: CanvasState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("no window; roadmap canvas not started");
			return;
		};
		let Some((w, h)) = viewport_size(&window) else {
			warn!("viewport size unavailable; roadmap canvas not started");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("2d context unavailable; roadmap canvas not started");
			return;
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		*state_init.borrow_mut() = Some(RoadmapCanvasState::new(roadmap.get_untracked(), w, h));
		debug!("roadmap laid out for {}x{}", w, h);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
				return;
			};
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
				debug!("roadmap re-laid out for {}x{}", nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		let mut last_frame = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last_frame) / 1000.0).min(0.1);
			last_frame = now;
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(dt);
				render::render(s, &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// a new tree is laid out in place; the first run happens before mount
	let state_tree = state.clone();
	Effect::new(move |_| {
		let tree = roadmap.get();
		if let Some(ref mut s) = *state_tree.borrow_mut() {
			if s.set_roadmap(tree) {
				debug!("roadmap replaced; {} topics laid out", s.roadmap.len());
			}
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		let hit = match *state_md.borrow_mut() {
			Some(ref mut s) => s.press(x, y),
			None => return,
		};
		if let Some(topic) = hit {
			ev.stop_propagation();
			debug!("selected topic {}", topic.id);
			on_select.run(topic);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.pan.active {
				s.pan_to(x, y);
			} else {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}
			let cursor = match (s.pan.active, s.hover.node.is_some()) {
				(true, _) => "grabbing",
				(false, true) => "pointer",
				(false, false) => "grab",
			};
			if let Some(canvas) = canvas_ref.get() {
				let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.end_pan();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.end_pan();
			s.set_hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom_at(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="roadmap-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
