//! Leptos component wrapping one group canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, zooming and hover highlighting. An
//! animation loop runs via `requestAnimationFrame`, stepping the layout and
//! redrawing each frame until the component is disposed.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::ForceGraphState;
use super::theme::Theme;
use crate::grouping::ElementList;

/// Simulation state plus the theme it was built with.
struct GraphContext {
	state: ForceGraphState,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;

/// Width used when neither a width prop nor a sized parent is available.
const FALLBACK_WIDTH: f64 = 320.0;

/// Renders an interactive layout of one group's elements.
///
/// The canvas is `height` pixels tall and as wide as its parent unless `width`
/// is given. Whenever `data` changes the layout restarts from the new elements.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<ElementList>,
	#[prop(default = 224.0)] height: f64,
	#[prop(default = None)] width: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));

	on_cleanup({
		let alive = alive.clone();
		move || alive.store(false, Ordering::Relaxed)
	});

	let (context_init, animate_init) = (context.clone(), animate.clone());
	Effect::new(move |_| {
		let elements = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		if let Some(ref mut c) = *context_init.borrow_mut() {
			debug!("canvas: relayout with {} nodes", elements.nodes.len());
			c.state = ForceGraphState::new(&elements, c.state.width, c.state.height, &c.theme);
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let w = width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(FALLBACK_WIDTH)
		});
		canvas.set_width(w as u32);
		canvas.set_height(height as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas: 2d context unavailable");
			return;
		};

		let theme = Theme::default();
		*context_init.borrow_mut() = Some(GraphContext {
			state: ForceGraphState::new(&elements, w, height, &theme),
			theme,
		});

		let (context_anim, animate_inner, alive) =
			(context_init.clone(), animate_init.clone(), alive.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive.load(Ordering::Relaxed) {
				context_anim.borrow_mut().take();
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if c.state.animation_running {
					c.state.tick(0.016);
				}
				render::render(&c.state, &ctx, &c.theme);
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(window), Some(cb)) = (web_sys::window(), animate_init.borrow().as_ref()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let local_point = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(&ev) else {
			return;
		};
		let mut guard = context_md.borrow_mut();
		let Some(c) = guard.as_mut() else {
			return;
		};
		if let Some(idx) = c.state.node_at_position(x, y, &c.theme) {
			let drag = &mut c.state.drag;
			drag.active = true;
			drag.node_idx = Some(idx);
			drag.start_x = x;
			drag.start_y = y;
			c.state.graph.visit_nodes(|node| {
				if node.index() == idx {
					drag.node_start_x = node.x();
					drag.node_start_y = node.y();
				}
			});
		} else {
			c.state.pan.active = true;
			c.state.pan.start_x = x;
			c.state.pan.start_y = y;
			c.state.pan.transform_start_x = c.state.transform.x;
			c.state.pan.transform_start_y = c.state.transform.y;
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(&ev) else {
			return;
		};
		let mut guard = context_mm.borrow_mut();
		let Some(c) = guard.as_mut() else {
			return;
		};

		if !c.state.drag.active {
			let hovered = c.state.node_at_position(x, y, &c.theme);
			c.state.set_hover(hovered);
		}

		if c.state.drag.active {
			if let Some(idx) = c.state.drag.node_idx {
				let k = c.state.transform.k;
				let nx = c.state.drag.node_start_x + ((x - c.state.drag.start_x) / k) as f32;
				let ny = c.state.drag.node_start_y + ((y - c.state.drag.start_y) / k) as f32;
				c.state.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if c.state.pan.active {
			c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
			c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
			c.state.set_hover(None);
		}
	};

	let context_wh = context;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(&ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (c.state.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / c.state.transform.k;
			c.state.transform.x = x - (x - c.state.transform.x) * ratio;
			c.state.transform.y = y - (y - c.state.transform.y) * ratio;
			c.state.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="group-canvas"
			draggable="false"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
