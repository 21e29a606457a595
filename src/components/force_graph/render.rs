//! Canvas rendering for group canvases.
//!
//! Draws in two passes after clearing: edges (with arrow heads) under nodes,
//! then nodes with their labels. While a node is hovered everything outside its
//! neighborhood is dimmed.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasEdge, ForceGraphState, NodeInfo};
use super::theme::{Color, Theme};

/// Renders the complete graph to the canvas.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, theme);
	draw_nodes(state, ctx, theme);

	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let positions = state.positions();
	let k = state.transform.k;

	for edge in state.edges() {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		let alpha = if !state.has_highlight()
			|| (state.is_highlighted(edge.source) && state.is_highlighted(edge.target))
		{
			1.0
		} else {
			theme.dim_alpha
		};
		draw_edge(ctx, theme, edge, (x1, y1), (x2, y2), alpha, k);
	}

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	edge: &CanvasEdge,
	(x1, y1): (f64, f64),
	(x2, y2): (f64, f64),
	alpha: f64,
	k: f64,
) {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let radius = theme.node.radius;
	let arrow = theme.edge.arrow_size;

	let base = if edge.dashed {
		theme.edge.ref_color
	} else {
		theme.edge.dep_color
	};
	let color = base.with_alpha(base.a * alpha);

	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(theme.edge.line_width / k);
	if edge.dashed {
		let (dash, gap) = theme.edge.ref_dash;
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash / k),
			&JsValue::from_f64(gap / k),
		));
	} else {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}

	ctx.begin_path();
	ctx.move_to(x1 + ux * radius, y1 + uy * radius);
	ctx.line_to(x2 - ux * (radius + arrow), y2 - uy * (radius + arrow));
	ctx.stroke();

	// Arrow head points at the target.
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_fill_style_str(&color.to_css());
	let (tip_x, tip_y) = (x2 - ux * radius, y2 - uy * radius);
	let (back_x, back_y) = (tip_x - ux * arrow, tip_y - uy * arrow);
	let (px, py) = (-uy * arrow * 0.5, ux * arrow * 0.5);

	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let k = state.transform.k;
	let font = format!("{}px sans-serif", theme.node.label_size / k.max(0.5));

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let alpha = if !state.has_highlight() || state.is_highlighted(idx) {
			1.0
		} else {
			theme.dim_alpha
		};
		let hovered = state.hovered() == Some(idx);
		draw_node(ctx, node, theme, alpha, hovered, k, &font);
	});
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &force_graph::Node<NodeInfo>,
	theme: &Theme,
	alpha: f64,
	hovered: bool,
	k: f64,
	font: &str,
) {
	let (x, y) = (node.x() as f64, node.y() as f64);
	let info = &node.data.user_data;
	let radius = if hovered {
		theme.node.radius * 1.3
	} else {
		theme.node.radius
	};

	ctx.set_global_alpha(alpha);

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&info.color);
	ctx.fill();

	if theme.node.border_width > 0.0 {
		let border = if hovered {
			theme.node.border_color
		} else {
			theme.node.border_color.lighten(0.3)
		};
		ctx.set_stroke_style_str(&border.to_css());
		ctx.set_line_width(theme.node.border_width / k);
		ctx.stroke();
	}

	ctx.set_fill_style_str(&label_color(theme, hovered).to_css());
	ctx.set_font(font);
	let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 3.0);

	ctx.set_global_alpha(1.0);
}

fn label_color(theme: &Theme, hovered: bool) -> Color {
	if hovered {
		theme.node.label_color.with_alpha(1.0)
	} else {
		theme.node.label_color
	}
}
