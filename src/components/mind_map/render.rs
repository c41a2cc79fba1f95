use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{MindMapState, node_rect, source_handle, target_handle};
use super::style::{HANDLE_RADIUS, NODE_CORNER, NODE_HEIGHT, NODE_WIDTH};
use super::types::{Position, PositionedNode, RenderedEdge};
use super::viewport::Rect;

const BACKGROUND: &str = "#f8fafc";
const DOT_COLOR: &str = "rgba(100, 116, 139, 0.3)";
const DOT_GAP: f64 = 20.0;
const LABEL_CHARS: usize = 20;
const DIMMED_ALPHA: f64 = 0.35;

/// Shorten `label` to at most `max` characters, ending in an ellipsis when cut.
pub fn fit_label(label: &str, max: usize) -> String {
	if label.chars().count() <= max {
		return label.to_owned();
	}
	let mut out: String = label.chars().take(max.saturating_sub(1)).collect();
	out.push('…');
	out
}

/// Corner points of a smooth-step edge from `from` (pointing down) to `to` (entered from above).
pub fn step_path(from: Position, to: Position) -> [Position; 4] {
	let mid_y = (from.y + to.y) / 2.0;
	[
		from,
		Position::new(from.x, mid_y),
		Position::new(to.x, mid_y),
		to,
	]
}

pub fn render(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_dots(state, ctx);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	draw_pending_connection(state, ctx);
	ctx.restore();

	if state.show_minimap {
		draw_minimap(state, ctx);
	}
}

fn draw_dots(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	let gap = DOT_GAP * state.transform.k;
	if gap < 4.0 {
		return;
	}
	// Dots sit on the layout-space lattice, so they move with pans and zooms.
	let (origin_x, origin_y) = state.transform.layout_to_screen(Position::default());
	let (ox, oy) = (origin_x.rem_euclid(gap), origin_y.rem_euclid(gap));
	ctx.set_fill_style_str(DOT_COLOR);
	let mut x = ox;
	while x < state.width {
		let mut y = oy;
		while y < state.height {
			ctx.fill_rect(x - 0.5, y - 0.5, 1.0, 1.0);
			y += gap;
		}
		x += gap;
	}
}

fn draw_edges(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (dash, gap, arrow) = (5.0, 5.0, 8.0);
	let offset = -(state.flow_time * 20.0) % (dash + gap);

	for edge in &state.edges {
		let Some((source, target)) = state.resolve_edge(edge) else {
			continue;
		};
		let dimmed = state.has_active_highlight()
			&& !(state.is_highlighted(&source.id) && state.is_highlighted(&target.id));
		ctx.set_global_alpha(if dimmed { DIMMED_ALPHA } else { 1.0 });
		draw_edge(ctx, edge, source, target, k, (dash, gap, offset), arrow);
	}
	ctx.set_global_alpha(1.0);
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	edge: &RenderedEdge,
	source: &PositionedNode,
	target: &PositionedNode,
	k: f64,
	(dash, gap, offset): (f64, f64, f64),
	arrow: f64,
) {
	let end = target_handle(target);
	let tip = Position::new(end.x, end.y - HANDLE_RADIUS);
	let points = step_path(source_handle(source), tip);

	ctx.set_stroke_style_str(edge.style.stroke);
	ctx.set_line_width(1.5_f64.max(1.0 / k));
	if edge.style.animated {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(offset);
	} else {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}
	ctx.begin_path();
	ctx.move_to(points[0].x, points[0].y);
	for p in &points[1..] {
		ctx.line_to(p.x, p.y);
	}
	ctx.stroke();

	// Arrowhead follows the last segment, which may point up for back edges.
	let dir = if points[3].y >= points[2].y { 1.0 } else { -1.0 };
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_fill_style_str(edge.style.stroke);
	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(tip.x - arrow * 0.5, tip.y - arrow * dir);
	ctx.line_to(tip.x + arrow * 0.5, tip.y - arrow * dir);
	ctx.close_path();
	ctx.fill();
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, r: Rect, radius: f64) {
	ctx.begin_path();
	ctx.move_to(r.min_x + radius, r.min_y);
	let _ = ctx.arc_to(r.max_x, r.min_y, r.max_x, r.max_y, radius);
	let _ = ctx.arc_to(r.max_x, r.max_y, r.min_x, r.max_y, radius);
	let _ = ctx.arc_to(r.min_x, r.max_y, r.min_x, r.min_y, radius);
	let _ = ctx.arc_to(r.min_x, r.min_y, r.max_x, r.min_y, radius);
	ctx.close_path();
}

fn draw_nodes(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	let has_highlight = state.has_active_highlight();

	for node in &state.nodes {
		let style = node.category.style();
		let rect = node_rect(node);
		let alpha = if has_highlight && !state.is_highlighted(&node.id) {
			DIMMED_ALPHA
		} else {
			1.0
		};
		ctx.set_global_alpha(alpha);

		ctx.set_shadow_color("rgba(15, 23, 42, 0.12)");
		ctx.set_shadow_blur(10.0);
		ctx.set_shadow_offset_y(3.0);
		rounded_rect(ctx, rect, NODE_CORNER);
		// Category fills are translucent, so lay them over an opaque base.
		ctx.set_fill_style_str("#ffffff");
		ctx.fill();
		ctx.set_shadow_color("transparent");
		ctx.set_fill_style_str(style.fill);
		ctx.fill();
		ctx.set_stroke_style_str(style.border);
		ctx.set_line_width(2.0);
		ctx.stroke();

		let cx = node.position.x + NODE_WIDTH / 2.0;
		ctx.set_text_align("center");
		ctx.set_fill_style_str(style.text);
		ctx.set_font("500 13px sans-serif");
		let _ = ctx.fill_text(&fit_label(&node.label, LABEL_CHARS), cx, node.position.y + 24.0);
		ctx.set_fill_style_str(style.subtext);
		ctx.set_font("11px sans-serif");
		let _ = ctx.fill_text(node.category.as_str(), cx, node.position.y + 42.0);

		for h in [target_handle(node), source_handle(node)] {
			ctx.begin_path();
			let _ = ctx.arc(h.x, h.y, HANDLE_RADIUS * 0.8, 0.0, 2.0 * PI);
			ctx.set_fill_style_str("#1e293b");
			ctx.fill();
		}
	}
	ctx.set_global_alpha(1.0);

	if let Some(node) = state.hover.node.as_deref().and_then(|id| state.node(id)) {
		rounded_rect(ctx, node_rect(node), NODE_CORNER);
		ctx.set_stroke_style_str("rgba(99, 102, 241, 0.9)");
		ctx.set_line_width(2.0 / state.transform.k);
		ctx.stroke();
	}
}

fn draw_pending_connection(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	let Some(source) = state.connect.source.as_deref().and_then(|id| state.node(id)) else {
		return;
	};
	let from = source_handle(source);
	let to = state.connect.cursor;
	ctx.set_stroke_style_str("#94a3b8");
	ctx.set_line_width(1.5 / state.transform.k);
	ctx.begin_path();
	ctx.move_to(from.x, from.y);
	ctx.line_to(to.x, to.y);
	ctx.stroke();
}

fn draw_minimap(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	let map = state.minimap();
	let panel = map.panel;

	ctx.set_fill_style_str("rgba(255, 255, 255, 0.92)");
	ctx.fill_rect(panel.min_x, panel.min_y, panel.width(), panel.height());
	ctx.set_stroke_style_str("#e2e8f0");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(panel.min_x, panel.min_y, panel.width(), panel.height());

	for node in &state.nodes {
		let (x, y) = map.project(node.position);
		let (w, h) = (NODE_WIDTH * map.scale, NODE_HEIGHT * map.scale);
		ctx.set_fill_style_str(node.category.style().border);
		ctx.fill_rect(x, y, w.max(1.0), h.max(1.0));
	}

	let visible = state.transform.visible(state.width, state.height);
	let (vx, vy) = map.project(Position::new(visible.min_x, visible.min_y));
	ctx.set_stroke_style_str("rgba(99, 102, 241, 0.8)");
	ctx.stroke_rect(vx, vy, visible.width() * map.scale, visible.height() * map.scale);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_labels_are_kept() {
		assert_eq!(fit_label("main.rs", 20), "main.rs");
	}

	#[test]
	fn long_labels_are_cut_with_an_ellipsis() {
		let out = fit_label("src/components/mind_map/state.rs", 12);
		assert_eq!(out.chars().count(), 12);
		assert!(out.ends_with('…'));
		assert!(out.starts_with("src/compone"));
	}

	#[test]
	fn step_path_turns_halfway_down() {
		let [a, b, c, d] = step_path(Position::new(0.0, 0.0), Position::new(100.0, 80.0));
		assert_eq!(a, Position::new(0.0, 0.0));
		assert_eq!(b, Position::new(0.0, 40.0));
		assert_eq!(c, Position::new(100.0, 40.0));
		assert_eq!(d, Position::new(100.0, 80.0));
	}
}
